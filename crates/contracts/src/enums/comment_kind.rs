use serde::{Deserialize, Serialize};

/// Типы комментариев к приёмке
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentKind {
    /// Общий комментарий
    General,
    /// Комментарий по расхождению
    Discrepancy,
}

impl CommentKind {
    pub fn code(&self) -> &'static str {
        match self {
            CommentKind::General => "general",
            CommentKind::Discrepancy => "discrepancy",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CommentKind::General => "Общий",
            CommentKind::Discrepancy => "По расхождению",
        }
    }
}
