use serde::{Deserialize, Serialize};

/// Статусы записи приёмки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceptionStatus {
    /// Принято без расхождений
    Received,
    /// Принято, есть неурегулированные расхождения
    WithDiscrepancies,
    /// Все расхождения урегулированы
    Resolved,
}

impl ReceptionStatus {
    pub fn code(&self) -> &'static str {
        match self {
            ReceptionStatus::Received => "received",
            ReceptionStatus::WithDiscrepancies => "with_discrepancies",
            ReceptionStatus::Resolved => "resolved",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ReceptionStatus::Received => "Принято",
            ReceptionStatus::WithDiscrepancies => "С расхождениями",
            ReceptionStatus::Resolved => "Урегулировано",
        }
    }

    /// Приёмка содержит неурегулированные расхождения
    pub fn has_open_discrepancies(&self) -> bool {
        matches!(self, ReceptionStatus::WithDiscrepancies)
    }
}

impl std::fmt::Display for ReceptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
