use serde::{Deserialize, Serialize};

/// Типы расхождений при приёмке перемещения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyKind {
    /// Недостача по количеству
    MissingQuantity,
    /// Повреждение при транспортировке
    Damaged,
    /// Пришёл не тот товар
    WrongProduct,
    /// Истёк срок годности
    Expired,
    /// Прочее
    Other,
}

impl DiscrepancyKind {
    /// Код расхождения (wire-формат)
    pub fn code(&self) -> &'static str {
        match self {
            DiscrepancyKind::MissingQuantity => "missing_quantity",
            DiscrepancyKind::Damaged => "damaged",
            DiscrepancyKind::WrongProduct => "wrong_product",
            DiscrepancyKind::Expired => "expired",
            DiscrepancyKind::Other => "other",
        }
    }

    /// Человекочитаемое название
    pub fn display_name(&self) -> &'static str {
        match self {
            DiscrepancyKind::MissingQuantity => "Недостача",
            DiscrepancyKind::Damaged => "Повреждение",
            DiscrepancyKind::WrongProduct => "Не тот товар",
            DiscrepancyKind::Expired => "Истёк срок годности",
            DiscrepancyKind::Other => "Прочее",
        }
    }

    /// Все типы расхождений (для выпадающих списков)
    pub fn all() -> Vec<DiscrepancyKind> {
        vec![
            DiscrepancyKind::MissingQuantity,
            DiscrepancyKind::Damaged,
            DiscrepancyKind::WrongProduct,
            DiscrepancyKind::Expired,
            DiscrepancyKind::Other,
        ]
    }

    /// Парсинг из кода
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "missing_quantity" => Some(DiscrepancyKind::MissingQuantity),
            "damaged" => Some(DiscrepancyKind::Damaged),
            "wrong_product" => Some(DiscrepancyKind::WrongProduct),
            "expired" => Some(DiscrepancyKind::Expired),
            "other" => Some(DiscrepancyKind::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for DiscrepancyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
