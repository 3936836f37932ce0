use serde::{Deserialize, Serialize};

/// Статусы документа межскладского перемещения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferStatus {
    /// Черновик
    Draft,
    /// В пути
    InTransit,
    /// Принято без расхождений
    Received,
    /// Принято с расхождениями
    WithDiscrepancies,
    /// Расхождения урегулированы
    Resolved,
    /// Отменено
    Cancelled,
}

impl TransferStatus {
    pub fn code(&self) -> &'static str {
        match self {
            TransferStatus::Draft => "draft",
            TransferStatus::InTransit => "in_transit",
            TransferStatus::Received => "received",
            TransferStatus::WithDiscrepancies => "with_discrepancies",
            TransferStatus::Resolved => "resolved",
            TransferStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TransferStatus::Draft => "Черновик",
            TransferStatus::InTransit => "В пути",
            TransferStatus::Received => "Принято",
            TransferStatus::WithDiscrepancies => "Принято с расхождениями",
            TransferStatus::Resolved => "Урегулировано",
            TransferStatus::Cancelled => "Отменено",
        }
    }

    /// Перемещение ожидает приёмки на складе-получателе
    pub fn awaits_reception(&self) -> bool {
        matches!(self, TransferStatus::InTransit)
    }
}

impl std::fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
