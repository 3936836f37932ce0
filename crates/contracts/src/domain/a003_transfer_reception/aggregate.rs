use crate::domain::a002_warehouse_transfer::aggregate::WarehouseTransferId;
use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::enums::comment_kind::CommentKind;
use crate::enums::discrepancy_kind::DiscrepancyKind;
use crate::enums::reception_status::ReceptionStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ID типа для записи Приёмка перемещения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransferReceptionId(pub Uuid);

impl TransferReceptionId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for TransferReceptionId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(TransferReceptionId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Строка приёмки, подтверждённая сервером
///
/// Серверное эхо строки черновика приёмки: после создания записи строки
/// получают собственные id, по которым далее адресуются расхождения.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReceptionItem {
    /// ID строки приёмки (присваивается сервером)
    pub id: Uuid,

    /// ID строки исходного перемещения
    pub transfer_item_id: Uuid,

    /// ID варианта товара
    pub product_variant_id: Uuid,

    /// Название товара (денормализовано)
    pub product_name: String,

    /// Единица измерения
    pub unit: String,

    /// Запрошенное количество (из манифеста перемещения)
    pub quantity_requested: f64,

    /// Фактически принятое количество
    pub quantity_received: f64,

    /// Фактическая партия
    pub received_batch: Option<String>,

    /// Фактический срок годности (YYYY-MM-DD)
    pub received_expiry_date: Option<String>,

    /// Тип расхождения (None — строка принята без замечаний)
    pub discrepancy_kind: Option<DiscrepancyKind>,

    /// Описание расхождения. У легаси-записей поле может содержать и
    /// описание, и текст урегулирования через разделитель "; " — см.
    /// `discrepancy::split_notes`.
    pub discrepancy_notes: String,

    /// Текст урегулирования (раздельное поле; у легаси-записей пусто)
    pub resolution_notes: Option<String>,

    /// Строка принята получателем
    pub is_accepted: bool,
}

/// Комментарий к приёмке (append-only, пишут оба склада)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReceptionComment {
    pub id: Uuid,
    pub kind: CommentKind,
    pub message: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// Запись Приёмка перемещения (агрегат a003)
///
/// Создаётся один раз при подтверждении приёмки складом-получателем и
/// далее является источником истины: мастер приёмки восстанавливает
/// своё состояние из этой записи.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferReception {
    #[serde(flatten)]
    pub base: BaseAggregate<TransferReceptionId>,

    /// Исходное перемещение
    pub transfer_id: WarehouseTransferId,

    /// Статус приёмки
    pub status: ReceptionStatus,

    /// Все расхождения урегулированы складом-отправителем
    pub is_discrepancy_resolved: bool,

    /// Строки приёмки
    pub items: Vec<ReceptionItem>,

    /// Ссылки на загруженные подтверждающие документы/фото
    pub evidence_urls: Vec<String>,

    /// Переписка складов по приёмке
    pub comments: Vec<ReceptionComment>,
}

impl TransferReception {
    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Приёмка завершена: расхождений не было либо они урегулированы
    pub fn is_completed(&self) -> bool {
        match self.status {
            ReceptionStatus::Received | ReceptionStatus::Resolved => true,
            ReceptionStatus::WithDiscrepancies => self.is_discrepancy_resolved,
        }
    }

    /// Найти строку приёмки по её id
    pub fn item_by_id(&self, item_id: Uuid) -> Option<&ReceptionItem> {
        self.items.iter().find(|i| i.id == item_id)
    }
}

impl AggregateRoot for TransferReception {
    type Id = TransferReceptionId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "transfer_reception"
    }

    fn element_name() -> &'static str {
        "Приёмка перемещения"
    }

    fn list_name() -> &'static str {
        "Приёмки перемещений"
    }
}
