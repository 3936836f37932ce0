use crate::domain::a001_warehouse::aggregate::WarehouseId;
use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::enums::transfer_status::TransferStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ID типа для документа Перемещение между складами
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WarehouseTransferId(pub Uuid);

impl WarehouseTransferId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for WarehouseTransferId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(WarehouseTransferId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Строка табличной части «Товары» документа Перемещение
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferLine {
    /// ID строки перемещения
    pub id: Uuid,

    /// ID варианта товара
    pub product_variant_id: Uuid,

    /// Название товара (денормализовано для отображения)
    pub product_name: String,

    /// Единица измерения ("шт", "кг", "уп")
    pub unit: String,

    /// Запрошенное количество
    pub quantity_requested: f64,
}

/// Документ Перемещение между складами (агрегат a002)
///
/// Для процесса приёмки документ неизменяем: склад-получатель читает
/// манифест строк и оформляет по нему запись приёмки (a003).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseTransfer {
    #[serde(flatten)]
    pub base: BaseAggregate<WarehouseTransferId>,

    /// Номер документа (напр. "ПЕР-000042")
    pub document_no: String,

    /// Дата документа
    pub document_date: DateTime<Utc>,

    /// Склад-отправитель
    pub origin_warehouse_id: WarehouseId,

    /// Склад-получатель
    pub destination_warehouse_id: WarehouseId,

    /// Статус перемещения
    pub status: TransferStatus,

    /// Строки табличной части (упорядочены как в документе)
    pub lines: Vec<TransferLine>,
}

impl WarehouseTransfer {
    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Склад выступает отправителем этого перемещения
    pub fn is_origin(&self, warehouse_id: WarehouseId) -> bool {
        self.origin_warehouse_id == warehouse_id
    }

    /// Склад выступает получателем этого перемещения
    pub fn is_destination(&self, warehouse_id: WarehouseId) -> bool {
        self.destination_warehouse_id == warehouse_id
    }
}

impl AggregateRoot for WarehouseTransfer {
    type Id = WarehouseTransferId;

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
        "a002"
    }

    fn collection_name() -> &'static str {
        "warehouse_transfer"
    }

    fn element_name() -> &'static str {
        "Перемещение"
    }

    fn list_name() -> &'static str {
        "Перемещения"
    }
}
