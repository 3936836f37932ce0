use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ID типа для справочника Склады
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WarehouseId(pub Uuid);

impl WarehouseId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for WarehouseId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(WarehouseId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Справочник Склад
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warehouse {
    #[serde(flatten)]
    pub base: BaseAggregate<WarehouseId>,

    /// Адрес склада
    pub address: Option<String>,

    /// Признак активности (неактивные склады не участвуют в перемещениях)
    pub is_active: bool,
}

impl Warehouse {
    pub fn new(id: Uuid, code: String, name: String) -> Self {
        Self {
            base: BaseAggregate::new(WarehouseId::new(id), code, name),
            address: None,
            is_active: true,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }
}

impl AggregateRoot for Warehouse {
    type Id = WarehouseId;

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
        "a001"
    }

    fn collection_name() -> &'static str {
        "warehouse"
    }

    fn element_name() -> &'static str {
        "Склад"
    }

    fn list_name() -> &'static str {
        "Склады"
    }
}
