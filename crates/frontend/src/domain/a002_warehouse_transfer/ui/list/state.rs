use contracts::domain::a002_warehouse_transfer::aggregate::WarehouseTransfer;
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct WarehouseTransferListState {
    pub items: Vec<WarehouseTransfer>,
    pub search_query: String,
    /// Фильтр по статусу (wire-код, пусто — все)
    pub status_filter: String,
    /// Показывать только входящие на склад сеанса
    pub incoming_only: bool,
    pub is_loaded: bool,
}

impl Default for WarehouseTransferListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_query: String::new(),
            status_filter: String::new(),
            incoming_only: true,
            is_loaded: false,
        }
    }
}

pub fn create_state() -> RwSignal<WarehouseTransferListState> {
    RwSignal::new(WarehouseTransferListState::default())
}
