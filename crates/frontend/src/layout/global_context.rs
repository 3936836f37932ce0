//! Контекст сеанса: от чьего имени (какого склада) работает оператор.
//!
//! Загружается один раз при старте приложения и передаётся через
//! leptos-контекст. Дочерние компоненты не выводят полномочия заново —
//! мастер приёмки получает склад сеанса на своей границе.

use crate::shared::api_utils::api_base;
use contracts::domain::a001_warehouse::aggregate::WarehouseId;
use gloo_net::http::Request;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDto {
    pub warehouse_id: WarehouseId,
    pub warehouse_name: String,
    pub user_name: String,
}

#[derive(Clone, Copy)]
pub struct SessionContext {
    pub warehouse_id: RwSignal<Option<WarehouseId>>,
    pub warehouse_name: RwSignal<String>,
    pub user_name: RwSignal<String>,
    pub loaded: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            warehouse_id: RwSignal::new(None),
            warehouse_name: RwSignal::new(String::new()),
            user_name: RwSignal::new(String::new()),
            loaded: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    pub fn load(&self) {
        let ctx = *self;
        spawn_local(async move {
            match fetch_session().await {
                Ok(session) => {
                    ctx.warehouse_id.set(Some(session.warehouse_id));
                    ctx.warehouse_name.set(session.warehouse_name);
                    ctx.user_name.set(session.user_name);
                }
                Err(e) => {
                    log::error!("Не удалось загрузить сеанс: {}", e);
                    ctx.error.set(Some(e));
                }
            }
            ctx.loaded.set(true);
        });
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

async fn fetch_session() -> Result<SessionDto, String> {
    let url = format!("{}/api/session", api_base());
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Ошибка сети: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Ошибка парсинга: {}", e))
}
