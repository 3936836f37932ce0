//! Каркас приложения: шапка с контекстом сеанса, боковое меню разделов
//! и центральная область под страницы.

use crate::layout::global_context::SessionContext;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn Shell(children: Children) -> impl IntoView {
    let session =
        leptos::context::use_context::<SessionContext>().expect("SessionContext not found");

    view! {
        <div class="shell">
            <header class="shell__header">
                <span class="shell__title">"Администрирование"</span>
                <span class="shell__session">
                    {move || {
                        let name = session.warehouse_name.get();
                        if name.is_empty() {
                            "Склад не определён".to_string()
                        } else {
                            format!("Склад: {}", name)
                        }
                    }}
                </span>
            </header>
            <div class="shell__body">
                <nav class="shell__sidebar">
                    <ul class="sidebar__list">
                        <li><A href="/warehouses">"Склады"</A></li>
                        <li><A href="/transfers">"Перемещения"</A></li>
                    </ul>
                </nav>
                <main class="shell__center">{children()}</main>
            </div>
        </div>
    }
}
