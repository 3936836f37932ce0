use crate::layout::global_context::SessionContext;
use crate::routes::routes::AppRoutes;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Контекст сеанса (текущий склад) — один на всё приложение.
    // Проверка полномочий (урегулирование — только склад-отправитель)
    // выполняется от этого контекста на границе мастера приёмки.
    let session = SessionContext::new();
    session.load();
    provide_context(session);

    view! {
        <AppRoutes />
    }
}
