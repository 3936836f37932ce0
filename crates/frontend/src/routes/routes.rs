use crate::domain::a001_warehouse::ui::list::WarehouseList;
use crate::domain::a002_warehouse_transfer::ui::details::WarehouseTransferDetail;
use crate::domain::a002_warehouse_transfer::ui::list::WarehouseTransferList;
use crate::layout::Shell;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Shell>
                <Routes fallback=|| view! { <p>"Страница не найдена"</p> }>
                    <Route path=path!("/") view=WarehouseTransferList />
                    <Route path=path!("/warehouses") view=WarehouseList />
                    <Route path=path!("/transfers") view=WarehouseTransferList />
                    <Route path=path!("/transfers/:id") view=WarehouseTransferDetail />
                </Routes>
            </Shell>
        </Router>
    }
}
