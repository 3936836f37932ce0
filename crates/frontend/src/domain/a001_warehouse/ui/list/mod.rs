use crate::shared::api_utils::api_url;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use contracts::domain::a001_warehouse::aggregate::Warehouse;
use gloo_net::http::Request;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

async fn fetch_warehouses() -> Result<Vec<Warehouse>, String> {
    let url = api_url("/api/a001/warehouses");
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

#[component]
pub fn WarehouseList() -> impl IntoView {
    let (items, set_items) = signal(Vec::<Warehouse>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(None::<String>);
    let (search, set_search) = signal(String::new());

    Effect::new(move || {
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match fetch_warehouses().await {
                Ok(list) => set_items.set(list),
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    });

    let filtered = move || {
        let query = search.get().to_lowercase();
        items
            .get()
            .into_iter()
            .filter(|w| {
                query.is_empty()
                    || w.base.description.to_lowercase().contains(&query)
                    || w.base.code.to_lowercase().contains(&query)
            })
            .collect::<Vec<_>>()
    };

    view! {
        <PageFrame page_id="a001_warehouse--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <h1 class="page__title">"Склады"</h1>
            </div>

            <div class="page__content">
                <div class="form-group" style="max-width:320px;margin-bottom:var(--spacing-md);">
                    <input
                        type="text"
                        placeholder="Поиск по названию или коду"
                        prop:value=move || search.get()
                        on:input=move |ev| set_search.set(event_target_value(&ev))
                    />
                </div>

                {move || {
                    if loading.get() {
                        return view! {
                            <Flex gap=FlexGap::Small style="align-items:center;justify-content:center;padding:var(--spacing-4xl);">
                                <Spinner />
                                <span>"Загрузка..."</span>
                            </Flex>
                        }.into_any();
                    }
                    if let Some(err) = error.get() {
                        return view! {
                            <div class="error">
                                <strong>"Ошибка: "</strong>{err}
                            </div>
                        }.into_any();
                    }
                    view! {
                        <div class="table-wrapper">
                            <Table attr:style="width:100%;">
                                <TableHeader>
                                    <TableRow>
                                        <TableHeaderCell>"Код"</TableHeaderCell>
                                        <TableHeaderCell>"Название"</TableHeaderCell>
                                        <TableHeaderCell>"Адрес"</TableHeaderCell>
                                        <TableHeaderCell>"Активен"</TableHeaderCell>
                                    </TableRow>
                                </TableHeader>
                                <TableBody>
                                    <For
                                        each=filtered
                                        key=|w| w.to_string_id()
                                        children=move |w| {
                                            view! {
                                                <TableRow>
                                                    <TableCell>
                                                        <TableCellLayout>{w.base.code.clone()}</TableCellLayout>
                                                    </TableCell>
                                                    <TableCell>
                                                        <TableCellLayout>{w.base.description.clone()}</TableCellLayout>
                                                    </TableCell>
                                                    <TableCell>
                                                        <TableCellLayout>
                                                            {w.address.clone().unwrap_or_default()}
                                                        </TableCellLayout>
                                                    </TableCell>
                                                    <TableCell>
                                                        <TableCellLayout>
                                                            {if w.is_active { "Да" } else { "Нет" }}
                                                        </TableCellLayout>
                                                    </TableCell>
                                                </TableRow>
                                            }
                                        }
                                    />
                                </TableBody>
                            </Table>
                        </div>
                    }.into_any()
                }}
            </div>
        </PageFrame>
    }
}
