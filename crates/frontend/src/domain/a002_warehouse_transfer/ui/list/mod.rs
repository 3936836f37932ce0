pub mod state;

use self::state::create_state;
use crate::layout::global_context::SessionContext;
use crate::shared::api_utils::api_base;
use crate::shared::date_utils::format_date;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use contracts::domain::a002_warehouse_transfer::aggregate::WarehouseTransfer;
use contracts::domain::common::AggregateId;
use contracts::enums::transfer_status::TransferStatus;
use gloo_net::http::Request;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use thaw::*;

async fn fetch_transfers(
    search_query: &str,
    status_filter: &str,
    incoming_warehouse_id: Option<String>,
) -> Result<Vec<WarehouseTransfer>, String> {
    let mut url = format!("{}/api/a002/transfers/list?limit=200", api_base());
    if !search_query.is_empty() {
        url.push_str(&format!(
            "&search_query={}",
            urlencoding::encode(search_query)
        ));
    }
    if !status_filter.is_empty() {
        url.push_str(&format!("&status={}", status_filter));
    }
    if let Some(warehouse_id) = incoming_warehouse_id {
        url.push_str(&format!("&destination_warehouse_id={}", warehouse_id));
    }

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

fn status_badge(status: TransferStatus) -> &'static str {
    match status {
        TransferStatus::WithDiscrepancies => "badge badge--warning",
        TransferStatus::Resolved | TransferStatus::Received => "badge badge--success",
        TransferStatus::Cancelled => "badge badge--muted",
        TransferStatus::Draft | TransferStatus::InTransit => "badge",
    }
}

#[component]
pub fn WarehouseTransferList() -> impl IntoView {
    let session =
        leptos::context::use_context::<SessionContext>().expect("SessionContext not found");
    let state = create_state();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let navigate = use_navigate();

    let load_items = move || {
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);

            let search_query = state.with_untracked(|s| s.search_query.clone());
            let status_filter = state.with_untracked(|s| s.status_filter.clone());
            let incoming_only = state.with_untracked(|s| s.incoming_only);
            let warehouse_id = if incoming_only {
                session
                    .warehouse_id
                    .get_untracked()
                    .map(|id| id.as_string())
            } else {
                None
            };

            match fetch_transfers(&search_query, &status_filter, warehouse_id).await {
                Ok(items) => {
                    state.update(|s| {
                        s.items = items;
                        s.is_loaded = true;
                    });
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    };

    // первичная загрузка — после того как известен склад сеанса
    Effect::new(move || {
        if session.loaded.get() && !state.with_untracked(|s| s.is_loaded) {
            load_items();
        }
    });

    let open_detail = move |id: String| {
        navigate(&format!("/transfers/{}", id), Default::default());
    };

    view! {
        <PageFrame page_id="a002_warehouse_transfer--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <h1 class="page__title">"Перемещения между складами"</h1>
            </div>

            <div class="page__content">
                <Flex gap=FlexGap::Medium style="margin-bottom:var(--spacing-md);align-items:flex-end;">
                    <div class="form-group">
                        <label>"Поиск"</label>
                        <input
                            type="text"
                            placeholder="Номер документа"
                            prop:value=move || state.with(|s| s.search_query.clone())
                            on:input=move |ev| {
                                state.update(|s| s.search_query = event_target_value(&ev));
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label>"Статус"</label>
                        <select
                            on:change=move |ev| {
                                state.update(|s| s.status_filter = event_target_value(&ev));
                                load_items();
                            }
                        >
                            <option value="">"Все"</option>
                            <option value="in_transit">"В пути"</option>
                            <option value="received">"Принято"</option>
                            <option value="with_discrepancies">"С расхождениями"</option>
                            <option value="resolved">"Урегулировано"</option>
                        </select>
                    </div>
                    <label>
                        <input
                            type="checkbox"
                            prop:checked=move || state.with(|s| s.incoming_only)
                            on:change=move |ev| {
                                state.update(|s| s.incoming_only = event_target_checked(&ev));
                                load_items();
                            }
                        />
                        " Только входящие"
                    </label>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_items()
                    >
                        "Обновить"
                    </Button>
                </Flex>

                {move || {
                    let open_detail = open_detail.clone();
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
                                        <TableHeaderCell>"Номер"</TableHeaderCell>
                                        <TableHeaderCell>"Дата"</TableHeaderCell>
                                        <TableHeaderCell>"Строк"</TableHeaderCell>
                                        <TableHeaderCell>"Статус"</TableHeaderCell>
                                    </TableRow>
                                </TableHeader>
                                <TableBody>
                                    <For
                                        each=move || state.with(|s| s.items.clone())
                                        key=|t| t.to_string_id()
                                        children=move |t| {
                                            let id = t.to_string_id();
                                            let open = open_detail.clone();
                                            view! {
                                                <TableRow>
                                                    <TableCell>
                                                        <TableCellLayout>
                                                            <a
                                                                href="#"
                                                                on:click=move |ev| {
                                                                    ev.prevent_default();
                                                                    open(id.clone());
                                                                }
                                                            >
                                                                {t.document_no.clone()}
                                                            </a>
                                                        </TableCellLayout>
                                                    </TableCell>
                                                    <TableCell>
                                                        <TableCellLayout>
                                                            {format_date(&t.document_date.to_rfc3339())}
                                                        </TableCellLayout>
                                                    </TableCell>
                                                    <TableCell>
                                                        <TableCellLayout>{t.lines.len()}</TableCellLayout>
                                                    </TableCell>
                                                    <TableCell>
                                                        <TableCellLayout>
                                                            <span class=status_badge(t.status)>
                                                                {t.status.display_name()}
                                                            </span>
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
