use crate::domain::a003_transfer_reception::ui::wizard::model::fetch_reception_by_transfer;
use crate::domain::a003_transfer_reception::ui::wizard::ReceptionWizard;
use crate::layout::global_context::SessionContext;
use crate::shared::api_utils::api_base;
use crate::shared::date_utils::format_date;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DETAIL};
use contracts::domain::a002_warehouse_transfer::aggregate::WarehouseTransfer;
use contracts::domain::a003_transfer_reception::aggregate::TransferReception;
use gloo_net::http::Request;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params_map};
use thaw::*;

async fn fetch_transfer(id: &str) -> Result<WarehouseTransfer, String> {
    let url = format!("{}/api/a002/transfers/{}", api_base(), id);
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

/// Страница документа Перемещение: шапка документа и мастер приёмки
/// для склада-получателя.
#[component]
pub fn WarehouseTransferDetail() -> impl IntoView {
    let params = use_params_map();
    let navigate = use_navigate();
    let session =
        leptos::context::use_context::<SessionContext>().expect("SessionContext not found");

    let (transfer, set_transfer) = signal(None::<WarehouseTransfer>);
    let (existing_reception, set_existing_reception) = signal(None::<TransferReception>);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(None::<String>);

    Effect::new(move || {
        let Some(id) = params.read().get("id") else {
            return;
        };
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match fetch_transfer(&id).await {
                Ok(doc) => {
                    // существующая приёмка определяет начальный шаг мастера
                    match fetch_reception_by_transfer(&id).await {
                        Ok(reception) => set_existing_reception.set(reception),
                        Err(e) => log::warn!("Не удалось загрузить приёмку: {}", e),
                    }
                    set_transfer.set(Some(doc));
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    });

    let on_back = {
        let navigate = navigate.clone();
        Callback::new(move |_: ()| {
            navigate("/transfers", Default::default());
        })
    };

    view! {
        <PageFrame page_id="a002_warehouse_transfer--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    {move || {
                        let title = transfer.get()
                            .map(|t| format!(
                                "Перемещение {} от {}",
                                t.document_no,
                                format_date(&t.document_date.to_rfc3339())
                            ))
                            .unwrap_or_else(|| "Перемещение".to_string());
                        view! { <h1 class="page__title">{title}</h1> }
                    }}
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| on_back.run(())
                    >
                        "← К списку"
                    </Button>
                </div>
            </div>

            <div class="page__content">
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
                    if let Some(t) = transfer.get() {
                        let lines_count = t.lines.len();
                        let document_no = t.document_no.clone();
                        view! {
                            <div style="display:flex;flex-direction:column;gap:var(--spacing-lg);">
                                <Card>
                                    <div style="padding:var(--spacing-md);display:grid;grid-template-columns:max-content 1fr;gap:var(--spacing-sm) var(--spacing-xl);align-items:baseline;">
                                        <span class="form__label">"Номер документа:"</span>
                                        <strong>{document_no}</strong>

                                        <span class="form__label">"Статус:"</span>
                                        <span>{t.status.display_name()}</span>

                                        <span class="form__label">"Строк в манифесте:"</span>
                                        <span>{lines_count}</span>
                                    </div>
                                </Card>

                                {
                                    // мастер показывается получателю перемещения,
                                    // ожидающего приёмки, либо обеим сторонам уже
                                    // созданной приёмки
                                    let has_reception = existing_reception.get_untracked().is_some();
                                    let is_destination = session
                                        .warehouse_id
                                        .get_untracked()
                                        .map(|id| t.is_destination(id))
                                        .unwrap_or(false);
                                    if has_reception || (t.status.awaits_reception() && is_destination) {
                                        view! {
                                            <ReceptionWizard
                                                transfer=t
                                                existing_reception=existing_reception.get_untracked()
                                            />
                                        }.into_any()
                                    } else if t.status.awaits_reception() {
                                        view! {
                                            <div class="notice">
                                                "Приёмку оформляет склад-получатель перемещения"
                                            </div>
                                        }.into_any()
                                    } else {
                                        view! {
                                            <div class="notice">
                                                {format!(
                                                    "Приёмка недоступна: документ в статусе «{}»",
                                                    t.status.display_name(),
                                                )}
                                            </div>
                                        }.into_any()
                                    }
                                }
                            </div>
                        }.into_any()
                    } else {
                        view! { <div>"Нет данных"</div> }.into_any()
                    }
                }}
            </div>
        </PageFrame>
    }
}
