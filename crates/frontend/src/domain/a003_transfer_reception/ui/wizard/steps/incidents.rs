//! Шаг 2 «Инциденты»: реестр расхождений и урегулирование.
//!
//! Реестр читают обе стороны перемещения; панель урегулирования
//! доступна только складу-отправителю.

use super::super::view_model::ReceptionWizardVm;
use super::comments::CommentsThread;
use contracts::domain::a003_transfer_reception::discrepancy::DiscrepancyStatus;
use contracts::enums::comment_kind::CommentKind;
use leptos::prelude::*;
use thaw::*;

fn status_badge(status: DiscrepancyStatus) -> (&'static str, &'static str) {
    match status {
        DiscrepancyStatus::Pending => ("badge badge--warning", "Открыто"),
        DiscrepancyStatus::Resolved => ("badge badge--success", "Урегулировано"),
    }
}

#[component]
pub fn IncidentsStep(vm: ReceptionWizardVm) -> impl IntoView {
    let can_resolve = Memo::new(move |_| vm.can_resolve() && !vm.is_completed());

    view! {
        <Card>
            <h2>"Реестр расхождений"</h2>

            {move || {
                let ledger = vm.ledger.get();
                if ledger.is_empty() {
                    let text = if vm.is_completed() {
                        "Все расхождения урегулированы"
                    } else {
                        "Расхождений нет"
                    };
                    return view! { <p class="hint">{text}</p> }.into_any();
                }
                let resolvable = can_resolve.get();
                view! {
                    <div class="table-wrapper">
                        <Table attr:style="width:100%;">
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell>"Товар"</TableHeaderCell>
                                    <TableHeaderCell>"Тип"</TableHeaderCell>
                                    <TableHeaderCell>"Принято"</TableHeaderCell>
                                    <TableHeaderCell>"Описание"</TableHeaderCell>
                                    <TableHeaderCell>"Статус"</TableHeaderCell>
                                    <TableHeaderCell>"Урегулирование"</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                {ledger
                                    .into_iter()
                                    .map(|d| {
                                        let (badge, label) = status_badge(d.status);
                                        let item_id = d.item_id;
                                        let pending = d.status == DiscrepancyStatus::Pending;
                                        view! {
                                            <TableRow>
                                                <TableCell>
                                                    <TableCellLayout>{d.product_name}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>
                                                        {d.kind.map(|k| k.display_name()).unwrap_or("—")}
                                                    </TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>
                                                        {d.quantity_received
                                                            .map(|q| q.to_string())
                                                            .unwrap_or_else(|| "—".to_string())}
                                                    </TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>{d.description}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>
                                                        <span class=badge>{label}</span>
                                                    </TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>
                                                        {if pending && resolvable {
                                                            view! {
                                                                <Button
                                                                    appearance=ButtonAppearance::Subtle
                                                                    on_click=move |_| vm.select_for_resolution(item_id)
                                                                >
                                                                    "Урегулировать"
                                                                </Button>
                                                            }
                                                                .into_any()
                                                        } else {
                                                            d.resolution.into_any()
                                                        }}
                                                    </TableCellLayout>
                                                </TableCell>
                                            </TableRow>
                                        }
                                    })
                                    .collect_view()}
                            </TableBody>
                        </Table>
                    </div>
                }
                .into_any()
            }}

            <ResolutionPanel vm=vm />

            {move || {
                can_resolve
                    .get()
                    .then(|| {
                        let enabled = vm.can_complete_resolution();
                        view! {
                            <Flex gap=FlexGap::Small style="margin-top:var(--spacing-md);">
                                <Button
                                    appearance=ButtonAppearance::Primary
                                    disabled=Signal::derive(move || {
                                        !enabled || vm.resolution_op.is_pending()
                                    })
                                    on_click=move |_| vm.complete_resolution()
                                >
                                    {move || {
                                        if vm.resolution_op.is_pending() {
                                            "Завершение..."
                                        } else {
                                            "Завершить урегулирование"
                                        }
                                    }}
                                </Button>
                                {(!enabled)
                                    .then(|| {
                                        view! {
                                            <span class="hint">
                                                "Кнопка станет доступна после урегулирования всех записей"
                                            </span>
                                        }
                                    })}
                            </Flex>
                        }
                    })
            }}
        </Card>

        <Card attr:style="margin-top:var(--spacing-md);">
            <CommentsThread vm=vm kind=CommentKind::Discrepancy />
        </Card>
    }
}

/// Встроенная форма урегулирования выбранной записи. Отметка локальная,
/// сервер получает итог одним запросом при завершении урегулирования.
#[component]
fn ResolutionPanel(vm: ReceptionWizardVm) -> impl IntoView {
    move || {
        let Some(selected_id) = vm.selected_discrepancy.get() else {
            return ().into_any();
        };
        let product_name = vm.ledger.with(|l| {
            l.iter()
                .find(|d| d.item_id == selected_id)
                .map(|d| d.product_name.clone())
        });
        let Some(product_name) = product_name else {
            return ().into_any();
        };

        let quantities = vm.reception.with(|r| {
            r.as_ref()
                .and_then(|r| r.item_by_id(selected_id))
                .map(|item| (item.quantity_received, item.quantity_requested))
        });

        view! {
            <div class="resolution-panel" style="margin-top:var(--spacing-md);">
                <h3>{format!("Урегулирование: {}", product_name)}</h3>
                {quantities
                    .map(|(received, requested)| {
                        view! {
                            <p class="hint">
                                {format!("Принято {} из {}", received, requested)}
                            </p>
                        }
                    })}
                <div class="form-group">
                    <label>"Примечание"</label>
                    <textarea
                        rows="2"
                        style="width:100%;"
                        prop:value=move || vm.resolution_note.get()
                        on:input=move |ev| vm.resolution_note.set(event_target_value(&ev))
                    ></textarea>
                </div>
                <Flex gap=FlexGap::Small>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| vm.resolve_discrepancy(selected_id)
                    >
                        "Отметить урегулированным"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| vm.cancel_resolution()
                    >
                        "Отмена"
                    </Button>
                </Flex>
            </div>
        }
        .into_any()
    }
}
