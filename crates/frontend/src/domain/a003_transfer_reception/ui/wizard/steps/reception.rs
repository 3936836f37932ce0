//! Шаг 1 «Приёмка»: сверка количеств по манифесту и внеплановые товары.

use super::super::view_model::ReceptionWizardVm;
use contracts::domain::a003_transfer_reception::draft::UnexpectedProduct;
use contracts::enums::discrepancy_kind::DiscrepancyKind;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn ReceptionStep(vm: ReceptionWizardVm) -> impl IntoView {
    // после создания записи приёмки сверка заморожена, шаг доступен
    // только для просмотра
    let locked = Memo::new(move |_| vm.reception.with(|r| r.is_some()));

    view! {
        <Card>
            <h2>"Сверка по манифесту"</h2>
            <p class="hint">
                "По каждой строке укажите фактически принятое количество. \
                 Если принято меньше запрошенного, зафиксируйте расхождение."
            </p>

            <div class="table-wrapper">
                <Table attr:style="width:100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Товар"</TableHeaderCell>
                            <TableHeaderCell>"Ед."</TableHeaderCell>
                            <TableHeaderCell>"Запрошено"</TableHeaderCell>
                            <TableHeaderCell>"Принято"</TableHeaderCell>
                            <TableHeaderCell>"Партия"</TableHeaderCell>
                            <TableHeaderCell>"Срок годности"</TableHeaderCell>
                            <TableHeaderCell>"Расхождение"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            let locked = locked.get();
                            vm.draft
                                .get()
                                .items
                                .into_iter()
                                .enumerate()
                                .map(|(i, item)| {
                                    let flagged = !item.is_accepted;
                                    let short = item.is_short_received();
                                    let selected_kind = item.discrepancy_kind;
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>{item.product_name.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{item.unit.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{item.quantity_requested}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <input
                                                        type="number"
                                                        min="0"
                                                        step="any"
                                                        style="width:90px;"
                                                        class:input--short=short && !flagged
                                                        prop:value=item.quantity_received.to_string()
                                                        prop:disabled=locked
                                                        on:change=move |ev| {
                                                            if let Ok(value) = event_target_value(&ev).parse::<f64>() {
                                                                vm.update_quantity(i, value);
                                                            }
                                                        }
                                                    />
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <input
                                                        type="text"
                                                        style="width:110px;"
                                                        placeholder="—"
                                                        prop:value=item.received_batch.clone().unwrap_or_default()
                                                        prop:disabled=locked
                                                        on:change=move |ev| {
                                                            vm.set_received_batch(i, event_target_value(&ev));
                                                        }
                                                    />
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <input
                                                        type="date"
                                                        prop:value=item.received_expiry_date.clone().unwrap_or_default()
                                                        prop:disabled=locked
                                                        on:change=move |ev| {
                                                            vm.set_received_expiry(i, event_target_value(&ev));
                                                        }
                                                    />
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <label>
                                                        <input
                                                            type="checkbox"
                                                            prop:checked=flagged
                                                            prop:disabled=locked
                                                            on:change=move |_| vm.toggle_discrepancy(i)
                                                        />
                                                        " Есть"
                                                    </label>
                                                    {flagged
                                                        .then(|| {
                                                            view! {
                                                                <div class="discrepancy-fields">
                                                                    <select
                                                                        prop:disabled=locked
                                                                        on:change=move |ev| {
                                                                            if let Some(kind) = DiscrepancyKind::from_code(
                                                                                &event_target_value(&ev),
                                                                            ) {
                                                                                vm.set_discrepancy_kind(i, kind);
                                                                            }
                                                                        }
                                                                    >
                                                                        {DiscrepancyKind::all()
                                                                            .into_iter()
                                                                            .map(|kind| {
                                                                                view! {
                                                                                    <option
                                                                                        value=kind.code()
                                                                                        selected=Some(kind) == selected_kind
                                                                                    >
                                                                                        {kind.display_name()}
                                                                                    </option>
                                                                                }
                                                                            })
                                                                            .collect_view()}
                                                                    </select>
                                                                    <input
                                                                        type="text"
                                                                        placeholder="Примечание"
                                                                        prop:value=item.discrepancy_notes.clone()
                                                                        prop:disabled=locked
                                                                        on:change=move |ev| {
                                                                            vm.set_discrepancy_notes(i, event_target_value(&ev));
                                                                        }
                                                                    />
                                                                </div>
                                                            }
                                                        })}
                                                </TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                })
                                .collect_view()
                        }}
                    </TableBody>
                </Table>
            </div>
        </Card>

        <UnexpectedProducts vm=vm locked=locked />
    }
}

/// Внеплановые товары: приняты по факту, но в манифесте отсутствуют.
/// Список живёт только на клиенте и в запрос приёмки не входит.
#[component]
fn UnexpectedProducts(vm: ReceptionWizardVm, locked: Memo<bool>) -> impl IntoView {
    let name = RwSignal::new(String::new());
    let quantity = RwSignal::new(String::new());
    let unit = RwSignal::new("шт".to_string());
    let batch = RwSignal::new(String::new());
    let observations = RwSignal::new(String::new());

    let add = move |_| {
        let product = UnexpectedProduct {
            product_name: name.get_untracked().trim().to_string(),
            quantity: quantity.get_untracked().parse::<f64>().unwrap_or(0.0),
            unit: unit.get_untracked(),
            batch_number: {
                let b = batch.get_untracked();
                if b.trim().is_empty() { None } else { Some(b) }
            },
            observations: {
                let o = observations.get_untracked();
                if o.trim().is_empty() { None } else { Some(o) }
            },
        };
        match product.validate() {
            Ok(()) => {
                vm.add_unexpected(product);
                name.set(String::new());
                quantity.set(String::new());
                batch.set(String::new());
                observations.set(String::new());
            }
            Err(e) => vm.notice.set(Some(e)),
        }
    };

    view! {
        <Card attr:style="margin-top:var(--spacing-md);">
            <h2>"Внеплановые товары"</h2>
            <p class="hint">"Товары, принятые по факту, но отсутствующие в манифесте."</p>

            {move || {
                let unexpected = vm.draft.with(|d| d.unexpected.clone());
                if unexpected.is_empty() {
                    return ().into_any();
                }
                view! {
                    <div class="table-wrapper">
                        <Table attr:style="width:100%;">
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell>"Товар"</TableHeaderCell>
                                    <TableHeaderCell>"Количество"</TableHeaderCell>
                                    <TableHeaderCell>"Ед."</TableHeaderCell>
                                    <TableHeaderCell>"Партия"</TableHeaderCell>
                                    <TableHeaderCell>"Замечания"</TableHeaderCell>
                                    <TableHeaderCell>""</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                {unexpected
                                    .into_iter()
                                    .enumerate()
                                    .map(|(i, p)| {
                                        view! {
                                            <TableRow>
                                                <TableCell>
                                                    <TableCellLayout>{p.product_name}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>{p.quantity}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>{p.unit}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>
                                                        {p.batch_number.unwrap_or_else(|| "—".to_string())}
                                                    </TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>
                                                        {p.observations.unwrap_or_else(|| "—".to_string())}
                                                    </TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>
                                                        {(!locked.get())
                                                            .then(|| {
                                                                view! {
                                                                    <Button
                                                                        appearance=ButtonAppearance::Subtle
                                                                        on_click=move |_| vm.remove_unexpected(i)
                                                                    >
                                                                        "Удалить"
                                                                    </Button>
                                                                }
                                                            })}
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

            {move || {
                (!locked.get())
                    .then(|| {
                        view! {
                            <Flex gap=FlexGap::Small style="margin-top:var(--spacing-sm);align-items:flex-end;">
                                <div class="form-group">
                                    <label>"Товар"</label>
                                    <input
                                        type="text"
                                        prop:value=move || name.get()
                                        on:input=move |ev| name.set(event_target_value(&ev))
                                    />
                                </div>
                                <div class="form-group">
                                    <label>"Количество"</label>
                                    <input
                                        type="number"
                                        min="0"
                                        step="any"
                                        style="width:90px;"
                                        prop:value=move || quantity.get()
                                        on:input=move |ev| quantity.set(event_target_value(&ev))
                                    />
                                </div>
                                <div class="form-group">
                                    <label>"Ед."</label>
                                    <input
                                        type="text"
                                        style="width:60px;"
                                        prop:value=move || unit.get()
                                        on:input=move |ev| unit.set(event_target_value(&ev))
                                    />
                                </div>
                                <div class="form-group">
                                    <label>"Партия"</label>
                                    <input
                                        type="text"
                                        style="width:110px;"
                                        prop:value=move || batch.get()
                                        on:input=move |ev| batch.set(event_target_value(&ev))
                                    />
                                </div>
                                <div class="form-group">
                                    <label>"Замечания"</label>
                                    <input
                                        type="text"
                                        prop:value=move || observations.get()
                                        on:input=move |ev| observations.set(event_target_value(&ev))
                                    />
                                </div>
                                <Button appearance=ButtonAppearance::Secondary on_click=add>
                                    "Добавить"
                                </Button>
                            </Flex>
                        }
                    })
            }}
        </Card>
    }
}
