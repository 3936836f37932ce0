//! Трёхшаговый мастер приёмки перемещения.
//!
//! Шаги: Приёмка (сверка количеств) → Инциденты (реестр расхождений и
//! урегулирование) → Документация (материалы и итог). Переходы — чистые
//! функции из `contracts`, здесь только отрисовка и сигналы.

pub mod model;
pub mod steps;
pub mod view_model;

use self::steps::{DocumentationStep, IncidentsStep, ReceptionStep};
use self::view_model::ReceptionWizardVm;
use crate::layout::global_context::SessionContext;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_WIZARD};
use contracts::domain::a002_warehouse_transfer::aggregate::WarehouseTransfer;
use contracts::domain::a003_transfer_reception::aggregate::TransferReception;
use contracts::domain::a003_transfer_reception::wizard::WizardStep;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn ReceptionWizard(
    transfer: WarehouseTransfer,
    existing_reception: Option<TransferReception>,
) -> impl IntoView {
    let session =
        leptos::context::use_context::<SessionContext>().expect("SessionContext not found");
    let vm = ReceptionWizardVm::new(transfer, existing_reception, session);

    view! {
        <PageFrame page_id="a003_transfer_reception--wizard" category=PAGE_CAT_WIZARD>
            <StepIndicator vm=vm />
            <Messages vm=vm />

            {move || match vm.step.get() {
                WizardStep::Reception => view! { <ReceptionStep vm=vm /> }.into_any(),
                WizardStep::Incidents => view! { <IncidentsStep vm=vm /> }.into_any(),
                WizardStep::Documentation => view! { <DocumentationStep vm=vm /> }.into_any(),
            }}

            <NavButtons vm=vm />
            <ConfirmDialog vm=vm />
        </PageFrame>
    }
}

#[component]
fn StepIndicator(vm: ReceptionWizardVm) -> impl IntoView {
    view! {
        <div class="wizard__steps">
            {WizardStep::all()
                .into_iter()
                .map(|step| {
                    view! {
                        <div
                            class="wizard__step"
                            class:wizard__step--active=move || vm.step.get() == step
                            class:wizard__step--done=move || {
                                vm.step.get().index() > step.index()
                            }
                            on:click=move |_| vm.handle_select(step)
                        >
                            <span class="wizard__step-number">
                                {(step.index() + 1).to_string()}
                            </span>
                            <span class="wizard__step-title">{step.title()}</span>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

/// Три уровня сообщений: ошибка (блокирующая), предупреждение
/// (частичный успех) и уведомление (сбрасывается кликом).
#[component]
fn Messages(vm: ReceptionWizardVm) -> impl IntoView {
    view! {
        {move || {
            vm.first_error()
                .map(|e| {
                    view! {
                        <div class="error" on:click=move |_| vm.dismiss_errors()>
                            <strong>"Ошибка: "</strong>
                            {e}
                        </div>
                    }
                })
        }}
        {move || {
            vm.warning
                .get()
                .map(|w| {
                    view! {
                        <div class="warning-box" on:click=move |_| vm.warning.set(None)>
                            <span class="warning-box__icon">"⚠"</span>
                            <span class="warning-box__text">{w}</span>
                        </div>
                    }
                })
        }}
        {move || {
            vm.notice
                .get()
                .map(|n| {
                    view! {
                        <div class="notice" on:click=move |_| vm.notice.set(None)>
                            {n}
                        </div>
                    }
                })
        }}
    }
}

#[component]
fn NavButtons(vm: ReceptionWizardVm) -> impl IntoView {
    view! {
        <Flex
            gap=FlexGap::Small
            style="margin-top:var(--spacing-md);justify-content:space-between;"
        >
            <div>
                {move || {
                    (vm.step.get() != WizardStep::Reception)
                        .then(|| {
                            view! {
                                <Button
                                    appearance=ButtonAppearance::Secondary
                                    on_click=move |_| vm.handle_previous()
                                >
                                    "Назад"
                                </Button>
                            }
                        })
                }}
            </div>
            <div>
                {move || {
                    (vm.step.get() != WizardStep::Documentation)
                        .then(|| {
                            let creating = vm.step.get() == WizardStep::Reception
                                && vm.reception.with(|r| r.is_none());
                            let label = if creating { "Создать приёмку" } else { "Далее" };
                            view! {
                                <Button
                                    appearance=ButtonAppearance::Primary
                                    on_click=move |_| vm.handle_next()
                                >
                                    {label}
                                </Button>
                            }
                        })
                }}
            </div>
        </Flex>
    }
}

/// Подтверждение перед созданием записи приёмки: после него сверка
/// необратимо замораживается.
#[component]
fn ConfirmDialog(vm: ReceptionWizardVm) -> impl IntoView {
    move || {
        if !vm.show_confirm.get() {
            return ().into_any();
        }
        let (total, flagged, unexpected, has_discrepancies) = vm.draft.with(|d| {
            (
                d.items.len(),
                d.items.iter().filter(|i| !i.is_accepted).count(),
                d.unexpected.len(),
                d.has_discrepancies(),
            )
        });
        view! {
            <div class="modal-overlay">
                <Card attr:class="modal-card">
                    <h3>"Создать запись приёмки?"</h3>
                    <p>
                        {format!(
                            "Строк: {}. Расхождений: {}. Внеплановых товаров: {}.",
                            total,
                            flagged,
                            unexpected,
                        )}
                    </p>
                    <p class="hint">
                        {if has_discrepancies {
                            "После создания записи изменить сверку будет нельзя. \
                             Расхождения будут зарегистрированы автоматически."
                        } else {
                            "После создания записи изменить сверку будет нельзя."
                        }}
                    </p>
                    <Flex gap=FlexGap::Small style="justify-content:flex-end;">
                        <Button
                            appearance=ButtonAppearance::Secondary
                            disabled=Signal::derive(move || vm.submit_op.is_pending())
                            on_click=move |_| vm.cancel_submission()
                        >
                            "Отмена"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || vm.submit_op.is_pending())
                            on_click=move |_| vm.confirm_submission()
                        >
                            {move || {
                                if vm.submit_op.is_pending() {
                                    "Создание..."
                                } else {
                                    "Подтвердить"
                                }
                            }}
                        </Button>
                    </Flex>
                </Card>
            </div>
        }
        .into_any()
    }
}
