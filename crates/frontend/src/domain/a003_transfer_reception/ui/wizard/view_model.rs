//! ViewModel мастера приёмки.
//!
//! Хранит черновик, запись приёмки, реестр расхождений и шаг мастера в
//! сигналах; каждая удалённая операция отслеживается собственным
//! `RemoteOp`. Вся логика переходов и деривации живёт в чистых
//! функциях crate `contracts`.

use super::model;
use crate::layout::global_context::SessionContext;
use crate::shared::remote_op::RemoteOp;
use contracts::domain::a002_warehouse_transfer::aggregate::WarehouseTransfer;
use contracts::domain::a003_transfer_reception::aggregate::TransferReception;
use contracts::domain::a003_transfer_reception::discrepancy::{self, Discrepancy};
use contracts::domain::a003_transfer_reception::draft::{ReceptionDraft, UnexpectedProduct};
use contracts::domain::a003_transfer_reception::wizard::{
    self, NextOutcome, StepContext, WizardStep,
};
use contracts::enums::comment_kind::CommentKind;
use contracts::enums::discrepancy_kind::DiscrepancyKind;
use contracts::usecases::u101_receive_transfer::request::AddCommentRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

#[derive(Clone, Copy)]
pub struct ReceptionWizardVm {
    /// Исходное перемещение (неизменяемо на время сеанса приёмки)
    pub transfer: StoredValue<WarehouseTransfer>,
    pub session: SessionContext,

    pub reception: RwSignal<Option<TransferReception>>,
    pub draft: RwSignal<ReceptionDraft>,
    pub ledger: RwSignal<Vec<Discrepancy>>,
    pub step: RwSignal<WizardStep>,

    /// Диалог подтверждения перед созданием записи приёмки
    pub show_confirm: RwSignal<bool>,

    /// Неблокирующее уведомление (валидация, советы по количеству)
    pub notice: RwSignal<Option<String>>,
    /// Частичный успех (приёмка создана, пакет расхождений не прошёл)
    pub warning: RwSignal<Option<String>>,

    /// Запись реестра, выбранная для урегулирования
    pub selected_discrepancy: RwSignal<Option<Uuid>>,
    pub resolution_note: RwSignal<String>,
    pub comment_text: RwSignal<String>,

    /// Создание записи приёмки (вместе со вторым вызовом регистрации)
    pub submit_op: RemoteOp,
    /// Завершение урегулирования
    pub resolution_op: RemoteOp,
    /// Отправка комментария
    pub comment_op: RemoteOp,
    /// Загрузка подтверждающих материалов
    pub upload_op: RemoteOp,
}

impl ReceptionWizardVm {
    pub fn new(
        transfer: WarehouseTransfer,
        existing_reception: Option<TransferReception>,
        session: SessionContext,
    ) -> Self {
        let draft = ReceptionDraft::from_transfer(&transfer);
        // существующая приёмка с расхождениями открывает мастер сразу
        // на шаге Инциденты
        let step = wizard::initial_step(existing_reception.as_ref());
        let ledger = match &existing_reception {
            Some(reception) => discrepancy::derive_from_reception(reception),
            None => discrepancy::derive_from_draft(&draft),
        };

        Self {
            transfer: StoredValue::new(transfer),
            session,
            reception: RwSignal::new(existing_reception),
            draft: RwSignal::new(draft),
            ledger: RwSignal::new(ledger),
            step: RwSignal::new(step),
            show_confirm: RwSignal::new(false),
            notice: RwSignal::new(None),
            warning: RwSignal::new(None),
            selected_discrepancy: RwSignal::new(None),
            resolution_note: RwSignal::new(String::new()),
            comment_text: RwSignal::new(String::new()),
            submit_op: RemoteOp::new(),
            resolution_op: RemoteOp::new(),
            comment_op: RemoteOp::new(),
            upload_op: RemoteOp::new(),
        }
    }

    // ------------------------------------------------------------------
    // Производные предикаты
    // ------------------------------------------------------------------

    /// Контекст переходов мастера (реактивный)
    pub fn step_context(&self) -> StepContext {
        let reception = self.reception.get();
        StepContext {
            reception_valid: self.draft.with(|d| d.validate_completion()),
            reception_created: reception.is_some(),
            reception_completed: reception.map(|r| r.is_completed()).unwrap_or(false),
        }
    }

    /// Приёмка завершена (создана без расхождений либо урегулирована)
    pub fn is_completed(&self) -> bool {
        self.reception
            .with(|r| r.as_ref().map(|r| r.is_completed()).unwrap_or(false))
    }

    /// Урегулирование доступно только складу-отправителю перемещения
    pub fn can_resolve(&self) -> bool {
        match self.session.warehouse_id.get() {
            Some(warehouse_id) => self
                .transfer
                .with_value(|t| discrepancy::can_resolve(warehouse_id, t)),
            None => false,
        }
    }

    /// Кнопка «Завершить урегулирование» активна
    pub fn can_complete_resolution(&self) -> bool {
        self.can_resolve()
            && !self.is_completed()
            && self.ledger.with(|l| discrepancy::can_complete_resolution(l))
    }

    fn ops(&self) -> [RemoteOp; 4] {
        [
            self.submit_op,
            self.resolution_op,
            self.comment_op,
            self.upload_op,
        ]
    }

    /// Первая ошибка среди операций (для единого блока сообщений)
    pub fn first_error(&self) -> Option<String> {
        self.ops().iter().find_map(|op| op.error())
    }

    pub fn dismiss_errors(&self) {
        for op in self.ops() {
            op.clear_error();
        }
    }

    // ------------------------------------------------------------------
    // Сверка количеств (шаг Приёмка)
    // ------------------------------------------------------------------

    pub fn toggle_discrepancy(&self, index: usize) {
        self.draft.update(|d| d.toggle_discrepancy(index));
        self.refresh_preview_ledger();
    }

    pub fn update_quantity(&self, index: usize, value: f64) {
        let mut advisory = None;
        self.draft
            .update(|d| advisory = d.update_quantity(index, value));
        self.notice.set(advisory.map(|a| a.message()));
        self.refresh_preview_ledger();
    }

    pub fn set_discrepancy_kind(&self, index: usize, kind: DiscrepancyKind) {
        self.draft.update(|d| d.set_discrepancy_kind(index, kind));
        self.refresh_preview_ledger();
    }

    pub fn set_discrepancy_notes(&self, index: usize, notes: String) {
        self.draft.update(|d| d.set_discrepancy_notes(index, notes));
        self.refresh_preview_ledger();
    }

    pub fn set_received_batch(&self, index: usize, batch: String) {
        self.draft.update(|d| {
            if let Some(item) = d.items.get_mut(index) {
                item.received_batch = if batch.is_empty() { None } else { Some(batch) };
            }
        });
    }

    pub fn set_received_expiry(&self, index: usize, expiry: String) {
        self.draft.update(|d| {
            if let Some(item) = d.items.get_mut(index) {
                item.received_expiry_date = if expiry.is_empty() { None } else { Some(expiry) };
            }
        });
    }

    pub fn add_unexpected(&self, product: UnexpectedProduct) {
        if self.is_completed() {
            return;
        }
        let mut result = Ok(());
        self.draft.update(|d| result = d.add_unexpected(product));
        if let Err(e) = result {
            self.notice.set(Some(e));
        }
    }

    pub fn remove_unexpected(&self, index: usize) {
        if self.is_completed() {
            return;
        }
        self.draft.update(|d| d.remove_unexpected(index));
    }

    /// До создания записи реестр — предпросмотр из черновика
    fn refresh_preview_ledger(&self) {
        if self.reception.get_untracked().is_none() {
            self.ledger
                .set(self.draft.with_untracked(discrepancy::derive_from_draft));
        }
    }

    fn step_context_untracked(&self) -> StepContext {
        let reception = self.reception.get_untracked();
        StepContext {
            reception_valid: self.draft.with_untracked(|d| d.validate_completion()),
            reception_created: reception.is_some(),
            reception_completed: reception.map(|r| r.is_completed()).unwrap_or(false),
        }
    }

    // ------------------------------------------------------------------
    // Навигация мастера
    // ------------------------------------------------------------------

    pub fn handle_next(&self) {
        let current = self.step.get_untracked();
        match wizard::next(current, &self.step_context_untracked()) {
            NextOutcome::Blocked => {
                if current == WizardStep::Reception {
                    self.notice.set(Some(
                        "По каждой строке примите полное количество либо зафиксируйте расхождение"
                            .to_string(),
                    ));
                }
            }
            NextOutcome::ConfirmSubmit => self.show_confirm.set(true),
            NextOutcome::Advance(step) => self.step.set(step),
        }
    }

    pub fn handle_previous(&self) {
        let current = self.step.get_untracked();
        if let Some(step) = wizard::previous(current, &self.step_context_untracked()) {
            self.step.set(step);
        }
    }

    pub fn handle_select(&self, target: WizardStep) {
        let current = self.step.get_untracked();
        if let Some(step) = wizard::select(current, target, &self.step_context_untracked()) {
            self.step.set(step);
        }
    }

    // ------------------------------------------------------------------
    // Создание записи приёмки (двухфазная отправка)
    // ------------------------------------------------------------------

    pub fn cancel_submission(&self) {
        self.show_confirm.set(false);
    }

    /// Подтверждение диалога: создать запись приёмки и, при наличии
    /// расхождений, зарегистрировать их пакетом вторым вызовом.
    ///
    /// Ошибка первого вызова отменяет всё (мастер остаётся на первом
    /// шаге); ошибка второго — только предупреждение, запись приёмки
    /// уже создана.
    pub fn confirm_submission(&self) {
        let Some(warehouse_id) = self.session.warehouse_id.get_untracked() else {
            self.notice.set(Some("Склад сеанса не определён".to_string()));
            return;
        };
        if !self.submit_op.begin() {
            return;
        }

        let vm = *self;
        let transfer_id = vm.transfer.with_value(|t| t.base.id.value());
        let request = vm
            .draft
            .with_untracked(|d| d.to_receive_request(transfer_id, warehouse_id.value()));

        vm.warning.set(None);

        spawn_local(async move {
            match model::receive_transfer(&request).await {
                Ok(reception) => {
                    let report = vm
                        .draft
                        .with_untracked(|d| d.to_discrepancy_report(&reception));
                    if let Some(report) = report {
                        if let Err(e) =
                            model::report_discrepancies(&reception.to_string_id(), &report).await
                        {
                            // приёмка создана; пакет расхождений можно
                            // зарегистрировать повторно позже
                            log::warn!("Пакет расхождений не зарегистрирован: {}", e);
                            vm.warning.set(Some(format!(
                                "Приёмка создана, но расхождения не зарегистрированы: {}",
                                e
                            )));
                        }
                    }

                    vm.ledger.set(discrepancy::derive_from_reception(&reception));
                    vm.reception.set(Some(reception));
                    vm.show_confirm.set(false);
                    vm.step.set(WizardStep::Incidents);
                    vm.submit_op.succeed();
                }
                Err(e) => {
                    vm.submit_op.fail(format!("Приёмка не создана: {}", e));
                }
            }
        });
    }

    // ------------------------------------------------------------------
    // Урегулирование расхождений (только склад-отправитель)
    // ------------------------------------------------------------------

    pub fn select_for_resolution(&self, discrepancy_id: Uuid) {
        if !self.can_resolve() || self.is_completed() {
            return;
        }
        self.selected_discrepancy.set(Some(discrepancy_id));
        self.resolution_note.set(String::new());
    }

    pub fn cancel_resolution(&self) {
        self.selected_discrepancy.set(None);
        self.resolution_note.set(String::new());
    }

    /// Отметить запись урегулированной (локально; сервер узнаёт об
    /// итоге при завершении урегулирования)
    pub fn resolve_discrepancy(&self, discrepancy_id: Uuid) {
        if !self.can_resolve() || self.is_completed() {
            return;
        }
        let note = self.resolution_note.get_untracked();
        let mut result = Ok(());
        self.ledger
            .update(|l| result = discrepancy::resolve_entry(l, discrepancy_id, &note));
        match result {
            Ok(()) => {
                self.selected_discrepancy.set(None);
                self.resolution_note.set(String::new());
            }
            Err(e) => self.notice.set(Some(e)),
        }
    }

    /// Завершить урегулирование: один запрос по всем записям реестра.
    /// Ошибка оставляет реестр нетронутым — операция повторяема.
    pub fn complete_resolution(&self) {
        if !self.can_complete_resolution() {
            return;
        }
        let Some(reception_id) = self
            .reception
            .with_untracked(|r| r.as_ref().map(|r| r.to_string_id()))
        else {
            return;
        };
        if !self.resolution_op.begin() {
            return;
        }

        let vm = *self;
        let request = vm
            .ledger
            .with_untracked(|l| discrepancy::build_resolution_request(l));

        spawn_local(async move {
            match model::resolve_reception(&reception_id, &request).await {
                Ok(()) => {
                    vm.reception.update(|r| {
                        if let Some(reception) = r {
                            reception.is_discrepancy_resolved = true;
                            reception.status =
                                contracts::enums::reception_status::ReceptionStatus::Resolved;
                        }
                    });
                    // записи терминальны, реестр пуст
                    vm.ledger.set(Vec::new());
                    vm.cancel_resolution();
                    vm.resolution_op.succeed();
                }
                Err(e) => {
                    vm.resolution_op
                        .fail(format!("Урегулирование не завершено: {}", e));
                }
            }
        });
    }

    // ------------------------------------------------------------------
    // Комментарии и подтверждающие материалы
    // ------------------------------------------------------------------

    pub fn send_comment(&self, kind: CommentKind) {
        let message = self.comment_text.get_untracked();
        if message.trim().is_empty() {
            self.notice.set(Some("Введите текст комментария".to_string()));
            return;
        }
        let Some(reception_id) = self
            .reception
            .with_untracked(|r| r.as_ref().map(|r| r.to_string_id()))
        else {
            return;
        };
        if !self.comment_op.begin() {
            return;
        }

        let vm = *self;
        let request = AddCommentRequest {
            message: message.trim().to_string(),
            kind,
        };

        spawn_local(async move {
            match model::add_comment(&reception_id, &request).await {
                Ok(comment) => {
                    vm.reception.update(|r| {
                        if let Some(reception) = r {
                            reception.comments.push(comment);
                        }
                    });
                    vm.comment_text.set(String::new());
                    vm.comment_op.succeed();
                }
                Err(e) => {
                    vm.comment_op
                        .fail(format!("Комментарий не отправлен: {}", e));
                }
            }
        });
    }

    pub fn upload_files(&self, files: Vec<web_sys::File>) {
        if files.is_empty() {
            return;
        }
        let Some(reception_id) = self
            .reception
            .with_untracked(|r| r.as_ref().map(|r| r.to_string_id()))
        else {
            return;
        };
        if !self.upload_op.begin() {
            return;
        }

        let vm = *self;

        spawn_local(async move {
            match model::upload_evidence(&reception_id, &files).await {
                Ok(response) => match response.into_urls() {
                    Some(urls) => {
                        vm.reception.update(|r| {
                            if let Some(reception) = r {
                                reception.evidence_urls.extend(urls);
                            }
                        });
                        vm.upload_op.succeed();
                    }
                    None => {
                        // форма ответа не распознана — не гадаем, а
                        // перечитываем запись приёмки целиком
                        log::warn!("Неизвестная форма ответа загрузки, ресинхронизация");
                        match model::fetch_reception(&reception_id).await {
                            Ok(reception) => {
                                // запись могла измениться на сервере,
                                // реестр выводится из неё заново
                                vm.ledger.set(discrepancy::derive_from_reception(&reception));
                                vm.reception.set(Some(reception));
                                vm.upload_op.succeed();
                            }
                            Err(e) => vm
                                .upload_op
                                .fail(format!("Не удалось обновить приёмку: {}", e)),
                        }
                    }
                },
                Err(e) => {
                    vm.upload_op.fail(format!("Загрузка не удалась: {}", e));
                }
            }
        });
    }
}
