//! Мастер приёмки: явная машина состояний из трёх упорядоченных шагов
//! Приёмка → Инциденты → Документация.
//!
//! Все переходы — чистые функции над `StepContext`; побочные эффекты
//! (создание записи приёмки, диалог подтверждения) остаются на стороне
//! view-model.

use crate::domain::a003_transfer_reception::aggregate::TransferReception;
use crate::enums::reception_status::ReceptionStatus;
use serde::{Deserialize, Serialize};

/// Шаг мастера приёмки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Сверка количеств по манифесту
    Reception,
    /// Работа с расхождениями
    Incidents,
    /// Подтверждающие документы
    Documentation,
}

impl WizardStep {
    /// Порядковый номер шага (для индикатора прогресса)
    pub fn index(&self) -> usize {
        match self {
            WizardStep::Reception => 0,
            WizardStep::Incidents => 1,
            WizardStep::Documentation => 2,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Reception => "Приёмка",
            WizardStep::Incidents => "Инциденты",
            WizardStep::Documentation => "Документация",
        }
    }

    pub fn all() -> [WizardStep; 3] {
        [
            WizardStep::Reception,
            WizardStep::Incidents,
            WizardStep::Documentation,
        ]
    }
}

/// Входы переходов: предикаты валидности, вычисляемые вызывающей стороной
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepContext {
    /// Предикат завершаемости сверки (черновик приёмки)
    pub reception_valid: bool,

    /// Запись приёмки уже создана на сервере
    pub reception_created: bool,

    /// Приёмка завершена (без расхождений либо урегулирована)
    pub reception_completed: bool,
}

impl StepContext {
    /// Валидность шага: первый шаг открывается предикатом сверки (или
    /// фактом созданной записи), остальные шаги необязательны
    pub fn step_valid(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::Reception => self.reception_created || self.reception_valid,
            WizardStep::Incidents | WizardStep::Documentation => true,
        }
    }
}

/// Результат попытки перехода вперёд
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextOutcome {
    /// Переход запрещён валидностью текущего шага (или шаг последний)
    Blocked,
    /// Нужно подтвердить создание записи приёмки, затем продвинуться
    ConfirmSubmit,
    /// Обычный переход
    Advance(WizardStep),
}

/// Начальный шаг: существующая приёмка с расхождениями ведёт сразу в
/// Инциденты, иная существующая — в Документацию, отсутствие записи —
/// в начало.
pub fn initial_step(existing: Option<&TransferReception>) -> WizardStep {
    match existing {
        Some(reception) => match reception.status {
            ReceptionStatus::WithDiscrepancies => WizardStep::Incidents,
            ReceptionStatus::Received | ReceptionStatus::Resolved => WizardStep::Documentation,
        },
        None => WizardStep::Reception,
    }
}

/// Переход вперёд.
///
/// С первого шага при несозданной записи переход перехватывается:
/// вместо продвижения требуется подтверждение и отправка приёмки.
pub fn next(step: WizardStep, ctx: &StepContext) -> NextOutcome {
    if !ctx.step_valid(step) {
        return NextOutcome::Blocked;
    }
    match step {
        WizardStep::Reception => {
            if ctx.reception_created {
                NextOutcome::Advance(WizardStep::Incidents)
            } else {
                NextOutcome::ConfirmSubmit
            }
        }
        WizardStep::Incidents => NextOutcome::Advance(WizardStep::Documentation),
        WizardStep::Documentation => NextOutcome::Blocked,
    }
}

/// Переход назад.
///
/// С шага Инциденты после завершения приёмки возврат запрещён — повторное
/// открытие работы с инцидентами по завершённой приёмке недопустимо.
pub fn previous(step: WizardStep, ctx: &StepContext) -> Option<WizardStep> {
    match step {
        WizardStep::Reception => None,
        WizardStep::Incidents => {
            if ctx.reception_completed {
                None
            } else {
                Some(WizardStep::Reception)
            }
        }
        WizardStep::Documentation => Some(WizardStep::Incidents),
    }
}

/// Прямой переход кликом по индикатору шага.
///
/// Запрещён возврат на первый шаг после завершения приёмки (с любого
/// последующего шага) и любой переход при невалидном текущем шаге.
pub fn select(current: WizardStep, target: WizardStep, ctx: &StepContext) -> Option<WizardStep> {
    if target == current {
        return Some(current);
    }
    if !ctx.step_valid(current) {
        return None;
    }
    if target == WizardStep::Reception && ctx.reception_completed {
        return None;
    }
    Some(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_warehouse_transfer::aggregate::WarehouseTransferId;
    use crate::domain::a003_transfer_reception::aggregate::TransferReceptionId;
    use crate::domain::common::BaseAggregate;
    use uuid::Uuid;

    fn reception_with_status(status: ReceptionStatus) -> TransferReception {
        TransferReception {
            base: BaseAggregate::new(
                TransferReceptionId::new(Uuid::new_v4()),
                "ПРМ-000001".to_string(),
                "Приёмка".to_string(),
            ),
            transfer_id: WarehouseTransferId::new(Uuid::new_v4()),
            status,
            is_discrepancy_resolved: status == ReceptionStatus::Resolved,
            items: Vec::new(),
            evidence_urls: Vec::new(),
            comments: Vec::new(),
        }
    }

    #[test]
    fn test_initial_step_selection() {
        assert_eq!(initial_step(None), WizardStep::Reception);

        let with_discrepancies = reception_with_status(ReceptionStatus::WithDiscrepancies);
        assert_eq!(initial_step(Some(&with_discrepancies)), WizardStep::Incidents);
        assert_eq!(initial_step(Some(&with_discrepancies)).index(), 1);

        let clean = reception_with_status(ReceptionStatus::Received);
        assert_eq!(initial_step(Some(&clean)), WizardStep::Documentation);

        let resolved = reception_with_status(ReceptionStatus::Resolved);
        assert_eq!(initial_step(Some(&resolved)), WizardStep::Documentation);
    }

    #[test]
    fn test_next_blocked_by_invalid_reception_step() {
        let ctx = StepContext {
            reception_valid: false,
            reception_created: false,
            reception_completed: false,
        };
        assert_eq!(next(WizardStep::Reception, &ctx), NextOutcome::Blocked);
    }

    #[test]
    fn test_next_intercepted_for_submission() {
        let ctx = StepContext {
            reception_valid: true,
            reception_created: false,
            reception_completed: false,
        };
        assert_eq!(next(WizardStep::Reception, &ctx), NextOutcome::ConfirmSubmit);

        let created = StepContext {
            reception_created: true,
            ..ctx
        };
        assert_eq!(
            next(WizardStep::Reception, &created),
            NextOutcome::Advance(WizardStep::Incidents)
        );
    }

    #[test]
    fn test_next_from_later_steps() {
        let ctx = StepContext {
            reception_valid: true,
            reception_created: true,
            reception_completed: false,
        };
        assert_eq!(
            next(WizardStep::Incidents, &ctx),
            NextOutcome::Advance(WizardStep::Documentation)
        );
        // терминальный шаг
        assert_eq!(next(WizardStep::Documentation, &ctx), NextOutcome::Blocked);
    }

    #[test]
    fn test_previous_blocked_after_completion() {
        let open = StepContext {
            reception_valid: true,
            reception_created: true,
            reception_completed: false,
        };
        assert_eq!(previous(WizardStep::Incidents, &open), Some(WizardStep::Reception));

        let completed = StepContext {
            reception_completed: true,
            ..open
        };
        assert_eq!(previous(WizardStep::Incidents, &completed), None);
        assert_eq!(
            previous(WizardStep::Documentation, &completed),
            Some(WizardStep::Incidents)
        );
        assert_eq!(previous(WizardStep::Reception, &completed), None);
    }

    #[test]
    fn test_select_guards() {
        let completed = StepContext {
            reception_valid: true,
            reception_created: true,
            reception_completed: true,
        };
        // возврат на первый шаг после завершения запрещён
        assert_eq!(
            select(WizardStep::Documentation, WizardStep::Reception, &completed),
            None
        );
        assert_eq!(
            select(WizardStep::Documentation, WizardStep::Incidents, &completed),
            Some(WizardStep::Incidents)
        );

        // невалидный текущий шаг блокирует любой уход с него
        let invalid = StepContext {
            reception_valid: false,
            reception_created: false,
            reception_completed: false,
        };
        assert_eq!(
            select(WizardStep::Reception, WizardStep::Incidents, &invalid),
            None
        );
        // клик по текущему шагу — всегда no-op
        assert_eq!(
            select(WizardStep::Reception, WizardStep::Reception, &invalid),
            Some(WizardStep::Reception)
        );
    }
}
