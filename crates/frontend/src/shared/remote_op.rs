//! Отслеживание состояния удалённых операций.
//!
//! Одна операция — один `RemoteOp` с явным статусом вместо россыпи
//! булевых флагов: повторный запуск во время выполнения отклоняется,
//! ошибка хранится вместе со статусом.

use leptos::prelude::*;

/// Статус удалённой операции
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OpStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(String),
}

/// Сигнальная обёртка статуса одной удалённой операции
#[derive(Clone, Copy)]
pub struct RemoteOp {
    status: RwSignal<OpStatus>,
}

impl RemoteOp {
    pub fn new() -> Self {
        Self {
            status: RwSignal::new(OpStatus::Idle),
        }
    }

    /// Перевести операцию в `Pending`. Возвращает false, если операция
    /// уже выполняется — вызывающая сторона обязана прекратить запуск.
    pub fn begin(&self) -> bool {
        if self.status.with_untracked(|s| *s == OpStatus::Pending) {
            return false;
        }
        self.status.set(OpStatus::Pending);
        true
    }

    pub fn succeed(&self) {
        self.status.set(OpStatus::Succeeded);
    }

    pub fn fail(&self, message: String) {
        self.status.set(OpStatus::Failed(message));
    }

    /// Операция выполняется (реактивно)
    pub fn is_pending(&self) -> bool {
        self.status.with(|s| *s == OpStatus::Pending)
    }

    /// Сообщение последней ошибки, если операция завершилась неудачно
    pub fn error(&self) -> Option<String> {
        self.status.with(|s| match s {
            OpStatus::Failed(message) => Some(message.clone()),
            _ => None,
        })
    }

    /// Скрыть ошибку (возврат в `Idle`); остальные статусы не трогаются
    pub fn clear_error(&self) {
        self.status.update(|s| {
            if matches!(s, OpStatus::Failed(_)) {
                *s = OpStatus::Idle;
            }
        });
    }
}

impl Default for RemoteOp {
    fn default() -> Self {
        Self::new()
    }
}
