use crate::enums::SaleStatus;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Ошибка перехода статуса
///
/// Все исходы движка типизированы; паник и "сырых" ошибок наружу нет.
/// Недоступность permission gate трактуется как отказ (fail closed).
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum TransitionError {
    /// Запрошен текущий статус: повторный идентичный запрос — ошибка,
    /// а не тихий успех
    #[error("sale is already in status '{status}'")]
    NoOp { status: SaleStatus },

    /// Пары (from, to) нет в таблице переходов
    #[error("transition '{from}' -> '{to}' is not allowed")]
    Invalid { from: SaleStatus, to: SaleStatus },

    /// Permission gate явно отказал
    #[error("permission denied: {reason}")]
    PermissionDenied { reason: String },

    /// Permission gate недоступен или вернул ошибку (fail closed)
    #[error("permission gate unavailable: {detail}")]
    GateUnavailable { detail: String },

    /// Конкурентное изменение: версия записи устарела, нужен retry
    #[error("sale was modified concurrently, retry with fresh state")]
    ConcurrentModification,

    /// Продажа не найдена в хранилище
    #[error("sale {id} not found")]
    SaleNotFound { id: Uuid },

    /// Ошибка хранилища; статус не изменён
    #[error("persistence failure: {detail}")]
    Persistence { detail: String },
}

impl TransitionError {
    /// Стабильный код вида ошибки (для bulk-отчётов и HTTP-ответов)
    pub fn kind(&self) -> &'static str {
        match self {
            TransitionError::NoOp { .. } => "NoOpTransition",
            TransitionError::Invalid { .. } => "InvalidTransition",
            TransitionError::PermissionDenied { .. } => "PermissionDenied",
            TransitionError::GateUnavailable { .. } => "PermissionGateUnavailable",
            TransitionError::ConcurrentModification => "ConcurrentModification",
            TransitionError::SaleNotFound { .. } => "SaleNotFound",
            TransitionError::Persistence { .. } => "PersistenceFailure",
        }
    }
}
