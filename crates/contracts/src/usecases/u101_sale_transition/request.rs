use crate::enums::SaleStatus;
use crate::system::users::ActorDto;
use serde::{Deserialize, Serialize};

/// Запрос на перевод продажи в новый статус
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRequest {
    /// Целевой статус
    #[serde(rename = "newStatus")]
    pub new_status: SaleStatus,

    /// Причина перехода (попадает в событие и аудит)
    #[serde(default)]
    pub reason: Option<String>,

    /// Инициатор; без него запрос считается системным
    #[serde(default)]
    pub actor: Option<ActorDto>,
}
