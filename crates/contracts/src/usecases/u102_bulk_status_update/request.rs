use crate::enums::SaleStatus;
use crate::system::users::ActorDto;
use serde::{Deserialize, Serialize};

/// Запрос на массовое обновление статуса
///
/// Каждый ID обрабатывается независимо; ответ — `BulkOperationResult`
/// со счётчиками и списком ошибок по элементам.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkStatusUpdateRequest {
    #[serde(rename = "saleIds")]
    pub sale_ids: Vec<String>,

    #[serde(rename = "newStatus")]
    pub new_status: SaleStatus,

    #[serde(default)]
    pub reason: Option<String>,

    #[serde(default)]
    pub actor: Option<ActorDto>,
}
