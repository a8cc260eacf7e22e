use crate::system::users::ActorDto;
use serde::{Deserialize, Serialize};

/// Запрос на массовое удаление продаж
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDeleteRequest {
    #[serde(rename = "saleIds")]
    pub sale_ids: Vec<String>,

    #[serde(default)]
    pub reason: Option<String>,

    #[serde(default)]
    pub actor: Option<ActorDto>,
}

/// Запрос на удаление одной продажи
///
/// Тело опционально: без него запрос считается системным.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteSaleRequest {
    #[serde(default)]
    pub reason: Option<String>,

    #[serde(default)]
    pub actor: Option<ActorDto>,
}
