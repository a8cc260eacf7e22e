use std::sync::Arc;

use contracts::enums::SaleStatus;
use contracts::system::users::Actor;
use contracts::usecases::common::BulkOperationResult;
use contracts::workflow::TransitionError;
use uuid::Uuid;

use super::engine::{store_error, TransitionEngine};
use super::permission::PermissionGate;
use super::store::SaleStore;

/// Координатор массовых операций над продажами
///
/// Элементы обрабатываются последовательно и независимо: ошибка по одному
/// элементу не прерывает остальные и попадает в итоговый отчёт. Каждый
/// переход идёт через движок и проходит все его проверки.
pub struct BulkCoordinator {
    engine: Arc<TransitionEngine>,
    store: Arc<dyn SaleStore>,
    gate: Arc<dyn PermissionGate>,
}

impl BulkCoordinator {
    pub fn new(
        engine: Arc<TransitionEngine>,
        store: Arc<dyn SaleStore>,
        gate: Arc<dyn PermissionGate>,
    ) -> Self {
        Self {
            engine,
            store,
            gate,
        }
    }

    pub async fn bulk_transition(
        &self,
        sale_ids: &[String],
        to: SaleStatus,
        reason: Option<String>,
        actor: &Actor,
    ) -> BulkOperationResult {
        let mut result = BulkOperationResult::new(sale_ids.len());

        for raw_id in sale_ids {
            let id = match Uuid::parse_str(raw_id) {
                Ok(id) => id,
                Err(_) => {
                    result.record_failure(raw_id.clone(), "InvalidId");
                    continue;
                }
            };

            match self
                .engine
                .transition(id, to, reason.clone(), actor)
                .await
            {
                Ok(_) => result.record_success(),
                Err(e) => result.record_failure(raw_id.clone(), e.kind()),
            }
        }

        tracing::info!(
            total = result.total,
            succeeded = result.succeeded,
            failed = result.failed,
            to = %to,
            "bulk status update finished"
        );
        result
    }

    pub async fn bulk_delete(
        &self,
        sale_ids: &[String],
        reason: Option<String>,
        actor: &Actor,
    ) -> BulkOperationResult {
        let mut result = BulkOperationResult::new(sale_ids.len());

        for raw_id in sale_ids {
            let id = match Uuid::parse_str(raw_id) {
                Ok(id) => id,
                Err(_) => {
                    result.record_failure(raw_id.clone(), "InvalidId");
                    continue;
                }
            };

            match self.delete_sale(id, reason.as_deref(), actor).await {
                Ok(()) => result.record_success(),
                Err(e) => result.record_failure(raw_id.clone(), e.kind()),
            }
        }

        tracing::info!(
            total = result.total,
            succeeded = result.succeeded,
            failed = result.failed,
            "bulk delete finished"
        );
        result
    }

    /// Удалить одну продажу через permission gate
    ///
    /// Единственный путь удаления: и массовая, и одиночная операция
    /// проходят через эту проверку. Gate недоступен — отказ, как и
    /// при переходе статуса.
    pub async fn delete_sale(
        &self,
        id: Uuid,
        reason: Option<&str>,
        actor: &Actor,
    ) -> Result<(), TransitionError> {
        let sale = self
            .store
            .get_by_id(id)
            .await
            .map_err(store_error)?
            .ok_or(TransitionError::SaleNotFound { id })?;

        let decision = self
            .gate
            .can_delete(&sale, actor)
            .await
            .map_err(|e| TransitionError::GateUnavailable {
                detail: format!("{:#}", e),
            })?;
        if !decision.allowed {
            return Err(TransitionError::PermissionDenied {
                reason: decision
                    .reason
                    .unwrap_or_else(|| "доступ запрещён".to_string()),
            });
        }

        match self.store.soft_delete(id).await.map_err(store_error)? {
            true => {
                tracing::info!(
                    sale = %sale.base.code,
                    actor = %actor.user_id,
                    reason = reason.unwrap_or(""),
                    "sale deleted"
                );
                Ok(())
            }
            false => Err(TransitionError::SaleNotFound { id }),
        }
    }
}
