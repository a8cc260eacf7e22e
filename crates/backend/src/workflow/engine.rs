use std::sync::Arc;

use contracts::enums::SaleStatus;
use contracts::system::users::Actor;
use contracts::workflow::{TransitionError, TransitionEvent};
use uuid::Uuid;

use super::dispatcher::SideEffectDispatcher;
use super::permission::PermissionGate;
use super::store::{SaleStore, StoreError};

/// Движок переходов статуса продажи
///
/// Транзакция движка — запись статуса; побочные действия диспетчеризуются
/// после неё и не ожидаются вызывающим. Конкурентные переходы по одной
/// продаже сериализуются условной записью по версии: из двух гонящихся
/// запросов успешен ровно один, второй получает `ConcurrentModification`.
pub struct TransitionEngine {
    store: Arc<dyn SaleStore>,
    gate: Arc<dyn PermissionGate>,
    dispatcher: Arc<SideEffectDispatcher>,
}

impl TransitionEngine {
    pub fn new(
        store: Arc<dyn SaleStore>,
        gate: Arc<dyn PermissionGate>,
        dispatcher: Arc<SideEffectDispatcher>,
    ) -> Self {
        Self {
            store,
            gate,
            dispatcher,
        }
    }

    pub async fn transition(
        &self,
        sale_id: Uuid,
        to: SaleStatus,
        reason: Option<String>,
        actor: &Actor,
    ) -> Result<TransitionEvent, TransitionError> {
        let sale = self
            .store
            .get_by_id(sale_id)
            .await
            .map_err(store_error)?
            .ok_or(TransitionError::SaleNotFound { id: sale_id })?;

        let from = sale.status;

        // Повторный идентичный запрос — ошибка, а не тихий успех
        if from == to {
            return Err(TransitionError::NoOp { status: from });
        }

        if !from.can_transition_to(to) {
            return Err(TransitionError::Invalid { from, to });
        }

        // Fail closed: недоступный gate равносилен отказу
        let decision = self
            .gate
            .can_transition(&sale, from, to, actor)
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

        let updated = self
            .store
            .update_status(sale_id, to, sale.base.metadata.version)
            .await
            .map_err(store_error)?;

        let event = TransitionEvent::new(sale_id, from, to, reason, actor.user_id.clone());

        tracing::info!(
            sale = %updated.base.code,
            from = %from,
            to = %to,
            actor = %actor.user_id,
            "sale transition applied"
        );

        // Побочные действия — уведомления о факте, не предусловия:
        // вызывающий получает результат по записи статуса
        let dispatcher = self.dispatcher.clone();
        let dispatch_event = event.clone();
        tokio::spawn(async move {
            dispatcher.dispatch(&updated, &dispatch_event).await;
        });

        Ok(event)
    }
}

pub(crate) fn store_error(err: StoreError) -> TransitionError {
    match err {
        StoreError::NotFound(id) => TransitionError::SaleNotFound { id },
        StoreError::Conflict => TransitionError::ConcurrentModification,
        StoreError::Backend(e) => TransitionError::Persistence {
            detail: format!("{:#}", e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::dispatcher::tests::{dispatcher_with, sample_sale, Recorder};
    use crate::workflow::permission::{PermissionDecision, RolePermissionGate};
    use crate::workflow::store::InMemorySaleStore;
    use async_trait::async_trait;
    use contracts::domain::a001_product_sale::aggregate::ProductSale;
    use contracts::system::users::UserRole;

    struct AllowAll;

    #[async_trait]
    impl PermissionGate for AllowAll {
        async fn can_transition(
            &self,
            _sale: &ProductSale,
            _from: SaleStatus,
            _to: SaleStatus,
            _actor: &Actor,
        ) -> anyhow::Result<PermissionDecision> {
            Ok(PermissionDecision::allow())
        }
        async fn can_delete(
            &self,
            _sale: &ProductSale,
            _actor: &Actor,
        ) -> anyhow::Result<PermissionDecision> {
            Ok(PermissionDecision::allow())
        }
    }

    struct DenyAll;

    #[async_trait]
    impl PermissionGate for DenyAll {
        async fn can_transition(
            &self,
            _sale: &ProductSale,
            _from: SaleStatus,
            _to: SaleStatus,
            _actor: &Actor,
        ) -> anyhow::Result<PermissionDecision> {
            Ok(PermissionDecision::deny("недостаточно прав"))
        }
        async fn can_delete(
            &self,
            _sale: &ProductSale,
            _actor: &Actor,
        ) -> anyhow::Result<PermissionDecision> {
            Ok(PermissionDecision::deny("недостаточно прав"))
        }
    }

    struct BrokenGate;

    #[async_trait]
    impl PermissionGate for BrokenGate {
        async fn can_transition(
            &self,
            _sale: &ProductSale,
            _from: SaleStatus,
            _to: SaleStatus,
            _actor: &Actor,
        ) -> anyhow::Result<PermissionDecision> {
            anyhow::bail!("gate timeout")
        }
        async fn can_delete(
            &self,
            _sale: &ProductSale,
            _actor: &Actor,
        ) -> anyhow::Result<PermissionDecision> {
            anyhow::bail!("gate timeout")
        }
    }

    /// Gate-барьер: пропускает оба гонящихся запроса только после того,
    /// как оба прочитали один и тот же снимок продажи
    struct BarrierGate {
        barrier: tokio::sync::Barrier,
    }

    #[async_trait]
    impl PermissionGate for BarrierGate {
        async fn can_transition(
            &self,
            _sale: &ProductSale,
            _from: SaleStatus,
            _to: SaleStatus,
            _actor: &Actor,
        ) -> anyhow::Result<PermissionDecision> {
            self.barrier.wait().await;
            Ok(PermissionDecision::allow())
        }
        async fn can_delete(
            &self,
            _sale: &ProductSale,
            _actor: &Actor,
        ) -> anyhow::Result<PermissionDecision> {
            Ok(PermissionDecision::allow())
        }
    }

    async fn engine_with(
        gate: Arc<dyn PermissionGate>,
        status: SaleStatus,
    ) -> (Arc<TransitionEngine>, Arc<InMemorySaleStore>, Uuid) {
        let store = Arc::new(InMemorySaleStore::new());
        let mut sale = sample_sale();
        sale.status = status;
        let id = sale.base.id.value();
        store.insert(sale).await;

        let dispatcher = Arc::new(dispatcher_with(Arc::new(Recorder::default())));
        let engine = Arc::new(TransitionEngine::new(store.clone(), gate, dispatcher));
        (engine, store, id)
    }

    fn actor() -> Actor {
        Actor::new("u1", UserRole::Manager)
    }

    #[tokio::test]
    async fn draft_to_pending_succeeds_with_event() {
        let (engine, store, id) = engine_with(Arc::new(AllowAll), SaleStatus::Draft).await;

        let event = engine
            .transition(id, SaleStatus::Pending, None, &actor())
            .await
            .unwrap();

        assert_eq!(event.from, SaleStatus::Draft);
        assert_eq!(event.to, SaleStatus::Pending);
        assert_eq!(event.sale_id, id);

        let stored = store.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.status, SaleStatus::Pending);
        assert_eq!(stored.base.metadata.version, 1);
    }

    #[tokio::test]
    async fn paid_to_pending_is_invalid_and_leaves_status() {
        let (engine, store, id) = engine_with(Arc::new(AllowAll), SaleStatus::Paid).await;

        let err = engine
            .transition(id, SaleStatus::Pending, None, &actor())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            TransitionError::Invalid {
                from: SaleStatus::Paid,
                to: SaleStatus::Pending
            }
        );
        let stored = store.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.status, SaleStatus::Paid);
        assert_eq!(stored.base.metadata.version, 0);
    }

    #[tokio::test]
    async fn noop_transition_is_an_error() {
        let (engine, store, id) = engine_with(Arc::new(AllowAll), SaleStatus::Pending).await;

        let err = engine
            .transition(id, SaleStatus::Pending, None, &actor())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            TransitionError::NoOp {
                status: SaleStatus::Pending
            }
        );
        let stored = store.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.base.metadata.version, 0);
    }

    #[tokio::test]
    async fn terminal_status_rejects_all_transitions() {
        let (engine, _store, id) = engine_with(Arc::new(AllowAll), SaleStatus::Refunded).await;

        for to in SaleStatus::all() {
            if to == SaleStatus::Refunded {
                continue;
            }
            let err = engine.transition(id, to, None, &actor()).await.unwrap_err();
            assert_eq!(err.kind(), "InvalidTransition");
        }
    }

    #[tokio::test]
    async fn denied_permission_leaves_status_untouched() {
        let (engine, store, id) = engine_with(Arc::new(DenyAll), SaleStatus::Draft).await;

        let err = engine
            .transition(id, SaleStatus::Pending, None, &actor())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            TransitionError::PermissionDenied {
                reason: "недостаточно прав".to_string()
            }
        );
        let stored = store.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.status, SaleStatus::Draft);
        assert_eq!(stored.base.metadata.version, 0);
    }

    #[tokio::test]
    async fn broken_gate_fails_closed() {
        let (engine, store, id) = engine_with(Arc::new(BrokenGate), SaleStatus::Draft).await;

        let err = engine
            .transition(id, SaleStatus::Pending, None, &actor())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "PermissionGateUnavailable");
        let stored = store.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.status, SaleStatus::Draft);
    }

    #[tokio::test]
    async fn missing_sale_is_reported() {
        let (engine, _store, _id) = engine_with(Arc::new(AllowAll), SaleStatus::Draft).await;
        let missing = Uuid::new_v4();

        let err = engine
            .transition(missing, SaleStatus::Pending, None, &actor())
            .await
            .unwrap_err();

        assert_eq!(err, TransitionError::SaleNotFound { id: missing });
    }

    #[tokio::test]
    async fn role_matrix_is_enforced_through_the_gate() {
        let (engine, _store, id) =
            engine_with(Arc::new(RolePermissionGate), SaleStatus::Invoiced).await;
        let warehouse = Actor::new("w1", UserRole::Warehouse);

        let err = engine
            .transition(id, SaleStatus::Paid, None, &warehouse)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "PermissionDenied");

        let finance = Actor::new("f1", UserRole::Finance);
        let event = engine
            .transition(id, SaleStatus::Paid, None, &finance)
            .await
            .unwrap();
        assert_eq!(event.to, SaleStatus::Paid);
    }

    #[tokio::test]
    async fn racing_transitions_have_exactly_one_winner() {
        // Оба запроса читают один снимок (версия 0): барьер в gate
        // не даёт первому записать статус раньше, чем второй прочитает
        let gate = Arc::new(BarrierGate {
            barrier: tokio::sync::Barrier::new(2),
        });
        let (engine, store, id) = engine_with(gate, SaleStatus::Pending).await;

        let actor_a = actor();
        let actor_b = actor();
        let confirm = engine.transition(id, SaleStatus::Confirmed, None, &actor_a);
        let cancel = engine.transition(id, SaleStatus::Cancelled, None, &actor_b);
        let (first, second) = tokio::join!(confirm, cancel);

        let succeeded = [&first, &second].iter().filter(|r| r.is_ok()).count();
        assert_eq!(succeeded, 1, "exactly one of two racing requests wins");

        let loser = if first.is_err() { first } else { second };
        assert_eq!(loser.unwrap_err(), TransitionError::ConcurrentModification);

        let stored = store.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.base.metadata.version, 1);
        assert!(
            stored.status == SaleStatus::Confirmed || stored.status == SaleStatus::Cancelled
        );
    }
}
