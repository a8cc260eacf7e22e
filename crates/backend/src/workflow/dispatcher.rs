use std::sync::Arc;

use contracts::domain::a001_product_sale::aggregate::ProductSale;
use contracts::enums::SaleStatus;
use contracts::workflow::{
    AuditRecord, NotificationEvent, SideEffect, StakeholderRole, TransitionEvent,
};
use serde_json::json;

use super::ports::{
    AuditPort, BillingPort, ContractPort, InventoryPort, NotificationPort, ShipmentPort,
    WarrantyPort,
};

/// Диспетчер побочных действий перехода
///
/// Каждое действие best-effort: ошибка логируется и не влияет ни на
/// остальные действия, ни на результат перехода. Запись аудита делается
/// для любого перехода, даже без действий.
pub struct SideEffectDispatcher {
    inventory: Arc<dyn InventoryPort>,
    shipment: Arc<dyn ShipmentPort>,
    warranty: Arc<dyn WarrantyPort>,
    billing: Arc<dyn BillingPort>,
    contracts: Arc<dyn ContractPort>,
    notifications: Arc<dyn NotificationPort>,
    audit: Arc<dyn AuditPort>,
}

impl SideEffectDispatcher {
    pub fn new(
        inventory: Arc<dyn InventoryPort>,
        shipment: Arc<dyn ShipmentPort>,
        warranty: Arc<dyn WarrantyPort>,
        billing: Arc<dyn BillingPort>,
        contracts: Arc<dyn ContractPort>,
        notifications: Arc<dyn NotificationPort>,
        audit: Arc<dyn AuditPort>,
    ) -> Self {
        Self {
            inventory,
            shipment,
            warranty,
            billing,
            contracts,
            notifications,
            audit,
        }
    }

    pub async fn dispatch(&self, sale: &ProductSale, event: &TransitionEvent) {
        if let Err(e) = self.audit.record(AuditRecord::status_change(event)).await {
            tracing::warn!(
                sale_id = %event.sale_id,
                "audit record failed: {:#}",
                e
            );
        }

        for effect in SideEffect::for_status(event.to) {
            if let Err(e) = self.apply(effect, sale, event).await {
                tracing::warn!(
                    sale_id = %event.sale_id,
                    effect = effect.code(),
                    "side effect failed: {:#}",
                    e
                );
            }
        }
    }

    async fn apply(
        &self,
        effect: &SideEffect,
        sale: &ProductSale,
        event: &TransitionEvent,
    ) -> anyhow::Result<()> {
        match effect {
            SideEffect::ReserveInventory => self.inventory.reserve(sale).await,
            SideEffect::ReleaseInventory => self.inventory.release(sale).await,
            SideEffect::DecrementInventory => self.inventory.decrement(sale).await,
            SideEffect::CreateShipment => self.shipment.create_shipment(sale).await,
            SideEffect::ActivateWarranty => match sale.warranty_months {
                Some(months) if months > 0 => self.warranty.activate(sale, months).await,
                _ => Ok(()),
            },
            SideEffect::GenerateInvoice => self.billing.generate_invoice(sale).await,
            SideEffect::RecordPayment => self.billing.record_payment(sale).await,
            SideEffect::ReversePayment => self.billing.reverse_payment(sale).await,
            // Контрактные действия выполняются только при наличии контракта
            SideEffect::ActivateContract => match &sale.linked_contract_id {
                Some(contract_id) => self.contracts.activate(contract_id, sale).await,
                None => Ok(()),
            },
            SideEffect::CancelContract => match &sale.linked_contract_id {
                Some(contract_id) => self.contracts.cancel(contract_id, sale).await,
                None => Ok(()),
            },
            SideEffect::NotifyStakeholders(roles) => {
                self.notifications
                    .send(build_notification(roles, sale, event))
                    .await
            }
        }
    }
}

fn build_notification(
    roles: &'static [StakeholderRole],
    sale: &ProductSale,
    event: &TransitionEvent,
) -> NotificationEvent {
    let (event_type, title) = match event.to {
        SaleStatus::Shipped => ("shipment_ready", "Отгрузка готова"),
        SaleStatus::Delivered => ("delivery_confirmed", "Доставка подтверждена"),
        SaleStatus::Invoiced => ("invoice_generated", "Счёт выставлен"),
        SaleStatus::Paid => ("payment_received", "Оплата получена"),
        SaleStatus::Cancelled => ("sale_cancelled", "Продажа отменена"),
        SaleStatus::Refunded => ("refund_processed", "Возврат оформлен"),
        _ => ("status_changed", "Статус продажи изменён"),
    };

    let mut message = format!(
        "Продажа {}: {} -> {}",
        sale.base.code,
        event.from.display_name(),
        event.to.display_name()
    );
    if let Some(reason) = &event.reason {
        message.push_str(&format!(" ({})", reason));
    }

    NotificationEvent {
        event_type: event_type.to_string(),
        sale_id: event.sale_id,
        title: title.to_string(),
        message,
        data: json!({
            "saleCode": sale.base.code,
            "fromStatus": event.from.code(),
            "toStatus": event.to.code(),
            "totalValue": sale.total_value,
        }),
        recipients: roles.to_vec(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use contracts::system::users::{Actor, UserRole};
    use std::sync::Mutex;

    /// Фейковые коллабораторы, записывающие вызовы
    #[derive(Default)]
    pub struct Recorder {
        pub calls: Mutex<Vec<String>>,
        pub notifications: Mutex<Vec<NotificationEvent>>,
        pub audits: Mutex<Vec<AuditRecord>>,
        /// Действия, которые должны падать (по коду)
        pub failing: Vec<&'static str>,
    }

    impl Recorder {
        fn push(&self, call: &str) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push(call.to_string());
            if self.failing.contains(&call) {
                anyhow::bail!("{} failed", call);
            }
            Ok(())
        }

        pub fn recorded(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl InventoryPort for Recorder {
        async fn reserve(&self, _sale: &ProductSale) -> anyhow::Result<()> {
            self.push("reserve_inventory")
        }
        async fn release(&self, _sale: &ProductSale) -> anyhow::Result<()> {
            self.push("release_inventory")
        }
        async fn decrement(&self, _sale: &ProductSale) -> anyhow::Result<()> {
            self.push("decrement_inventory")
        }
    }

    #[async_trait]
    impl ShipmentPort for Recorder {
        async fn create_shipment(&self, _sale: &ProductSale) -> anyhow::Result<()> {
            self.push("create_shipment")
        }
    }

    #[async_trait]
    impl WarrantyPort for Recorder {
        async fn activate(&self, _sale: &ProductSale, _months: i32) -> anyhow::Result<()> {
            self.push("activate_warranty")
        }
    }

    #[async_trait]
    impl BillingPort for Recorder {
        async fn generate_invoice(&self, _sale: &ProductSale) -> anyhow::Result<()> {
            self.push("generate_invoice")
        }
        async fn record_payment(&self, _sale: &ProductSale) -> anyhow::Result<()> {
            self.push("record_payment")
        }
        async fn reverse_payment(&self, _sale: &ProductSale) -> anyhow::Result<()> {
            self.push("reverse_payment")
        }
    }

    #[async_trait]
    impl ContractPort for Recorder {
        async fn activate(&self, _contract_id: &str, _sale: &ProductSale) -> anyhow::Result<()> {
            self.push("activate_contract")
        }
        async fn cancel(&self, _contract_id: &str, _sale: &ProductSale) -> anyhow::Result<()> {
            self.push("cancel_contract")
        }
    }

    #[async_trait]
    impl NotificationPort for Recorder {
        async fn send(&self, event: NotificationEvent) -> anyhow::Result<()> {
            self.notifications.lock().unwrap().push(event);
            self.push("notify_stakeholders")
        }
    }

    #[async_trait]
    impl AuditPort for Recorder {
        async fn record(&self, record: AuditRecord) -> anyhow::Result<()> {
            self.audits.lock().unwrap().push(record);
            self.push("audit")
        }
    }

    pub fn dispatcher_with(recorder: Arc<Recorder>) -> SideEffectDispatcher {
        SideEffectDispatcher::new(
            recorder.clone(),
            recorder.clone(),
            recorder.clone(),
            recorder.clone(),
            recorder.clone(),
            recorder.clone(),
            recorder,
        )
    }

    pub fn sample_sale() -> ProductSale {
        ProductSale::new_for_insert(
            "PS-001".into(),
            "Продажа".into(),
            "customer-1".into(),
            "product-1".into(),
            2,
            500.0,
            Some(12),
            None,
        )
    }

    fn event_to(sale: &ProductSale, from: SaleStatus, to: SaleStatus) -> TransitionEvent {
        let actor = Actor::new("u1", UserRole::Manager);
        TransitionEvent::new(sale.base.id.value(), from, to, None, actor.user_id)
    }

    #[tokio::test]
    async fn confirmed_reserves_inventory_and_notifies() {
        let recorder = Arc::new(Recorder::default());
        let dispatcher = dispatcher_with(recorder.clone());
        let sale = sample_sale();
        let event = event_to(&sale, SaleStatus::Pending, SaleStatus::Confirmed);

        dispatcher.dispatch(&sale, &event).await;

        assert_eq!(
            recorder.recorded(),
            vec!["audit", "reserve_inventory", "notify_stakeholders"]
        );
        let notifications = recorder.notifications.lock().unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].recipients, StakeholderRole::all().to_vec());
    }

    #[tokio::test]
    async fn contract_effects_are_skipped_without_linked_contract() {
        let recorder = Arc::new(Recorder::default());
        let dispatcher = dispatcher_with(recorder.clone());
        let sale = sample_sale(); // linked_contract_id = None
        let event = event_to(&sale, SaleStatus::Invoiced, SaleStatus::Paid);

        dispatcher.dispatch(&sale, &event).await;

        let calls = recorder.recorded();
        assert!(!calls.contains(&"activate_contract".to_string()));
        assert!(calls.contains(&"record_payment".to_string()));
    }

    #[tokio::test]
    async fn invoicing_generates_invoice_without_contract_effects() {
        let recorder = Arc::new(Recorder::default());
        let dispatcher = dispatcher_with(recorder.clone());
        let sale = sample_sale(); // linked_contract_id = None
        let event = event_to(&sale, SaleStatus::Delivered, SaleStatus::Invoiced);

        dispatcher.dispatch(&sale, &event).await;

        assert_eq!(
            recorder.recorded(),
            vec!["audit", "generate_invoice", "notify_stakeholders"]
        );
        let notifications = recorder.notifications.lock().unwrap();
        assert_eq!(notifications[0].event_type, "invoice_generated");
    }

    #[tokio::test]
    async fn contract_is_activated_when_linked() {
        let recorder = Arc::new(Recorder::default());
        let dispatcher = dispatcher_with(recorder.clone());
        let mut sale = sample_sale();
        sale.linked_contract_id = Some("contract-77".into());
        let event = event_to(&sale, SaleStatus::Invoiced, SaleStatus::Paid);

        dispatcher.dispatch(&sale, &event).await;

        assert_eq!(
            recorder.recorded(),
            vec![
                "audit",
                "activate_contract",
                "record_payment",
                "notify_stakeholders"
            ]
        );
    }

    #[tokio::test]
    async fn failing_effect_does_not_stop_the_rest() {
        let recorder = Arc::new(Recorder {
            failing: vec!["decrement_inventory"],
            ..Default::default()
        });
        let dispatcher = dispatcher_with(recorder.clone());
        let sale = sample_sale();
        let event = event_to(&sale, SaleStatus::Shipped, SaleStatus::Delivered);

        dispatcher.dispatch(&sale, &event).await;

        // После упавшего списания гарантия и уведомление всё равно выполнены
        assert_eq!(
            recorder.recorded(),
            vec![
                "audit",
                "decrement_inventory",
                "activate_warranty",
                "notify_stakeholders"
            ]
        );
    }

    #[tokio::test]
    async fn plain_transition_writes_audit_only() {
        let recorder = Arc::new(Recorder::default());
        let dispatcher = dispatcher_with(recorder.clone());
        let sale = sample_sale();
        let event = event_to(&sale, SaleStatus::Draft, SaleStatus::Pending);

        dispatcher.dispatch(&sale, &event).await;

        assert_eq!(recorder.recorded(), vec!["audit"]);
        let audits = recorder.audits.lock().unwrap();
        assert_eq!(audits[0].action, "STATUS_CHANGE");
        assert_eq!(audits[0].before.status, SaleStatus::Draft);
        assert_eq!(audits[0].after.status, SaleStatus::Pending);
    }

    #[tokio::test]
    async fn cancellation_reason_lands_in_notification() {
        let recorder = Arc::new(Recorder::default());
        let dispatcher = dispatcher_with(recorder.clone());
        let sale = sample_sale();
        let event = TransitionEvent::new(
            sale.base.id.value(),
            SaleStatus::Pending,
            SaleStatus::Cancelled,
            Some("клиент передумал".into()),
            "u1".into(),
        );

        dispatcher.dispatch(&sale, &event).await;

        let notifications = recorder.notifications.lock().unwrap();
        assert!(notifications[0].message.contains("клиент передумал"));
        assert_eq!(notifications[0].event_type, "sale_cancelled");
    }
}
