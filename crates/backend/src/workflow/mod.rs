//! Workflow-движок жизненного цикла продажи
//!
//! Переход статуса — единственная транзакция движка: проверка таблицы
//! переходов, permission gate (fail closed), условная запись статуса
//! по версии записи. Побочные действия выполняются после успешной записи
//! в режиме best-effort и на результат перехода не влияют.

pub mod bulk;
pub mod dispatcher;
pub mod engine;
pub mod permission;
pub mod ports;
pub mod store;

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::services;
use bulk::BulkCoordinator;
use dispatcher::SideEffectDispatcher;
use engine::TransitionEngine;
use permission::RolePermissionGate;
use store::DbSaleStore;

static ENGINE: OnceCell<Arc<TransitionEngine>> = OnceCell::new();
static COORDINATOR: OnceCell<Arc<BulkCoordinator>> = OnceCell::new();

/// Собрать движок с боевыми коллабораторами (вызывается один раз при старте)
pub fn init() -> anyhow::Result<()> {
    let store = Arc::new(DbSaleStore);
    let gate = Arc::new(RolePermissionGate::default());

    let dispatcher = Arc::new(SideEffectDispatcher::new(
        Arc::new(services::inventory::InventoryService),
        Arc::new(services::shipment::ShipmentService),
        Arc::new(services::warranty::WarrantyService),
        Arc::new(services::billing::BillingService),
        Arc::new(services::contract::ContractService),
        Arc::new(services::notification::NotificationService),
        Arc::new(services::audit::DbAuditLog),
    ));

    let engine = Arc::new(TransitionEngine::new(store.clone(), gate.clone(), dispatcher));
    let coordinator = Arc::new(BulkCoordinator::new(engine.clone(), store, gate));

    ENGINE
        .set(engine)
        .map_err(|_| anyhow::anyhow!("Workflow engine already initialized"))?;
    COORDINATOR
        .set(coordinator)
        .map_err(|_| anyhow::anyhow!("Bulk coordinator already initialized"))?;
    Ok(())
}

pub fn engine() -> &'static Arc<TransitionEngine> {
    ENGINE.get().expect("Workflow engine is not initialized")
}

pub fn coordinator() -> &'static Arc<BulkCoordinator> {
    COORDINATOR
        .get()
        .expect("Bulk coordinator is not initialized")
}
