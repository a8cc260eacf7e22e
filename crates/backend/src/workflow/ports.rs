//! Порты внешних коллабораторов побочных действий
//!
//! Движок не знает конкретных систем: склад, доставка, биллинг,
//! контракты, уведомления и аудит внедряются через эти трейты.

use async_trait::async_trait;
use contracts::domain::a001_product_sale::aggregate::ProductSale;
use contracts::workflow::{AuditRecord, NotificationEvent};

#[async_trait]
pub trait InventoryPort: Send + Sync {
    /// Зарезервировать product_id x quantity
    async fn reserve(&self, sale: &ProductSale) -> anyhow::Result<()>;

    /// Снять резерв (отмена продажи)
    async fn release(&self, sale: &ProductSale) -> anyhow::Result<()>;

    /// Списать со склада (доставка)
    async fn decrement(&self, sale: &ProductSale) -> anyhow::Result<()>;
}

#[async_trait]
pub trait ShipmentPort: Send + Sync {
    async fn create_shipment(&self, sale: &ProductSale) -> anyhow::Result<()>;
}

#[async_trait]
pub trait WarrantyPort: Send + Sync {
    /// Активировать гарантийное окно с текущего момента
    async fn activate(&self, sale: &ProductSale, months: i32) -> anyhow::Result<()>;
}

#[async_trait]
pub trait BillingPort: Send + Sync {
    async fn generate_invoice(&self, sale: &ProductSale) -> anyhow::Result<()>;

    async fn record_payment(&self, sale: &ProductSale) -> anyhow::Result<()>;

    async fn reverse_payment(&self, sale: &ProductSale) -> anyhow::Result<()>;
}

#[async_trait]
pub trait ContractPort: Send + Sync {
    async fn activate(&self, contract_id: &str, sale: &ProductSale) -> anyhow::Result<()>;

    async fn cancel(&self, contract_id: &str, sale: &ProductSale) -> anyhow::Result<()>;
}

#[async_trait]
pub trait NotificationPort: Send + Sync {
    /// Fire-and-forget доставка, подтверждение не требуется
    async fn send(&self, event: NotificationEvent) -> anyhow::Result<()>;
}

#[async_trait]
pub trait AuditPort: Send + Sync {
    async fn record(&self, record: AuditRecord) -> anyhow::Result<()>;
}
