use async_trait::async_trait;
use contracts::domain::a001_product_sale::aggregate::ProductSale;

use crate::shared::logger;
use crate::workflow::ports::InventoryPort;

/// Складской сервис
pub struct InventoryService;

#[async_trait]
impl InventoryPort for InventoryService {
    async fn reserve(&self, sale: &ProductSale) -> anyhow::Result<()> {
        tracing::info!(sale = %sale.base.code, product = %sale.product_id, qty = sale.quantity, "inventory reserve");
        logger::repository::log_event(
            "server",
            "inventory",
            &format!(
                "Резерв по продаже {}: товар {} x {}",
                sale.base.code, sale.product_id, sale.quantity
            ),
        )
        .await
    }

    async fn release(&self, sale: &ProductSale) -> anyhow::Result<()> {
        tracing::info!(sale = %sale.base.code, product = %sale.product_id, qty = sale.quantity, "inventory release");
        logger::repository::log_event(
            "server",
            "inventory",
            &format!(
                "Снятие резерва по продаже {}: товар {} x {}",
                sale.base.code, sale.product_id, sale.quantity
            ),
        )
        .await
    }

    async fn decrement(&self, sale: &ProductSale) -> anyhow::Result<()> {
        tracing::info!(sale = %sale.base.code, product = %sale.product_id, qty = sale.quantity, "inventory decrement");
        logger::repository::log_event(
            "server",
            "inventory",
            &format!(
                "Списание по продаже {}: товар {} x {}",
                sale.base.code, sale.product_id, sale.quantity
            ),
        )
        .await
    }
}
