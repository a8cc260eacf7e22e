use async_trait::async_trait;
use contracts::domain::a001_product_sale::aggregate::ProductSale;

use crate::shared::logger;
use crate::workflow::ports::BillingPort;

/// Биллинговый сервис
pub struct BillingService;

#[async_trait]
impl BillingPort for BillingService {
    async fn generate_invoice(&self, sale: &ProductSale) -> anyhow::Result<()> {
        tracing::info!(sale = %sale.base.code, total = sale.total_value, "invoice generated");
        logger::repository::log_event(
            "server",
            "billing",
            &format!(
                "Выставлен счёт по продаже {} на сумму {:.2}",
                sale.base.code, sale.total_value
            ),
        )
        .await
    }

    async fn record_payment(&self, sale: &ProductSale) -> anyhow::Result<()> {
        tracing::info!(sale = %sale.base.code, total = sale.total_value, "payment recorded");
        logger::repository::log_event(
            "server",
            "billing",
            &format!(
                "Зафиксирована оплата по продаже {} на сумму {:.2}",
                sale.base.code, sale.total_value
            ),
        )
        .await
    }

    async fn reverse_payment(&self, sale: &ProductSale) -> anyhow::Result<()> {
        tracing::info!(sale = %sale.base.code, total = sale.total_value, "payment reversed");
        logger::repository::log_event(
            "server",
            "billing",
            &format!(
                "Возврат оплаты по продаже {} на сумму {:.2}",
                sale.base.code, sale.total_value
            ),
        )
        .await
    }
}
