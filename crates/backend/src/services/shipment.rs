use async_trait::async_trait;
use contracts::domain::a001_product_sale::aggregate::ProductSale;

use crate::shared::logger;
use crate::workflow::ports::ShipmentPort;

/// Сервис доставки
pub struct ShipmentService;

#[async_trait]
impl ShipmentPort for ShipmentService {
    async fn create_shipment(&self, sale: &ProductSale) -> anyhow::Result<()> {
        tracing::info!(sale = %sale.base.code, customer = %sale.customer_id, "shipment created");
        logger::repository::log_event(
            "server",
            "shipment",
            &format!(
                "Создана отгрузка по продаже {} для клиента {}",
                sale.base.code, sale.customer_id
            ),
        )
        .await
    }
}
