use async_trait::async_trait;
use chrono::{Duration, Utc};
use contracts::domain::a001_product_sale::aggregate::ProductSale;

use crate::shared::logger;
use crate::workflow::ports::WarrantyPort;

/// Сервис гарантийного обслуживания
pub struct WarrantyService;

#[async_trait]
impl WarrantyPort for WarrantyService {
    async fn activate(&self, sale: &ProductSale, months: i32) -> anyhow::Result<()> {
        // Приближение месяца 30 днями достаточно для журнала
        let expires = Utc::now() + Duration::days(30 * months as i64);
        tracing::info!(sale = %sale.base.code, months, "warranty activated");
        logger::repository::log_event(
            "server",
            "warranty",
            &format!(
                "Гарантия по продаже {} активирована на {} мес. (до {})",
                sale.base.code,
                months,
                expires.format("%Y-%m-%d")
            ),
        )
        .await
    }
}
