use async_trait::async_trait;
use contracts::domain::a001_product_sale::aggregate::ProductSale;

use crate::shared::logger;
use crate::workflow::ports::ContractPort;

/// Сервис контрактов
pub struct ContractService;

#[async_trait]
impl ContractPort for ContractService {
    async fn activate(&self, contract_id: &str, sale: &ProductSale) -> anyhow::Result<()> {
        tracing::info!(sale = %sale.base.code, contract = contract_id, "contract activated");
        logger::repository::log_event(
            "server",
            "contract",
            &format!(
                "Контракт {} активирован по продаже {}",
                contract_id, sale.base.code
            ),
        )
        .await
    }

    async fn cancel(&self, contract_id: &str, sale: &ProductSale) -> anyhow::Result<()> {
        tracing::info!(sale = %sale.base.code, contract = contract_id, "contract cancelled");
        logger::repository::log_event(
            "server",
            "contract",
            &format!(
                "Контракт {} аннулирован по продаже {}",
                contract_id, sale.base.code
            ),
        )
        .await
    }
}
