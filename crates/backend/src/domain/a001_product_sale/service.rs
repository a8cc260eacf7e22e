use super::repository;
use contracts::domain::a001_product_sale::aggregate::{ProductSale, ProductSaleDto};
use uuid::Uuid;

pub async fn create(dto: ProductSaleDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("PS-{}", Uuid::new_v4()));

    let mut aggregate = ProductSale::new_for_insert(
        code,
        dto.description,
        dto.customer_id,
        dto.product_id,
        dto.quantity,
        dto.unit_price,
        dto.warranty_months,
        dto.comment,
    );
    aggregate.linked_contract_id = dto.linked_contract_id;

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(dto: ProductSaleDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    aggregate.update(&dto);

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    aggregate.before_write();

    repository::update(&aggregate).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<ProductSale>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<ProductSale>> {
    repository::list_all().await
}
