use async_trait::async_trait;
use contracts::domain::a001_product_sale::aggregate::ProductSale;
use contracts::enums::SaleStatus;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::a001_product_sale::repository::{self, StatusWriteOutcome};

/// Ошибка хранилища продаж
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sale {0} not found")]
    NotFound(Uuid),

    /// Версия записи устарела (конкурентное изменение)
    #[error("version conflict")]
    Conflict,

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Хранилище продаж с условной записью статуса
///
/// Единственная точка, через которую движок мутирует агрегат.
/// `update_status` — compare-and-swap: запись проходит только если версия
/// в хранилище равна `expected_version`, иначе `StoreError::Conflict`.
#[async_trait]
pub trait SaleStore: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<ProductSale>, StoreError>;

    async fn update_status(
        &self,
        id: Uuid,
        to: SaleStatus,
        expected_version: i32,
    ) -> Result<ProductSale, StoreError>;

    /// Мягкое удаление; Ok(false) если записи нет
    async fn soft_delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// Боевое хранилище поверх sea-orm репозитория
pub struct DbSaleStore;

#[async_trait]
impl SaleStore for DbSaleStore {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<ProductSale>, StoreError> {
        Ok(repository::get_by_id(id).await?)
    }

    async fn update_status(
        &self,
        id: Uuid,
        to: SaleStatus,
        expected_version: i32,
    ) -> Result<ProductSale, StoreError> {
        match repository::update_status(id, to, expected_version).await? {
            StatusWriteOutcome::Updated(sale) => Ok(sale),
            StatusWriteOutcome::Conflict => Err(StoreError::Conflict),
            StatusWriteOutcome::NotFound => Err(StoreError::NotFound(id)),
        }
    }

    async fn soft_delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(repository::soft_delete(id).await?)
    }
}

/// Хранилище в памяти (тесты и локальные сценарии без БД)
#[derive(Default)]
pub struct InMemorySaleStore {
    sales: tokio::sync::Mutex<std::collections::HashMap<Uuid, ProductSale>>,
}

impl InMemorySaleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, sale: ProductSale) {
        let mut sales = self.sales.lock().await;
        sales.insert(sale.base.id.value(), sale);
    }
}

#[async_trait]
impl SaleStore for InMemorySaleStore {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<ProductSale>, StoreError> {
        let sales = self.sales.lock().await;
        Ok(sales.get(&id).filter(|s| !s.base.metadata.is_deleted).cloned())
    }

    async fn update_status(
        &self,
        id: Uuid,
        to: SaleStatus,
        expected_version: i32,
    ) -> Result<ProductSale, StoreError> {
        let mut sales = self.sales.lock().await;
        let sale = sales
            .get_mut(&id)
            .filter(|s| !s.base.metadata.is_deleted)
            .ok_or(StoreError::NotFound(id))?;
        if sale.base.metadata.version != expected_version {
            return Err(StoreError::Conflict);
        }
        sale.status = to;
        sale.base.metadata.increment_version();
        sale.base.touch();
        Ok(sale.clone())
    }

    async fn soft_delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut sales = self.sales.lock().await;
        match sales.get_mut(&id).filter(|s| !s.base.metadata.is_deleted) {
            Some(sale) => {
                sale.base.metadata.is_deleted = true;
                sale.base.touch();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
