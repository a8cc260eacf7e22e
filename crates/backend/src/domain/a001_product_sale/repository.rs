use chrono::Utc;
use contracts::domain::a001_product_sale::aggregate::{ProductSale, ProductSaleId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use contracts::enums::SaleStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_product_sale")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub status: String,
    pub customer_id: String,
    pub product_id: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub total_value: f64,
    pub warranty_months: Option<i32>,
    pub linked_contract_id: Option<String>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for ProductSale {
    type Error = anyhow::Error;

    /// Битая строка (нечитаемый id или неизвестный статус) — ошибка
    /// хранилища, а не молчаливая подмена значений: агрегат с чужим id
    /// сломал бы условную запись статуса.
    fn try_from(m: Model) -> Result<Self, Self::Error> {
        let uuid = Uuid::parse_str(&m.id)
            .map_err(|e| anyhow::anyhow!("corrupt sale row '{}': bad id: {}", m.id, e))?;
        let status = SaleStatus::from_code(&m.status).ok_or_else(|| {
            anyhow::anyhow!("corrupt sale row '{}': unknown status '{}'", m.id, m.status)
        })?;

        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };

        Ok(ProductSale {
            base: BaseAggregate::with_metadata(
                ProductSaleId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            status,
            customer_id: m.customer_id,
            product_id: m.product_id,
            quantity: m.quantity,
            unit_price: m.unit_price,
            total_value: m.total_value,
            warranty_months: m.warranty_months,
            linked_contract_id: m.linked_contract_id,
        })
    }
}

/// Итог условной записи статуса (optimistic locking)
#[derive(Debug)]
pub enum StatusWriteOutcome {
    Updated(ProductSale),
    /// Запись есть, но версия устарела
    Conflict,
    NotFound,
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<ProductSale>> {
    let mut items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(ProductSale::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    items.sort_by(|a, b| a.base.metadata.created_at.cmp(&b.base.metadata.created_at));
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<ProductSale>> {
    let result = Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    result.map(ProductSale::try_from).transpose()
}

pub async fn insert(aggregate: &ProductSale) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        status: Set(aggregate.status.code().to_string()),
        customer_id: Set(aggregate.customer_id.clone()),
        product_id: Set(aggregate.product_id.clone()),
        quantity: Set(aggregate.quantity),
        unit_price: Set(aggregate.unit_price),
        total_value: Set(aggregate.total_value),
        warranty_months: Set(aggregate.warranty_months),
        linked_contract_id: Set(aggregate.linked_contract_id.clone()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    };
    active.insert(conn()).await?;
    Ok(uuid)
}

/// Обновить редактируемые поля. Статус пишется как есть из загруженного
/// агрегата: DTO его не содержит, статус меняется только через движок.
pub async fn update(aggregate: &ProductSale) -> anyhow::Result<()> {
    let id = aggregate.base.id.value().to_string();
    let active = ActiveModel {
        id: Set(id),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        status: Set(aggregate.status.code().to_string()),
        customer_id: Set(aggregate.customer_id.clone()),
        product_id: Set(aggregate.product_id.clone()),
        quantity: Set(aggregate.quantity),
        unit_price: Set(aggregate.unit_price),
        total_value: Set(aggregate.total_value),
        warranty_months: Set(aggregate.warranty_months),
        linked_contract_id: Set(aggregate.linked_contract_id.clone()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    };
    active.update(conn()).await?;
    Ok(())
}

/// Условная запись статуса: compare-and-swap по полю version
///
/// UPDATE проходит только если версия в БД равна ожидаемой; иначе запись
/// была изменена конкурентно и вызывающий должен перечитать состояние.
pub async fn update_status(
    id: Uuid,
    to: SaleStatus,
    expected_version: i32,
) -> anyhow::Result<StatusWriteOutcome> {
    let now = Utc::now();
    let result = Entity::update_many()
        .col_expr(Column::Status, Expr::value(to.code()))
        .col_expr(Column::Version, Expr::value(expected_version + 1))
        .col_expr(Column::UpdatedAt, Expr::value(now))
        .filter(Column::Id.eq(id.to_string()))
        .filter(Column::Version.eq(expected_version))
        .filter(Column::IsDeleted.eq(false))
        .exec(conn())
        .await?;

    if result.rows_affected == 0 {
        return match get_by_id(id).await? {
            Some(_) => Ok(StatusWriteOutcome::Conflict),
            None => Ok(StatusWriteOutcome::NotFound),
        };
    }

    match get_by_id(id).await? {
        Some(sale) => Ok(StatusWriteOutcome::Updated(sale)),
        None => Ok(StatusWriteOutcome::NotFound),
    }
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .filter(Column::IsDeleted.eq(false))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_model() -> Model {
        Model {
            id: Uuid::new_v4().to_string(),
            code: "PS-001".into(),
            description: "Продажа".into(),
            comment: None,
            status: "confirmed".into(),
            customer_id: "customer-1".into(),
            product_id: "product-1".into(),
            quantity: 2,
            unit_price: 500.0,
            total_value: 1000.0,
            warranty_months: None,
            linked_contract_id: None,
            is_deleted: false,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
            version: 3,
        }
    }

    #[test]
    fn model_converts_with_identity_and_version_intact() {
        let model = valid_model();
        let id = model.id.clone();
        let sale = ProductSale::try_from(model).unwrap();
        assert_eq!(sale.base.id.value().to_string(), id);
        assert_eq!(sale.status, SaleStatus::Confirmed);
        assert_eq!(sale.base.metadata.version, 3);
    }

    #[test]
    fn corrupt_id_is_an_error_not_a_fresh_identity() {
        let mut model = valid_model();
        model.id = "not-a-uuid".into();
        let err = ProductSale::try_from(model).unwrap_err();
        assert!(err.to_string().contains("bad id"));
    }

    #[test]
    fn unknown_status_is_an_error_not_draft() {
        let mut model = valid_model();
        model.status = "archived".into();
        let err = ProductSale::try_from(model).unwrap_err();
        assert!(err.to_string().contains("unknown status"));
    }
}
