use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, Origin};
use crate::enums::SaleStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ID типа для продажи товара
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductSaleId(pub Uuid);

impl ProductSaleId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for ProductSaleId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ProductSaleId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Продажа товара (агрегат)
///
/// Статус меняется только через workflow-движок; прямое редактирование
/// поля `status` минуя движок нарушает гарантии жизненного цикла.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSale {
    #[serde(flatten)]
    pub base: BaseAggregate<ProductSaleId>,

    /// Текущий статус жизненного цикла
    pub status: SaleStatus,

    /// Ссылка на клиента (внешний справочник)
    #[serde(rename = "customerId")]
    pub customer_id: String,

    /// Ссылка на товар (внешний справочник)
    #[serde(rename = "productId")]
    pub product_id: String,

    /// Количество (> 0)
    pub quantity: i32,

    /// Цена за единицу (RUB, >= 0)
    #[serde(rename = "unitPrice")]
    pub unit_price: f64,

    /// Сумма продажи; всегда равна quantity * unit_price
    #[serde(rename = "totalValue")]
    pub total_value: f64,

    /// Гарантийный срок в месяцах (опционально, >= 0)
    #[serde(rename = "warrantyMonths")]
    pub warranty_months: Option<i32>,

    /// Связанный сервисный контракт; активируется при переходе в "paid"
    #[serde(rename = "linkedContractId")]
    pub linked_contract_id: Option<String>,
}

impl ProductSale {
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        code: String,
        description: String,
        customer_id: String,
        product_id: String,
        quantity: i32,
        unit_price: f64,
        warranty_months: Option<i32>,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(ProductSaleId::new_v4(), code, description);
        base.comment = comment;
        Self {
            base,
            status: SaleStatus::Draft,
            customer_id,
            product_id,
            quantity,
            unit_price,
            total_value: quantity as f64 * unit_price,
            warranty_months,
            linked_contract_id: None,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.base.touch();
    }

    /// Применить DTO к агрегату
    ///
    /// Статус через DTO не меняется. Сумма пересчитывается,
    /// поэтому инвариант total_value == quantity * unit_price не ломается.
    pub fn update(&mut self, dto: &ProductSaleDto) {
        self.base.code = dto.code.clone().unwrap_or_default();
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.customer_id = dto.customer_id.clone();
        self.product_id = dto.product_id.clone();
        self.quantity = dto.quantity;
        self.unit_price = dto.unit_price;
        self.total_value = dto.quantity as f64 * dto.unit_price;
        self.warranty_months = dto.warranty_months;
        self.linked_contract_id = dto.linked_contract_id.clone();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Описание не может быть пустым".into());
        }
        if self.base.code.trim().is_empty() {
            return Err("Код не может быть пустым".into());
        }
        if self.customer_id.trim().is_empty() {
            return Err("Клиент обязателен".into());
        }
        if self.product_id.trim().is_empty() {
            return Err("Товар обязателен".into());
        }
        if self.quantity <= 0 {
            return Err("Количество должно быть больше нуля".into());
        }
        if self.unit_price < 0.0 {
            return Err("Цена не может быть отрицательной".into());
        }
        if let Some(months) = self.warranty_months {
            if months < 0 {
                return Err("Гарантийный срок не может быть отрицательным".into());
            }
        }
        if (self.total_value - self.quantity as f64 * self.unit_price).abs() > 1e-9 {
            return Err("Сумма не равна количеству, умноженному на цену".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.touch_updated();
    }
}

impl AggregateRoot for ProductSale {
    type Id = ProductSaleId;
    fn id(&self) -> Self::Id {
        self.base.id
    }
    fn code(&self) -> &str {
        &self.base.code
    }
    fn description(&self) -> &str {
        &self.base.description
    }
    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }
    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }
    fn aggregate_index() -> &'static str {
        "a001"
    }
    fn collection_name() -> &'static str {
        "product_sale"
    }
    fn element_name() -> &'static str {
        "Продажа товара"
    }
    fn list_name() -> &'static str {
        "Продажи товаров"
    }
    fn origin() -> Origin {
        Origin::Self_
    }
}

// =============================================================================
// DTO
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProductSaleDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    #[serde(rename = "customerId")]
    pub customer_id: String,
    #[serde(rename = "productId")]
    pub product_id: String,
    pub quantity: i32,
    #[serde(rename = "unitPrice")]
    pub unit_price: f64,
    #[serde(rename = "warrantyMonths")]
    pub warranty_months: Option<i32>,
    /// Контракт назначается внешней системой управления контрактами
    #[serde(rename = "linkedContractId")]
    pub linked_contract_id: Option<String>,
    pub comment: Option<String>,
}
