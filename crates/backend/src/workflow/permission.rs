use async_trait::async_trait;
use contracts::domain::a001_product_sale::aggregate::ProductSale;
use contracts::enums::SaleStatus;
use contracts::system::users::{Actor, UserRole};

/// Решение permission gate
#[derive(Debug, Clone)]
pub struct PermissionDecision {
    pub allowed: bool,
    pub reason: Option<String>,
}

impl PermissionDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }
}

/// Внешняя проверка прав на операции workflow
///
/// Движок обязан опросить gate до мутации состояния. Err(_) означает,
/// что gate недоступен; движок трактует это как отказ (fail closed),
/// а не как разрешение.
#[async_trait]
pub trait PermissionGate: Send + Sync {
    async fn can_transition(
        &self,
        sale: &ProductSale,
        from: SaleStatus,
        to: SaleStatus,
        actor: &Actor,
    ) -> anyhow::Result<PermissionDecision>;

    async fn can_delete(&self, sale: &ProductSale, actor: &Actor)
        -> anyhow::Result<PermissionDecision>;
}

/// Ролевая матрица прав: роль -> целевые статусы, в которые ей разрешено
/// переводить продажу. Всё, чего нет в матрице, запрещено.
#[derive(Default)]
pub struct RolePermissionGate;

impl RolePermissionGate {
    fn allowed_targets(role: UserRole) -> &'static [SaleStatus] {
        use SaleStatus::*;
        match role {
            UserRole::Admin => &[
                Draft, Pending, Confirmed, Shipped, Delivered, Invoiced, Paid, Cancelled, Refunded,
            ],
            // Менеджер ведёт продажу по всему циклу, кроме денежных операций
            UserRole::Manager => &[
                Draft, Pending, Confirmed, Shipped, Delivered, Invoiced, Cancelled,
            ],
            UserRole::Sales => &[Pending, Confirmed, Cancelled],
            UserRole::Finance => &[Invoiced, Paid, Refunded],
            UserRole::Warehouse => &[Shipped, Delivered],
        }
    }
}

#[async_trait]
impl PermissionGate for RolePermissionGate {
    async fn can_transition(
        &self,
        _sale: &ProductSale,
        _from: SaleStatus,
        to: SaleStatus,
        actor: &Actor,
    ) -> anyhow::Result<PermissionDecision> {
        if Self::allowed_targets(actor.role).contains(&to) {
            Ok(PermissionDecision::allow())
        } else {
            Ok(PermissionDecision::deny(format!(
                "Роль '{}' не может переводить продажу в статус '{}'",
                actor.role.code(),
                to.code()
            )))
        }
    }

    async fn can_delete(
        &self,
        _sale: &ProductSale,
        actor: &Actor,
    ) -> anyhow::Result<PermissionDecision> {
        match actor.role {
            UserRole::Admin | UserRole::Manager => Ok(PermissionDecision::allow()),
            _ => Ok(PermissionDecision::deny(format!(
                "Роль '{}' не может удалять продажи",
                actor.role.code()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_product_sale::aggregate::ProductSale;

    fn sale() -> ProductSale {
        ProductSale::new_for_insert(
            "PS-001".into(),
            "Продажа".into(),
            "customer-1".into(),
            "product-1".into(),
            1,
            100.0,
            None,
            None,
        )
    }

    #[tokio::test]
    async fn finance_can_post_money_statuses_only() {
        let gate = RolePermissionGate;
        let actor = Actor::new("u1", UserRole::Finance);
        let sale = sale();

        let paid = gate
            .can_transition(&sale, SaleStatus::Invoiced, SaleStatus::Paid, &actor)
            .await
            .unwrap();
        assert!(paid.allowed);

        let shipped = gate
            .can_transition(&sale, SaleStatus::Confirmed, SaleStatus::Shipped, &actor)
            .await
            .unwrap();
        assert!(!shipped.allowed);
        assert!(shipped.reason.is_some());
    }

    #[tokio::test]
    async fn only_admin_and_manager_delete() {
        let gate = RolePermissionGate;
        let sale = sale();
        for (role, expected) in [
            (UserRole::Admin, true),
            (UserRole::Manager, true),
            (UserRole::Sales, false),
            (UserRole::Warehouse, false),
        ] {
            let decision = gate
                .can_delete(&sale, &Actor::new("u1", role))
                .await
                .unwrap();
            assert_eq!(decision.allowed, expected, "role {:?}", role);
        }
    }
}
