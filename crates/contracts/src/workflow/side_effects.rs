use crate::enums::SaleStatus;
use serde::{Deserialize, Serialize};

/// Роль получателя уведомлений
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StakeholderRole {
    Customer,
    Sales,
    Manager,
    Finance,
    Warehouse,
}

impl StakeholderRole {
    pub fn code(&self) -> &'static str {
        match self {
            StakeholderRole::Customer => "customer",
            StakeholderRole::Sales => "sales",
            StakeholderRole::Manager => "manager",
            StakeholderRole::Finance => "finance",
            StakeholderRole::Warehouse => "warehouse",
        }
    }

    /// Все роли-участники продажи
    pub const ALL: &'static [StakeholderRole] = &[
        StakeholderRole::Customer,
        StakeholderRole::Sales,
        StakeholderRole::Manager,
        StakeholderRole::Finance,
        StakeholderRole::Warehouse,
    ];

    /// Все роли-участники продажи
    pub fn all() -> &'static [StakeholderRole] {
        Self::ALL
    }
}

/// Описатель побочного действия перехода
///
/// Статическая таблица вместо switch по строковому статусу: новый статус
/// или действие добавляются без правки управляющего потока движка.
/// Каждое действие best-effort и выполняется независимо от остальных.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideEffect {
    /// Зарезервировать товар (product_id x quantity)
    ReserveInventory,
    /// Создать запись отгрузки
    CreateShipment,
    /// Списать товар со склада
    DecrementInventory,
    /// Активировать гарантийный срок
    ActivateWarranty,
    /// Сформировать счёт
    GenerateInvoice,
    /// Зафиксировать оплату
    RecordPayment,
    /// Активировать связанный контракт (если он есть)
    ActivateContract,
    /// Снять резерв товара
    ReleaseInventory,
    /// Вернуть оплату
    ReversePayment,
    /// Отменить связанный контракт (если он есть)
    CancelContract,
    /// Уведомить получателей
    NotifyStakeholders(&'static [StakeholderRole]),
}

impl SideEffect {
    /// Упорядоченный набор действий для целевого статуса
    pub fn for_status(status: SaleStatus) -> &'static [SideEffect] {
        use SideEffect::*;
        use StakeholderRole::*;
        match status {
            SaleStatus::Confirmed => &[
                ReserveInventory,
                NotifyStakeholders(StakeholderRole::ALL),
            ],
            SaleStatus::Shipped => &[CreateShipment, NotifyStakeholders(&[Customer])],
            SaleStatus::Delivered => &[
                DecrementInventory,
                ActivateWarranty,
                NotifyStakeholders(&[Customer]),
            ],
            SaleStatus::Invoiced => &[GenerateInvoice, NotifyStakeholders(&[Customer, Finance])],
            SaleStatus::Paid => &[
                ActivateContract,
                RecordPayment,
                NotifyStakeholders(&[Customer, Finance, Manager]),
            ],
            SaleStatus::Cancelled => &[
                ReleaseInventory,
                NotifyStakeholders(&[Customer, Manager, Warehouse]),
            ],
            SaleStatus::Refunded => &[
                ReversePayment,
                CancelContract,
                NotifyStakeholders(&[Customer, Finance]),
            ],
            // Остальные статусы — только общая запись аудита
            SaleStatus::Draft | SaleStatus::Pending => &[],
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            SideEffect::ReserveInventory => "reserve_inventory",
            SideEffect::CreateShipment => "create_shipment",
            SideEffect::DecrementInventory => "decrement_inventory",
            SideEffect::ActivateWarranty => "activate_warranty",
            SideEffect::GenerateInvoice => "generate_invoice",
            SideEffect::RecordPayment => "record_payment",
            SideEffect::ActivateContract => "activate_contract",
            SideEffect::ReleaseInventory => "release_inventory",
            SideEffect::ReversePayment => "reverse_payment",
            SideEffect::CancelContract => "cancel_contract",
            SideEffect::NotifyStakeholders(_) => "notify_stakeholders",
        }
    }
}
