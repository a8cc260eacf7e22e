use serde::{Deserialize, Serialize};

/// Статус продажи (жизненный цикл)
///
/// Таблица переходов — единственный источник правды для workflow-движка:
/// пара (from, to), которой нет в `valid_next`, отклоняется без исключений.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    Draft,
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Invoiced,
    Paid,
    Cancelled,
    Refunded,
}

impl SaleStatus {
    /// Получить код статуса
    pub fn code(&self) -> &'static str {
        match self {
            SaleStatus::Draft => "draft",
            SaleStatus::Pending => "pending",
            SaleStatus::Confirmed => "confirmed",
            SaleStatus::Shipped => "shipped",
            SaleStatus::Delivered => "delivered",
            SaleStatus::Invoiced => "invoiced",
            SaleStatus::Paid => "paid",
            SaleStatus::Cancelled => "cancelled",
            SaleStatus::Refunded => "refunded",
        }
    }

    /// Получить человекочитаемое название
    pub fn display_name(&self) -> &'static str {
        match self {
            SaleStatus::Draft => "Черновик",
            SaleStatus::Pending => "На подтверждении",
            SaleStatus::Confirmed => "Подтверждена",
            SaleStatus::Shipped => "Отгружена",
            SaleStatus::Delivered => "Доставлена",
            SaleStatus::Invoiced => "Выставлен счёт",
            SaleStatus::Paid => "Оплачена",
            SaleStatus::Cancelled => "Отменена",
            SaleStatus::Refunded => "Возврат средств",
        }
    }

    /// Цвет бейджа статуса (для UI)
    pub fn color(&self) -> &'static str {
        match self {
            SaleStatus::Draft => "gray",
            SaleStatus::Pending => "amber",
            SaleStatus::Confirmed => "blue",
            SaleStatus::Shipped => "indigo",
            SaleStatus::Delivered => "teal",
            SaleStatus::Invoiced => "purple",
            SaleStatus::Paid => "green",
            SaleStatus::Cancelled => "red",
            SaleStatus::Refunded => "slate",
        }
    }

    /// Описание статуса
    pub fn description(&self) -> &'static str {
        match self {
            SaleStatus::Draft => "Продажа создана, но не отправлена на подтверждение",
            SaleStatus::Pending => "Ожидает подтверждения менеджером",
            SaleStatus::Confirmed => "Подтверждена, товар зарезервирован",
            SaleStatus::Shipped => "Передана в доставку",
            SaleStatus::Delivered => "Доставлена клиенту",
            SaleStatus::Invoiced => "Счёт выставлен клиенту",
            SaleStatus::Paid => "Оплата получена",
            SaleStatus::Cancelled => "Отменена (может быть возвращена в черновик)",
            SaleStatus::Refunded => "Средства возвращены клиенту",
        }
    }

    /// Допустимые следующие статусы
    pub fn valid_next(&self) -> &'static [SaleStatus] {
        use SaleStatus::*;
        match self {
            Draft => &[Pending, Cancelled],
            Pending => &[Confirmed, Cancelled],
            Confirmed => &[Shipped, Cancelled],
            Shipped => &[Delivered, Cancelled],
            Delivered => &[Invoiced, Refunded],
            Invoiced => &[Paid, Cancelled],
            Paid => &[Refunded],
            Cancelled => &[Draft],
            Refunded => &[],
        }
    }

    /// Разрешён ли переход в указанный статус
    pub fn can_transition_to(&self, to: SaleStatus) -> bool {
        self.valid_next().contains(&to)
    }

    /// Терминальный статус (нет допустимых переходов)
    pub fn is_terminal(&self) -> bool {
        self.valid_next().is_empty()
    }

    /// Получить все статусы
    pub fn all() -> Vec<SaleStatus> {
        use SaleStatus::*;
        vec![
            Draft, Pending, Confirmed, Shipped, Delivered, Invoiced, Paid, Cancelled, Refunded,
        ]
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        use SaleStatus::*;
        match code {
            "draft" => Some(Draft),
            "pending" => Some(Pending),
            "confirmed" => Some(Confirmed),
            "shipped" => Some(Shipped),
            "delivered" => Some(Delivered),
            "invoiced" => Some(Invoiced),
            "paid" => Some(Paid),
            "cancelled" => Some(Cancelled),
            "refunded" => Some(Refunded),
            _ => None,
        }
    }
}

impl std::fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
