//! Боевые реализации портов побочных действий
//!
//! Внешние системы (склад, доставка, биллинг, контракты) в этой поставке
//! представлены локальными сервисами: намерение фиксируется в системном
//! логе, интеграция с реальными системами подключается заменой реализации
//! порта при сборке движка.

pub mod audit;
pub mod billing;
pub mod contract;
pub mod inventory;
pub mod notification;
pub mod shipment;
pub mod warranty;
