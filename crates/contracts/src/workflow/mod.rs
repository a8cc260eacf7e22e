//! Контракты workflow-движка: события переходов, таксономия ошибок,
//! описатели побочных действий.

pub mod error;
pub mod events;
pub mod side_effects;

// Re-exports
pub use error::TransitionError;
pub use events::{AuditRecord, NotificationEvent, StatusSnapshot, TransitionEvent};
pub use side_effects::{SideEffect, StakeholderRole};
