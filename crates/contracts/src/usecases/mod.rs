pub mod common;
pub mod u101_sale_transition;
pub mod u102_bulk_status_update;
pub mod u103_bulk_delete;
