//! UseCase: удаление продаж (soft delete), одиночное и массовое

pub mod request;

pub use request::{BulkDeleteRequest, DeleteSaleRequest};
