//! UseCase: массовое обновление статуса продаж

pub mod request;

pub use request::BulkStatusUpdateRequest;
