//! Common types and traits for all UseCases

pub mod bulk_result;

// Re-exports
pub use bulk_result::{BulkItemError, BulkOperationResult};
