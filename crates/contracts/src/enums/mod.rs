pub mod sale_status;

pub use sale_status::SaleStatus;
