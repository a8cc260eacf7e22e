pub mod a001_product_sale;
pub mod logs;
pub mod workflow;
