pub mod a001_product_sale;
