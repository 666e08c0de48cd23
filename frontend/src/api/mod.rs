pub mod catalog_api;
pub mod catalog_source;
