pub mod catalog_client;
pub mod catalog_config;
pub mod catalog_error;
pub mod response_cache;
