//! Catalog GraphQL client used by the storefront listing pages.

pub mod api;
pub mod catalog_utils;
