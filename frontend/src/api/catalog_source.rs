//! The catalog queries the listing controller depends on.

use std::future::Future;

use common::{
    catalog_error::CatalogError,
    listing::{CategoryPayload, PricingPayload},
    listing_query::{FetchPolicy, ListingQueryVariables},
};

use crate::api::catalog_api::{catalog_error_from_server, category_listing, product_prices};

pub trait CatalogSource {
    fn fetch_category(
        &self,
        variables: &ListingQueryVariables,
        policy: FetchPolicy,
    ) -> impl Future<Output = Result<CategoryPayload, CatalogError>>;

    fn fetch_pricing(
        &self,
        variables: &ListingQueryVariables,
        policy: FetchPolicy,
    ) -> impl Future<Output = Result<PricingPayload, CatalogError>>;
}

/// Fetches through the storefront server functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerCatalog;

impl CatalogSource for ServerCatalog {
    async fn fetch_category(
        &self,
        variables: &ListingQueryVariables,
        policy: FetchPolicy,
    ) -> Result<CategoryPayload, CatalogError> {
        category_listing(variables.clone(), policy).await.map_err(catalog_error_from_server)
    }

    async fn fetch_pricing(
        &self,
        variables: &ListingQueryVariables,
        policy: FetchPolicy,
    ) -> Result<PricingPayload, CatalogError> {
        product_prices(variables.clone(), policy).await.map_err(catalog_error_from_server)
    }
}
