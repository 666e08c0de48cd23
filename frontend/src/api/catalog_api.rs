//! Server functions for the category listing queries.

use common::{
    catalog_error::CatalogError,
    listing::{CategoryPayload, PricingPayload},
    listing_query::{FetchPolicy, ListingQueryVariables},
};
use dioxus::prelude::*;

/// Status the server reports when the catalog API could not be reached.
pub const CATALOG_UNAVAILABLE_CODE: u16 = 503;

#[cfg(feature = "server")]
fn server_error(err: CatalogError) -> ServerFnError {
    let code = if err.is_network_unavailable() { CATALOG_UNAVAILABLE_CODE } else { 502 };
    ServerFnError::ServerError { message: err.to_string(), code, details: None }
}

#[server]
pub async fn category_listing(variables: ListingQueryVariables, policy: FetchPolicy) -> Result<CategoryPayload, ServerFnError> {
    let client = backend::catalog_utils::catalog_client::shared_catalog_client().await.map_err(server_error)?;
    let x = backend::api::listing::fetch_category_listing(client, &variables, policy).await;
    x.map_err(server_error)
}

#[server]
pub async fn product_prices(variables: ListingQueryVariables, policy: FetchPolicy) -> Result<PricingPayload, ServerFnError> {
    let client = backend::catalog_utils::catalog_client::shared_catalog_client().await.map_err(server_error)?;
    let x = backend::api::listing::fetch_product_prices(client, &variables, policy).await;
    x.map_err(server_error)
}

/// Classify a failed server call. Errors the server did not report itself
/// mean the storefront server was not reached.
pub fn catalog_error_from_server(err: ServerFnError) -> CatalogError {
    match err {
        ServerFnError::ServerError { message, code, .. } if code == CATALOG_UNAVAILABLE_CODE => {
            CatalogError::NetworkUnavailable(message)
        }
        ServerFnError::ServerError { message, .. } => CatalogError::Server(message),
        other => CatalogError::NetworkUnavailable(other.to_string()),
    }
}
