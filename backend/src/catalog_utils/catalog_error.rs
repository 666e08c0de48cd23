//! Classifying transport and decoding failures as [`CatalogError`]s.

use common::catalog_error::CatalogError;

/// Connection failures, timeouts and requests that never got an answer read
/// as the catalog being unreachable.
pub(crate) fn from_reqwest(err: reqwest::Error) -> CatalogError {
    if err.is_connect() || err.is_timeout() || err.is_request() {
        CatalogError::NetworkUnavailable(err.to_string())
    } else {
        CatalogError::Decode(err.to_string())
    }
}

pub(crate) fn from_json(err: serde_json::Error) -> CatalogError {
    CatalogError::Decode(err.to_string())
}
