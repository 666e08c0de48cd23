//! Failures of a catalog API call.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CatalogError {
    /// No connection could be made, or the request timed out.
    NetworkUnavailable(String),
    /// The API answered with a non-success status.
    Http { status: u16, body: String },
    /// The API answered with GraphQL errors and no data.
    GraphQl(Vec<String>),
    Encode(String),
    Decode(String),
    /// The response had neither data nor errors.
    MissingData(String),
    /// The catalog client could not be configured.
    Config(String),
    /// The storefront server reported a failure it did not classify further.
    Server(String),
}

impl CatalogError {
    pub fn is_network_unavailable(&self) -> bool {
        matches!(self, Self::NetworkUnavailable(_))
    }
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkUnavailable(err) => write!(f, "Catalog API unreachable: {}", err),
            Self::Http { status, body } => write!(f, "Catalog API error {}: {}", status, body),
            Self::GraphQl(messages) => write!(f, "Catalog query failed: {}", messages.join("; ")),
            Self::Encode(err) => write!(f, "Failed to encode request: {}", err),
            Self::Decode(err) => write!(f, "Failed to decode response: {}", err),
            Self::MissingData(operation) => write!(f, "No data returned for {}", operation),
            Self::Config(err) => write!(f, "Catalog client misconfigured: {}", err),
            Self::Server(err) => write!(f, "Storefront server error: {}", err),
        }
    }
}

impl std::error::Error for CatalogError {}
