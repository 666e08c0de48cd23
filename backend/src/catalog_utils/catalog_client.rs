use std::sync::Arc;

use common::{catalog_error::CatalogError, listing_query::FetchPolicy};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tokio::sync::OnceCell;

use crate::catalog_utils::{
    catalog_config::CatalogConfig, catalog_error::{from_json, from_reqwest}, response_cache::ResponseCache,
};

static SHARED_CLIENT: OnceCell<CatalogClient> = OnceCell::const_new();

/// Process-wide client configured from the environment, so every request
/// handler shares one connection pool and one response cache.
pub async fn shared_catalog_client() -> Result<&'static CatalogClient, CatalogError> {
    SHARED_CLIENT
        .get_or_try_init(|| async {
            let config = CatalogConfig::from_env().map_err(|e| CatalogError::Config(format!("{:#}", e)))?;
            tracing::info!(api_url = %config.api_url, cache = config.cache_enabled, "catalog client configured");
            CatalogClient::new(config)
        })
        .await
}

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a, V> {
    query: &'a str,
    variables: &'a V,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<GraphQlErrorMessage>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    config: CatalogConfig,
    cache: Option<Arc<ResponseCache>>,
}

impl CatalogClient {
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CatalogError::Config(e.to_string()))?;
        let cache = config.cache_enabled.then(|| Arc::new(ResponseCache::default()));
        Ok(Self { http, config, cache })
    }

    /// POST `{query, variables}` to the catalog API and decode `data` as `T`.
    ///
    /// Errors reported next to data are logged and otherwise ignored.
    pub async fn post_graphql<V: Serialize, T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: &V,
        policy: FetchPolicy,
    ) -> Result<T, CatalogError> {
        let body = serde_json::to_string(&GraphQlRequest { query, variables })
            .map_err(|e| CatalogError::Encode(e.to_string()))?;
        let cache_key = ResponseCache::key_for(&body);

        if let Some(cache) = &self.cache {
            if policy == FetchPolicy::CacheFirst {
                if let Some(cached) = cache.get(&cache_key).await {
                    if let Ok(response) = decode_graphql_response::<T>(operation, &cached) {
                        tracing::debug!(operation, key = %cache_key, "catalog cache hit");
                        return Ok(response);
                    }
                }
                tracing::debug!(operation, key = %cache_key, "catalog cache miss");
            }
        }

        let t0 = std::time::Instant::now();
        let response = self
            .http
            .post(&self.config.api_url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(from_reqwest)?;
        let status = response.status();
        let response_txt = response.text().await.map_err(from_reqwest)?;
        if status.is_client_error() || status.is_server_error() {
            tracing::warn!(operation, %status, "catalog request failed");
            return Err(CatalogError::Http { status: status.as_u16(), body: response_txt });
        }
        tracing::debug!(
            operation,
            len = response_txt.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "catalog response"
        );

        let response = decode_graphql_response::<T>(operation, &response_txt)?;
        if let Some(cache) = &self.cache {
            cache.insert(cache_key, response_txt).await;
        }
        Ok(response)
    }
}

fn decode_graphql_response<T: DeserializeOwned>(operation: &str, response_txt: &str) -> Result<T, CatalogError> {
    let response: GraphQlResponse<T> = serde_json::from_str(response_txt).map_err(from_json)?;
    let messages = response.errors.unwrap_or_default().into_iter().map(|e| e.message).collect::<Vec<_>>();
    match response.data {
        Some(data) => {
            if !messages.is_empty() {
                tracing::warn!(operation, errors = ?messages, "catalog returned partial errors");
            }
            Ok(data)
        }
        None if !messages.is_empty() => Err(CatalogError::GraphQl(messages)),
        None => Err(CatalogError::MissingData(operation.to_string())),
    }
}
