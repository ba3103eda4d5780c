//! GraphQL-over-HTTP client and its factory.
//!
//! # Responsibilities
//! - Build one HTTP client per endpoint, with the bearer token (if any)
//!   installed as a default header
//! - POST queries and mutations, surface GraphQL `errors`
//! - Answer repeated queries from the response cache
//! - Memoize a single client per [`SharedDataClient`]

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::config::DataConfig;
use crate::data::cache::{CacheKey, ResponseCache};
use crate::data::types::{DataError, DataResult, FetchPolicy, GraphQlRequest, GraphQlResponse};
use crate::observability::metrics;

/// Build a client for the configured endpoint.
///
/// `Authorization: Bearer <token>` is attached iff a token is configured.
/// In server-side mode, `NetworkOnly` queries are served cache-first.
pub fn create_data_client(config: &DataConfig, ssr_mode: bool) -> DataResult<DataClient> {
    let endpoint = Url::parse(&config.endpoint_url).map_err(|e| DataError::InvalidEndpoint {
        url: config.endpoint_url.clone(),
        reason: e.to_string(),
    })?;

    let mut headers = HeaderMap::new();
    if let Some(token) = config.api_token.as_deref() {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| DataError::InvalidToken)?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    let http = reqwest::Client::builder()
        .default_headers(headers.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?;

    tracing::info!(
        endpoint = %endpoint,
        authenticated = headers.contains_key(AUTHORIZATION),
        ssr_mode,
        "Data client created"
    );

    Ok(DataClient {
        http,
        endpoint,
        headers,
        ssr_mode,
        cache: ResponseCache::new(),
    })
}

/// A GraphQL client bound to one endpoint.
#[derive(Debug)]
pub struct DataClient {
    http: reqwest::Client,
    endpoint: Url,
    headers: HeaderMap,
    ssr_mode: bool,
    cache: ResponseCache,
}

impl DataClient {
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Headers sent with every request.
    pub fn default_headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn is_authenticated(&self) -> bool {
        self.headers.contains_key(AUTHORIZATION)
    }

    pub fn ssr_mode(&self) -> bool {
        self.ssr_mode
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Run a query, decoding `data` into `T`.
    pub async fn query<T: DeserializeOwned>(
        &self,
        request: &GraphQlRequest,
        policy: FetchPolicy,
    ) -> DataResult<T> {
        let key = CacheKey::for_request(request);

        if self.effective_policy(policy) == FetchPolicy::CacheFirst {
            if let Some(data) = self.cache.get(&key) {
                metrics::record_data_request("query", "cache");
                tracing::debug!(operation = ?request.operation_name, "Query served from cache");
                return Ok(serde_json::from_value(data)?);
            }
        }

        let data = self.execute(request).await?;
        metrics::record_data_request("query", "network");
        self.cache.insert(key, data.clone());
        Ok(serde_json::from_value(data)?)
    }

    /// Run a mutation. Mutations bypass the cache.
    pub async fn mutate<T: DeserializeOwned>(&self, request: &GraphQlRequest) -> DataResult<T> {
        let data = self.execute(request).await?;
        metrics::record_data_request("mutation", "network");
        Ok(serde_json::from_value(data)?)
    }

    fn effective_policy(&self, policy: FetchPolicy) -> FetchPolicy {
        if self.ssr_mode {
            FetchPolicy::CacheFirst
        } else {
            policy
        }
    }

    async fn execute(&self, request: &GraphQlRequest) -> DataResult<Value> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Data endpoint returned an error status");
            return Err(DataError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GraphQlResponse = response.json().await?;
        if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
            tracing::warn!(count = errors.len(), first = %errors[0].message, "GraphQL errors");
            return Err(DataError::GraphQl(errors));
        }

        match envelope.data {
            Some(Value::Null) | None => Err(DataError::MissingData),
            Some(data) => Ok(data),
        }
    }
}

/// Constructs one [`DataClient`] on first use and hands out the same
/// instance afterwards.
#[derive(Debug)]
pub struct SharedDataClient {
    config: DataConfig,
    ssr_mode: bool,
    client: OnceLock<Arc<DataClient>>,
}

impl SharedDataClient {
    pub fn new(config: DataConfig) -> Self {
        Self::with_mode(config, false)
    }

    pub fn with_mode(config: DataConfig, ssr_mode: bool) -> Self {
        Self {
            config,
            ssr_mode,
            client: OnceLock::new(),
        }
    }

    /// The memoized client, built on first call.
    pub fn get(&self) -> DataResult<Arc<DataClient>> {
        if let Some(client) = self.client.get() {
            return Ok(client.clone());
        }
        let client = Arc::new(create_data_client(&self.config, self.ssr_mode)?);
        // A concurrent first call may have won; keep whichever was stored.
        Ok(self.client.get_or_init(|| client).clone())
    }
}
