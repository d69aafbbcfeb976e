//! Shared HTTP client for the Dzatlas query gateway.
//!
//! Provides a minimal client with optional bearer auth, generic GET/POST
//! task helpers, domain methods (listing, submission, admin moderation), a
//! listing-state holder with the page-reset rules, and an explicit query
//! cache keyed by (task, parameters).

pub mod api;
pub mod cache;
pub mod listing;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use cache::QueryCache;

/// Authentication strategy for the gateway.
#[derive(Clone, Debug)]
pub enum Auth {
    /// Anonymous: public reads and submissions only.
    None,
    /// `Authorization: Bearer {token}` for admin tasks.
    Bearer(String),
}

/// The single gateway path; tasks select the operation.
pub fn api_path() -> &'static str {
    "/api"
}

/// HTTP client for the Dzatlas gateway with optional bearer auth.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth: Auth,
    cache: Arc<Mutex<QueryCache>>,
}

impl ApiClient {
    pub fn new(base_url: String, auth: Auth) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
            cache: Arc::new(Mutex::new(QueryCache::new())),
        })
    }

    /// Create client from environment: DZATLAS_API_URL, optional
    /// DZATLAS_ADMIN_TOKEN for admin tasks.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("DZATLAS_API_URL")
            .or_else(|_| std::env::var("API_URL"))
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        let auth = match std::env::var("DZATLAS_ADMIN_TOKEN") {
            Ok(token) => Auth::Bearer(token),
            Err(_) => Auth::None,
        };

        Self::new(base_url, auth)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    fn apply_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Auth::None => req,
            Auth::Bearer(token) => req.bearer_auth(token),
        }
    }

    /// GET task with query-string parameters, going through the cache.
    /// `params` must already be urlencoded pairs.
    pub(crate) async fn get_task<T: DeserializeOwned>(
        &self,
        task: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let key = cache::cache_key(task, params);
        if let Some(hit) = self.cache.lock().expect("cache lock").get(&key) {
            return serde_json::from_value(hit).context("Failed to decode cached response");
        }

        let mut url = format!("{}{}?task={}", self.base_url, api_path(), task);
        for (name, value) in params {
            url.push('&');
            url.push_str(name);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }

        let response = self
            .apply_auth(self.client.get(&url))
            .send()
            .await
            .context("Failed to reach the gateway")?;
        let value = Self::decode(response).await?;
        self.cache
            .lock()
            .expect("cache lock")
            .insert(key, value.clone());
        serde_json::from_value(value).context("Failed to decode response")
    }

    /// POST task with a JSON body (the task name rides in the body).
    /// Mutations bypass the cache; the caller invalidates affected tasks.
    pub(crate) async fn post_task<T: DeserializeOwned>(&self, body: JsonValue) -> Result<T> {
        let url = format!("{}{}", self.base_url, api_path());
        let response = self
            .apply_auth(self.client.post(&url))
            .json(&body)
            .send()
            .await
            .context("Failed to reach the gateway")?;
        let value = Self::decode(response).await?;
        serde_json::from_value(value).context("Failed to decode response")
    }

    /// Cached POST read (get-entities is a POST on the wire).
    pub(crate) async fn post_task_cached<T: DeserializeOwned>(
        &self,
        task: &str,
        params: &[(&str, &str)],
        body: JsonValue,
    ) -> Result<T> {
        let key = cache::cache_key(task, params);
        if let Some(hit) = self.cache.lock().expect("cache lock").get(&key) {
            return serde_json::from_value(hit).context("Failed to decode cached response");
        }
        let value: JsonValue = self.post_task(body).await?;
        self.cache
            .lock()
            .expect("cache lock")
            .insert(key, value.clone());
        serde_json::from_value(value).context("Failed to decode response")
    }

    /// Drop every cached result for a task. Called by mutating methods.
    pub(crate) fn invalidate(&self, task: &str) {
        self.cache.lock().expect("cache lock").invalidate_task(task);
    }

    /// Surface `{ error: message }` bodies as failures; pass data through.
    async fn decode(response: reqwest::Response) -> Result<JsonValue> {
        let status = response.status();
        let value: JsonValue = response
            .json()
            .await
            .context("Failed to parse gateway response")?;
        if !status.is_success() {
            let message = value
                .get("error")
                .and_then(|e| e.as_str())
                .unwrap_or("unknown gateway failure");
            anyhow::bail!("Gateway error ({}): {}", status.as_u16(), message);
        }
        Ok(value)
    }
}
