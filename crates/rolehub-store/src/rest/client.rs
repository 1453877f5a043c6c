//! HTTP client for the store's REST interface.

use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use rolehub_core::config::store::StoreConfig;
use rolehub_core::error::AppError;
use rolehub_core::result::AppResult;

use super::error::RestError;
use super::query::{Query, parse_content_range_total};

/// Shared REST client. Cheap to clone.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
}

impl RestClient {
    /// Build a client authenticated with the given API key.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .default_headers(auth_headers(api_key)?)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: format!("{}/rest/v1", base_url.trim_end_matches('/')),
        })
    }

    /// Build a client from configuration using the privileged key.
    pub fn from_config(config: &StoreConfig) -> AppResult<Self> {
        Self::new(
            config.base_url(),
            config.admin_key(),
            Duration::from_secs(config.request_timeout_seconds),
        )
    }

    /// Select rows.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Vec<T>, RestError> {
        let response = self.send(self.request(Method::GET, table, query)).await?;
        decode(table, response).await
    }

    /// Select at most one row.
    pub async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Option<T>, RestError> {
        let rows: Vec<T> = self.select(table, query).await?;
        Ok(rows.into_iter().next())
    }

    /// Select a page of rows together with the exact total.
    pub async fn select_counted<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<(Vec<T>, u64), RestError> {
        let request = self
            .request(Method::GET, table, query)
            .header("Prefer", "count=exact");
        let response = request.send().await?;

        // A window past the last row is answered with 416 and the total.
        if response.status() == StatusCode::RANGE_NOT_SATISFIABLE {
            let total = content_range_total(&response).unwrap_or(0);
            return Ok((Vec::new(), total));
        }

        let response = check(response).await?;
        let total = content_range_total(&response);
        let rows: Vec<T> = decode(table, response).await?;
        let total = total.unwrap_or(rows.len() as u64);
        Ok((rows, total))
    }

    /// Count matching rows without fetching them.
    pub async fn count(&self, table: &str, query: &Query) -> Result<u64, RestError> {
        let request = self
            .request(Method::HEAD, table, query)
            .header("Prefer", "count=exact");
        let response = self.send(request).await?;
        Ok(content_range_total(&response).unwrap_or(0))
    }

    /// Insert rows and return them as stored.
    pub async fn insert<B, T>(&self, table: &str, body: &B) -> Result<Vec<T>, RestError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .request(Method::POST, table, &Query::new().select("*"))
            .header("Prefer", "return=representation")
            .json(body);
        let response = self.send(request).await?;
        decode(table, response).await
    }

    /// Insert or merge rows on the given conflict target.
    pub async fn upsert<B, T>(
        &self,
        table: &str,
        body: &B,
        on_conflict: &str,
    ) -> Result<Vec<T>, RestError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let query = Query::new().on_conflict(on_conflict).select("*");
        let request = self
            .request(Method::POST, table, &query)
            .header("Prefer", "return=representation,resolution=merge-duplicates")
            .json(body);
        let response = self.send(request).await?;
        decode(table, response).await
    }

    /// Update matching rows and return them.
    pub async fn update<B, T>(
        &self,
        table: &str,
        query: &Query,
        body: &B,
    ) -> Result<Vec<T>, RestError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .request(Method::PATCH, table, &query.clone().select("*"))
            .header("Prefer", "return=representation")
            .json(body);
        let response = self.send(request).await?;
        decode(table, response).await
    }

    /// Delete matching rows and return how many were removed.
    pub async fn delete(&self, table: &str, query: &Query) -> Result<usize, RestError> {
        let request = self
            .request(Method::DELETE, table, &query.clone().select("id"))
            .header("Prefer", "return=representation");
        let response = self.send(request).await?;
        let rows: Vec<serde_json::Value> = decode(table, response).await?;
        Ok(rows.len())
    }

    fn request(&self, method: Method, table: &str, query: &Query) -> RequestBuilder {
        debug!(method = %method, table = %table, "Store request");
        self.http
            .request(method, format!("{}/{table}", self.base_url))
            .query(query.pairs())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, RestError> {
        check(request.send().await?).await
    }
}

fn auth_headers(api_key: &str) -> AppResult<HeaderMap> {
    let key = HeaderValue::from_str(api_key)
        .map_err(|_| AppError::configuration("store API key is not a valid header value"))?;
    let bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
        .map_err(|_| AppError::configuration("store API key is not a valid header value"))?;
    let mut headers = HeaderMap::new();
    headers.insert("apikey", key);
    headers.insert(header::AUTHORIZATION, bearer);
    Ok(headers)
}

async fn check(response: Response) -> Result<Response, RestError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(RestError::from_response(status.as_u16(), &body))
}

async fn decode<T: DeserializeOwned>(table: &str, response: Response) -> Result<Vec<T>, RestError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|source| RestError::Decode {
        table: table.to_string(),
        source,
    })
}

fn content_range_total(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(header::CONTENT_RANGE)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_content_range_total)
}
