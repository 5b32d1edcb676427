//! # Remote table
//!
//! HTTP client for the hosted `facts` table, speaking its PostgREST-style
//! row API:
//!
//! - `GET  {base}/rest/v1/facts?select=*&order=votesInteresting.desc&limit=N[&category=eq.X]`
//! - `POST {base}/rest/v1/facts` with a JSON row body
//! - `PATCH {base}/rest/v1/facts?id=eq.N` with a one-column body
//!
//! Writes ask for `return=representation` so the stored row comes back and
//! can replace the local copy. Responses are read as text first and
//! decoded with serde_json, so a non-2xx status and a bad payload stay
//! distinguishable failures.

use async_trait::async_trait;
use facts::{Fact, FactId, NewFact, VoteKind};
use reqwest::{Client, RequestBuilder, Response};
use tracing::debug;

use crate::{
    config::Config,
    error::StoreError,
    store::{FactsTable, ListQuery},
};

pub const TABLE: &str = "facts";
pub const ORDER_COLUMN: &str = "votesInteresting";

pub struct RemoteTable {
    http: Client,
    base_url: String,
    api_key: String,
}

impl RemoteTable {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{TABLE}", self.base_url)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        if self.api_key.is_empty() {
            return builder;
        }
        builder
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    async fn rows(response: Response) -> Result<Vec<Fact>, StoreError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    // Writes with return=representation come back as a one-row array.
    async fn single(response: Response) -> Result<Fact, StoreError> {
        Self::rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or(StoreError::EmptyReturn)
    }
}

/// Query string for a list request. The category equality filter appears
/// exactly when the filter is not the all-categories sentinel.
pub fn list_params(query: ListQuery) -> String {
    let mut params = format!("select=*&order={ORDER_COLUMN}.desc&limit={}", query.limit);
    if let Some(category) = query.filter.category() {
        params.push_str(&format!("&category=eq.{category}"));
    }
    params
}

#[async_trait]
impl FactsTable for RemoteTable {
    async fn list(&self, query: ListQuery) -> Result<Vec<Fact>, StoreError> {
        let url = format!("{}?{}", self.table_url(), list_params(query));
        debug!("GET {url}");

        let response = self.authed(self.http.get(&url)).send().await?;
        Self::rows(response).await
    }

    async fn insert(&self, fact: &NewFact) -> Result<Fact, StoreError> {
        let url = self.table_url();
        debug!("POST {url}");

        let response = self
            .authed(self.http.post(&url))
            .header("Prefer", "return=representation")
            .json(fact)
            .send()
            .await?;
        Self::single(response).await
    }

    async fn set_votes(&self, id: FactId, kind: VoteKind, value: u32) -> Result<Fact, StoreError> {
        let url = format!("{}?id=eq.{id}", self.table_url());
        debug!("PATCH {url} {} = {value}", kind.column());

        let mut body = serde_json::Map::new();
        body.insert(kind.column().to_string(), serde_json::Value::from(value));

        let response = self
            .authed(self.http.patch(&url))
            .header("Prefer", "return=representation")
            .json(&body)
            .send()
            .await?;
        Self::single(response).await
    }
}

#[cfg(test)]
mod tests {
    use facts::{Category, CategoryFilter};

    use super::*;

    #[test]
    fn list_params_without_filter() {
        let params = list_params(ListQuery {
            filter: CategoryFilter::All,
            limit: 1000,
        });

        assert_eq!(params, "select=*&order=votesInteresting.desc&limit=1000");
        assert!(!params.contains("category"));
    }

    #[test]
    fn list_params_with_filter() {
        let params = list_params(ListQuery {
            filter: CategoryFilter::Only(Category::Science),
            limit: 25,
        });

        assert_eq!(
            params,
            "select=*&order=votesInteresting.desc&limit=25&category=eq.science"
        );
    }
}
