//! HTTP client for the two data endpoints.
//!
//! One GET per fetch, no retries. A non-success status or a body that is
//! not the expected JSON is an error; the caller decides how to show it.

use std::time::Duration;

use convo_tree::{ChainsResponse, Node};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::FetchConfig;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("{url} did not return the expected JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// What to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchTarget {
    /// `{ data?: { allTweets, conversationChains, ... } }`
    Chains { url: String },
    /// Flat array of nodes.
    Tree { url: String },
}

impl FetchTarget {
    pub fn url(&self) -> &str {
        match self {
            Self::Chains { url } | Self::Tree { url } => url,
        }
    }
}

/// Decoded body of a completed fetch.
#[derive(Debug, Clone)]
pub enum Fetched {
    Chains(ChainsResponse),
    Tree(Vec<Node>),
}

/// Thin wrapper over a shared `reqwest::Client`. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(FetchError::Client)?;
        Ok(Self { http })
    }

    pub async fn fetch(&self, target: &FetchTarget) -> Result<Fetched, FetchError> {
        match target {
            FetchTarget::Chains { url } => self.fetch_chains(url).await.map(Fetched::Chains),
            FetchTarget::Tree { url } => self.fetch_nodes(url).await.map(Fetched::Tree),
        }
    }

    pub async fn fetch_chains(&self, url: &str) -> Result<ChainsResponse, FetchError> {
        let resp: ChainsResponse = self.get_json(url).await?;
        match &resp.data {
            Some(data) => tracing::info!(
                url,
                chains = data.conversation_chains.len(),
                tweets = data.all_tweets.len(),
                last_run_at = %data.last_run_at,
                "Fetched conversation chains"
            ),
            None => tracing::info!(url, "Chains endpoint has no completed run yet"),
        }
        Ok(resp)
    }

    pub async fn fetch_nodes(&self, url: &str) -> Result<Vec<Node>, FetchError> {
        let nodes: Vec<Node> = self.get_json(url).await?;
        tracing::info!(url, nodes = nodes.len(), "Fetched tree nodes");
        Ok(nodes)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        tracing::debug!(url, "GET");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;
        serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
