//! Transport seam between the download pipelines and the HTTP client.
//!
//! The pagination and persistence code never talk to the network directly;
//! they go through [`EdgarTransport`]. The production implementation is
//! [`crate::EdgarClient`], and tests substitute scripted fakes to exercise
//! pagination, filtering, and failure isolation without a network.

use async_trait::async_trait;

use crate::error::Result;
use crate::search::{SearchRequest, SearchResponse};

/// Network operations the download pipelines depend on.
#[async_trait]
pub trait EdgarTransport: Send + Sync {
    /// Executes one full-text search request and decodes the response.
    async fn post_search(&self, payload: &SearchRequest) -> Result<SearchResponse>;

    /// Fetches a document body in full.
    async fn get_document(&self, url: &str) -> Result<Vec<u8>>;
}
