//! Full-text search pagination and per-hit filtering.
//!
//! The search endpoint is queried page by page until the requested number of
//! filings has been collected or the result set is exhausted. Hits pass
//! through an inclusion policy (amendment handling, form-type mismatch
//! workaround) before their metadata is derived.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use crate::error::Result;
use crate::metadata::{FilingMetadata, build_filing_metadata};
use crate::traits::EdgarTransport;
use crate::validate::ValidatedRequest;

/// Body of one full-text search request.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    #[serde(rename = "dateRange")]
    pub date_range: String,
    pub startdt: String,
    pub enddt: String,
    #[serde(rename = "entityName")]
    pub entity_name: String,
    pub forms: Vec<String>,
    pub from: usize,
    pub q: String,
}

impl SearchRequest {
    /// Forms the request payload for one page of results.
    pub fn new(request: &ValidatedRequest, start_index: usize) -> Self {
        Self {
            date_range: "custom".to_string(),
            startdt: request.after_date.clone(),
            enddt: request.before_date.clone(),
            entity_name: request.ticker_or_cik.clone(),
            forms: vec![request.filing_type.clone()],
            from: start_index,
            q: request.query.clone(),
        }
    }
}

/// Response from the full-text search endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub hits: Hits,
    /// Echo of the executed query; carries the page size the server
    /// actually used.
    pub query: QueryInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryInfo {
    pub size: usize,
    #[serde(default)]
    pub from: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hits {
    #[serde(default)]
    pub total: Option<TotalHits>,
    pub hits: Vec<Hit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TotalHits {
    pub value: u64,
    pub relation: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hit {
    /// Composite identifier, `"{accession_number}:{filename}"`.
    pub _id: String,
    pub _source: Source,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Source {
    pub ciks: Vec<String>,
    pub file_type: String,
    #[serde(default)]
    pub file_date: Option<String>,
    #[serde(default)]
    pub display_names: Vec<String>,
    #[serde(default)]
    pub adsh: Option<String>,
    /// XSL path segment for the styled view of XML forms. Deserialized for
    /// wire fidelity; the styled-view transform is not applied.
    #[serde(default)]
    pub xsl: Option<String>,
}

/// Per-hit inclusion policy.
///
/// A reported type ending in `/A` is an amendment and is dropped unless
/// amendments were requested. The search index occasionally returns
/// unrelated form types for a queried ticker, so non-amendment hits must
/// match the wanted type exactly.
pub fn accept_hit(hit: &Hit, wanted_filing_type: &str, include_amends: bool) -> bool {
    let hit_filing_type = hit._source.file_type.as_str();

    let is_amend = hit_filing_type.ends_with("/A");
    if is_amend && !include_amends {
        return false;
    }

    if !is_amend && hit_filing_type != wanted_filing_type {
        return false;
    }

    true
}

/// Collects metadata for up to `request.amount` filings by paging through
/// the search endpoint.
///
/// Pagination stops as soon as the requested amount is reached, without
/// exhausting the current page, or when the server returns an empty page.
/// The start index advances by the page size reported in each response
/// rather than an assumed constant. A fixed pause follows every page
/// request to bound the outbound rate.
pub async fn filing_urls_to_download<T: EdgarTransport + ?Sized>(
    transport: &T,
    request: &ValidatedRequest,
    archives_base_url: &str,
    request_interval: Duration,
) -> Result<Vec<FilingMetadata>> {
    let mut filings_to_fetch: Vec<FilingMetadata> = Vec::new();
    let mut start_index = 0usize;

    while filings_to_fetch.len() < request.amount {
        let payload = SearchRequest::new(request, start_index);
        let response = transport.post_search(&payload).await?;

        // No more results to process.
        if response.hits.hits.is_empty() {
            break;
        }

        for hit in &response.hits.hits {
            if !accept_hit(hit, &request.filing_type, request.include_amends) {
                continue;
            }

            filings_to_fetch.push(build_filing_metadata(hit, archives_base_url)?);

            if filings_to_fetch.len() == request.amount {
                return Ok(filings_to_fetch);
            }
        }

        // The server reports the page size it used; never assume a fixed one.
        start_index += response.query.size;

        tracing::debug!(
            collected = filings_to_fetch.len(),
            start_index,
            "advancing to next search page"
        );

        // Prevent rate limiting
        sleep(request_interval).await;
    }

    Ok(filings_to_fetch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(file_type: &str) -> Hit {
        Hit {
            _id: "0000320193-23-000001:doc.htm".to_string(),
            _source: Source {
                ciks: vec!["0000320193".to_string()],
                file_type: file_type.to_string(),
                file_date: None,
                display_names: Vec::new(),
                adsh: None,
                xsl: None,
            },
        }
    }

    #[test]
    fn amendment_is_dropped_unless_requested() {
        let amendment = hit("8-K/A");
        assert!(!accept_hit(&amendment, "8-K", false));
        assert!(accept_hit(&amendment, "8-K", true));
    }

    #[test]
    fn mismatched_form_type_is_always_dropped() {
        let mismatch = hit("10-Q");
        assert!(!accept_hit(&mismatch, "8-K", false));
        assert!(!accept_hit(&mismatch, "8-K", true));
    }

    #[test]
    fn exact_form_type_match_is_accepted() {
        assert!(accept_hit(&hit("8-K"), "8-K", false));
    }

    #[test]
    fn request_payload_serializes_to_wire_format() {
        let request = ValidatedRequest {
            filing_type: "8-K".to_string(),
            ticker_or_cik: "AAPL".to_string(),
            amount: 5,
            after_date: "2022-01-01".to_string(),
            before_date: "2023-01-01".to_string(),
            include_amends: false,
            query: "earnings".to_string(),
        };

        let payload = SearchRequest::new(&request, 20);
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["dateRange"], "custom");
        assert_eq!(value["startdt"], "2022-01-01");
        assert_eq!(value["enddt"], "2023-01-01");
        assert_eq!(value["entityName"], "AAPL");
        assert_eq!(value["forms"], serde_json::json!(["8-K"]));
        assert_eq!(value["from"], 20);
        assert_eq!(value["q"], "earnings");
    }
}
