use std::collections::{HashMap, VecDeque};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use async_trait::async_trait;
use edgardl::{DownloadError, EdgarTransport, Result, SearchRequest, SearchResponse};

#[allow(dead_code)]
pub fn fixture_path(relative: impl AsRef<Path>) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

#[allow(dead_code)]
pub fn read_fixture(relative: impl AsRef<Path>) -> String {
    fs::read_to_string(fixture_path(relative)).expect("fixture file should be readable")
}

/// Transport fake replaying scripted search pages and document bodies,
/// recording every request it receives.
#[allow(dead_code)]
#[derive(Default)]
pub struct ScriptedTransport {
    pages: Mutex<VecDeque<Result<SearchResponse>>>,
    documents: Mutex<HashMap<String, Vec<u8>>>,
    search_payloads: Mutex<Vec<SearchRequest>>,
    fetched_urls: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues one search page, given as raw response JSON.
    pub fn push_page(&self, response_json: &str) {
        let response =
            serde_json::from_str(response_json).expect("scripted page should be valid JSON");
        self.pages.lock().unwrap().push_back(Ok(response));
    }

    /// Queues a search failure.
    pub fn push_page_error(&self, error: DownloadError) {
        self.pages.lock().unwrap().push_back(Err(error));
    }

    /// Serves `body` for `url`; unknown URLs fail with a network-level error.
    pub fn stub_document(&self, url: &str, body: &[u8]) {
        self.documents
            .lock()
            .unwrap()
            .insert(url.to_string(), body.to_vec());
    }

    pub fn search_payloads(&self) -> Vec<SearchRequest> {
        self.search_payloads.lock().unwrap().clone()
    }

    pub fn fetched_urls(&self) -> Vec<String> {
        self.fetched_urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl EdgarTransport for ScriptedTransport {
    async fn post_search(&self, payload: &SearchRequest) -> Result<SearchResponse> {
        self.search_payloads.lock().unwrap().push(payload.clone());
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .expect("search request beyond the scripted pages")
    }

    async fn get_document(&self, url: &str) -> Result<Vec<u8>> {
        self.fetched_urls.lock().unwrap().push(url.to_string());
        self.documents
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or(DownloadError::NotFound)
    }
}
