//! Primary download operation tying validation, search, and persistence
//! together.

use std::env;

use crate::config::DownloaderConfig;
use crate::core::EdgarClient;
use crate::download::download_filings;
use crate::error::Result;
use crate::metadata::unique_filing_count;
use crate::search::filing_urls_to_download;
use crate::validate::validate_request;

/// Options modifying a [`Downloader::download`] call.
///
/// # Examples
///
/// Fetch the three most recent filings, amendments included:
///
/// ```rust
/// use edgardl::DownloadOptions;
///
/// let options = DownloadOptions::new()
///     .with_amount(3)
///     .with_include_amends(true);
/// ```
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Maximum number of filings to fetch. `None` fetches everything the
    /// search returns.
    pub amount: Option<usize>,
    /// Only include filings on or before this date, `YYYY-MM-DD`.
    /// Defaults to the current date.
    pub before_date: Option<String>,
    /// Only include filings on or after this date, `YYYY-MM-DD`.
    /// Defaults to the earliest date the search index covers.
    pub after_date: Option<String>,
    /// Whether amendment filings (e.g. 8-K/A) are included. Defaults to false.
    pub include_amends: bool,
    /// Whether the filing detail document is downloaded alongside the full
    /// submission. Defaults to true.
    pub download_details: bool,
    /// Free-text search query forwarded to the search endpoint.
    pub query: String,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            amount: None,
            before_date: None,
            after_date: None,
            include_amends: false,
            download_details: true,
            query: String::new(),
        }
    }
}

impl DownloadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_amount(mut self, amount: usize) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_before_date(mut self, before_date: impl Into<String>) -> Self {
        self.before_date = Some(before_date.into());
        self
    }

    pub fn with_after_date(mut self, after_date: impl Into<String>) -> Self {
        self.after_date = Some(after_date.into());
        self
    }

    pub fn with_include_amends(mut self, include_amends: bool) -> Self {
        self.include_amends = include_amends;
        self
    }

    pub fn with_download_details(mut self, download_details: bool) -> Self {
        self.download_details = download_details;
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }
}

/// Downloads SEC filings located through the full-text search API into a
/// local directory tree.
///
/// ```text
/// {root}/sec-edgar-filings/{ticker_or_cik}/{filing_type}/{accession_number}/
/// ```
///
/// Requests are strictly sequential and paced with a fixed pause to respect
/// the SEC's fair-access guidelines.
#[derive(Debug, Clone)]
pub struct Downloader {
    client: EdgarClient,
    config: DownloaderConfig,
}

impl Downloader {
    /// Creates a downloader that saves below the current working directory.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use edgardl::{Downloader, DownloadOptions};
    ///
    /// let downloader = Downloader::new("my_app/1.0 (email@example.com)")?;
    /// let fetched = downloader
    ///     .download("10-K", "AAPL", DownloadOptions::new().with_amount(1))
    ///     .await?;
    /// ```
    pub fn new(user_agent: &str) -> Result<Self> {
        Self::with_config(DownloaderConfig::new(user_agent))
    }

    /// Creates a downloader with custom configuration (download folder,
    /// base URLs, pacing interval, timeout).
    pub fn with_config(config: DownloaderConfig) -> Result<Self> {
        let client = EdgarClient::with_config(&config)?;
        Ok(Self { client, config })
    }

    /// Fetches filings of `filing_type` for `ticker_or_cik` and persists
    /// them to disk.
    ///
    /// Returns the number of distinct filings (by accession number) whose
    /// metadata was resolved during search. A document that later fails to
    /// download is reported and skipped without affecting this count.
    ///
    /// # Errors
    ///
    /// Validation failures and search API failures abort the whole
    /// operation. Per-document download failures do not.
    pub async fn download(
        &self,
        filing_type: &str,
        ticker_or_cik: &str,
        options: DownloadOptions,
    ) -> Result<usize> {
        let request = validate_request(
            filing_type,
            ticker_or_cik,
            options.amount,
            options.before_date.as_deref(),
            options.after_date.as_deref(),
            options.include_amends,
            &options.query,
        )?;

        let filings_to_fetch = filing_urls_to_download(
            &self.client,
            &request,
            &self.config.base_urls.archives,
            self.config.request_interval,
        )
        .await?;

        tracing::info!(
            filing_type = %request.filing_type,
            entity = %request.ticker_or_cik,
            count = filings_to_fetch.len(),
            "resolved filings to download"
        );

        let download_folder = match &self.config.download_folder {
            Some(folder) => folder.clone(),
            None => env::current_dir()?,
        };

        download_filings(
            &self.client,
            &download_folder,
            &request.ticker_or_cik,
            &request.filing_type,
            &filings_to_fetch,
            options.download_details,
            self.config.request_interval,
        )
        .await?;

        Ok(unique_filing_count(&filings_to_fetch))
    }
}
