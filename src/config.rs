use std::path::PathBuf;
use std::time::Duration;

use crate::constants::RATE_LIMIT_SLEEP_INTERVAL;

/// Configuration for the downloader
#[derive(Debug, Clone)]
pub struct DownloaderConfig {
    /// User agent string sent with every request. The SEC requires a
    /// descriptive value with valid contact information.
    pub user_agent: String,
    /// Directory the filing tree is created under. `None` means the current
    /// working directory at download time.
    pub download_folder: Option<PathBuf>,
    /// Transport rate limit in requests per second
    pub rate_limit: u32,
    /// HTTP request timeout
    pub timeout: Duration,
    /// Pause inserted after every search page and document request
    pub request_interval: Duration,
    /// Base URLs for the EDGAR services
    pub base_urls: EdgarUrls,
}

/// Base URLs for the EDGAR services used by the downloader
#[derive(Debug, Clone)]
pub struct EdgarUrls {
    /// Full-text search endpoint (POST, JSON body)
    pub search: String,
    /// Base URL for filing archives
    pub archives: String,
}

impl Default for EdgarUrls {
    fn default() -> Self {
        Self {
            search: "https://efts.sec.gov/LATEST/search-index".to_string(),
            archives: "https://www.sec.gov/Archives/edgar/data".to_string(),
        }
    }
}

impl DownloaderConfig {
    /// Creates a configuration with defaults for everything except the
    /// user agent.
    ///
    /// # Basic usage
    ///
    /// ```rust
    /// use edgardl::DownloaderConfig;
    /// use std::path::PathBuf;
    ///
    /// let mut config = DownloaderConfig::new("YourAppName contact@example.com");
    /// config.download_folder = Some(PathBuf::from("/tmp/filings"));
    /// ```
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..Self::default()
        }
    }
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            user_agent: "edgardl/0.1.0".to_string(),
            download_folder: None,
            rate_limit: 10,
            timeout: Duration::from_secs(30),
            request_interval: RATE_LIMIT_SLEEP_INTERVAL,
            base_urls: EdgarUrls::default(),
        }
    }
}
