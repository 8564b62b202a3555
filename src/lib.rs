//! # edgardl - download SEC EDGAR filings
//!
//! edgardl locates filings through the SEC's full-text search API and saves
//! them to a local hierarchical directory tree.
//!
//! ## Features
//!
//! - **Full-text search pagination** - Collects filings page by page,
//!   filtering amendments and mismatched form types
//! - **Hierarchical persistence** - Saves the full submission and the
//!   primary detail document under
//!   `sec-edgar-filings/{entity}/{form}/{accession}/`
//! - **Link rewriting** - Resolves relative references in HTML filings so
//!   saved copies keep pointing at the archive
//! - **Rate-limited HTTP client** - Complies with SEC.gov fair access rules
//!
//! ## Requirements
//!
//! edgardl is an async-first library and requires an async runtime. We
//! recommend [tokio](https://tokio.rs), which is the most widely used async
//! runtime in the Rust ecosystem.
//!
//! ## Basic Usage
//!
//! ```ignore
//! use edgardl::{Downloader, DownloadOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Initialize with a proper user agent (required by SEC.gov)
//!     let downloader = Downloader::new("YourAppName contact@example.com")?;
//!
//!     // Save the five most recent 8-K filings for Apple
//!     let options = DownloadOptions::new().with_amount(5);
//!     let fetched = downloader.download("8-K", "AAPL", options).await?;
//!
//!     println!("Downloaded {} filings", fetched);
//!     Ok(())
//! }
//! ```

mod config;
pub mod constants;
mod core;
mod download;
mod downloader;
mod error;
mod metadata;
mod resolve;
mod search;
mod traits;
mod validate;

pub use config::{DownloaderConfig, EdgarUrls};
pub use crate::core::EdgarClient;
pub use downloader::{DownloadOptions, Downloader};
pub use error::{DownloadError, Result};

// Pipeline building blocks, exposed for direct use and for testing against
// alternative transports.
pub use download::download_filings;
pub use metadata::{FilingMetadata, build_filing_metadata, unique_filing_count};
pub use resolve::resolve_relative_urls;
pub use search::{
    Hit, Hits, QueryInfo, SearchRequest, SearchResponse, Source, TotalHits, accept_hit,
    filing_urls_to_download,
};
pub use traits::EdgarTransport;
pub use validate::{ValidatedRequest, is_cik, validate_request};

/// Current crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
