//! Sequential download-and-persist pipeline.
//!
//! Filings are fetched one at a time and written under a hierarchical
//! directory layout:
//!
//! ```text
//! {root}/sec-edgar-filings/{ticker_or_cik}/{filing_type}/{accession_number}/{filename}
//! ```
//!
//! A failure to fetch one document is reported and skipped; it never stops
//! the detail download for the same filing or the remaining filings.

use std::path::Path;
use std::time::Duration;

use tokio::fs;
use tokio::time::sleep;
use tracing::warn;

use crate::constants::{FILING_FULL_SUBMISSION_FILENAME, ROOT_SAVE_FOLDER_NAME};
use crate::error::Result;
use crate::metadata::FilingMetadata;
use crate::resolve::resolve_relative_urls;
use crate::traits::EdgarTransport;

/// Downloads every filing in the list, persisting the full submission and,
/// optionally, the filing detail document.
///
/// Strictly sequential; a fixed pause follows every document request
/// whether it succeeded or not.
pub async fn download_filings<T: EdgarTransport + ?Sized>(
    transport: &T,
    download_folder: &Path,
    ticker_or_cik: &str,
    filing_type: &str,
    filings_to_fetch: &[FilingMetadata],
    include_filing_details: bool,
    request_interval: Duration,
) -> Result<()> {
    for filing in filings_to_fetch {
        if let Err(e) = download_and_save_filing(
            transport,
            download_folder,
            ticker_or_cik,
            &filing.accession_number,
            filing_type,
            &filing.full_submission_url,
            FILING_FULL_SUBMISSION_FILENAME,
            false,
            request_interval,
        )
        .await
        {
            warn!(
                accession_number = %filing.accession_number,
                error = %e,
                "skipping full submission download"
            );
        }

        if include_filing_details {
            if let Err(e) = download_and_save_filing(
                transport,
                download_folder,
                ticker_or_cik,
                &filing.accession_number,
                filing_type,
                &filing.filing_details_url,
                &filing.filing_details_filename,
                true,
                request_interval,
            )
            .await
            {
                warn!(
                    accession_number = %filing.accession_number,
                    error = %e,
                    "skipping filing detail download"
                );
            }
        }
    }

    Ok(())
}

/// Fetches one document and writes it below the filing's directory.
///
/// The body is buffered in full and written with a single call, so an
/// interrupted run never leaves a partially written file. Parent
/// directories are created as needed and an existing file at the same path
/// is overwritten, which makes re-runs idempotent.
#[allow(clippy::too_many_arguments)]
async fn download_and_save_filing<T: EdgarTransport + ?Sized>(
    transport: &T,
    download_folder: &Path,
    ticker_or_cik: &str,
    accession_number: &str,
    filing_type: &str,
    download_url: &str,
    save_filename: &str,
    resolve_urls: bool,
    request_interval: Duration,
) -> Result<()> {
    let fetched = transport.get_document(download_url).await;

    // Prevent rate limiting; the pause applies to failed fetches as well.
    sleep(request_interval).await;

    let mut body = fetched?;

    // Only rewrite links inside HTML detail documents.
    if resolve_urls && has_html_extension(save_filename) {
        let text = String::from_utf8_lossy(&body).into_owned();
        body = resolve_relative_urls(&text, download_url).into_bytes();
    }

    let save_path = download_folder
        .join(ROOT_SAVE_FOLDER_NAME)
        .join(ticker_or_cik)
        .join(filing_type)
        .join(accession_number)
        .join(save_filename);

    if let Some(parent) = save_path.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(&save_path, &body).await?;

    Ok(())
}

fn has_html_extension(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_extension_detection() {
        assert!(has_html_extension("filing-details.html"));
        assert!(has_html_extension("filing-details.HTML"));
        assert!(!has_html_extension("filing-details.htm"));
        assert!(!has_html_extension("filing-details.xml"));
        assert!(!has_html_extension("full-submission.txt"));
        assert!(!has_html_extension("filing-details"));
    }
}
