//! Argument normalization and validation performed before any network
//! activity.

use chrono::{NaiveDate, Utc};

use crate::constants::{
    DATE_FORMAT, DEFAULT_AFTER_DATE, DEFAULT_MAX_AMOUNT, SUPPORTED_FILING_TYPES,
};
use crate::error::{DownloadError, Result};

/// A fully normalized download request, ready for the search pipeline.
///
/// Instances only exist once every argument has passed validation, so the
/// pagination and download code never re-checks inputs.
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    pub filing_type: String,
    /// Upper-cased ticker symbol, or a CIK zero-padded to 10 digits.
    pub ticker_or_cik: String,
    pub amount: usize,
    /// Inclusive lower bound, `YYYY-MM-DD`.
    pub after_date: String,
    /// Inclusive upper bound, `YYYY-MM-DD`.
    pub before_date: String,
    pub include_amends: bool,
    pub query: String,
}

/// Returns true when the identifier is a CIK rather than a ticker symbol.
pub fn is_cik(ticker_or_cik: &str) -> bool {
    !ticker_or_cik.is_empty() && ticker_or_cik.bytes().all(|b| b.is_ascii_digit())
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        DownloadError::InvalidDateRange(format!(
            "incorrect date format '{value}', expected YYYY-MM-DD"
        ))
    })
}

/// Validates and normalizes every download argument.
///
/// Ticker symbols are trimmed and upper-cased; numeric identifiers are
/// treated as CIKs and zero-padded to 10 digits. Dates default to the
/// search index floor and the current date respectively.
pub fn validate_request(
    filing_type: &str,
    ticker_or_cik: &str,
    amount: Option<usize>,
    before_date: Option<&str>,
    after_date: Option<&str>,
    include_amends: bool,
    query: &str,
) -> Result<ValidatedRequest> {
    let ticker_or_cik = ticker_or_cik.trim().to_uppercase();
    if ticker_or_cik.is_empty() {
        return Err(DownloadError::InvalidIdentifier(
            "ticker or CIK must be non-blank".to_string(),
        ));
    }

    let ticker_or_cik = if is_cik(&ticker_or_cik) {
        if ticker_or_cik.len() > 10 {
            return Err(DownloadError::InvalidIdentifier(format!(
                "CIK '{ticker_or_cik}' is longer than 10 digits"
            )));
        }
        format!("{ticker_or_cik:0>10}")
    } else {
        ticker_or_cik
    };

    let amount = match amount {
        None => DEFAULT_MAX_AMOUNT,
        Some(0) => return Err(DownloadError::InvalidAmount),
        Some(n) => n,
    };

    let floor = parse_date(DEFAULT_AFTER_DATE)?;
    let after = match after_date {
        None => floor,
        Some(raw) => {
            let parsed = parse_date(raw)?;
            if parsed < floor {
                return Err(DownloadError::InvalidDateRange(format!(
                    "after date must not be earlier than {DEFAULT_AFTER_DATE}"
                )));
            }
            parsed
        }
    };

    let before = match before_date {
        None => Utc::now().date_naive(),
        Some(raw) => parse_date(raw)?,
    };

    if after > before {
        return Err(DownloadError::InvalidDateRange(format!(
            "after date {after} is later than before date {before}"
        )));
    }

    if !SUPPORTED_FILING_TYPES.contains(&filing_type) {
        return Err(DownloadError::UnsupportedFilingType(filing_type.to_string()));
    }

    Ok(ValidatedRequest {
        filing_type: filing_type.to_string(),
        ticker_or_cik,
        amount,
        after_date: after.format(DATE_FORMAT).to_string(),
        before_date: before.format(DATE_FORMAT).to_string(),
        include_amends,
        query: query.to_string(),
    })
}
