//! Fixed values shared across the download pipeline.

use std::time::Duration;

/// Earliest filing date the full-text search index covers.
pub const DEFAULT_AFTER_DATE: &str = "2000-01-01";

/// Ceiling used when no amount is requested, effectively "all filings".
pub const DEFAULT_MAX_AMOUNT: usize = 1_000_000;

/// Date format accepted for `after_date` and `before_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Top-level folder created under the download root.
pub const ROOT_SAVE_FOLDER_NAME: &str = "sec-edgar-filings";

/// Filename the complete submission text file is saved under.
pub const FILING_FULL_SUBMISSION_FILENAME: &str = "full-submission.txt";

/// Stem for renamed filing detail documents; the original file extension is
/// appended so generic source filenames cannot collide across filings.
pub const FILING_DETAILS_FILENAME_STEM: &str = "filing-details";

/// Pause inserted after every search page and document request.
pub const RATE_LIMIT_SLEEP_INTERVAL: Duration = Duration::from_millis(100);

/// Form types accepted by the downloader.
pub const SUPPORTED_FILING_TYPES: &[&str] = &[
    "1",
    "1-A",
    "1-E",
    "1-K",
    "1-SA",
    "1-U",
    "1-Z",
    "10-12B",
    "10-12G",
    "10-D",
    "10-K",
    "10-KT",
    "10-Q",
    "10-QT",
    "11-K",
    "11-KT",
    "13F-HR",
    "13F-NT",
    "144",
    "15-12B",
    "15-12G",
    "15-15D",
    "18-K",
    "20-F",
    "24F-2NT",
    "25",
    "25-NSE",
    "3",
    "4",
    "40-17F2",
    "40-17G",
    "40-F",
    "40-OIP",
    "424A",
    "424B1",
    "424B2",
    "424B3",
    "424B4",
    "424B5",
    "424B7",
    "424B8",
    "425",
    "485APOS",
    "485BPOS",
    "485BXT",
    "486BPOS",
    "487",
    "497",
    "497J",
    "497K",
    "5",
    "6-K",
    "8-A12B",
    "8-A12G",
    "8-K",
    "8-K12B",
    "8-K12G3",
    "ABS-15G",
    "ABS-EE",
    "ARS",
    "ATS-N",
    "AW",
    "C",
    "C-AR",
    "C-U",
    "CB",
    "CERT",
    "CORRESP",
    "CT ORDER",
    "D",
    "DEF 14A",
    "DEF 14C",
    "DEFA14A",
    "DEFA14C",
    "DEFM14A",
    "DEFM14C",
    "DEFR14A",
    "DEFR14C",
    "DFAN14A",
    "DOS",
    "DRS",
    "EFFECT",
    "F-1",
    "F-10",
    "F-3",
    "F-4",
    "F-6",
    "F-7",
    "F-8",
    "F-80",
    "F-N",
    "F-X",
    "FOCUSN",
    "FWP",
    "G-405N",
    "G-FIN",
    "IRANNOTICE",
    "MA",
    "MA-A",
    "MA-I",
    "MSD",
    "N-1A",
    "N-2",
    "N-23C3A",
    "N-30B-2",
    "N-30D",
    "N-4",
    "N-6",
    "N-8A",
    "N-8F",
    "N-CEN",
    "N-CSR",
    "N-CSRS",
    "N-MFP",
    "N-PX",
    "N-Q",
    "NPORT-EX",
    "NPORT-P",
    "NRSRO-UPD",
    "NT 10-K",
    "NT 10-Q",
    "NT 11-K",
    "NT 20-F",
    "POS AM",
    "POS EX",
    "POSASR",
    "PRE 14A",
    "PRE 14C",
    "PREC14A",
    "PREM14A",
    "PREM14C",
    "PRER14A",
    "PRER14C",
    "PX14A6G",
    "QRTLYRPT",
    "RW",
    "S-1",
    "S-11",
    "S-1MEF",
    "S-3",
    "S-3ASR",
    "S-4",
    "S-6",
    "S-8",
    "S-B",
    "SC 13D",
    "SC 13E3",
    "SC 13G",
    "SC 14D9",
    "SC 14F1",
    "SC TO-I",
    "SC TO-T",
    "SD",
    "SF-1",
    "SF-3",
    "SUPPL",
    "T-3",
    "TA-1",
    "TA-2",
    "TA-W",
    "UPLOAD",
    "X-17A-5",
];
