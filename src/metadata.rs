//! Derivation of download URLs and save filenames from raw search hits.

use std::collections::HashSet;
use std::path::Path;

use crate::constants::FILING_DETAILS_FILENAME_STEM;
use crate::error::{DownloadError, Result};
use crate::search::Hit;

/// Metadata required to download a single filing.
///
/// Produced once per accepted search hit and never mutated afterwards. The
/// accession number is the canonical identity of a filing; two entries with
/// the same accession number describe the same filing even when their detail
/// documents differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingMetadata {
    /// Canonical filing identifier in dash-separated form,
    /// e.g. `0000320193-23-000001`.
    pub accession_number: String,
    /// Absolute URL to the complete filing submission text.
    pub full_submission_url: String,
    /// Absolute URL to the primary human-readable document of the filing.
    pub filing_details_url: String,
    /// Local filename the detail document is saved under.
    pub filing_details_filename: String,
}

/// Builds [`FilingMetadata`] from one search hit.
///
/// The hit id has the form `accession:filename`. Ownership forms are indexed
/// under both the reporting insider and the subject company; the last CIK
/// entry is the owning entity and anchors the archive path.
pub fn build_filing_metadata(hit: &Hit, archives_base_url: &str) -> Result<FilingMetadata> {
    let (accession_number, details_filename) = hit._id.split_once(':').ok_or_else(|| {
        DownloadError::InvalidResponse(format!(
            "malformed hit id '{}', expected 'accession_number:filename'",
            hit._id
        ))
    })?;

    let cik = hit._source.ciks.last().ok_or_else(|| {
        DownloadError::InvalidResponse(format!("hit '{}' carries no CIK", hit._id))
    })?;

    let accession_number_no_dashes = accession_number.replace('-', "");
    let submission_base_url = format!("{archives_base_url}/{cik}/{accession_number_no_dashes}");

    let full_submission_url = format!("{submission_base_url}/{accession_number}.txt");

    // The styled view of XML forms would insert the hit's `xsl` segment
    // before the filename here; the raw document is linked instead.
    let filing_details_url = format!("{submission_base_url}/{details_filename}");

    let filing_details_filename = match Path::new(details_filename)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) => format!("{FILING_DETAILS_FILENAME_STEM}.{extension}"),
        None => FILING_DETAILS_FILENAME_STEM.to_string(),
    };

    Ok(FilingMetadata {
        accession_number: accession_number.to_string(),
        full_submission_url,
        filing_details_url,
        filing_details_filename,
    })
}

/// Number of distinct filings in the list, keyed by accession number.
pub fn unique_filing_count(filings: &[FilingMetadata]) -> usize {
    filings
        .iter()
        .map(|filing| filing.accession_number.as_str())
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Source;

    const ARCHIVES: &str = "https://www.sec.gov/Archives/edgar/data";

    fn hit(id: &str, ciks: &[&str]) -> Hit {
        Hit {
            _id: id.to_string(),
            _source: Source {
                ciks: ciks.iter().map(|c| c.to_string()).collect(),
                file_type: "4".to_string(),
                file_date: None,
                display_names: Vec::new(),
                adsh: None,
                xsl: None,
            },
        }
    }

    #[test]
    fn builds_urls_from_ownership_form_hit() {
        let hit = hit(
            "0000320193-23-000001:wf-form4_1.xml",
            &["0001", "0000320193"],
        );
        let metadata = build_filing_metadata(&hit, ARCHIVES).unwrap();

        assert_eq!(metadata.accession_number, "0000320193-23-000001");
        assert_eq!(
            metadata.full_submission_url,
            format!("{ARCHIVES}/0000320193/000032019323000001/0000320193-23-000001.txt")
        );
        assert_eq!(
            metadata.filing_details_url,
            format!("{ARCHIVES}/0000320193/000032019323000001/wf-form4_1.xml")
        );
        assert_eq!(metadata.filing_details_filename, "filing-details.xml");
    }

    #[test]
    fn detail_filename_keeps_original_extension() {
        let hit = hit("0000320193-23-000077:aapl-20230701.htm", &["0000320193"]);
        let metadata = build_filing_metadata(&hit, ARCHIVES).unwrap();
        assert_eq!(metadata.filing_details_filename, "filing-details.htm");
    }

    #[test]
    fn hit_id_without_separator_is_rejected() {
        let hit = hit("0000320193-23-000001", &["0000320193"]);
        let result = build_filing_metadata(&hit, ARCHIVES);
        assert!(matches!(result, Err(DownloadError::InvalidResponse(_))));
    }

    #[test]
    fn hit_without_ciks_is_rejected() {
        let hit = hit("0000320193-23-000001:doc.htm", &[]);
        let result = build_filing_metadata(&hit, ARCHIVES);
        assert!(matches!(result, Err(DownloadError::InvalidResponse(_))));
    }

    #[test]
    fn unique_count_deduplicates_by_accession_number() {
        let first = build_filing_metadata(
            &hit("0000320193-23-000001:primary.xml", &["0000320193"]),
            ARCHIVES,
        )
        .unwrap();
        let mut second = first.clone();
        second.filing_details_url = format!("{ARCHIVES}/0000320193/other.xml");

        let third = build_filing_metadata(
            &hit("0000320193-23-000002:primary.xml", &["0000320193"]),
            ARCHIVES,
        )
        .unwrap();

        assert_eq!(unique_filing_count(&[first.clone(), second.clone()]), 1);
        assert_eq!(unique_filing_count(&[first, second, third]), 2);
    }
}
