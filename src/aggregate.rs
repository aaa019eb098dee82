use std::collections::HashMap;

use crate::domain::extract_domain;
use crate::probe::ProbeResult;

/// Columns appended to every output row.
pub const RESULT_COLUMNS: [&str; 2] = ["scanned_url", "hubspot_status"];

pub fn output_header(header: &[String]) -> Vec<String> {
    header
        .iter()
        .cloned()
        .chain(RESULT_COLUMNS.iter().map(|c| c.to_string()))
        .collect()
}

/// Joins probe results back onto the input rows.
///
/// Rows without a result (no extractable domain, or a domain the run never
/// reached) are kept with two empty fields only in include-all mode. Without
/// it, only rows whose domain classified as `Yes` survive. Rows too short to
/// hold an email are always dropped.
pub fn merge_results(
    rows: &[Vec<String>],
    email_col: usize,
    results: &HashMap<String, ProbeResult>,
    include_all: bool,
) -> Vec<Vec<String>> {
    let mut merged = Vec::new();

    for row in rows {
        let Some(email) = row.get(email_col) else {
            continue;
        };

        let result = extract_domain(email).and_then(|domain| results.get(&domain));
        match result {
            Some(result) => {
                if !include_all && !result.classification.is_match() {
                    continue;
                }
                let mut out = row.clone();
                out.push(result.resolved_url.clone());
                out.push(result.classification.to_string());
                merged.push(out);
            }
            None if include_all => {
                let mut out = row.clone();
                out.extend([String::new(), String::new()]);
                merged.push(out);
            }
            None => {}
        }
    }

    merged
}
