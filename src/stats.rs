use std::collections::HashMap;
use std::path::PathBuf;

use crate::probe::ProbeResult;

/// Per-domain outcomes of one run.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub results: HashMap<String, ProbeResult>,
    pub planned: usize,
    pub matches: usize,
    pub errors: usize,
    pub interrupted: bool,
}

impl ScanReport {
    pub fn scanned(&self) -> usize {
        self.results.len()
    }

    pub(crate) fn record(&mut self, result: ProbeResult) {
        if result.classification.is_match() {
            self.matches += 1;
        } else if result.classification.is_error() {
            self.errors += 1;
        }
        self.results.insert(result.domain.clone(), result);
    }
}

#[derive(Debug)]
pub struct ScanSummary {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub rows_read: usize,
    pub rows_written: usize,
    pub include_all: bool,
    pub report: ScanReport,
}
