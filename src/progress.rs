use std::io::{self, Write};

use crate::probe::{Classification, ProbeResult};

/// Receives scan events as they happen. All methods default to no-ops.
pub trait ScanObserver {
    fn scan_started(&mut self, _total: usize) {}

    fn domain_started(&mut self, _index: usize, _total: usize, _domain: &str) {}

    fn domain_finished(&mut self, _index: usize, _total: usize, _result: &ProbeResult) {}

    fn scan_interrupted(&mut self, _completed: usize, _total: usize) {}
}

/// Discards every event.
#[derive(Debug, Default)]
pub struct NoProgress;

impl ScanObserver for NoProgress {}

/// One line per domain on stdout.
#[derive(Debug, Default)]
pub struct ConsoleProgress {
    /// Log lines go between the two halves of a line in verbose mode, so the
    /// outcome is then printed on its own line.
    verbose: bool,
}

impl ConsoleProgress {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl ScanObserver for ConsoleProgress {
    fn scan_started(&mut self, total: usize) {
        println!(
            "Scanning {} unique domains...",
            crate::utils::format_number(total)
        );
    }

    fn domain_started(&mut self, index: usize, total: usize, domain: &str) {
        if self.verbose {
            println!("[{}/{}] Scanning {}...", index, total, domain);
        } else {
            print!("[{}/{}] Scanning {}... ", index, total, domain);
            let _ = io::stdout().flush();
        }
    }

    fn domain_finished(&mut self, _index: usize, _total: usize, result: &ProbeResult) {
        let outcome = match &result.classification {
            Classification::Yes => "✓ HubSpot detected".to_string(),
            Classification::No => "- No HubSpot".to_string(),
            error @ Classification::Error(_) => format!("✗ {}", error),
        };
        if self.verbose {
            println!("  {}", outcome);
        } else {
            println!("{}", outcome);
        }
    }

    fn scan_interrupted(&mut self, completed: usize, total: usize) {
        println!(
            "\n\n⚠ Scan interrupted by user after {}/{} domains. Saving partial results...",
            completed, total
        );
    }
}
