use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::aggregate::merge_results;
use crate::probe::DomainProbe;
use crate::progress::ScanObserver;
use crate::records::EmailTable;
use crate::stats::ScanReport;

pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

const CANCEL_POLL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy)]
pub struct ScanOptions {
    pub delay: Duration,
    pub include_all: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            include_all: false,
        }
    }
}

#[derive(Debug)]
pub struct TableScan {
    pub rows: Vec<Vec<String>>,
    pub report: ScanReport,
}

/// Probes `domains` one at a time, in the given order.
///
/// A domain already in the report is not probed again. `cancel` is checked
/// before each probe and while waiting between probes; once set, the report
/// is returned as it stands with `interrupted` set.
pub fn scan_domains<P: DomainProbe + ?Sized>(
    prober: &mut P,
    domains: &[String],
    delay: Duration,
    observer: &mut dyn ScanObserver,
    cancel: &AtomicBool,
) -> ScanReport {
    let start_time = Instant::now();
    let total = domains.len();
    let mut report = ScanReport {
        planned: total,
        ..ScanReport::default()
    };

    info!(action = "start", component = "scan", domain_count = total, "Starting domain scan");
    observer.scan_started(total);

    for (i, domain) in domains.iter().enumerate() {
        let index = i + 1;
        if cancel.load(Ordering::SeqCst) {
            report.interrupted = true;
            break;
        }
        if report.results.contains_key(domain) {
            continue;
        }

        observer.domain_started(index, total, domain);
        let result = prober.probe(domain);
        observer.domain_finished(index, total, &result);
        info!(
            action = "probed",
            component = "scan",
            domain = %result.domain,
            url = %result.resolved_url,
            status = %result.classification,
            "Domain probed"
        );
        report.record(result);

        if index < total && !wait_unless_cancelled(delay, cancel) {
            report.interrupted = true;
            break;
        }
    }

    if report.interrupted {
        warn!(
            action = "interrupted",
            component = "scan",
            scanned = report.scanned(),
            planned = total,
            "Scan interrupted, keeping partial results"
        );
        observer.scan_interrupted(report.scanned(), total);
    }

    info!(
        action = "complete",
        component = "scan",
        scanned = report.scanned(),
        matches = report.matches,
        errors = report.errors,
        duration_ms = start_time.elapsed().as_millis(),
        "Domain scan finished"
    );
    report
}

pub fn scan_table<P: DomainProbe + ?Sized>(
    table: &EmailTable,
    prober: &mut P,
    options: &ScanOptions,
    observer: &mut dyn ScanObserver,
    cancel: &AtomicBool,
) -> TableScan {
    let domains = table.domains();
    let report = scan_domains(prober, &domains, options.delay, observer, cancel);
    let rows = merge_results(
        &table.rows,
        table.email_col,
        &report.results,
        options.include_all,
    );
    TableScan { rows, report }
}

/// True when the flag was already raised.
pub fn request_cancel(cancel: &AtomicBool) -> bool {
    cancel.swap(true, Ordering::SeqCst)
}

fn wait_unless_cancelled(delay: Duration, cancel: &AtomicBool) -> bool {
    // None: the delay is too long to represent, only a cancel ends it.
    let deadline = Instant::now().checked_add(delay);
    loop {
        if cancel.load(Ordering::SeqCst) {
            return false;
        }
        let remaining = match deadline {
            Some(deadline) => deadline.saturating_duration_since(Instant::now()),
            None => CANCEL_POLL,
        };
        if remaining.is_zero() {
            return true;
        }
        thread::sleep(CANCEL_POLL.min(remaining));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{Classification, ProbeResult};
    use crate::progress::NoProgress;

    #[derive(Default)]
    struct CountingProbe {
        calls: Vec<String>,
    }

    impl DomainProbe for CountingProbe {
        fn probe(&mut self, domain: &str) -> ProbeResult {
            self.calls.push(domain.to_string());
            ProbeResult {
                domain: domain.to_string(),
                resolved_url: format!("https://{domain}/"),
                classification: Classification::No,
            }
        }
    }

    fn domains(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn repeated_domain_is_probed_once() {
        let mut probe = CountingProbe::default();
        let cancel = AtomicBool::new(false);
        let report = scan_domains(
            &mut probe,
            &domains(&["a.com", "a.com", "b.com"]),
            Duration::ZERO,
            &mut NoProgress,
            &cancel,
        );
        assert_eq!(probe.calls, ["a.com", "b.com"]);
        assert_eq!(report.scanned(), 2);
        assert!(!report.interrupted);
    }

    #[test]
    fn preset_cancel_scans_nothing() {
        let mut probe = CountingProbe::default();
        let cancel = AtomicBool::new(true);
        let report = scan_domains(
            &mut probe,
            &domains(&["a.com"]),
            Duration::ZERO,
            &mut NoProgress,
            &cancel,
        );
        assert!(probe.calls.is_empty());
        assert!(report.interrupted);
        assert_eq!(report.planned, 1);
    }

    #[test]
    fn wait_returns_early_when_cancelled() {
        let cancel = AtomicBool::new(true);
        let started = Instant::now();
        assert!(!wait_unless_cancelled(Duration::from_secs(30), &cancel));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn second_cancel_request_is_reported_as_repeat() {
        let cancel = AtomicBool::new(false);
        assert!(!request_cancel(&cancel));
        assert!(cancel.load(Ordering::SeqCst));
        assert!(request_cancel(&cancel));
    }

    #[test]
    fn unrepresentable_delay_still_honours_cancel() {
        let cancel = AtomicBool::new(true);
        assert!(!wait_unless_cancelled(Duration::MAX, &cancel));
    }

    #[test]
    fn wait_completes_without_cancel() {
        let cancel = AtomicBool::new(false);
        assert!(wait_unless_cancelled(Duration::from_millis(10), &cancel));
    }
}
