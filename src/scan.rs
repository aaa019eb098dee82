use anyhow::{Context, Result};
use std::sync::atomic::AtomicBool;
use std::time::{Duration, Instant};
use tracing::info;

use crate::aggregate::output_header;
use crate::identity::RandomIdentity;
use crate::pipeline::{scan_table, ScanOptions};
use crate::probe::Prober;
use crate::progress::ConsoleProgress;
use crate::records::{read_email_table, write_results};
use crate::signatures::load_signatures;
use crate::stats::ScanSummary;
use crate::transport::HttpTransport;
use crate::utils::{delay_duration, format_number};
use crate::Args;

/// Reads the input, probes every domain over the network and writes the
/// output file. An interrupted scan still writes what it has.
pub fn run(args: &Args, cancel: &AtomicBool) -> Result<ScanSummary> {
    let total_start_time = Instant::now();
    info!(action = "start", component = "run", "Starting HubSpot scan");

    let input_path = args
        .input_csv
        .as_deref()
        .context("an input CSV path is required")?;
    let output_path = args
        .output_csv
        .as_deref()
        .context("an output CSV path is required")?;

    println!("Reading CSV from {}...", input_path.display());
    let table = read_email_table(input_path)?;
    println!("Found {} rows", format_number(table.rows.len()));

    let classifier = load_signatures(args.signatures.as_deref())?;
    let transport = HttpTransport::new()?;
    let selector = match args.seed {
        Some(seed) => RandomIdentity::seeded(seed),
        None => RandomIdentity::new(),
    };
    let mut prober = Prober::new(transport, selector, classifier)
        .with_variants(args.variants)
        .with_timeout(Duration::from_secs(args.timeout))
        .with_timeout_policy(args.on_timeout);

    let options = ScanOptions {
        delay: delay_duration(args)?,
        include_all: args.all,
    };
    let mut progress = ConsoleProgress::new(args.verbose);
    let scan = scan_table(&table, &mut prober, &options, &mut progress, cancel);

    println!("\nWriting results to {}...", output_path.display());
    write_results(output_path, &output_header(&table.header), &scan.rows)
        .context("Failed to save scan results")?;

    info!(
        action = "complete",
        component = "run",
        duration_ms = total_start_time.elapsed().as_millis(),
        "Scan completed"
    );

    Ok(ScanSummary {
        input_path: input_path.to_path_buf(),
        output_path: output_path.to_path_buf(),
        rows_read: table.rows.len(),
        rows_written: scan.rows.len(),
        include_all: args.all,
        report: scan.report,
    })
}

pub fn print_scan_summary(summary: &ScanSummary) {
    let report = &summary.report;

    println!("\n--- HubSpot Scan of {} ---", summary.input_path.display());
    println!("Rows read: {}", format_number(summary.rows_read));
    println!(
        "Domains scanned: {}/{}",
        format_number(report.scanned()),
        format_number(report.planned)
    );
    println!("HubSpot detected: {}", format_number(report.matches));
    if report.errors > 0 {
        println!("Domains with errors: {}", format_number(report.errors));
    }
    println!(
        "Rows written to {}: {}",
        summary.output_path.display(),
        format_number(summary.rows_written)
    );

    if report.interrupted {
        println!("Scan was interrupted; output contains partial results");
    }
    if !summary.include_all {
        println!("Output contains only rows with HubSpot detected");
    }
}
