use clap::Parser;
use std::path::PathBuf;

use crate::probe::{TimeoutPolicy, UrlVariants};

#[derive(Parser, Debug)]
#[command(
    name = "hubscan",
    about = "Scan the domains of email addresses in a CSV file for HubSpot usage",
    version,
    long_about = None
)]
pub struct Args {
    /// Input CSV file with email addresses
    #[arg(required_unless_present = "init")]
    pub input_csv: Option<PathBuf>,

    /// Output CSV file for results
    #[arg(required_unless_present = "init")]
    pub output_csv: Option<PathBuf>,

    /// Include all rows in output (not just HubSpot ones)
    #[arg(long)]
    pub all: bool,

    /// Show detailed progress
    #[arg(short, long)]
    pub verbose: bool,

    /// Delay between requests in seconds
    #[arg(long, default_value_t = 1.0)]
    pub delay: f64,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Homepage URL variants tried per domain
    #[arg(long, value_enum, default_value_t = UrlVariants::Full)]
    pub variants: UrlVariants,

    /// Whether a timeout gives up on the domain or moves to the next variant
    #[arg(long, value_enum, default_value_t = TimeoutPolicy::Abort)]
    pub on_timeout: TimeoutPolicy,

    /// Path to custom signature file
    #[arg(short, long)]
    pub signatures: Option<PathBuf>,

    /// Seed for browser identity selection, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Initialize hubscan_signatures.txt with default signatures
    #[arg(long)]
    pub init: bool,
}
