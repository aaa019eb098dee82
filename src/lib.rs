pub mod aggregate;
pub mod args;
pub mod domain;
pub mod error;
pub mod identity;
pub mod pipeline;
pub mod probe;
pub mod progress;
pub mod records;
pub mod scan;
pub mod signatures;
pub mod stats;
pub mod transport;
pub mod utils;

pub use args::Args;
pub use error::{ProbeFailure, ScanError};
pub use probe::{Classification, DomainProbe, ProbeResult, Prober};
pub use scan::{print_scan_summary, run};
pub use signatures::{init_default_signatures, Classifier};
pub use stats::{ScanReport, ScanSummary};
