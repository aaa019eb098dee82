use anyhow::Result;
use clap::Parser;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{error, warn};

use hubscan::pipeline::request_cancel;
use hubscan::{init_default_signatures, print_scan_summary, run, utils, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    utils::setup_logging(args.verbose);

    if args.init {
        return init_default_signatures();
    }

    utils::validate_args(&args)?;

    let cancel = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&cancel);
    if let Err(e) = ctrlc::set_handler(move || {
        if request_cancel(&handler_flag) {
            eprintln!("\nSecond interrupt received, exiting without saving results.");
            std::process::exit(130);
        }
        eprintln!("\nInterrupt received, stopping after the current domain (Ctrl-C again to quit now)...");
    }) {
        warn!(action = "install", component = "signal_handler", error = %e, "Failed to set Ctrl-C handler; interrupts will not save partial results");
    }

    match run(&args, &cancel) {
        Ok(summary) => {
            print_scan_summary(&summary);
            Ok(())
        }
        // Reported, not fatal to the exit status: nothing was written.
        Err(e) => {
            error!("Error: {:#}", e);
            Ok(())
        }
    }
}
