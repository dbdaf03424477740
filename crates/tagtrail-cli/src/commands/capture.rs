//! Capture command implementation.

use crate::cli::CaptureArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use tagtrail_capture::{evaluate_detailed, Evaluation};
use tagtrail_store::SqliteStore;

/// Execute the capture command.
pub fn execute_capture(
    args: CaptureArgs,
    config: &Config,
    store: &mut SqliteStore,
    formatter: &Formatter,
) -> Result<()> {
    let evaluation = run_capture(&args, config, store)?;
    println!("{}", formatter.format_evaluation(&evaluation)?);
    Ok(())
}

fn run_capture(args: &CaptureArgs, config: &Config, store: &mut SqliteStore) -> Result<Evaluation> {
    let capture_config = args.gates.apply(config.capture.clone());
    capture_config.validate()?;

    let page = args.page.to_page();
    tracing::debug!(url = %args.page.url, "Running capture trigger");
    Ok(evaluate_detailed(&capture_config, Some(&page), store))
}
