//! Show command implementation.

use crate::cli::ShowArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use tagtrail_capture::{evaluate, PageContext};
use tagtrail_domain::AttributionRecord;
use tagtrail_store::SqliteStore;

/// Execute the show command.
pub fn execute_show(
    args: ShowArgs,
    config: &Config,
    store: &mut SqliteStore,
    formatter: &Formatter,
) -> Result<()> {
    if args.entries {
        let entries = store.list_entries()?;
        println!("{}", formatter.format_entries(&entries)?);
        return Ok(());
    }

    let record = recall(&args, config, store)?;
    println!("{}", formatter.format_record(&record)?);
    Ok(())
}

/// A trigger on a page without parameters yields what the store recalls.
fn recall(args: &ShowArgs, config: &Config, store: &mut SqliteStore) -> Result<AttributionRecord> {
    let capture_config = args.gates.apply(config.capture.clone());
    capture_config.validate()?;
    Ok(evaluate(&capture_config, Some(&PageContext::new("/")), store))
}
