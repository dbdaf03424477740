//! Clear command implementation.

use crate::cli::ClearArgs;
use crate::error::Result;
use crate::output::Formatter;
use tagtrail_domain::PersistentKeyStore;
use tagtrail_store::SqliteStore;

/// Execute the clear command.
///
/// Store failures are reported here, unlike capture triggers which degrade
/// silently.
pub fn execute_clear(args: ClearArgs, store: &mut SqliteStore, formatter: &Formatter) -> Result<()> {
    if args.expired {
        let purged = store.purge_expired()?;
        println!("{}", formatter.success(&format!("Purged {} expired entry(s)", purged)));
        return Ok(());
    }

    if args.names.is_empty() {
        store.clear(None)?;
        println!("{}", formatter.success("Cleared all attribution entries"));
    } else {
        store.clear(Some(&args.names))?;
        println!(
            "{}",
            formatter.success(&format!("Cleared {}", args.names.join(", ")))
        );
    }

    Ok(())
}
