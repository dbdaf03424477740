//! Cookies command implementation.

use crate::cli::CookiesArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use tagtrail_capture::{evaluate_detailed, Evaluation};
use tagtrail_store::CookieJarStore;

/// Execute the cookies command.
///
/// The jar is seeded from the request's `Cookie` header; any writes made by
/// the trigger come back as `Set-Cookie` values for the response.
pub fn execute_cookies(args: CookiesArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let (evaluation, headers) = run_cookies(&args, config)?;
    println!("{}", formatter.format_evaluation(&evaluation)?);
    if !headers.is_empty() {
        println!("{}", formatter.format_set_cookies(&headers)?);
    }
    Ok(())
}

fn run_cookies(args: &CookiesArgs, config: &Config) -> Result<(Evaluation, Vec<String>)> {
    let capture_config = args.gates.apply(config.capture.clone());
    capture_config.validate()?;

    let mut jar = CookieJarStore::from_cookie_header(&args.cookie_header);
    let evaluation = evaluate_detailed(&capture_config, Some(&args.page.to_page()), &mut jar);
    let headers = jar.take_set_cookie_headers();
    tracing::debug!(count = headers.len(), "Collected Set-Cookie headers");
    Ok((evaluation, headers))
}
