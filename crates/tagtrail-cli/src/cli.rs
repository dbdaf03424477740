//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tagtrail_capture::{CaptureConfig, PageContext};

/// Tagtrail CLI - Capture and recall UTM attribution for page visits.
#[derive(Debug, Parser)]
#[command(name = "tagtrail")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "TAGTRAIL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Attribution database path
    #[arg(short, long, global = true, env = "TAGTRAIL_STORE")]
    pub store: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (`name=value` lines)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write a default configuration file
    Init(InitArgs),

    /// Run one capture trigger for a page visit
    Capture(CaptureArgs),

    /// Show the attribution currently recalled from the store
    Show(ShowArgs),

    /// Delete stored attribution entries
    Clear(ClearArgs),

    /// Run a capture trigger against a request's cookies and print Set-Cookie headers
    Cookies(CookiesArgs),
}

/// Page visit description shared by `capture` and `cookies`.
#[derive(Debug, Args)]
pub struct PageArgs {
    /// Full page URL, including its query string
    pub url: String,

    /// Referrer of the visit
    #[arg(short, long, default_value = "")]
    pub referrer: String,

    /// Visitor sent a do-not-track signal
    #[arg(long)]
    pub dnt: bool,
}

impl PageArgs {
    /// Build the page context for a trigger.
    pub fn to_page(&self) -> PageContext {
        PageContext::new(self.url.as_str())
            .with_referrer(self.referrer.as_str())
            .with_do_not_track(self.dnt)
    }
}

/// Per-invocation overrides of the configured capture behavior.
#[derive(Debug, Default, Args)]
pub struct GateArgs {
    /// Parameter names to capture (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub params: Option<Vec<String>>,

    /// Entry lifetime in days
    #[arg(long)]
    pub expiry_days: Option<u32>,

    /// Only accept URL parameters when a referrer is present
    #[arg(long)]
    pub require_referrer: bool,

    /// Require explicit consent before capturing
    #[arg(long)]
    pub require_consent: bool,

    /// Visitor has not given consent
    #[arg(long)]
    pub no_consent: bool,
}

impl GateArgs {
    /// Layer these overrides on top of a configured capture.
    pub fn apply(&self, mut config: CaptureConfig) -> CaptureConfig {
        if let Some(params) = &self.params {
            config.capture_params = params.clone();
        }
        if let Some(days) = self.expiry_days {
            config.expiry_days = days;
        }
        if self.require_referrer {
            config.require_referrer = true;
        }
        if self.require_consent {
            config.require_consent = true;
        }
        if self.no_consent {
            config.consent_given = false;
        }
        config
    }
}

/// Arguments for the init command.
#[derive(Debug, Parser)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,

    /// Attribution database path to record in the file
    #[arg(long)]
    pub store_path: Option<PathBuf>,
}

/// Arguments for the capture command.
#[derive(Debug, Parser)]
pub struct CaptureArgs {
    #[command(flatten)]
    pub page: PageArgs,

    #[command(flatten)]
    pub gates: GateArgs,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// List raw stored entries with their expiry instead of the recalled record
    #[arg(short, long)]
    pub entries: bool,

    #[command(flatten)]
    pub gates: GateArgs,
}

/// Arguments for the clear command.
#[derive(Debug, Parser)]
pub struct ClearArgs {
    /// Entry names to delete (bare or `utm_`-prefixed); all attribution entries if omitted
    pub names: Vec<String>,

    /// Only remove entries whose expiry has passed
    #[arg(long, conflicts_with = "names")]
    pub expired: bool,
}

/// Arguments for the cookies command.
#[derive(Debug, Parser)]
pub struct CookiesArgs {
    #[command(flatten)]
    pub page: PageArgs,

    /// Incoming `Cookie` request header
    #[arg(long, default_value = "")]
    pub cookie_header: String,

    #[command(flatten)]
    pub gates: GateArgs,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
