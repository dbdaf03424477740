//! Tagtrail CLI - Capture and recall UTM attribution from the command line.

use clap::Parser;
use tagtrail_cli::commands;
use tagtrail_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> tagtrail_cli::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // `init` writes the file the other commands read
    if let Command::Init(args) = &cli.command {
        let config_path = match &cli.config {
            Some(path) => path.clone(),
            None => Config::path()?,
        };
        let formatter = Formatter::new(
            cli.format.map(Into::into).unwrap_or(tagtrail_cli::config::OutputFormat::Table),
            !cli.no_color,
        );
        return commands::execute_init(args, &config_path, &formatter);
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);
    let store_override = cli.store.as_deref();

    match cli.command {
        // handled before the config is loaded
        Command::Init(_) => {}
        Command::Capture(args) => {
            let mut store = commands::open_store(&config, store_override)?;
            commands::execute_capture(args, &config, &mut store, &formatter)?;
        }
        Command::Show(args) => {
            let mut store = commands::open_store(&config, store_override)?;
            commands::execute_show(args, &config, &mut store, &formatter)?;
        }
        Command::Clear(args) => {
            let mut store = commands::open_store(&config, store_override)?;
            commands::execute_clear(args, &mut store, &formatter)?;
        }
        Command::Cookies(args) => {
            commands::execute_cookies(args, &config, &formatter)?;
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the default level.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
