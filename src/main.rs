//! Smartselect CLI application entry point
//!
//! Reads a JSON array of records, lets the user pick from them in a
//! searchable terminal dropdown and prints the result.
//!
//! # Usage
//!
//! ```bash
//! # Multi-select from a file, print the chosen ids
//! smartselect --items fruits.json
//!
//! # Single-select from stdin, print the chosen record
//! cat users.json | smartselect --single --label-field name --json
//!
//! # Persist display options for later runs
//! smartselect --label "Fruit" --placeholder "Pick fruit" --save-config
//! ```
//!
//! # Configuration
//!
//! Display options are read from the user's config directory
//! (`~/.config/smartselect/config.toml` on Linux), then from `--config`,
//! then from `SMARTSELECT_*` environment variables. Flags win over all of them.

use serde_json::Value;
use smartselect::{
    SelectError, SelectOptions, SmartSelect,
    cli::Cli,
    tui::{self, Outcome, TerminalView, Theme},
};
use std::fs::{self, File};
use std::io::{self, Read};
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

type Result<T> = std::result::Result<T, SelectError>;

/// Environment variable holding the log filter
const LOG_ENV: &str = "SMARTSELECT_LOG";

/// Install a file logger when a log file was requested
///
/// Logging to the terminal would corrupt the alternate screen, so without a
/// log file nothing is installed.
fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };

    let file = File::create(path)?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();

    Ok(())
}

/// Read the record array from the items file or stdin
fn load_records(cli: &Cli) -> Result<Vec<Value>> {
    let text = if cli.reads_stdin() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(&cli.items)?
    };

    let records: Vec<Value> = serde_json::from_str(&text)?;
    debug!(count = records.len(), "loaded records");
    Ok(records)
}

fn print_selection(select: &SmartSelect<Value>, json: bool) -> Result<()> {
    if json {
        let records: Vec<&Value> = select
            .state()
            .selected_items()
            .map(|item| &item.raw)
            .collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        for id in select.value() {
            println!("{id}");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(&cli)?;

    let options = cli.options(SelectOptions::load(cli.config.as_deref())?);

    if cli.save_config {
        let path = SelectOptions::config_path()?;
        options.save_to(&path)?;
        println!("Saved options to {}", path.display());
        return Ok(());
    }

    let records = load_records(&cli)?;
    let (view, handle) = TerminalView::new();

    let mut select = SmartSelect::builder_with(cli.accessors())
        .options(options)
        .view(view)
        .items(records)
        .build()?;

    if !cli.select.is_empty() {
        select.set_value(&cli.select);
    }

    match tui::run(&mut select, &handle, &Theme::default())? {
        Outcome::Accepted => print_selection(&select, cli.json),
        Outcome::Aborted => {
            info!("selection aborted");
            Ok(())
        }
    }
}
