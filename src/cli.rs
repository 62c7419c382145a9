//! Command-line interface definitions and parsing
//!
//! The `smartselect` binary reads a JSON array of records, shows them in the
//! terminal dropdown and prints what the user picked.
//!
//! # Examples
//!
//! ```bash
//! # Pick any number of records from a file
//! smartselect --items fruits.json
//!
//! # Pick exactly one, with custom field names, from stdin
//! cat users.json | smartselect --single --id-field uid --label-field name
//!
//! # Preselect and print the picked records instead of ids
//! smartselect --items fruits.json --select apple --select pear --json
//! ```

use crate::config::{Accessors, SelectOptions};
use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "smartselect")]
#[command(about = "Pick records from a searchable dropdown in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// JSON file with an array of records (`-` reads stdin)
    #[arg(short = 'i', long = "items", value_name = "FILE", default_value = "-")]
    pub items: PathBuf,

    /// Allow only one selected record
    #[arg(short = 's', long = "single")]
    pub single: bool,

    /// Label shown above the control (overrides config)
    #[arg(short = 'l', long = "label")]
    pub label: Option<String>,

    /// Placeholder shown while nothing is selected (overrides config)
    #[arg(short = 'p', long = "placeholder")]
    pub placeholder: Option<String>,

    /// Options file layered over the user config
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Record field holding the item id
    #[arg(long = "id-field", default_value = "id")]
    pub id_field: String,

    /// Record field holding the item label
    #[arg(long = "label-field", default_value = "label")]
    pub label_field: String,

    /// Record field holding the item subtitle
    #[arg(long = "subtitle-field")]
    pub subtitle_field: Option<String>,

    /// Initially selected ids (can specify multiple: --select a --select b)
    #[arg(long = "select", value_name = "ID", num_args = 1..)]
    pub select: Vec<String>,

    /// Write logs to this file (level from `SMARTSELECT_LOG`)
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Print the selected records as JSON instead of ids
    #[arg(short = 'j', long = "json")]
    pub json: bool,

    /// Save the effective options to the user config file and exit
    #[arg(long = "save-config")]
    pub save_config: bool,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether items are read from stdin
    #[must_use]
    pub fn reads_stdin(&self) -> bool {
        self.items.as_os_str() == "-"
    }

    /// Apply command-line overrides to options loaded from config
    #[must_use]
    pub fn options(&self, base: SelectOptions) -> SelectOptions {
        SelectOptions {
            label: self.label.clone().unwrap_or(base.label),
            placeholder: self.placeholder.clone().unwrap_or(base.placeholder),
            multi: base.multi && !self.single,
        }
    }

    /// Accessors reading the configured record fields
    #[must_use]
    pub fn accessors(&self) -> Accessors<Value> {
        let accessors = Accessors::fields(self.id_field.as_str(), self.label_field.as_str());
        match &self.subtitle_field {
            Some(field) => accessors.with_subtitle_field(field.as_str()),
            None => accessors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::parse_from(["smartselect"]);
        assert!(cli.reads_stdin());
        assert!(!cli.single);
        assert!(!cli.json);
        assert_eq!(cli.id_field, "id");
        assert_eq!(cli.label_field, "label");
        assert!(cli.select.is_empty());
    }

    #[test]
    fn test_parse_items_and_select() {
        let cli = Cli::parse_from([
            "smartselect",
            "--items",
            "fruits.json",
            "--select",
            "apple",
            "--select",
            "pear",
            "--json",
        ]);
        assert!(!cli.reads_stdin());
        assert_eq!(cli.items, PathBuf::from("fruits.json"));
        assert_eq!(cli.select, vec!["apple".to_string(), "pear".to_string()]);
        assert!(cli.json);
    }

    #[test]
    fn test_options_override_config() {
        let base = SelectOptions {
            label: "From file".into(),
            placeholder: "Pick".into(),
            multi: true,
        };

        let cli = Cli::parse_from(["smartselect", "--single", "--label", "Fruit"]);
        let options = cli.options(base.clone());
        assert_eq!(options.label, "Fruit");
        assert_eq!(options.placeholder, "Pick");
        assert!(!options.multi);

        let cli = Cli::parse_from(["smartselect"]);
        assert_eq!(cli.options(base.clone()), base);
    }

    #[test]
    fn test_accessors_use_field_names() {
        let cli = Cli::parse_from([
            "smartselect",
            "--id-field",
            "uid",
            "--label-field",
            "name",
            "--subtitle-field",
            "email",
        ]);
        let accessors = cli.accessors();
        let record = json!({"uid": 7, "name": "Ada", "email": "ada@example.com"});

        assert_eq!(accessors.id(&record), Some("7".to_string()));
        assert_eq!(accessors.label(&record), Some("Ada".to_string()));
        assert_eq!(accessors.subtitle(&record), Some("ada@example.com".to_string()));
    }
}
