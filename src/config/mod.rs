//! Configuration module for smartselect
//!
//! Validates and defaults construction options into an immutable
//! [`SelectConfig`]. Display options can also be loaded from a TOML file
//! stored in the user's config directory.

mod accessors;

pub use accessors::{Accessors, FieldAccess};

use crate::controller::SmartSelect;
use crate::view::View;
use crate::{Result, SelectError};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Label shown above the control when none is configured
pub const DEFAULT_LABEL: &str = "Smart Select";
/// Placeholder shown in the control while nothing is selected
pub const DEFAULT_PLACEHOLDER: &str = "Select";

/// Callback invoked with the selected raw records after every change
pub type ChangeCallback<R> = Box<dyn Fn(&[R])>;

/// Serializable display options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SelectOptions {
    /// Label text for the control
    #[serde(default = "default_label")]
    pub label: String,

    /// Placeholder text while the selection is empty
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Allow more than one selected item
    #[serde(default = "default_multi")]
    pub multi: bool,
}

fn default_label() -> String {
    DEFAULT_LABEL.to_string()
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

const fn default_multi() -> bool {
    true
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            label: default_label(),
            placeholder: default_placeholder(),
            multi: default_multi(),
        }
    }
}

impl SelectOptions {
    /// Get the path to the user config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> std::result::Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::Message("Could not determine config directory".to_string())
        })?;

        Ok(config_dir.join("smartselect").join("config.toml"))
    }

    /// Load options from a single TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> std::result::Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Load options layered from the user config file, an optional explicit
    /// file and `SMARTSELECT_*` environment variables, in that order
    ///
    /// A missing user config file is not an error; a missing explicit file is.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any present source cannot be parsed.
    pub fn load(explicit: Option<&Path>) -> std::result::Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Ok(user_path) = Self::config_path() {
            builder = builder.add_source(
                File::from(user_path)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        builder
            .add_source(Environment::with_prefix("SMARTSELECT"))
            .build()?
            .try_deserialize()
    }

    /// Save options to the given file, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the options
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> std::result::Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }
}

/// Immutable configuration of one control
pub struct SelectConfig<R> {
    label: String,
    placeholder: String,
    multi: bool,
    accessors: Accessors<R>,
    on_change: Option<ChangeCallback<R>>,
}

impl<R> SelectConfig<R> {
    /// Label text
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Placeholder text
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Whether more than one item may be selected
    #[must_use]
    pub const fn multi(&self) -> bool {
        self.multi
    }

    /// Accessors used to normalize records
    #[must_use]
    pub const fn accessors(&self) -> &Accessors<R> {
        &self.accessors
    }

    /// Invoke the change callback, if one was configured
    pub(crate) fn notify_change(&self, records: &[R]) {
        if let Some(callback) = &self.on_change {
            callback(records);
        }
    }
}

impl<R> fmt::Debug for SelectConfig<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectConfig")
            .field("label", &self.label)
            .field("placeholder", &self.placeholder)
            .field("multi", &self.multi)
            .field("on_change", &self.on_change.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for a [`SmartSelect`] control
///
/// Every option except the view has a default; building without a view
/// fails with [`SelectError::MissingTarget`].
pub struct SelectConfigBuilder<R> {
    options: SelectOptions,
    accessors: Option<Accessors<R>>,
    on_change: Option<ChangeCallback<R>>,
    view: Option<Box<dyn View<R>>>,
    items: Vec<R>,
}

impl<R> Default for SelectConfigBuilder<R> {
    fn default() -> Self {
        Self {
            options: SelectOptions::default(),
            accessors: None,
            on_change: None,
            view: None,
            items: Vec::new(),
        }
    }
}

impl<R: Clone + 'static> SelectConfigBuilder<R> {
    /// Create a builder with default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all display options at once
    #[must_use]
    pub fn options(mut self, options: SelectOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the label text
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.options.label = label.into();
        self
    }

    /// Set the placeholder text
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.options.placeholder = placeholder.into();
        self
    }

    /// Enable or disable multi-select
    #[must_use]
    pub const fn multi(mut self, multi: bool) -> Self {
        self.options.multi = multi;
        self
    }

    /// Set the record accessors
    #[must_use]
    pub fn accessors(mut self, accessors: Accessors<R>) -> Self {
        self.accessors = Some(accessors);
        self
    }

    /// Set the change callback
    #[must_use]
    pub fn on_change(mut self, callback: impl Fn(&[R]) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Set the rendering target
    #[must_use]
    pub fn view(mut self, view: impl View<R> + 'static) -> Self {
        self.view = Some(Box::new(view));
        self
    }

    /// Set the initial records
    #[must_use]
    pub fn items(mut self, items: Vec<R>) -> Self {
        self.items = items;
        self
    }

    /// Build the control
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::MissingTarget`] when no view was supplied or
    /// [`SelectError::InvalidInput`] when no accessors were supplied for a
    /// record type without named fields.
    pub fn build(self) -> Result<SmartSelect<R>> {
        let view = self.view.ok_or(SelectError::MissingTarget)?;
        let accessors = self.accessors.ok_or_else(|| {
            SelectError::InvalidInput("accessors are required for this record type".to_string())
        })?;

        let config = SelectConfig {
            label: self.options.label,
            placeholder: self.options.placeholder,
            multi: self.options.multi,
            accessors,
            on_change: self.on_change,
        };

        Ok(SmartSelect::from_parts(config, view, self.items))
    }
}

impl<R: FieldAccess + Clone + 'static> SelectConfigBuilder<R> {
    /// Create a builder that uses the default `id` / `label` field accessors
    #[must_use]
    pub fn with_default_accessors() -> Self {
        Self::new().accessors(Accessors::default())
    }
}
