//! Smartselect - a headless dropdown selection controller
//!
//! This library provides the stateful core of a single- or multi-select
//! dropdown: item normalization, selection membership, search filtering,
//! keyboard navigation and the open/closed lifecycle. Rendering is delegated
//! to a [`View`] implementation; the optional `tui` feature ships one built on
//! ratatui.
//!
//! ```
//! use serde_json::json;
//! use smartselect::{NullView, SmartSelect};
//!
//! let mut select = SmartSelect::builder()
//!     .view(NullView)
//!     .items(vec![
//!         json!({"id": "F1", "label": "11111"}),
//!         json!({"id": "F2", "label": "AA2234"}),
//!     ])
//!     .build()
//!     .unwrap();
//!
//! select.toggle_select("F1");
//! assert_eq!(select.value(), vec!["F1".to_string()]);
//! ```

use thiserror::Error;

pub mod cli;
pub mod config;
pub mod controller;
pub mod filter;
pub mod lifecycle;
pub mod navigation;
pub mod notify;
pub mod selection;
pub mod store;
pub mod view;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(test)]
pub mod testing;

pub use config::{Accessors, FieldAccess, SelectConfig, SelectConfigBuilder, SelectOptions};
pub use controller::keys::{Focus, Key, KeyOutcome, handle_key};
pub use controller::{SelectState, SmartSelect, Summary};
pub use lifecycle::Visibility;
pub use navigation::{ActiveIndex, Step};
pub use notify::{ChangePayload, SelectEvent, SubscriptionId};
pub use selection::Selection;
pub use store::Item;
pub use view::{NullView, View, ViewError};

/// Error enum, contains all failure states of the library
#[derive(Debug, Error)]
pub enum SelectError {
    /// The control was built without a rendering target
    #[error("Smart select: a rendering target (view) is required")]
    MissingTarget,
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Item records could not be decoded
    #[error("Invalid item data: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for smart select operations
pub type Result<T> = std::result::Result<T, SelectError>;
