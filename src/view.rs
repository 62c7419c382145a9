//! View contract between the controller and a renderer
//!
//! The controller calls these methods as pure notifications of new state.
//! A view never mutates state directly; it reacts to input by invoking
//! controller operations.

use crate::controller::SelectState;
use thiserror::Error;

/// Errors a view can report for side-effect requests
#[derive(Debug, Error)]
pub enum ViewError {
    /// The input could not take focus
    #[error("Failed to focus search input: {0}")]
    FocusError(String),

    /// The dropdown could not be positioned
    #[error("Failed to reposition dropdown: {0}")]
    RepositionError(String),
}

/// Renderer for a control
pub trait View<R> {
    /// Render the placeholder or selection count in the control
    fn render_selection_summary(&mut self, state: &SelectState<R>);

    /// Render one chip per selected item
    fn render_chips(&mut self, state: &SelectState<R>);

    /// Render the filtered rows; `search_term` is the normalized query
    fn render_list(&mut self, state: &SelectState<R>, search_term: &str);

    /// Move input focus to the search field
    ///
    /// # Errors
    ///
    /// Returns an error if focus cannot be moved. The controller logs the
    /// failure and keeps its state.
    fn request_focus(&mut self) -> Result<(), ViewError>;

    /// Position the dropdown under the control
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be measured or moved.
    fn request_reposition(&mut self) -> Result<(), ViewError>;
}

/// View that renders nothing, for headless use
#[derive(Debug, Clone, Copy, Default)]
pub struct NullView;

impl<R> View<R> for NullView {
    fn render_selection_summary(&mut self, _state: &SelectState<R>) {}

    fn render_chips(&mut self, _state: &SelectState<R>) {}

    fn render_list(&mut self, _state: &SelectState<R>, _search_term: &str) {}

    fn request_focus(&mut self) -> Result<(), ViewError> {
        Ok(())
    }

    fn request_reposition(&mut self) -> Result<(), ViewError> {
        Ok(())
    }
}
