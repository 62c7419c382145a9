//! Terminal view built on ratatui and crossterm
//!
//! [`TerminalView`] implements the [`View`] contract by flagging what the
//! next frame must show; [`run`] owns the terminal, draws frames from the
//! controller state and translates key and mouse input into controller
//! operations.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │           run (event loop)                  │
//! └────────────────────┬────────────────────────┘
//!                      │
//!        ┌─────────────┼─────────────┐
//!        ▼             ▼             ▼
//! ┌────────────┐ ┌───────────┐ ┌───────────┐
//! │ SmartSelect│ │  Ratatui  │ │ Crossterm │
//! │ (headless) │ │ (widgets) │ │  (events) │
//! └────────────┘ └───────────┘ └───────────┘
//! ```

mod theme;
pub mod widgets;

pub use theme::Theme;

use crate::controller::keys::{self, Focus, Key, KeyOutcome};
use crate::SelectError;
use crate::controller::{SelectState, SmartSelect};
use crate::view::{View, ViewError};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Margin, Position, Rect},
    text::Span,
    widgets::Paragraph,
};
use std::cell::Cell;
use std::io::{self, Stdout};
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;
use tracing::{trace, warn};
use widgets::{ChipBar, ControlBar, ItemList, SearchBar};

/// Errors from the terminal view
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error while driving the terminal
    #[error("Terminal IO error: {0}")]
    IoError(#[from] io::Error),
}

/// Result type for terminal operations
pub type Result<T> = std::result::Result<T, TuiError>;

impl From<TuiError> for SelectError {
    fn from(err: TuiError) -> Self {
        match err {
            TuiError::IoError(e) => Self::IoError(e),
        }
    }
}

/// How the user left the terminal view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Finished normally; the selection stands
    Accepted,
    /// Cancelled with Ctrl+C
    Aborted,
}

const HELP_TEXT: &str =
    " Enter/Space open  ↑↓ move  Enter toggle  Esc close (again to finish)  Ctrl+C abort ";
const CONTROL_MAX_WIDTH: u16 = 60;
const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Default)]
struct Signals {
    dirty: Cell<bool>,
    focus: Cell<bool>,
}

/// Shared handle between a [`TerminalView`] and the event loop
#[derive(Debug, Clone, Default)]
pub struct ViewHandle {
    signals: Rc<Signals>,
}

impl ViewHandle {
    fn mark_dirty(&self) {
        self.signals.dirty.set(true);
    }

    /// Take and reset the redraw flag
    #[must_use]
    pub fn take_dirty(&self) -> bool {
        self.signals.dirty.replace(false)
    }

    /// Whether the search input currently holds focus
    #[must_use]
    pub fn search_focused(&self) -> bool {
        self.signals.focus.get()
    }
}

/// View that flags redraws and focus for the terminal event loop
#[derive(Debug, Default)]
pub struct TerminalView {
    handle: ViewHandle,
}

impl TerminalView {
    /// Create a view and the handle the event loop reads
    #[must_use]
    pub fn new() -> (Self, ViewHandle) {
        let view = Self::default();
        let handle = view.handle.clone();
        (view, handle)
    }
}

impl<R> View<R> for TerminalView {
    fn render_selection_summary(&mut self, _state: &SelectState<R>) {
        self.handle.mark_dirty();
    }

    fn render_chips(&mut self, _state: &SelectState<R>) {
        self.handle.mark_dirty();
    }

    fn render_list(&mut self, _state: &SelectState<R>, _search_term: &str) {
        self.handle.mark_dirty();
    }

    fn request_focus(&mut self) -> std::result::Result<(), ViewError> {
        self.handle.signals.focus.set(true);
        self.handle.mark_dirty();
        Ok(())
    }

    fn request_reposition(&mut self) -> std::result::Result<(), ViewError> {
        // Layout is recomputed from the control position on every frame
        self.handle.mark_dirty();
        Ok(())
    }
}

/// Screen regions of one frame, used for drawing and hit testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenLayout {
    /// The control box
    pub control: Rect,
    /// The row of chips below the control
    pub chips: Rect,
    /// Search bar of the open dropdown
    pub search: Option<Rect>,
    /// Item list of the open dropdown
    pub list: Option<Rect>,
}

impl ScreenLayout {
    /// Place the control at the top of `area` and the dropdown under it
    #[must_use]
    pub fn compute(area: Rect, filtered_len: usize, is_open: bool) -> Self {
        let control = Rect::new(
            area.x,
            area.y,
            area.width.min(CONTROL_MAX_WIDTH),
            area.height.min(3),
        );
        let chips_y = control.bottom();
        let chips = Rect::new(
            area.x,
            chips_y,
            area.width,
            u16::from(chips_y < area.bottom()),
        );

        if !is_open {
            return Self {
                control,
                chips,
                search: None,
                list: None,
            };
        }

        let top = chips.bottom();
        // Leave the last row for the help line
        let available = area.bottom().saturating_sub(top).saturating_sub(1);
        let search = Rect::new(control.x, top, control.width, available.min(3));

        let rows = u16::try_from(filtered_len.max(1)).unwrap_or(u16::MAX);
        let list_height = rows
            .saturating_add(2)
            .min(available.saturating_sub(search.height));
        let list = (list_height > 0)
            .then(|| Rect::new(control.x, search.bottom(), control.width, list_height));

        Self {
            control,
            chips,
            search: Some(search),
            list,
        }
    }

    /// Inner area of the item list, without borders
    #[must_use]
    pub fn list_inner(&self) -> Option<Rect> {
        self.list.map(|list| list.inner(Margin::new(1, 1)))
    }
}

/// Event loop state that survives between frames
#[derive(Debug, Default)]
struct Screen {
    layout: ScreenLayout,
    list_offset: usize,
}

impl Screen {
    fn draw<R>(&mut self, frame: &mut Frame, state: &SelectState<R>, theme: &Theme, search_focused: bool) {
        let area = frame.area();
        self.layout = ScreenLayout::compute(area, state.filtered().len(), state.is_open());

        frame.render_widget(
            ControlBar::new(state, theme).focused(!state.is_open()),
            self.layout.control,
        );
        frame.render_widget(ChipBar::new(state, theme), self.layout.chips);

        if let Some(search) = self.layout.search {
            let focused = search_focused && state.is_open();
            frame.render_widget(
                SearchBar::new(state.query(), state.query_cursor(), theme).focused(focused),
                search,
            );
            if focused {
                let prefix = state.query()[..state.query_cursor()].chars().count();
                let x = search
                    .x
                    .saturating_add(1)
                    .saturating_add(u16::try_from(prefix).unwrap_or(u16::MAX));
                frame.set_cursor_position(Position::new(x, search.y + 1));
            }
        }

        if let (Some(list), Some(inner)) = (self.layout.list, self.layout.list_inner()) {
            self.list_offset = widgets::scroll_offset(
                self.list_offset.min(state.filtered().len().saturating_sub(1)),
                state.active_index().get(),
                inner.height as usize,
            );
            frame.render_widget(ItemList::new(state, theme).offset(self.list_offset), list);
        } else {
            self.list_offset = 0;
        }

        if area.height > self.layout.chips.bottom() {
            let help = Rect::new(area.x, area.bottom() - 1, area.width, 1);
            frame.render_widget(
                Paragraph::new(Span::styled(HELP_TEXT, theme.dimmed_style())),
                help,
            );
        }
    }
}

/// Translate a crossterm key event into a backend-neutral key
#[must_use]
pub fn convert_key(key: &KeyEvent) -> Option<Key> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Some(Key::ClearLine),
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => Some(Key::Char(c)),
        (KeyCode::Enter, _) => Some(Key::Enter),
        (KeyCode::Esc, _) => Some(Key::Esc),
        (KeyCode::Up, _) => Some(Key::Up),
        (KeyCode::Down, _) => Some(Key::Down),
        (KeyCode::Left, _) => Some(Key::Left),
        (KeyCode::Right, _) => Some(Key::Right),
        (KeyCode::Backspace, _) => Some(Key::Backspace),
        (KeyCode::Delete, _) => Some(Key::Delete),
        _ => None,
    }
}

/// Dispatch a left click at `pos` to the control element under it
pub fn handle_click<R: Clone + 'static>(
    select: &mut SmartSelect<R>,
    layout: &ScreenLayout,
    list_offset: usize,
    pos: Position,
) {
    if layout.control.contains(pos) {
        let on_clear = widgets::clear_button_area(layout.control)
            .is_some_and(|clear| clear.contains(pos))
            && !select.state().selected().is_empty();
        if on_clear {
            select.click_clear();
        } else {
            select.click_control();
        }
        return;
    }

    if layout.chips.contains(pos) {
        let hit = widgets::chip_areas(select.state(), layout.chips)
            .into_iter()
            .find(|(chip, _)| chip.contains(pos));
        if let Some((_, id)) = hit {
            select.click_chip_remove(&id);
        }
        return;
    }

    if let Some(search) = layout.search
        && search.contains(pos)
    {
        if widgets::clear_marker_area(search).is_some_and(|marker| marker.contains(pos)) {
            select.clear_search();
        }
        return;
    }

    if let Some(list) = layout.list
        && list.contains(pos)
    {
        if let Some(inner) = layout.list_inner()
            && inner.contains(pos)
        {
            select.click_row(list_offset + usize::from(pos.y - inner.y));
        }
        return;
    }

    select.dismiss();
}

/// Run the terminal view until the user finishes or aborts
///
/// The control must have been built with the [`TerminalView`] that `handle`
/// belongs to.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or drawn to.
pub fn run<R: Clone + 'static>(
    select: &mut SmartSelect<R>,
    handle: &ViewHandle,
    theme: &Theme,
) -> Result<Outcome> {
    let mut terminal = setup_terminal()?;

    let redraw = handle.clone();
    let subscription = select.subscribe(move |_| redraw.mark_dirty());

    let result = run_loop(&mut terminal, select, handle, theme);

    select.unsubscribe(subscription);
    if let Err(e) = cleanup_terminal() {
        warn!(error = %e, "terminal cleanup failed");
    }

    result
}

fn run_loop<R: Clone + 'static>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    select: &mut SmartSelect<R>,
    handle: &ViewHandle,
    theme: &Theme,
) -> Result<Outcome> {
    let mut screen = Screen::default();
    handle.mark_dirty();

    loop {
        if handle.take_dirty() {
            terminal.draw(|frame| {
                screen.draw(frame, select.state(), theme, handle.search_focused());
            })?;
        }

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(Outcome::Aborted);
                }

                let focus = Focus::for_open(select.is_open());
                if focus == Focus::Control && key.code == KeyCode::Esc {
                    return Ok(Outcome::Accepted);
                }

                let outcome = convert_key(&key)
                    .map_or(KeyOutcome::Ignored, |k| keys::handle_key(select, focus, k));
                if outcome == KeyOutcome::Ignored {
                    trace!(?key, "unbound key");
                } else {
                    handle.mark_dirty();
                }
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                handle_click(
                    select,
                    &screen.layout,
                    screen.list_offset,
                    Position::new(column, row),
                );
                handle.mark_dirty();
            }
            Event::Resize(..) => {
                select.viewport_changed();
                handle.mark_dirty();
            }
            _ => {}
        }

        if !select.is_open() {
            handle.signals.focus.set(false);
        }
    }
}

/// Setup terminal for TUI
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(Into::into)
}

/// Cleanup terminal after TUI
fn cleanup_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
    Ok(())
}
