//! Widgets for the terminal view

pub mod control_bar;
pub mod item_list;
pub mod search_bar;

pub use control_bar::{ChipBar, ControlBar, chip_areas, clear_button_area};
pub use item_list::{ItemList, scroll_offset};
pub use search_bar::{SearchBar, clear_marker_area};
