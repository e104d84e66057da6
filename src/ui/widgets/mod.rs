// src/ui/widgets/mod.rs
//! Custom widgets for the browser UI.

pub mod details;
pub mod file_list;
pub mod menu_popup;
pub mod status_bar;

// Re-export widget rendering functions
pub use details::render_details;
pub use file_list::render_file_list;
pub use menu_popup::render_menu_popup;
pub use status_bar::render_status_bar;
