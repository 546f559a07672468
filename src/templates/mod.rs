pub mod components;
pub mod format;
pub mod layouts;
pub mod pages;

pub use components::{alert, card, html_error_response, stat_card, AlertKind};
pub use layouts::desktop::desktop_layout;
