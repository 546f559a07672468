use maud::{html, Markup};

pub mod card;
pub mod error;

pub use card::{card, stat_card};
pub use error::html_error_response;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Error,
    Success,
    Info,
}

impl AlertKind {
    fn class(self) -> &'static str {
        match self {
            AlertKind::Error => "alert alert-error",
            AlertKind::Success => "alert alert-success",
            AlertKind::Info => "alert alert-info",
        }
    }
}

pub fn alert(kind: AlertKind, message: &str) -> Markup {
    html! {
        div class=(kind.class()) role="alert" { (message) }
    }
}
