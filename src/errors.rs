use astra::Response;
use thiserror::Error;

/// Failures of the console's own request handling (routing, malformed
/// requests, rendering). Remote API failures never end up here: they are
/// turned into on-page messages by the operation that hit them.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Spreadsheet Error: {0}")]
    XlsxError(String),
    #[error("Internal Server Error")]
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
