use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("browser service error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("navigation timed out for {url}")]
    Timeout { url: String },

    #[error("page has no committed navigation")]
    MissingNavigation,

    #[error("unexpected browser service response: {0}")]
    UnexpectedResponse(String),
}
