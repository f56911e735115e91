use gramlens_browser::BrowserError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("browser automation error: {0}")]
    Browser(#[from] BrowserError),

    #[error("competitor discovery failed: {0}")]
    Discovery(String),
}
