use thiserror::Error;

/// Failures while talking back to Telegram.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("telegram request failed: {0}")]
    Telegram(#[from] teloxide::RequestError),
}
