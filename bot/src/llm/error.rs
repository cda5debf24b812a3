use reqwest::StatusCode;
use thiserror::Error;

pub const UPSTREAM_STATUS_REPLY: &str = "Maaf, ada gangguan. Coba lagi nanti ya.";
pub const TIMEOUT_REPLY: &str = "Maaf, responsenya lama banget. Coba lagi ya.";
pub const GENERIC_ERROR_REPLY: &str = "Maaf, ada error. Coba lagi nanti.";

/// Every way a single chat-completion round trip can fail.
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("inference endpoint answered with status {0}")]
    UpstreamStatus(StatusCode),

    #[error("inference endpoint did not answer in time")]
    Timeout,

    #[error("transport error talking to inference endpoint: {0}")]
    Transport(reqwest::Error),

    #[error("unexpected response shape: {0}")]
    MalformedResponse(String),
}

impl InferenceError {
    /// Text shown to the chat in place of a model reply.
    pub fn user_message(&self) -> &'static str {
        match self {
            InferenceError::UpstreamStatus(_) => UPSTREAM_STATUS_REPLY,
            InferenceError::Timeout => TIMEOUT_REPLY,
            InferenceError::Transport(_) | InferenceError::MalformedResponse(_) => {
                GENERIC_ERROR_REPLY
            }
        }
    }
}

impl From<reqwest::Error> for InferenceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            InferenceError::Timeout
        } else {
            InferenceError::Transport(err)
        }
    }
}
