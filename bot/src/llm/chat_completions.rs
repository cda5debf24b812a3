use super::chat_completions_structs::{
    ChatCompletionMessage, ChatCompletionRequest, ChatCompletionResponse,
};
use super::error::InferenceError;
use crate::config::InferenceConfig;
use crate::util::truncate_for_log;
use reqwest::{Client, StatusCode};
use tracing::{error, warn};

/// Asks the model for a reply to `message`.
///
/// Never fails: every error is logged and turned into the fallback text for
/// its kind, so the caller always has something to send back to the chat.
pub async fn reply(config: &InferenceConfig, message: &str) -> String {
    match request(config, message).await {
        Ok(answer) => answer,
        Err(e) => {
            match &e {
                // Already logged together with the upstream body.
                InferenceError::UpstreamStatus(_) => {}
                InferenceError::Timeout => {
                    warn!(timeout = ?config.timeout, url = %config.url, "inference timed out");
                }
                InferenceError::Transport(_) | InferenceError::MalformedResponse(_) => {
                    error!(error = %e, url = %config.url, "inference request failed");
                }
            }
            e.user_message().to_string()
        }
    }
}

/// One chat-completion round trip: a single POST, no retries.
pub async fn request(config: &InferenceConfig, message: &str) -> Result<String, InferenceError> {
    // Scoped to this call; its connections are released when it drops.
    let http_client = Client::builder().timeout(config.timeout).build()?;

    let request_body = ChatCompletionRequest {
        model: &config.model,
        messages: [ChatCompletionMessage {
            role: "user",
            content: message,
        }],
    };

    let res = http_client
        .post(config.url.clone())
        .json(&request_body)
        .send()
        .await?;

    let status = res.status();
    if status != StatusCode::OK {
        let body = res.text().await.unwrap_or_default();
        warn!(%status, body = %truncate_for_log(&body), "inference endpoint non-200");
        return Err(InferenceError::UpstreamStatus(status));
    }

    let body = res.bytes().await?;
    let parsed: ChatCompletionResponse = serde_json::from_slice(&body).map_err(|e| {
        warn!(sample = %truncate_for_log(&String::from_utf8_lossy(&body)), "unparseable completion");
        InferenceError::MalformedResponse(e.to_string())
    })?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| {
            InferenceError::MalformedResponse(
                "missing `choices[0].message.content` in completion".into(),
            )
        })
}
