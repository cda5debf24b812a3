use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: [ChatCompletionMessage<'a>; 1],
}

#[derive(Serialize)]
pub struct ChatCompletionMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatCompletionChoice>,
}

#[derive(Deserialize)]
pub struct ChatCompletionChoice {
    pub message: ChatCompletionReply,
}

#[derive(Deserialize)]
pub struct ChatCompletionReply {
    pub content: Option<String>,
}
