use super::Conversation;
use crate::config::InferenceConfig;
use crate::error::RelayError;
use crate::llm::chat_completions;
use tracing::warn;

pub const GREETING: &str =
    "Halo! Aku bot yang pakai Sea-Lion AI.\nTanya apa aja dalam Bahasa Indonesia!";

/// `/start`: greet, nothing else.
pub async fn start(chat: &impl Conversation) -> Result<(), RelayError> {
    chat.reply(GREETING).await
}

/// Relays one text message to the model and sends whatever comes back.
///
/// Each call is independent: no history is kept between messages.
pub async fn handle_message(
    chat: &impl Conversation,
    inference: &InferenceConfig,
    text: &str,
) -> Result<(), RelayError> {
    // Best-effort; a missing indicator should not cost the user a reply.
    if let Err(e) = chat.send_typing().await {
        warn!(error = %e, "failed to send typing indicator");
    }

    let answer = chat_completions::reply(inference, text).await;
    chat.reply(&answer).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::error::UPSTREAM_STATUS_REPLY;
    use async_trait::async_trait;
    use mockito::{Matcher, Server};
    use serde_json::json;
    use std::sync::Mutex;
    use std::time::Duration;
    use teloxide::{ApiError, RequestError};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Sent {
        Typing,
        Text(String),
    }

    #[derive(Default)]
    struct FakeChat {
        sent: Mutex<Vec<Sent>>,
        typing_fails: bool,
    }

    impl FakeChat {
        fn sent(&self) -> Vec<Sent> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Conversation for FakeChat {
        async fn send_typing(&self) -> Result<(), RelayError> {
            if self.typing_fails {
                return Err(RequestError::Api(ApiError::BotBlocked).into());
            }
            self.sent.lock().unwrap().push(Sent::Typing);
            Ok(())
        }

        async fn reply(&self, text: &str) -> Result<(), RelayError> {
            self.sent.lock().unwrap().push(Sent::Text(text.to_string()));
            Ok(())
        }
    }

    fn completion(content: &str) -> String {
        json!({ "choices": [ { "message": { "role": "assistant", "content": content } } ] })
            .to_string()
    }

    fn config_for(server: &Server) -> InferenceConfig {
        InferenceConfig {
            url: format!("{}/v1/chat/completions", server.url())
                .parse()
                .expect("url"),
            model: "sealion-test".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn start_sends_exactly_the_greeting() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let chat = FakeChat::default();
        start(&chat).await.expect("Ok");

        assert_eq!(chat.sent(), vec![Sent::Text(GREETING.to_string())]);
        m.assert_async().await;
    }

    #[tokio::test]
    async fn message_gets_typing_then_model_reply() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/v1/chat/completions")
            .match_body(Matcher::Json(json!({
                "model": "sealion-test",
                "messages": [{ "role": "user", "content": "Apa kabar?" }]
            })))
            .with_status(200)
            .with_body(completion("Baik, terima kasih!"))
            .expect(1)
            .create_async()
            .await;

        let chat = FakeChat::default();
        handle_message(&chat, &config_for(&server), "Apa kabar?")
            .await
            .expect("Ok");

        assert_eq!(
            chat.sent(),
            vec![Sent::Typing, Sent::Text("Baik, terima kasih!".into())]
        );
        m.assert_async().await;
    }

    #[tokio::test]
    async fn upstream_failure_still_gets_a_reply() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/v1/chat/completions")
            .with_status(503)
            .create_async()
            .await;

        let chat = FakeChat::default();
        handle_message(&chat, &config_for(&server), "halo")
            .await
            .expect("Ok");

        assert_eq!(
            chat.sent(),
            vec![Sent::Typing, Sent::Text(UPSTREAM_STATUS_REPLY.into())]
        );
    }

    #[tokio::test]
    async fn failed_typing_indicator_does_not_block_reply() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(completion("tetap jalan"))
            .create_async()
            .await;

        let chat = FakeChat {
            typing_fails: true,
            ..FakeChat::default()
        };
        handle_message(&chat, &config_for(&server), "halo")
            .await
            .expect("Ok");

        assert_eq!(chat.sent(), vec![Sent::Text("tetap jalan".into())]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_chats_get_their_own_replies() {
        let mut server = Server::new_async().await;
        let mut mocks = Vec::new();
        for (question, answer) in [
            ("siapa kamu?", "Aku Sea-Lion."),
            ("jam berapa?", "Tidak tahu."),
        ] {
            let m = server
                .mock("POST", "/v1/chat/completions")
                .match_body(Matcher::Json(json!({
                    "model": "sealion-test",
                    "messages": [{ "role": "user", "content": question }]
                })))
                .with_status(200)
                .with_body(completion(answer))
                .expect(1)
                .create_async()
                .await;
            mocks.push(m);
        }
        let config = config_for(&server);

        let alice = FakeChat::default();
        let budi = FakeChat::default();
        let (a, b) = tokio::join!(
            handle_message(&alice, &config, "siapa kamu?"),
            handle_message(&budi, &config, "jam berapa?"),
        );
        a.expect("Ok");
        b.expect("Ok");

        assert_eq!(
            alice.sent(),
            vec![Sent::Typing, Sent::Text("Aku Sea-Lion.".into())]
        );
        assert_eq!(
            budi.sent(),
            vec![Sent::Typing, Sent::Text("Tidak tahu.".into())]
        );
        for m in mocks {
            m.assert_async().await;
        }
    }
}
