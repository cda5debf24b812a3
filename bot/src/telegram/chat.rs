use crate::error::RelayError;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ChatAction;

/// The chat an update came from, reduced to what the handlers need.
#[async_trait]
pub trait Conversation: Send + Sync {
    /// Shows the "typing…" presence indicator.
    async fn send_typing(&self) -> Result<(), RelayError>;

    async fn reply(&self, text: &str) -> Result<(), RelayError>;
}

pub struct TelegramChat {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramChat {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }
}

#[async_trait]
impl Conversation for TelegramChat {
    async fn send_typing(&self) -> Result<(), RelayError> {
        self.bot
            .send_chat_action(self.chat_id, ChatAction::Typing)
            .await?;
        Ok(())
    }

    async fn reply(&self, text: &str) -> Result<(), RelayError> {
        self.bot.send_message(self.chat_id, text).await?;
        Ok(())
    }
}
