use super::{TelegramChat, handlers};
use crate::app_state::RelayState;
use crate::error::RelayError;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::{Me, MessageEntity, MessageEntityKind};
use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "mulai ngobrol dengan bot")]
    Start,
}

/// Routes `/start` (any case, with or without arguments) to the greeting and
/// any other plain text to the model.
/// Other commands and non-text messages fall through unhandled.
pub fn schema() -> UpdateHandler<RelayError> {
    Update::filter_message()
        .branch(
            dptree::filter_map(|msg: Message, me: Me| {
                msg.text()
                    .and_then(|text| parse_command(text, me.username()))
            })
            .endpoint(on_command),
        )
        .branch(dptree::filter_map(plain_text).endpoint(on_text))
}

async fn on_command(bot: Bot, msg: Message, cmd: Command) -> Result<(), RelayError> {
    let chat = TelegramChat::new(bot, msg.chat.id);
    match cmd {
        Command::Start => handlers::start(&chat).await,
    }
}

async fn on_text(
    bot: Bot,
    msg: Message,
    text: String,
    state: RelayState,
) -> Result<(), RelayError> {
    let chat = TelegramChat::new(bot, msg.chat.id);
    handlers::handle_message(&chat, state.inference(), &text).await
}

/// Commands match regardless of case, so `/START` greets like `/start`.
fn parse_command(text: &str, bot_username: &str) -> Option<Command> {
    let normalized = match text.split_once(char::is_whitespace) {
        Some((head, rest)) => format!("{} {rest}", head.to_lowercase()),
        None => text.to_lowercase(),
    };
    Command::parse(&normalized, &bot_username.to_lowercase()).ok()
}

fn plain_text(msg: Message) -> Option<String> {
    let text = msg.text()?;
    if msg.entities().is_some_and(starts_with_command) {
        return None;
    }
    Some(text.to_owned())
}

fn starts_with_command(entities: &[MessageEntity]) -> bool {
    entities
        .iter()
        .any(|e| e.offset == 0 && matches!(e.kind, MessageEntityKind::BotCommand))
}
