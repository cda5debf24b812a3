mod chat;
pub mod handlers;
mod schema;

pub use chat::{Conversation, TelegramChat};
pub use schema::schema;
