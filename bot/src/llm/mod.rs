pub mod chat_completions;
mod chat_completions_structs;
pub mod error;
