mod app_state;
mod config;
mod error;
mod llm;
mod telegram;
mod util;

use crate::app_state::RelayState;
use crate::config::{Args, BotConfig};
use clap::Parser;
use std::process::ExitCode;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = match BotConfig::try_from(args) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    info!(
        model = %config.inference.model,
        url = %config.inference.url,
        timeout = ?config.inference.timeout,
        "Sea-Lion Telegram bot is running"
    );

    let bot = Bot::new(config.telegram_token);
    let state = RelayState::new(config.inference);

    Dispatcher::builder(bot, telegram::schema())
        .dependencies(dptree::deps![state])
        .default_handler(|update| async move {
            debug!(update = ?update.id, "ignoring update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "failed to answer update",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("bot has shut down");
    ExitCode::SUCCESS
}

fn init_tracing(log_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false),
        )
        .init();
}
