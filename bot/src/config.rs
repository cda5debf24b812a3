use clap::Parser;
use reqwest::Url;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_SEALION_URL: &str = "http://localhost:11434/v1/chat/completions";
const DEFAULT_SEALION_MODEL: &str = "aisingapore/Gemma-SEA-LION-v3-9B-IT:q2_k";
const PLACEHOLDER_TOKEN: &str = "YOUR_BOT_TOKEN";

/// Command line flags; every flag can also come from the environment or `.env`.
#[derive(Parser)]
#[command(version, about)]
pub struct Args {
    /// Bot token issued by @BotFather.
    #[arg(long = "telegram-token", env = "TELEGRAM_TOKEN", hide_env_values = true)]
    pub telegram_token: String,

    /// OpenAI-compatible chat-completions URL of the Sea-Lion server.
    #[arg(long = "sealion-url", env = "SEALION_URL", default_value = DEFAULT_SEALION_URL)]
    pub sealion_url: String,

    #[arg(long = "sealion-model", env = "SEALION_MODEL", default_value = DEFAULT_SEALION_MODEL)]
    pub sealion_model: String,

    /// Total time allowed for one inference round trip.
    #[arg(
        long = "request-timeout-secs",
        env = "SEALION_TIMEOUT_SECS",
        default_value_t = 120
    )]
    pub request_timeout_secs: u64,

    /// Fallback log filter when `RUST_LOG` is not set.
    #[arg(long = "log-level", env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("telegram token is not set; get one from @BotFather")]
    MissingToken,

    #[error("invalid inference url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("model identifier must not be empty")]
    EmptyModel,

    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}

/// Where and how to reach the inference endpoint.
#[derive(Clone, Debug)]
pub struct InferenceConfig {
    pub url: Url,
    pub model: String,
    pub timeout: Duration,
}

pub struct BotConfig {
    pub telegram_token: String,
    pub inference: InferenceConfig,
}

impl TryFrom<Args> for BotConfig {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let telegram_token = args.telegram_token.trim().to_string();
        if telegram_token.is_empty() || telegram_token == PLACEHOLDER_TOKEN {
            return Err(ConfigError::MissingToken);
        }

        let url = parse_http_url(args.sealion_url.trim())?;

        let model = args.sealion_model.trim().to_string();
        if model.is_empty() {
            return Err(ConfigError::EmptyModel);
        }
        if args.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            telegram_token,
            inference: InferenceConfig {
                url,
                model,
                timeout: Duration::from_secs(args.request_timeout_secs),
            },
        })
    }
}

fn parse_http_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme `{other}`"))),
    }
}
