use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use centrifugo_api::{Config, DEFAULT_BASE_URL, RetryPolicy};
use clap::{ArgAction, Args};
use serde::Deserialize;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Connection options shared by every subcommand.
#[derive(Args, Debug, Default)]
pub struct ClientArgs {
    /// Path to a YAML config file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,
    /// Centrifugo API root, e.g. http://localhost:8000/api
    #[arg(long, env = "CENTRIFUGO_API_URL", global = true)]
    pub api_url: Option<String>,
    /// Server API key
    #[arg(long, env = "CENTRIFUGO_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,
    /// Whole-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub retry: Option<RetryConfig>,
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_interval_ms: u64,
    pub max_interval_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_attempts: policy.max_attempts,
            initial_interval_ms: duration_ms(policy.initial_interval),
            max_interval_ms: duration_ms(policy.max_interval),
        }
    }
}

impl From<RetryConfig> for RetryPolicy {
    fn from(rc: RetryConfig) -> Self {
        Self {
            max_attempts: rc.max_attempts,
            initial_interval: Duration::from_millis(rc.initial_interval_ms),
            max_interval: Duration::from_millis(rc.max_interval_ms),
        }
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Load a YAML config file.
pub async fn load(path: &Path) -> CliResult<FileConfig> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CliError::Config(format!("read {}: {e}", path.display())))?;
    serde_yaml_ng::from_str(&content)
        .map_err(|e| CliError::Config(format!("parse {}: {e}", path.display())))
}

/// Build the client config from flags, the optional config file and defaults,
/// in that order of precedence.
pub async fn resolve(args: &ClientArgs) -> CliResult<Config> {
    let file = match &args.config {
        Some(path) => {
            debug!(path = %path.display(), "loading config file");
            load(path).await?
        }
        None => FileConfig::default(),
    };
    merge(file, args)
}

pub fn merge(file: FileConfig, args: &ClientArgs) -> CliResult<Config> {
    let api_key = args
        .api_key
        .clone()
        .or(file.api_key)
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| {
            CliError::Config(
                "missing API key (use --api-key, CENTRIFUGO_API_KEY or api_key in the config file)"
                    .to_string(),
            )
        })?;
    let api_url = args
        .api_url
        .clone()
        .or(file.api_url)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let mut config = Config::new(api_key).with_base_url(api_url);
    if let Some(secs) = args.timeout_secs.or(file.timeout_secs) {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = file.connect_timeout_secs {
        config = config.with_connect_timeout(Duration::from_secs(secs));
    }
    if let Some(retry) = file.retry {
        config = config.with_retry(retry.into());
    }
    for (name, value) in file.headers {
        config = config.with_header(name, value);
    }
    Ok(config)
}
