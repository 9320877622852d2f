use clap::{Parser, builder::BoolishValueParser};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_ENGINE_COMMAND: &str = "repogest-engine";
const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4030";
const DEFAULT_SSE_KEEP_ALIVE_SECS: u64 = 15;
const DEFAULT_SSE_RETRY_SECS: u64 = 3;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser, Debug)]
#[command(name = "repogest-mcpd", version, about = "Repogest MCP daemon.")]
struct CliArgs {
    #[arg(long, env = "REPOGEST_ENGINE_COMMAND", default_value = DEFAULT_ENGINE_COMMAND)]
    engine_command: String,

    /// Fixed leading arguments passed to the engine command on every call.
    #[arg(long = "engine-arg", env = "REPOGEST_ENGINE_ARGS", value_delimiter = ' ')]
    engine_args: Vec<String>,

    #[arg(
        long = "stdio",
        env = "REPOGEST_ENABLE_STDIO",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(
        long,
        env = "REPOGEST_HTTP_SERVE",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    http_serve: bool,

    #[arg(long, env = "REPOGEST_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    http_addr: SocketAddr,

    #[arg(
        long,
        env = "REPOGEST_HTTP_STATEFUL",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    http_stateful: bool,

    /// SSE keep-alive interval in seconds for the HTTP transport; 0 disables.
    #[arg(
        long,
        env = "REPOGEST_SSE_KEEP_ALIVE_SECS",
        default_value_t = DEFAULT_SSE_KEEP_ALIVE_SECS
    )]
    sse_keep_alive_secs: u64,

    /// SSE retry hint in seconds for the HTTP transport; 0 disables.
    #[arg(
        long,
        env = "REPOGEST_SSE_RETRY_SECS",
        default_value_t = DEFAULT_SSE_RETRY_SECS
    )]
    sse_retry_secs: u64,

    #[arg(long, env = "REPOGEST_LOG", default_value = DEFAULT_LOG_FILTER)]
    log_filter: String,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Debug, Clone)]
pub struct RepoGestConfig {
    pub engine_command: String,
    pub engine_args: Vec<String>,
    pub enable_stdio: bool,
    pub http_serve: bool,
    pub http_addr: SocketAddr,
    pub http_stateful: bool,
    pub sse_keep_alive: Option<Duration>,
    pub sse_retry: Option<Duration>,
    pub log_filter: String,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSetting(&'static str),
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSetting(name) => write!(f, "missing required setting: {name}"),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl RepoGestConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }
}

impl TryFrom<CliArgs> for RepoGestConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.engine_command.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "REPOGEST_ENGINE_COMMAND",
                value: args.engine_command,
            });
        }

        if !args.enable_stdio && !args.http_serve {
            return Err(ConfigError::MissingSetting(
                "REPOGEST_ENABLE_STDIO or REPOGEST_HTTP_SERVE",
            ));
        }

        let engine_args = args
            .engine_args
            .into_iter()
            .filter(|value| !value.trim().is_empty())
            .collect();

        let sse_keep_alive = duration_or_disabled(args.sse_keep_alive_secs);
        let sse_retry = duration_or_disabled(args.sse_retry_secs);

        Ok(Self {
            engine_command: args.engine_command,
            engine_args,
            enable_stdio: args.enable_stdio,
            http_serve: args.http_serve,
            http_addr: args.http_addr,
            http_stateful: args.http_stateful,
            sse_keep_alive,
            sse_retry,
            log_filter: args.log_filter,
        })
    }
}

const fn duration_or_disabled(secs: u64) -> Option<Duration> {
    if secs == 0 {
        None
    } else {
        Some(Duration::from_secs(secs))
    }
}
