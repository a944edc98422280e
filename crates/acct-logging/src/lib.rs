// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Logging setup for the account service
//!
//! Every binary in the workspace initialises `tracing` through this crate so
//! that filters, formats and log file locations behave the same way.
//! `RUST_LOG` always takes precedence over the level chosen on the command
//! line.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use tracing::Level;

/// Directory name used under the platform data directory
const LOG_DIR_NAME: &str = "account-service";

/// Output format for log messages
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable plaintext format
    #[default]
    Plaintext,
    /// Structured JSON format, one object per line
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Plaintext => write!(f, "plaintext"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plaintext" => Ok(LogFormat::Plaintext),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!(
                "Invalid log format: {}. Use 'plaintext' or 'json'",
                s
            )),
        }
    }
}

/// Log level accepted on the command line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CliLogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for Level {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => Level::ERROR,
            CliLogLevel::Warn => Level::WARN,
            CliLogLevel::Info => Level::INFO,
            CliLogLevel::Debug => Level::DEBUG,
            CliLogLevel::Trace => Level::TRACE,
        }
    }
}

impl std::fmt::Display for CliLogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CliLogLevel::Error => "error",
            CliLogLevel::Warn => "warn",
            CliLogLevel::Info => "info",
            CliLogLevel::Debug => "debug",
            CliLogLevel::Trace => "trace",
        };
        f.write_str(name)
    }
}

/// Logging flags shared by every binary.
///
/// Flatten into a clap parser with `#[command(flatten)]`. Output goes to
/// stdout unless `--log-file` or `--log-dir` is given.
#[derive(Clone, Debug, Default, clap::Args, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CliLoggingArgs {
    /// Log verbosity level
    #[arg(long, value_enum, help = "Log verbosity level (default: info)")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<CliLogLevel>,

    /// Log output format
    #[arg(long, value_enum, help = "Log output format (default: plaintext)")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_format: Option<LogFormat>,

    /// Directory for log files
    #[arg(long, help = "Directory for log files")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,

    /// Log filename
    #[arg(long, help = "Log filename")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
}

impl CliLoggingArgs {
    /// Initialise the global subscriber for `component`
    pub fn init(&self, component: &str) -> anyhow::Result<()> {
        let level = self.level();
        let format = self.log_format.unwrap_or_default();

        if self.logs_to_file() {
            let path = self.resolve_log_path(component);
            init_to_file(component, level, format, &path)
        } else {
            init(component, level, format)
        }
    }

    /// Effective level, `info` when unset
    pub fn level(&self) -> Level {
        self.log_level.unwrap_or_default().into()
    }

    pub fn logs_to_file(&self) -> bool {
        self.log_file.is_some() || self.log_dir.is_some()
    }

    /// Resolve the log file path:
    /// 1. an absolute `--log-file` is used as is;
    /// 2. a relative `--log-file` is placed under `--log-dir` when given;
    /// 3. `--log-dir` alone yields `<dir>/<component>.log`;
    /// 4. otherwise the platform default location is used.
    pub fn resolve_log_path(&self, component: &str) -> PathBuf {
        match (&self.log_file, &self.log_dir) {
            (Some(file), _) if Path::new(file).is_absolute() => PathBuf::from(file),
            (Some(file), Some(dir)) => Path::new(dir).join(file),
            (Some(file), None) => PathBuf::from(file),
            (None, Some(dir)) => Path::new(dir).join(format!("{}.log", component)),
            (None, None) => standard_log_path_for_component(component),
        }
    }
}

/// Platform default log file for `component`
///
/// - Linux: `~/.local/share/account-service/<component>.log`
/// - macOS: `~/Library/Logs/account-service/<component>.log`
/// - elsewhere: `<data dir>/account-service/<component>.log`
pub fn standard_log_path_for_component(component: &str) -> PathBuf {
    #[cfg(target_os = "macos")]
    let base = dirs::home_dir()
        .map(|home| home.join("Library").join("Logs"))
        .unwrap_or_else(|| PathBuf::from("/tmp"));

    #[cfg(not(target_os = "macos"))]
    let base = dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("/tmp"));

    base.join(LOG_DIR_NAME).join(format!("{}.log", component))
}

/// Initialise logging to stdout
pub fn init(component: &str, default_level: Level, format: LogFormat) -> anyhow::Result<()> {
    init_with_writer(component, default_level, format, io::stdout)
}

/// Initialise logging to a file, creating parent directories as needed
pub fn init_to_file(
    component: &str,
    default_level: Level,
    format: LogFormat,
    log_path: &Path,
) -> anyhow::Result<()> {
    use std::fs;

    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let log_file = fs::OpenOptions::new().create(true).append(true).open(log_path)?;
    init_with_writer(component, default_level, format, std::sync::Mutex::new(log_file))
}

/// Initialise logging with a custom writer
pub fn init_with_writer<W>(
    component: &str,
    default_level: Level,
    format: LogFormat,
    writer: W,
) -> anyhow::Result<()>
where
    W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(component, default_level)));

    match format {
        LogFormat::Json => {
            let layer = tracing_subscriber::fmt::layer().with_writer(writer).json();
            #[cfg(debug_assertions)]
            let layer = layer.with_file(true).with_line_number(true);

            tracing_subscriber::registry().with(filter).with(layer).try_init()?;
        }
        LogFormat::Plaintext => {
            let layer = tracing_subscriber::fmt::layer().with_writer(writer);
            #[cfg(debug_assertions)]
            let layer = layer.with_file(true).with_line_number(true);

            tracing_subscriber::registry().with(filter).with(layer).try_init()?;
        }
    }

    Ok(())
}

/// Filter directive used when `RUST_LOG` is unset. Crate targets use
/// underscores, so the component name is normalised to match them.
fn default_directive(component: &str, level: Level) -> String {
    format!("{},{}={}", level, component.replace('-', "_"), level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestArgs {
        #[command(flatten)]
        logging: CliLoggingArgs,
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("PlainText".parse::<LogFormat>().unwrap(), LogFormat::Plaintext);
        assert!("xml".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_cli_log_level_conversion() {
        assert_eq!(Level::from(CliLogLevel::Error), Level::ERROR);
        assert_eq!(Level::from(CliLogLevel::Warn), Level::WARN);
        assert_eq!(Level::from(CliLogLevel::Info), Level::INFO);
        assert_eq!(Level::from(CliLogLevel::Debug), Level::DEBUG);
        assert_eq!(Level::from(CliLogLevel::Trace), Level::TRACE);
        assert_eq!(CliLogLevel::default(), CliLogLevel::Info);
        assert_eq!(CliLogLevel::Warn.to_string(), "warn");
    }

    #[test]
    fn test_flags_parse_from_command_line() {
        let args = TestArgs::parse_from(["svc", "--log-level", "debug", "--log-format", "json"]);
        assert_eq!(args.logging.log_level, Some(CliLogLevel::Debug));
        assert_eq!(args.logging.log_format, Some(LogFormat::Json));
        assert_eq!(args.logging.level(), Level::DEBUG);
        assert!(!args.logging.logs_to_file());
    }

    #[test]
    fn test_default_args_log_to_console_at_info() {
        let args = CliLoggingArgs::default();
        assert!(!args.logs_to_file());
        assert_eq!(args.level(), Level::INFO);
    }

    #[test]
    fn test_resolve_log_path() {
        let dir_only = CliLoggingArgs {
            log_dir: Some("/var/log/accounts".into()),
            ..Default::default()
        };
        assert_eq!(
            dir_only.resolve_log_path("acct-rest-server"),
            PathBuf::from("/var/log/accounts/acct-rest-server.log")
        );

        let relative_file = CliLoggingArgs {
            log_dir: Some("/var/log/accounts".into()),
            log_file: Some("server.log".into()),
            ..Default::default()
        };
        assert_eq!(
            relative_file.resolve_log_path("acct-rest-server"),
            PathBuf::from("/var/log/accounts/server.log")
        );

        let absolute_file = CliLoggingArgs {
            log_dir: Some("/ignored".into()),
            log_file: Some("/tmp/server.log".into()),
            ..Default::default()
        };
        assert_eq!(
            absolute_file.resolve_log_path("acct-rest-server"),
            PathBuf::from("/tmp/server.log")
        );
    }

    #[test]
    fn test_standard_log_path_for_component() {
        let path = standard_log_path_for_component("acct-rest-server");
        assert!(path.ends_with("account-service/acct-rest-server.log"));
    }

    #[test]
    fn test_default_directive_uses_crate_target_names() {
        assert_eq!(
            default_directive("acct-rest-server", Level::INFO),
            "INFO,acct_rest_server=INFO"
        );
    }
}
