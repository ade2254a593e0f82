//! Logging System
//!
//! Structured logging using the `tracing` crate, with configurable level, format
//! (text or JSON), and destination (stdout, stderr, log file, or a combination).

use crate::config::APP_NAME;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const ENV_LOG: &str = "CLAUDE_AGENTS_LOG";
const ENV_LOG_FORMAT: &str = "CLAUDE_AGENTS_LOG_FORMAT";
const ENV_LOG_OUTPUT: &str = "CLAUDE_AGENTS_LOG_OUTPUT";
const ENV_LOG_FILE: &str = "CLAUDE_AGENTS_LOG_FILE";
const ENV_LOG_MODULES: &str = "CLAUDE_AGENTS_LOG_MODULES";

/// Resolve the log file path with precedence: CLI, CLAUDE_AGENTS_LOG_FILE env, config file, default.
pub fn resolve_log_file_path(
    cli_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
) -> Result<PathBuf, ApiError> {
    resolve_log_file_path_with(cli_file, config_file, &process_env)
}

fn resolve_log_file_path_with(
    cli_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
    env: EnvLookup<'_>,
) -> Result<PathBuf, ApiError> {
    if let Some(p) = cli_file.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(p);
    }
    if let Some(env_path) = env(ENV_LOG_FILE).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(env_path));
    }
    if let Some(p) = config_file.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(p);
    }
    default_log_file_path()
}

/// Environment variable lookup; injectable so resolution can be tested without
/// touching the process environment.
type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// `<state dir>/claude-agents.log`, falling back to the data-local dir on
/// platforms without a state directory.
fn default_log_file_path() -> Result<PathBuf, ApiError> {
    let project_dirs = directories::ProjectDirs::from("", "", APP_NAME).ok_or_else(|| {
        ApiError::ConfigError(
            "Could not determine platform state directory for log file".to_string(),
        )
    })?;
    let dir = project_dirs
        .state_dir()
        .unwrap_or_else(|| project_dirs.data_local_dir())
        .to_path_buf();
    Ok(dir.join(format!("{}.log", APP_NAME)))
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether logging is enabled (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file, file+stderr, both
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path when output includes file; None means use runtime default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format only, stdout/stderr only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "file".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

/// Logging settings given on the command line.
#[derive(Debug, Clone, Default)]
pub struct LoggingOverrides {
    pub verbose: bool,
    pub level: Option<String>,
    pub format: Option<String>,
    pub output: Option<String>,
    pub file: Option<PathBuf>,
}

impl LoggingOverrides {
    /// Whether any flag asks for log output regardless of `enabled` in config.
    fn forces_enabled(&self) -> bool {
        self.verbose || self.level.is_some()
    }
}

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. CLI arguments (`overrides`; `--verbose` means debug level on stderr)
/// 2. Environment variables (CLAUDE_AGENTS_LOG, CLAUDE_AGENTS_LOG_FORMAT, etc.)
/// 3. Configuration file
/// 4. Defaults
pub fn init_logging(
    config: Option<&LoggingConfig>,
    overrides: &LoggingOverrides,
) -> Result<(), ApiError> {
    let env: EnvLookup<'_> = &process_env;
    let enabled = overrides.forces_enabled() || config.map(|c| c.enabled).unwrap_or(true);
    if !enabled {
        return Registry::default()
            .with(EnvFilter::new("off"))
            .with(fmt::layer().with_writer(std::io::sink))
            .try_init()
            .map_err(|e| ApiError::ConfigError(format!("Failed to initialize logging: {}", e)));
    }

    let filter = build_env_filter(config, overrides, env)?;
    let format = determine_format(config, overrides, env)?;
    let output = determine_output(config, overrides, env)?;
    let use_color = config.map(|c| c.color).unwrap_or(true) && !output.file;
    let writer = if output.file {
        let log_file = resolve_log_file_path_with(
            overrides.file.clone(),
            config.and_then(|c| c.file.clone()),
            env,
        )?;
        build_writer(&output, Some(open_log_file(&log_file)?))
    } else {
        build_writer(&output, None)
    };

    let base_subscriber = Registry::default().with(filter);
    let result = if format == "json" {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init()
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(use_color)
                    .with_writer(writer),
            )
            .try_init()
    };
    result.map_err(|e| ApiError::ConfigError(format!("Failed to initialize logging: {}", e)))
}

/// Open the log file for appending, creating its parent directory.
fn open_log_file(log_file: &Path) -> Result<std::fs::File, ApiError> {
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ApiError::ConfigError(format!("Failed to create log directory: {}", e))
        })?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| ApiError::ConfigError(format!("Failed to open log file {:?}: {}", log_file, e)))
}

/// `file` must be present when `output.file` is set.
fn build_writer(output: &OutputDestinations, file: Option<std::fs::File>) -> BoxMakeWriter {
    match (file, output.stdout, output.stderr) {
        (Some(file), _, true) => BoxMakeWriter::new(Mutex::new(file).and(std::io::stderr)),
        (Some(file), _, false) => BoxMakeWriter::new(Mutex::new(file)),
        (None, true, true) => BoxMakeWriter::new(std::io::stdout.and(std::io::stderr)),
        (None, false, true) => BoxMakeWriter::new(std::io::stderr),
        (None, _, false) => BoxMakeWriter::new(std::io::stdout),
    }
}

/// Base level directive: `--log-level`, then `--verbose`, then CLAUDE_AGENTS_LOG, then config.
fn determine_level(
    config: Option<&LoggingConfig>,
    overrides: &LoggingOverrides,
    env: EnvLookup<'_>,
) -> String {
    if let Some(level) = &overrides.level {
        return level.clone();
    }
    if overrides.verbose {
        return "debug".to_string();
    }
    if let Some(level) = env(ENV_LOG).filter(|l| !l.is_empty()) {
        return level;
    }
    config
        .map(|c| c.level.clone())
        .unwrap_or_else(default_log_level)
}

/// Build the filter from the resolved level plus per-module directives
fn build_env_filter(
    config: Option<&LoggingConfig>,
    overrides: &LoggingOverrides,
    env: EnvLookup<'_>,
) -> Result<EnvFilter, ApiError> {
    let level = determine_level(config, overrides, env);
    if level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::try_new(&level)
        .map_err(|e| ApiError::ConfigError(format!("Invalid log level '{}': {}", level, e)))?;
    let mut directives: Vec<String> = config
        .map(|c| {
            c.modules
                .iter()
                .map(|(module, module_level)| format!("{}={}", module, module_level))
                .collect()
        })
        .unwrap_or_default();

    if let Some(modules_str) = env(ENV_LOG_MODULES) {
        directives.extend(parse_module_directives(&modules_str));
    }

    for directive in directives {
        filter = filter.add_directive(
            directive
                .parse()
                .map_err(|e| ApiError::ConfigError(format!("Invalid log directive '{}': {}", directive, e)))?,
        );
    }
    Ok(filter)
}

/// Parse `module=level,module=level` pairs, skipping malformed entries.
fn parse_module_directives(directives: &str) -> Vec<String> {
    directives
        .split(',')
        .filter_map(|pair| {
            let (module, level) = pair.split_once('=')?;
            let (module, level) = (module.trim(), level.trim());
            if module.is_empty() || level.is_empty() {
                None
            } else {
                Some(format!("{}={}", module, level))
            }
        })
        .collect()
}

/// Determine output format: `--log-format`, then CLAUDE_AGENTS_LOG_FORMAT, then config
fn determine_format(
    config: Option<&LoggingConfig>,
    overrides: &LoggingOverrides,
    env: EnvLookup<'_>,
) -> Result<String, ApiError> {
    let format = match &overrides.format {
        Some(format) => format.clone(),
        None => match env(ENV_LOG_FORMAT).filter(|f| f == "json" || f == "text") {
            Some(format) => format,
            None => config
                .map(|c| c.format.clone())
                .unwrap_or_else(default_format),
        },
    };
    if format != "json" && format != "text" {
        return Err(ApiError::ConfigError(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            format
        )));
    }
    Ok(format)
}

/// Output destinations
#[derive(Debug, PartialEq, Eq)]
struct OutputDestinations {
    stdout: bool,
    stderr: bool,
    file: bool,
}

/// Determine output: `--log-output`, then `--verbose` (stderr), then
/// CLAUDE_AGENTS_LOG_OUTPUT, then config
fn determine_output(
    config: Option<&LoggingConfig>,
    overrides: &LoggingOverrides,
    env: EnvLookup<'_>,
) -> Result<OutputDestinations, ApiError> {
    if let Some(output) = &overrides.output {
        return parse_output_destinations(output);
    }
    if overrides.verbose {
        return parse_output_destinations("stderr");
    }
    if let Some(output) = env(ENV_LOG_OUTPUT) {
        return parse_output_destinations(&output);
    }
    let output = config.map(|c| c.output.as_str()).unwrap_or("file");
    parse_output_destinations(output)
}

fn parse_output_destinations(output: &str) -> Result<OutputDestinations, ApiError> {
    let (stdout, stderr, file) = match output {
        "stdout" => (true, false, false),
        "stderr" => (false, true, false),
        "file" => (false, false, true),
        "file+stderr" => (false, true, true),
        "both" => (true, true, false),
        _ => {
            return Err(ApiError::ConfigError(format!(
                "Invalid log output: {} (must be 'stdout', 'stderr', 'file', 'file+stderr', or 'both')",
                output
            )))
        }
    };
    Ok(OutputDestinations {
        stdout,
        stderr,
        file,
    })
}
