//! Multi-file logging.
//!
//! Components write to separate log files with daily rotation, next to a root
//! file that captures everything:
//!
//! | Log File         | Component                    | Target Prefixes                                  |
//! |------------------|------------------------------|--------------------------------------------------|
//! | coupon.log       | Root logger (all components) | (all)                                            |
//! | claim.log        | Claim and redemption         | coupon_core::service                             |
//! | lock.log         | Lock coordination            | coupon_core::lock                                |
//! | persistence.log  | Database persistence         | coupon_persistence                               |
//! | access.log       | HTTP requests                | coupon_server::middleware, actix_web::middleware |
//!
//! Log files are stored in `~/coupon/logs` by default.
//! Override with the `log.dir` config key (`LOG_DIR` environment variable).

use std::path::PathBuf;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

/// Root log file name
pub const ROOT_LOG_FILE: &str = "coupon.log";

struct ComponentLogDef {
    file_name: &'static str,
    /// Target module prefixes routed to this file
    targets: &'static [&'static str],
}

/// Each entry produces a separate rolling log file, routed by `tracing` target.
const COMPONENT_LOGS: &[ComponentLogDef] = &[
    ComponentLogDef {
        file_name: "claim.log",
        targets: &["coupon_core::service"],
    },
    ComponentLogDef {
        file_name: "lock.log",
        targets: &["coupon_core::lock"],
    },
    ComponentLogDef {
        file_name: "persistence.log",
        targets: &["coupon_persistence"],
    },
    ComponentLogDef {
        file_name: "access.log",
        targets: &["coupon_server::middleware", "actix_web::middleware"],
    },
];

fn default_log_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(format!("{}/coupon/logs", home))
}

/// Logging configuration for the entire application.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub log_dir: PathBuf,
    pub console_output: bool,
    pub console_level: Level,
    pub file_logging: bool,
    pub file_level: Level,
    pub rotation: Rotation,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            console_output: true,
            console_level: Level::INFO,
            file_logging: true,
            file_level: Level::INFO,
            rotation: Rotation::DAILY,
        }
    }
}

impl LoggingConfig {
    /// Create from application configuration.
    pub fn from_config(
        log_dir: Option<String>,
        console_output: bool,
        file_logging: bool,
        level: &str,
    ) -> Self {
        let log_dir = log_dir.map(PathBuf::from).unwrap_or_else(default_log_dir);
        let level = level.parse().unwrap_or(Level::INFO);

        Self {
            log_dir,
            console_output,
            console_level: level,
            file_logging,
            file_level: level,
            rotation: Rotation::DAILY,
        }
    }
}

/// Keeps the non-blocking file writers alive.
///
/// When dropped, buffered log output is flushed.
pub struct LoggingGuard {
    _file_guards: Vec<WorkerGuard>,
}

/// Initialize the logging system.
///
/// This sets up:
/// - Console output (optional, human-readable format with colors)
/// - Root log file `coupon.log` that captures **all** events
/// - Component-specific log files with target-based routing
///
/// `RUST_LOG` overrides the configured level for the console and root file.
/// Component files use per-layer [`Targets`] filters and capture everything
/// from their targets.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard, Box<dyn std::error::Error>> {
    if config.file_logging {
        std::fs::create_dir_all(&config.log_dir)?;
    }

    let mut guards: Vec<WorkerGuard> = Vec::new();
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if config.console_output {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.console_level.to_string()));
        let console_layer = fmt::layer()
            .with_target(true)
            .with_thread_names(true)
            .with_filter(filter);
        layers.push(Box::new(console_layer));
    }

    if config.file_logging {
        let root_appender =
            RollingFileAppender::new(config.rotation.clone(), &config.log_dir, ROOT_LOG_FILE);
        let (root_nb, root_guard) = tracing_appender::non_blocking(root_appender);
        guards.push(root_guard);

        let root_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.file_level.to_string()));
        let root_layer = fmt::layer()
            .with_writer(root_nb)
            .with_target(true)
            .with_thread_names(true)
            .with_ansi(false)
            .with_filter(root_filter);
        layers.push(Box::new(root_layer));

        for component in COMPONENT_LOGS {
            let appender = RollingFileAppender::new(
                config.rotation.clone(),
                &config.log_dir,
                component.file_name,
            );
            let (nb, guard) = tracing_appender::non_blocking(appender);
            guards.push(guard);

            let mut targets = Targets::new();
            for target in component.targets {
                targets = targets.with_target(*target, LevelFilter::TRACE);
            }

            let layer = fmt::layer()
                .with_writer(nb)
                .with_target(true)
                .with_thread_names(true)
                .with_ansi(false)
                .with_filter(targets);
            layers.push(Box::new(layer));
        }
    }

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|e| format!("Failed to initialize logging: {}", e))?;

    if config.file_logging {
        tracing::info!(
            log_dir = %config.log_dir.display(),
            "File logging initialized: {} (root) + {} component log files",
            ROOT_LOG_FILE,
            COMPONENT_LOGS.len()
        );
    }

    Ok(LoggingGuard {
        _file_guards: guards,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(config.console_output);
        assert!(config.file_logging);
        assert_eq!(config.console_level, Level::INFO);
        assert!(config.log_dir.ends_with("coupon/logs"));
    }

    #[test]
    fn test_logging_config_from_config() {
        let config =
            LoggingConfig::from_config(Some("/tmp/coupon-logs".to_string()), false, true, "debug");
        assert_eq!(config.log_dir, PathBuf::from("/tmp/coupon-logs"));
        assert!(!config.console_output);
        assert_eq!(config.file_level, Level::DEBUG);
    }

    #[test]
    fn test_invalid_level_falls_back_to_info() {
        let config = LoggingConfig::from_config(None, true, false, "loud");
        assert_eq!(config.console_level, Level::INFO);
    }

    #[test]
    fn test_component_log_definitions() {
        for component in COMPONENT_LOGS {
            assert!(component.file_name.ends_with(".log"));
            assert!(!component.targets.is_empty());
        }
        assert!(
            COMPONENT_LOGS
                .iter()
                .any(|c| c.targets.contains(&"coupon_core::lock"))
        );
    }
}
