//! Configuration management for the coupon server
//!
//! Sources, lowest precedence first: `conf/application.yml` (optional),
//! environment variables (`DB_HOST` → `db.host`), command line flags.

use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use config::{Config, ConfigError, Environment};
use coupon_persistence::StorageMode;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use super::constants::*;
use crate::startup::LoggingConfig;

/// Command line arguments for the server
#[derive(Debug, Default, Parser)]
#[command(name = "coupon-server", version, about = "Coupon inventory service")]
pub struct Cli {
    /// HTTP listen port
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,
    /// Persistence backend: external or memory
    #[arg(long = "persistence")]
    pub persistence: Option<String>,
    /// Lock store backend: redis or memory
    #[arg(long = "lock-store")]
    pub lock_store: Option<String>,
    #[arg(long = "db-url", env = "DATABASE_URL")]
    pub database_url: Option<String>,
    /// Path of the YAML configuration file
    #[arg(short = 'c', long = "config")]
    pub config_file: Option<String>,
}

/// Backend for the per-coupon lock
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockStoreKind {
    Redis,
    Memory,
}

impl FromStr for LockStoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(LockStoreKind::Redis),
            "memory" | "mem" => Ok(LockStoreKind::Memory),
            other => Err(anyhow::anyhow!("unknown lock store '{}'", other)),
        }
    }
}

/// Application configuration loaded from config files, environment and CLI
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    /// Load configuration using the process arguments
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(Cli::parse())
    }

    pub fn load(args: Cli) -> Result<Self, ConfigError> {
        let file = args
            .config_file
            .clone()
            .unwrap_or_else(|| CONFIG_FILE.to_string());

        let mut config_builder = Config::builder()
            .add_source(config::File::with_name(&file).required(false))
            .add_source(Environment::default().separator("_").try_parsing(true));

        if let Some(v) = args.port {
            config_builder = config_builder.set_override(SERVER_PORT, i64::from(v))?;
        }
        if let Some(v) = args.persistence {
            config_builder = config_builder.set_override(PERSISTENCE_MODE, v)?;
        }
        if let Some(v) = args.lock_store {
            config_builder = config_builder.set_override(LOCK_STORE, v)?;
        }
        if let Some(v) = args.database_url {
            config_builder = config_builder.set_override(DB_URL, v)?;
        }

        Ok(Configuration {
            config: config_builder.build()?,
        })
    }

    /// Wrap an already built `Config`
    pub fn from_config(config: Config) -> Self {
        Configuration { config }
    }

    // ========================================================================
    // Server Configuration
    // ========================================================================

    pub fn server_address(&self) -> String {
        self.config
            .get_string(SERVER_ADDRESS)
            .unwrap_or(DEFAULT_SERVER_ADDRESS.to_string())
    }

    pub fn server_port(&self) -> u16 {
        self.config
            .get_int(SERVER_PORT)
            .ok()
            .and_then(|v| u16::try_from(v).ok())
            .unwrap_or(DEFAULT_SERVER_PORT)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        let seconds = self
            .config
            .get_int(SHUTDOWN_TIMEOUT)
            .ok()
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT_SECONDS);
        Duration::from_secs(seconds)
    }

    // ========================================================================
    // Persistence Configuration
    // ========================================================================

    pub fn persistence_mode(&self) -> StorageMode {
        self.config
            .get_string(PERSISTENCE_MODE)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(StorageMode::ExternalDb)
    }

    pub fn seed_enabled(&self) -> bool {
        self.config.get_bool(SEED_ENABLED).unwrap_or(true)
    }

    /// Database URL, composed from host, port, user, password and name unless `db.url` is set
    pub fn database_url(&self) -> String {
        if let Ok(url) = self.config.get_string(DB_URL) {
            return url;
        }

        let host = self
            .config
            .get_string(DB_HOST)
            .unwrap_or(DEFAULT_DB_HOST.to_string());
        let port = self
            .config
            .get_int(DB_PORT)
            .unwrap_or(DEFAULT_DB_PORT.into());
        let user = self
            .config
            .get_string(DB_USER)
            .unwrap_or(DEFAULT_DB_USER.to_string());
        let password = self
            .config
            .get_string(DB_PASSWORD)
            .unwrap_or(DEFAULT_DB_PASSWORD.to_string());
        let name = self
            .config
            .get_string(DB_NAME)
            .unwrap_or(DEFAULT_DB_NAME.to_string());

        format!("mysql://{}:{}@{}:{}/{}", user, password, host, port, name)
    }

    pub fn pool_max_connections(&self) -> u32 {
        self.config
            .get_int(DB_POOL_MAX)
            .ok()
            .and_then(|v| u32::try_from(v).ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_DB_POOL_MAX)
    }

    pub fn pool_min_connections(&self) -> u32 {
        self.config
            .get_int(DB_POOL_MIN)
            .ok()
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(DEFAULT_DB_POOL_MIN)
    }

    /// Time to wait for a pooled connection, at most half the lock lifetime
    pub fn pool_acquire_timeout(&self) -> Duration {
        Duration::from_secs(DEFAULT_DB_ACQUIRE_TIMEOUT_SECONDS).min(self.lock_ttl() / 2)
    }

    pub async fn database_connection(&self) -> anyhow::Result<DatabaseConnection> {
        let max_connections = self.pool_max_connections();
        let min_connections = self.pool_min_connections().min(max_connections);
        let acquire_timeout = self.pool_acquire_timeout();

        let mut opt = ConnectOptions::new(self.database_url());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(30))
            .acquire_timeout(acquire_timeout)
            .idle_timeout(Duration::from_secs(10))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        tracing::info!(
            max_connections = max_connections,
            min_connections = min_connections,
            acquire_timeout_ms = acquire_timeout.as_millis() as u64,
            "Database connection pool configured"
        );

        Ok(Database::connect(opt).await?)
    }

    // ========================================================================
    // Lock Configuration
    // ========================================================================

    pub fn lock_store(&self) -> LockStoreKind {
        self.config
            .get_string(LOCK_STORE)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(LockStoreKind::Redis)
    }

    pub fn lock_ttl(&self) -> Duration {
        let seconds = self
            .config
            .get_int(LOCK_TTL)
            .ok()
            .and_then(|v| u64::try_from(v).ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_LOCK_TTL_SECONDS);
        Duration::from_secs(seconds)
    }

    pub fn redis_url(&self) -> String {
        let host = self
            .config
            .get_string(RDB_HOST)
            .unwrap_or(DEFAULT_RDB_HOST.to_string());
        let port = self
            .config
            .get_int(RDB_PORT)
            .ok()
            .and_then(|v| u16::try_from(v).ok())
            .unwrap_or(DEFAULT_RDB_PORT);

        coupon_core::RedisLockStore::url(&host, port)
    }

    // ========================================================================
    // Logging Configuration
    // ========================================================================

    pub fn log_dir(&self) -> Option<String> {
        self.config.get_string(LOG_DIR).ok()
    }

    pub fn log_console(&self) -> bool {
        self.config.get_bool(LOG_CONSOLE).unwrap_or(true)
    }

    pub fn log_file(&self) -> bool {
        self.config.get_bool(LOG_FILE).unwrap_or(true)
    }

    pub fn log_level(&self) -> String {
        self.config
            .get_string(LOG_LEVEL)
            .unwrap_or("info".to_string())
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig::from_config(
            self.log_dir(),
            self.log_console(),
            self.log_file(),
            &self.log_level(),
        )
    }
}
