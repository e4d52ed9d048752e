//! Configuration keys and defaults

pub const DB_URL: &str = "db.url";
pub const DB_HOST: &str = "db.host";
pub const DB_PORT: &str = "db.port";
pub const DB_USER: &str = "db.user";
pub const DB_PASSWORD: &str = "db.password";
pub const DB_NAME: &str = "db.name";
pub const DB_POOL_MAX: &str = "db.pool.max";
pub const DB_POOL_MIN: &str = "db.pool.min";

pub const RDB_HOST: &str = "rdb.host";
pub const RDB_PORT: &str = "rdb.port";

pub const SERVER_ADDRESS: &str = "server.address";
pub const SERVER_PORT: &str = "server.port";

pub const LOCK_TTL: &str = "lock.ttl";
pub const LOCK_STORE: &str = "lock.store";
pub const PERSISTENCE_MODE: &str = "persistence.mode";
pub const SEED_ENABLED: &str = "seed.enabled";
pub const SHUTDOWN_TIMEOUT: &str = "shutdown.timeout";

pub const LOG_DIR: &str = "log.dir";
pub const LOG_CONSOLE: &str = "log.console";
pub const LOG_FILE: &str = "log.file";
pub const LOG_LEVEL: &str = "log.level";

pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 3306;
pub const DEFAULT_DB_USER: &str = "root";
pub const DEFAULT_DB_PASSWORD: &str = "password";
pub const DEFAULT_DB_NAME: &str = "coupon_db";
pub const DEFAULT_DB_POOL_MAX: u32 = 20;
pub const DEFAULT_DB_POOL_MIN: u32 = 1;
pub const DEFAULT_DB_ACQUIRE_TIMEOUT_SECONDS: u64 = 8;
pub const DEFAULT_RDB_HOST: &str = "localhost";
pub const DEFAULT_RDB_PORT: u16 = 6379;
pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 8081;
pub const DEFAULT_LOCK_TTL_SECONDS: u64 = 5;
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECONDS: u64 = 10;

pub const CONFIG_FILE: &str = "conf/application.yml";
