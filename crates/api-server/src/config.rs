//! Server configuration read from the environment

use std::path::PathBuf;
use std::str::FromStr;

/// Default upload ceiling: 2 MiB
pub const DEFAULT_MAX_CSV_SIZE: usize = 2 * 1024 * 1024;
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATA_DIR: &str = ".tasks-data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub data_dir: PathBuf,
    pub port: u16,
    pub max_csv_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            port: DEFAULT_PORT,
            max_csv_size: DEFAULT_MAX_CSV_SIZE,
        }
    }
}

fn env_parse<T: FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Ignoring invalid {}={:?}, using default", name, raw);
                default
            }
        },
        Err(_) => default,
    }
}

impl ServerConfig {
    /// Read `TASKS_DATA_DIR`, `PORT` and `MAX_CSV_SIZE`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let data_dir = std::env::var("TASKS_DATA_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let max_csv_size = match env_parse("MAX_CSV_SIZE", defaults.max_csv_size) {
            0 => {
                tracing::warn!("MAX_CSV_SIZE must be positive, using default");
                DEFAULT_MAX_CSV_SIZE
            }
            size => size,
        };

        Self {
            data_dir,
            port: env_parse("PORT", defaults.port),
            max_csv_size,
        }
    }
}
