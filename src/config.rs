//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::store::RetryPolicy;

/// Which item store backend to scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// In-process table, optionally seeded from `SEED_FILE`
    Memory,
    /// Hosted DynamoDB table (requires the `dynamodb` feature)
    DynamoDb,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "dynamodb" | "dynamo" => Ok(StoreBackend::DynamoDb),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Item store backend
    pub store_backend: StoreBackend,
    /// Table scanned by the DynamoDB backend
    pub table_name: String,
    /// Region of the DynamoDB table
    pub aws_region: String,
    /// JSON array of items loaded into the memory backend at startup
    pub seed_file: Option<PathBuf>,
    /// Scan attempts including the first one
    pub retry_max_attempts: u32,
    /// Backoff ceiling for the first retry, in milliseconds
    pub retry_base_delay_ms: u64,
    /// Upper bound on any single backoff, in milliseconds
    pub retry_max_delay_ms: u64,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `STORE_BACKEND` - `memory` or `dynamodb` (default: memory)
    /// - `TABLE_NAME` - DynamoDB table (default: webpages)
    /// - `AWS_REGION` - DynamoDB region (default: us-east-1)
    /// - `SEED_FILE` - JSON seed for the memory backend (default: none)
    /// - `RETRY_MAX_ATTEMPTS` - Scan attempts (default: 3)
    /// - `RETRY_BASE_DELAY_MS` - First backoff ceiling (default: 50)
    /// - `RETRY_MAX_DELAY_MS` - Backoff cap (default: 1000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            store_backend: env_or("STORE_BACKEND", defaults.store_backend),
            table_name: env::var("TABLE_NAME").unwrap_or(defaults.table_name),
            aws_region: env::var("AWS_REGION").unwrap_or(defaults.aws_region),
            seed_file: env::var("SEED_FILE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            retry_max_attempts: env_or("RETRY_MAX_ATTEMPTS", defaults.retry_max_attempts),
            retry_base_delay_ms: env_or("RETRY_BASE_DELAY_MS", defaults.retry_base_delay_ms),
            retry_max_delay_ms: env_or("RETRY_MAX_DELAY_MS", defaults.retry_max_delay_ms),
        }
    }

    /// Backoff policy for store scans.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry_max_attempts.max(1),
            base_delay: Duration::from_millis(self.retry_base_delay_ms),
            max_delay: Duration::from_millis(self.retry_max_delay_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            store_backend: StoreBackend::Memory,
            table_name: "webpages".to_string(),
            aws_region: "us-east-1".to_string(),
            seed_file: None,
            retry_max_attempts: 3,
            retry_base_delay_ms: 50,
            retry_max_delay_ms: 1000,
        }
    }
}
