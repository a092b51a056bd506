// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub content_db_path: PathBuf,
    pub request_timeout: Duration,
    pub store_open_timeout: Duration,
    pub sqlite_pragma_cache_kib: i64,
    pub shutdown_drain: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            content_db_path: PathBuf::from("artifacts/content.sqlite"),
            request_timeout: Duration::from_secs(5),
            store_open_timeout: Duration::from_secs(3),
            sqlite_pragma_cache_kib: 8 * 1024,
            shutdown_drain: Duration::from_secs(5),
        }
    }
}

pub fn validate_startup_config(cfg: &ApiConfig) -> Result<(), String> {
    if cfg.request_timeout.is_zero() || cfg.store_open_timeout.is_zero() {
        return Err("timeouts must be > 0".to_string());
    }
    if cfg.content_db_path.as_os_str().is_empty() {
        return Err("content db path must be set".to_string());
    }
    if cfg.sqlite_pragma_cache_kib <= 0 {
        return Err("sqlite cache size must be > 0".to_string());
    }
    Ok(())
}
