// SPDX-License-Identifier: Apache-2.0

use rusqlite::{Connection, OpenFlags};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

#[derive(Debug)]
pub struct StoreError(pub String);

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
impl std::error::Error for StoreError {}

/// Read-only access to the content database. The feed path never writes;
/// every connection carries the read-only open flag and query-only pragmas.
pub struct ContentDb {
    path: PathBuf,
    open_timeout: Duration,
    pragma_cache_kib: i64,
}

impl ContentDb {
    #[must_use]
    pub fn new(path: PathBuf, open_timeout: Duration, pragma_cache_kib: i64) -> Self {
        Self {
            path,
            open_timeout,
            pragma_cache_kib,
        }
    }

    pub async fn open_connection(&self) -> Result<Connection, StoreError> {
        let path = self.path.clone();
        let open = timeout(self.open_timeout, async move {
            tokio::task::spawn_blocking(move || {
                Connection::open_with_flags(
                    path,
                    OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
                )
            })
            .await
            .map_err(|e| StoreError(e.to_string()))?
            .map_err(|e| StoreError(e.to_string()))
        })
        .await;

        match open {
            Ok(Ok(conn)) => {
                let pragma_sql = format!(
                    "PRAGMA query_only=ON; PRAGMA temp_store=MEMORY; PRAGMA cache_size=-{};",
                    self.pragma_cache_kib
                );
                let _ = conn.set_prepared_statement_cache_capacity(32);
                conn.execute_batch(&pragma_sql)
                    .map_err(|e| StoreError(e.to_string()))?;
                Ok(conn)
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(StoreError("content store open timeout".to_string())),
        }
    }

    /// Readiness probe: the store is ready when a connection can be opened.
    pub async fn probe(&self) -> Result<(), StoreError> {
        let conn = self.open_connection().await?;
        debug!(path = %self.path.display(), "content store probe ok");
        drop(conn);
        Ok(())
    }
}
