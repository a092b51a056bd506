#![forbid(unsafe_code)]

use causeway_server::{build_router, validate_startup_config, ApiConfig, AppState};
use std::env;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_i64(name: &str, default: i64) -> i64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(default)
}

fn env_duration_ms(name: &str, default_ms: u64) -> Duration {
    Duration::from_millis(env_u64(name, default_ms))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("CAUSEWAY_LOG_JSON", true) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let bind_addr = env::var("CAUSEWAY_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let api_cfg = ApiConfig {
        content_db_path: PathBuf::from(
            env::var("CAUSEWAY_CONTENT_DB")
                .unwrap_or_else(|_| "artifacts/content.sqlite".to_string()),
        ),
        request_timeout: env_duration_ms("CAUSEWAY_REQUEST_TIMEOUT_MS", 5000),
        store_open_timeout: env_duration_ms("CAUSEWAY_STORE_OPEN_TIMEOUT_MS", 3000),
        sqlite_pragma_cache_kib: env_i64("CAUSEWAY_SQLITE_CACHE_KIB", 8 * 1024),
        shutdown_drain: env_duration_ms("CAUSEWAY_SHUTDOWN_DRAIN_MS", 5000),
    };
    validate_startup_config(&api_cfg)?;

    let state = AppState::new(api_cfg);
    match state.store.probe().await {
        Ok(()) => state.ready.store(true, Ordering::Relaxed),
        Err(e) => error!("initial content store probe failed: {e}"),
    }
    let app = build_router(state.clone());

    let listener: TcpListener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("bind {bind_addr} failed: {e}"))?;
    info!("causeway-server listening on {bind_addr}");

    let accepting = state.accepting_requests.clone();
    let drain = state.api.shutdown_drain;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            wait_for_shutdown_signal().await;
            accepting.store(false, Ordering::Relaxed);
            // Refuse new feed work first, then drain what is in flight.
            tokio::time::sleep(drain).await;
        })
        .await
        .map_err(|e| format!("server failed: {e}"))
}
