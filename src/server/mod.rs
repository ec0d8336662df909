//! HTTPサーバー
//!
//! ペアリングストアを`AppState`に持たせ、各ハンドラに注入する。
//! 更新系は書き込みロック、参照系は読み込みロックで1世代分の状態を読む。

mod handlers;

pub use handlers::*;

use crate::config::Config;
use crate::error::{AppError, Result};
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{delete, get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use pair_annotator_common::PairingStore;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// ハンドラ間で共有する状態
#[derive(Debug, Clone)]
pub struct AppState {
    store: Arc<RwLock<PairingStore>>,
    started_at: DateTime<Utc>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(PairingStore::new())),
            started_at: Utc::now(),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, PairingStore> {
        // 更新は途中で失敗しても部分的な状態を残さないので、poisonは無視してよい
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, PairingStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn uptime_secs(&self) -> u64 {
        (Utc::now() - self.started_at).num_seconds().max(0) as u64
    }
}

// =============================================================================
// Request/Response DTOs
// =============================================================================

/// テキスト入力 `{list1, list2}`（改行区切り）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListsRequest {
    pub list1: String,
    pub list2: String,
}

/// 判定の記録 `{index, judgment}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgmentRequest {
    pub index: i64,
    pub judgment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
    pub version: String,
    pub uptime_secs: u64,
    /// 現在のペア数
    pub pairs: usize,
    /// 判定済みのペア数
    pub judged: usize,
}

/// ダウンロード形式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadFormat {
    #[default]
    Csv,
    Xlsx,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadQuery {
    #[serde(default)]
    pub format: DownloadFormat,
}

// =============================================================================
// Router
// =============================================================================

pub fn router(state: AppState, config: &Config) -> Result<Router> {
    let app = Router::new()
        .route("/", get(health_check))
        .route("/api/lists", post(set_lists))
        .route("/api/upload_csv", post(upload_table))
        .route("/api/pairs", get(get_pairs))
        .route("/api/judgment", post(record_judgment))
        .route("/api/results", get(get_results))
        .route("/api/results/download", get(download_results))
        .route("/api/reset", delete(reset))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors_layer(&config.allowed_origins)?)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// 許可オリジンのみ、全メソッド・全ヘッダー・credentials付きで許可する
///
/// credentials付きでは`*`を使えないため、設定エラーにする。
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    if origins.iter().any(|o| o.trim() == "*") {
        return Err(AppError::Config(
            "オリジンに * は指定できません（credentials付きのCORSでは個別のオリジンが必要です）"
                .into(),
        ));
    }

    let origins = origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o)
                .map_err(|e| AppError::Config(format!("オリジンが不正です ({}): {}", o, e)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// 受け付け済みのリスナーでサーバーを動かす
pub async fn serve_with_listener<F>(
    listener: TcpListener,
    config: &Config,
    state: AppState,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(state, config)?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, origins = ?config.allowed_origins, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| AppError::Server(e.to_string()))
}

pub async fn serve(config: &Config) -> Result<()> {
    let listener = TcpListener::bind(config.bind_address)
        .await
        .map_err(|e| AppError::Server(format!("{} にバインドできません: {}", config.bind_address, e)))?;

    serve_with_listener(listener, config, AppState::new(), shutdown_signal()).await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
