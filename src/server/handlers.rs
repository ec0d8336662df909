//! HTTP request handlers

use crate::error::{AppError, Result};
use crate::ingest;
use crate::server::{
    AppState, DownloadFormat, DownloadQuery, HealthResponse, JudgmentRequest, ListsRequest,
    MessageResponse,
};
use axum::extract::multipart::{Field, MultipartError};
use axum::extract::{Multipart, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use pair_annotator_common::export::{self, FILE_STEM};
use pair_annotator_common::PairsSnapshot;

/// Health check handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let progress = state.read().progress();

    Json(HealthResponse {
        message: "Backend is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.uptime_secs(),
        pairs: progress.total,
        judged: progress.judged,
    })
}

/// テキスト2つからペアを作る
pub async fn set_lists(
    State(state): State<AppState>,
    Json(payload): Json<ListsRequest>,
) -> Json<MessageResponse> {
    let count = {
        let mut store = state.write();
        store.set_lists(&payload.list1, &payload.list2);
        store.len()
    };
    tracing::info!(pairs = count, "pairs created from text lists");

    Json(MessageResponse::new("Lists received and pairs created."))
}

/// アップロードされた表の2列からペアを作る
///
/// multipartのフィールド: `file`, `column1`, `column2`, 任意で `annotation_column`
pub async fn upload_table(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MessageResponse>> {
    let mut file: Option<(Option<String>, Vec<u8>)> = None;
    let mut column1 = None;
    let mut column2 = None;
    let mut annotation_column = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;
                file = Some((file_name, bytes.to_vec()));
            }
            "column1" => column1 = Some(field_text(field).await?),
            "column2" => column2 = Some(field_text(field).await?),
            "annotation_column" => annotation_column = Some(field_text(field).await?),
            other => tracing::debug!(field = other, "ignoring unknown upload field"),
        }
    }

    let (file_name, bytes) = file.ok_or_else(|| missing_field("file"))?;
    let column1 = column1.ok_or_else(|| missing_field("column1"))?;
    let column2 = column2.ok_or_else(|| missing_field("column2"))?;
    // 空欄の任意項目は未指定と同じ
    let annotation_column = annotation_column.filter(|c| !c.is_empty());

    let table = ingest::load_table(file_name.as_deref(), bytes)?;

    let count = {
        let mut store = state.write();
        store.set_from_table(&table, &column1, &column2, annotation_column.as_deref())?;
        store.len()
    };
    tracing::info!(
        pairs = count,
        ?file_name,
        %column1,
        %column2,
        ?annotation_column,
        "pairs created from uploaded table"
    );

    Ok(Json(MessageResponse::new("CSV uploaded and pairs created.")))
}

async fn field_text(field: Field<'_>) -> Result<String> {
    field.text().await.map_err(multipart_error)
}

/// 上限超過は413、それ以外の読み込み失敗は400
fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Upload(e.body_text())
    }
}

fn missing_field(name: &str) -> AppError {
    AppError::Upload(format!("{} がありません", name))
}

/// 現在のペアと判定
pub async fn get_pairs(State(state): State<AppState>) -> Json<PairsSnapshot> {
    Json(state.read().pairs())
}

/// 判定を記録する
pub async fn record_judgment(
    State(state): State<AppState>,
    Json(payload): Json<JudgmentRequest>,
) -> Result<Json<MessageResponse>> {
    state
        .write()
        .record_judgment(payload.index, payload.judgment.as_str())?;
    tracing::debug!(index = payload.index, judgment = %payload.judgment, "judgment recorded");

    Ok(Json(MessageResponse::new(format!(
        "Judgment for pair {} recorded.",
        payload.index
    ))))
}

/// 現在の結果（`get_pairs`と同じ内容）
pub async fn get_results(State(state): State<AppState>) -> Json<PairsSnapshot> {
    Json(state.read().results())
}

/// 結果ファイルをダウンロード（既定はCSV、`?format=xlsx`でExcel）
pub async fn download_results(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response> {
    let snapshot = state.read().results();

    let (content_type, extension, body) = match query.format {
        DownloadFormat::Csv => (
            "text/csv; charset=utf-8",
            "csv",
            export::to_csv(&snapshot)?.into_bytes(),
        ),
        DownloadFormat::Xlsx => (
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            "xlsx",
            export::to_xlsx(&snapshot)?,
        ),
    };

    let headers = [
        (header::CONTENT_TYPE, content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}.{}", FILE_STEM, extension),
        ),
    ];
    Ok((headers, body).into_response())
}

/// 全データを破棄する
pub async fn reset(State(state): State<AppState>) -> Json<MessageResponse> {
    state.write().reset();
    tracing::info!("data reset");

    Json(MessageResponse::new("Data reset."))
}

// =============================================================================
// Tests
// =============================================================================
