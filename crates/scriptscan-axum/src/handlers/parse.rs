//! Script parsing handlers.
//!
//! Parsing is CPU-bound, so it runs on the blocking pool.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, State};
use scriptscan_core::{CoreError, ParsedScript, ScriptService};
use tracing::info;

use crate::dto::ParseTextRequest;
use crate::error::HttpError;
use crate::state::AppState;

/// Name of the multipart field carrying the document.
pub const FILE_FIELD: &str = "file";

async fn run_blocking<F>(service: &Arc<ScriptService>, job: F) -> Result<ParsedScript, HttpError>
where
    F: FnOnce(&ScriptService) -> Result<ParsedScript, CoreError> + Send + 'static,
{
    let service = Arc::clone(service);
    tokio::task::spawn_blocking(move || job(&service))
        .await
        .map_err(|e| HttpError::Internal(format!("parse task failed: {e}")))?
        .map_err(HttpError::from)
}

/// `POST /parse_file`: multipart upload with a `file` field.
pub async fn parse_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParsedScript>, HttpError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(FILE_FIELD) {
            let filename = field.file_name().unwrap_or_default().to_string();
            let content = field.bytes().await?;
            upload = Some((filename, content));
            break;
        }
    }

    let Some((filename, content)) = upload else {
        return Err(HttpError::BadRequest(format!(
            "missing form field `{FILE_FIELD}`"
        )));
    };

    let size = content.len();
    let name = filename.clone();
    let parsed = run_blocking(&state.service, move |service| {
        service.parse_document(&name, &content)
    })
    .await?;

    info!(
        target: "scriptscan.http",
        filename = %filename,
        bytes = size,
        scenes = parsed.scenes.len(),
        "Parsed upload"
    );
    Ok(Json(parsed))
}

/// `POST /parse_text`: JSON body `{"text": "..."}`.
pub async fn parse_text(
    State(state): State<AppState>,
    Json(req): Json<ParseTextRequest>,
) -> Result<Json<ParsedScript>, HttpError> {
    let chars = req.text.chars().count();
    let parsed = run_blocking(&state.service, move |service| Ok(service.parse_text(&req.text))).await?;

    info!(
        target: "scriptscan.http",
        chars,
        scenes = parsed.scenes.len(),
        "Parsed text"
    );
    Ok(Json(parsed))
}
