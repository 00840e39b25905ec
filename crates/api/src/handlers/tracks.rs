//! Handlers for the coverage-track upload boundary.
//!
//! The transport delivers raw bytes plus a filename; parsing is
//! all-or-nothing and a successful parse unconditionally evicts the
//! session's previous track.

use axum::extract::{Multipart, Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use annotator_core::track::{parse_track, strain_label, CoverageRow};

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Payload returned after a successful upload: the strain label and the
/// chromosome ids available for plotting, in first-appearance order.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub strain: String,
    pub chromosomes: Vec<String>,
}

/// POST /api/v1/tracks (multipart: `file`)
///
/// Parse an uploaded coverage file and install it as the session's active
/// track. Returns 422 with a single generic message on any parse failure;
/// no partial track is retained.
pub async fn upload(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .ok_or_else(|| AppError::BadRequest("Upload is missing a filename".into()))?
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?;
        upload = Some((filename, bytes.to_vec()));
    }

    let (filename, bytes) =
        upload.ok_or_else(|| AppError::BadRequest("Missing 'file' field".into()))?;

    let track = parse_track(&bytes)?;
    let strain = strain_label(&filename);
    let chromosomes = track.chromosomes.clone();
    tracing::info!(
        user_id = %user.id,
        strain = %strain,
        rows = track.rows.len(),
        "Track uploaded"
    );

    let reset_selection = state.config.selection.reset_on_upload;
    state
        .sessions
        .with(&user.id, |session| {
            session.cache.replace(track, strain.clone());
            if reset_selection {
                session.selection = Default::default();
            }
        })
        .await;

    Ok(Json(DataResponse {
        data: UploadResponse {
            strain,
            chromosomes,
        },
    }))
}

/// GET /api/v1/tracks/current/chromosomes/{name}
///
/// Rows of the active track for one chromosome, for the plot boundary.
/// Fails soft: an absent chromosome or no active track yields an empty
/// list.
pub async fn chromosome_rows(
    State(state): State<AppState>,
    user: AuthUser,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let rows: Vec<CoverageRow> = state
        .sessions
        .with(&user.id, |session| {
            session
                .cache
                .filter_by_chromosome(&name)
                .into_iter()
                .cloned()
                .collect()
        })
        .await;

    Ok(Json(DataResponse { data: rows }))
}
