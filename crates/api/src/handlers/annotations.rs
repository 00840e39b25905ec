//! Handlers for annotation records: draft checking, submit, search,
//! delete, and the two export paths.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use annotator_core::chromosome::chrom_to_id;
use annotator_core::draft::{is_submittable, AnnotationDraft, EVENT_TYPES};
use annotator_core::error::CoreError;
use annotator_core::export::{display_rows, write_csv, DisplayRow, EXPORT_FILENAME};
use annotator_core::strains::strain_list;
use annotator_core::types::DbId;
use annotator_db::models::annotation::{AnnotationFilter, CreateAnnotation};
use annotator_db::repositories::AnnotationRepo;

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::session::AnnotationSession;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Draft assembly
// ---------------------------------------------------------------------------

/// Submit-form fields as sent by the client. Boundaries may be supplied
/// explicitly (hand-edited inputs) and otherwise default to the session's
/// committed selection; the strain always comes from the upload label.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitAnnotation {
    pub chromosome: Option<String>,
    pub event_type: Option<String>,
    pub loh_class: Option<String>,
    pub transition_label: Option<String>,
    pub left: Option<i64>,
    pub right: Option<i64>,
}

fn assemble_draft(session: &AnnotationSession, input: &SubmitAnnotation) -> AnnotationDraft {
    AnnotationDraft {
        strain: session.cache.label().map(str::to_string),
        chromosome: input.chromosome.clone(),
        event_type: input.event_type.clone(),
        loh_class: input.loh_class.clone(),
        left: input.left.or(session.selection.left_boundary),
        right: input.right.or(session.selection.right_boundary),
        transition_label: input.transition_label.clone(),
    }
}

#[derive(Debug, Serialize)]
pub struct DraftCheck {
    pub submittable: bool,
}

/// POST /api/v1/annotations/draft-check
///
/// Pure submit-gating check, safe to call on every form change. Never
/// creates anything.
pub async fn check(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<SubmitAnnotation>,
) -> AppResult<impl IntoResponse> {
    let draft = state
        .sessions
        .with(&user.id, |session| assemble_draft(session, &input))
        .await;

    Ok(Json(DataResponse {
        data: DraftCheck {
            submittable: is_submittable(&draft),
        },
    }))
}

/// GET /api/v1/annotations/event-types
///
/// The fixed event-type catalog, in dropdown order.
pub async fn event_types() -> AppResult<impl IntoResponse> {
    let labels: Vec<&'static str> = EVENT_TYPES.iter().map(|e| e.as_str()).collect();
    Ok(Json(DataResponse { data: labels }))
}

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

/// POST /api/v1/annotations
///
/// Validate the assembled draft and persist it, stamping the acting
/// principal as owner. Incomplete drafts are rejected without creating
/// anything.
pub async fn submit(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<SubmitAnnotation>,
) -> AppResult<impl IntoResponse> {
    let draft = state
        .sessions
        .with(&user.id, |session| assemble_draft(session, &input))
        .await;

    if !is_submittable(&draft) {
        return Err(CoreError::Validation("Annotation draft is incomplete".into()).into());
    }
    let AnnotationDraft {
        strain: Some(strain),
        chromosome: Some(chromosome),
        event_type: Some(event),
        loh_class: Some(loh),
        left: Some(left),
        right: Some(right),
        transition_label: Some(transition_label),
    } = draft
    else {
        return Err(CoreError::Validation("Annotation draft is incomplete".into()).into());
    };

    let chrom = chrom_to_id(&chromosome)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown chromosome '{chromosome}'")))?;

    let created = AnnotationRepo::insert(
        &state.pool,
        &user.id,
        &CreateAnnotation {
            strain,
            chrom,
            event,
            loh,
            transition_label,
            bd_left: left,
            bd_right: right,
        },
    )
    .await?;
    tracing::info!(user_id = %user.id, id = created.id, "Annotation submitted");

    if state.config.selection.reset_on_submit {
        state
            .sessions
            .with(&user.id, |session| session.selection.clear_boundaries())
            .await;
    }

    let row = to_display(created)?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Search filters as query parameters; the chromosome arrives as its
/// Roman-numeral name.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub strain: Option<String>,
    pub chromosome: Option<String>,
    pub event: Option<String>,
}

/// GET /api/v1/annotations?strain=&chromosome=&event=
///
/// Owner-scoped search. Omitted or empty filters impose no constraint;
/// an unknown chromosome name is a bad request.
pub async fn search(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let chrom = match params.chromosome.as_deref().filter(|c| !c.is_empty()) {
        Some(name) => Some(
            chrom_to_id(name)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown chromosome '{name}'")))?,
        ),
        None => None,
    };

    let filter = AnnotationFilter {
        strain: params.strain,
        chrom,
        event: params.event,
    };
    let records = AnnotationRepo::search(&state.pool, &user.id, &filter).await?;

    let rows: Vec<_> = records.into_iter().map(|r| r.into_row()).collect();
    let display = display_rows(&rows).map_err(AppError::Core)?;
    Ok(Json(DataResponse { data: display }))
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

/// DELETE /api/v1/annotations/{id}
///
/// Owner-checked delete. A nonexistent or foreign id reports
/// `deleted: false` rather than a hard failure; a human typing an id
/// routinely triggers this.
pub async fn delete_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = AnnotationRepo::delete_by_id(&state.pool, &user.id, id).await?;
    if deleted {
        tracing::info!(user_id = %user.id, id, "Annotation deleted");
    }
    Ok(Json(DataResponse {
        data: DeleteResponse { deleted },
    }))
}

/// DELETE /api/v1/annotations
///
/// Remove every record of the acting owner. Always reports success, even
/// on an empty collection.
pub async fn delete_all(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<impl IntoResponse> {
    let removed = AnnotationRepo::delete_all(&state.pool, &user.id).await?;
    tracing::info!(user_id = %user.id, removed, "All annotations deleted");
    Ok(Json(DataResponse {
        data: DeleteResponse { deleted: true },
    }))
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Rows already held by the client (the displayed search table).
#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub rows: Vec<DisplayRow>,
}

/// POST /api/v1/annotations/export
///
/// Serialize the client-held table to a downloadable file without
/// re-querying the store.
pub async fn export(
    _user: AuthUser,
    Json(input): Json<ExportRequest>,
) -> AppResult<impl IntoResponse> {
    let bytes = write_csv(&input.rows).map_err(AppError::Core)?;
    Ok(csv_download(bytes))
}

#[derive(Debug, Deserialize)]
pub struct BulkExportRequest {
    /// Free-text strain ids, whitespace- and newline-delimited.
    pub text: String,
}

/// Parsed strain list plus the unique count shown on the export button.
#[derive(Debug, Serialize)]
pub struct BulkExportPreview {
    pub strains: Vec<String>,
    pub unique: usize,
}

/// POST /api/v1/annotations/bulk-export/preview
///
/// Parse the free-text strain list without querying; drives enabling of
/// the export action.
pub async fn bulk_export_preview(
    _user: AuthUser,
    Json(input): Json<BulkExportRequest>,
) -> AppResult<impl IntoResponse> {
    let strains = strain_list(&input.text);
    let unique = strains.len();
    Ok(Json(DataResponse {
        data: BulkExportPreview { strains, unique },
    }))
}

/// POST /api/v1/annotations/bulk-export
///
/// Fresh owner-scoped query keyed by the parsed strain list, serialized
/// to a downloadable file. Degenerate empty input is rejected; the UI
/// disables the action in that state.
pub async fn bulk_export(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<BulkExportRequest>,
) -> AppResult<impl IntoResponse> {
    let strains = strain_list(&input.text);
    if strains.is_empty() {
        return Err(CoreError::Validation("No strain ids supplied".into()).into());
    }

    let records = AnnotationRepo::lookup_by_strains(&state.pool, &user.id, &strains).await?;
    let rows: Vec<_> = records.into_iter().map(|r| r.into_row()).collect();
    let display = display_rows(&rows).map_err(AppError::Core)?;
    let bytes = write_csv(&display).map_err(AppError::Core)?;
    Ok(csv_download(bytes))
}

fn csv_download(bytes: Vec<u8>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        bytes,
    )
}

fn to_display(record: annotator_db::models::annotation::Annotation) -> AppResult<DisplayRow> {
    let mut rows = display_rows(&[record.into_row()]).map_err(AppError::Core)?;
    rows.pop()
        .ok_or_else(|| AppError::Core(CoreError::Internal("empty display mapping".into())))
}
