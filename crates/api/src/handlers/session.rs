//! Handlers for the selection state machine.
//!
//! The plot boundary emits named commands (a click coordinate, or an
//! explicit commit of the last click into a boundary); handlers dispatch
//! on the command variant rather than on which UI element fired.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use annotator_core::selection::{SelectionCommand, SelectionState};

use crate::auth::AuthUser;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Current session view: upload label, available chromosomes, and the
/// three selection cells.
#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub strain: Option<String>,
    pub chromosomes: Vec<String>,
    pub selection: SelectionState,
}

/// GET /api/v1/session
pub async fn snapshot(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<impl IntoResponse> {
    let snapshot = state
        .sessions
        .with(&user.id, |session| SessionSnapshot {
            strain: session.cache.label().map(str::to_string),
            chromosomes: session.cache.chromosomes().to_vec(),
            selection: session.selection,
        })
        .await;

    Ok(Json(DataResponse { data: snapshot }))
}

/// POST /api/v1/session/commands
///
/// Apply one selection command and return the resulting state. A commit
/// before any click is a no-op, surfaced as the unchanged state.
pub async fn command(
    State(state): State<AppState>,
    user: AuthUser,
    Json(command): Json<SelectionCommand>,
) -> AppResult<impl IntoResponse> {
    let selection = state
        .sessions
        .with(&user.id, |session| {
            session.selection.apply(command);
            session.selection
        })
        .await;

    Ok(Json(DataResponse { data: selection }))
}
