pub mod health;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{annotations, session, tracks};
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /tracks                                 upload coverage file (POST)
/// /tracks/current/chromosomes/{name}      plot rows for one chromosome
///
/// /session                                selection snapshot
/// /session/commands                       plot click / commit left / commit right
///
/// /annotations                            search (GET), submit (POST), delete all (DELETE)
/// /annotations/{id}                       delete one (DELETE)
/// /annotations/event-types                fixed event-type catalog
/// /annotations/draft-check                submit gating check
/// /annotations/export                     export displayed rows
/// /annotations/bulk-export                export by free-text strain list
/// /annotations/bulk-export/preview        parse strain list, unique count
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/tracks", post(tracks::upload))
        .route(
            "/tracks/current/chromosomes/{name}",
            get(tracks::chromosome_rows),
        )
        .route("/session", get(session::snapshot))
        .route("/session/commands", post(session::command))
        .route(
            "/annotations",
            get(annotations::search)
                .post(annotations::submit)
                .delete(annotations::delete_all),
        )
        .route("/annotations/{id}", delete(annotations::delete_by_id))
        .route("/annotations/event-types", get(annotations::event_types))
        .route("/annotations/draft-check", post(annotations::check))
        .route("/annotations/export", post(annotations::export))
        .route("/annotations/bulk-export", post(annotations::bulk_export))
        .route(
            "/annotations/bulk-export/preview",
            post(annotations::bulk_export_preview),
        )
}
