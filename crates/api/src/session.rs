//! Per-principal in-memory annotation sessions.
//!
//! Each principal has at most one session holding the active track cache
//! and the boundary selection state. Sessions are single-user and never
//! shared; the map lock only guards session lookup, all mutation happens
//! synchronously while the lock is held and never spans a database call.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use annotator_core::selection::SelectionState;
use annotator_core::track::TrackCache;
use annotator_core::types::UserId;

/// One principal's session: the active upload plus the in-progress
/// boundary selection.
#[derive(Debug, Default)]
pub struct AnnotationSession {
    pub cache: TrackCache,
    pub selection: SelectionState,
}

/// Shared map of live sessions, keyed by principal id.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<UserId, AnnotationSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against the caller's session, creating an empty one on
    /// first touch.
    pub async fn with<R>(
        &self,
        user: &UserId,
        f: impl FnOnce(&mut AnnotationSession) -> R,
    ) -> R {
        let mut sessions = self.inner.write().await;
        let session = sessions.entry(user.clone()).or_default();
        f(session)
    }
}

#[cfg(test)]
mod tests {
    use annotator_core::selection::SelectionCommand;

    use super::*;

    #[tokio::test]
    async fn sessions_are_isolated_per_principal() {
        let store = SessionStore::new();
        let alice = "alice".to_string();
        let bob = "bob".to_string();

        store
            .with(&alice, |s| {
                s.selection.apply(SelectionCommand::PlotClick { x: 5 })
            })
            .await;

        let alice_click = store.with(&alice, |s| s.selection.last_clicked).await;
        let bob_click = store.with(&bob, |s| s.selection.last_clicked).await;
        assert_eq!(alice_click, Some(5));
        assert_eq!(bob_click, None);
    }

    #[tokio::test]
    async fn first_touch_creates_empty_session() {
        let store = SessionStore::new();
        let user = "u1".to_string();
        let has_track = store.with(&user, |s| s.cache.has_track()).await;
        assert!(!has_track);
    }
}
