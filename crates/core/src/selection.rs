//! Boundary selection state machine.
//!
//! The plot boundary emits a single x-coordinate per click. The session
//! keeps the most recent click plus the left/right transition boundaries
//! being assembled for the next annotation. The three cells are
//! independent: boundaries may be committed in any order and overwritten
//! at will before submission.

use serde::{Deserialize, Serialize};

/// A named selection action. Callers dispatch these explicitly instead of
/// the UI reporting which element fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SelectionCommand {
    /// A click on the coverage plot at coordinate `x`.
    PlotClick { x: i64 },
    /// Copy the last clicked point into the left boundary.
    CommitLeft,
    /// Copy the last clicked point into the right boundary.
    CommitRight,
}

/// Whether boundaries survive a submit or a new upload.
///
/// The stickiness of boundaries across submits is deliberate UX in the
/// original tool; a fresh upload starts a fresh session store. Both are
/// configurable here rather than hard-coded.
#[derive(Debug, Clone, Copy)]
pub struct SelectionOptions {
    pub reset_on_submit: bool,
    pub reset_on_upload: bool,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            reset_on_submit: false,
            reset_on_upload: true,
        }
    }
}

/// The three independent selection cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    pub last_clicked: Option<i64>,
    pub left_boundary: Option<i64>,
    pub right_boundary: Option<i64>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one command. Commits are no-ops while nothing has been
    /// clicked yet; nothing ever clears `last_clicked`.
    pub fn apply(&mut self, command: SelectionCommand) {
        match command {
            SelectionCommand::PlotClick { x } => self.last_clicked = Some(x),
            SelectionCommand::CommitLeft => {
                if let Some(x) = self.last_clicked {
                    self.left_boundary = Some(x);
                }
            }
            SelectionCommand::CommitRight => {
                if let Some(x) = self.last_clicked {
                    self.right_boundary = Some(x);
                }
            }
        }
    }

    /// Clear the boundary cells (used by the configurable reset hooks).
    pub fn clear_boundaries(&mut self) {
        self.left_boundary = None;
        self.right_boundary = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_without_click_is_noop() {
        let mut sel = SelectionState::new();
        sel.apply(SelectionCommand::CommitLeft);
        sel.apply(SelectionCommand::CommitRight);
        assert_eq!(sel, SelectionState::default());
    }

    #[test]
    fn click_then_commit_left() {
        let mut sel = SelectionState::new();
        sel.apply(SelectionCommand::PlotClick { x: 42_000 });
        sel.apply(SelectionCommand::CommitLeft);
        assert_eq!(sel.left_boundary, Some(42_000));
        assert_eq!(sel.right_boundary, None);
        assert_eq!(sel.last_clicked, Some(42_000));
    }

    #[test]
    fn boundaries_commit_in_any_order_and_overwrite() {
        let mut sel = SelectionState::new();
        sel.apply(SelectionCommand::PlotClick { x: 900 });
        sel.apply(SelectionCommand::CommitRight);
        sel.apply(SelectionCommand::PlotClick { x: 100 });
        sel.apply(SelectionCommand::CommitLeft);
        assert_eq!(sel.left_boundary, Some(100));
        assert_eq!(sel.right_boundary, Some(900));

        // Overwrite the right boundary from a later click.
        sel.apply(SelectionCommand::PlotClick { x: 1200 });
        sel.apply(SelectionCommand::CommitRight);
        assert_eq!(sel.right_boundary, Some(1200));
        assert_eq!(sel.left_boundary, Some(100));
    }

    #[test]
    fn nothing_clears_last_clicked() {
        let mut sel = SelectionState::new();
        sel.apply(SelectionCommand::PlotClick { x: 7 });
        sel.clear_boundaries();
        assert_eq!(sel.last_clicked, Some(7));
        assert_eq!(sel.left_boundary, None);
    }
}
