//! Snapshot-based undo/redo history.
//!
//! Two stacks of [`Snapshot`]s surround the live state, which is owned by the
//! caller:
//! - `past` holds the states before each committed edit, oldest first
//! - `future` holds states that were undone, and is only non-empty after an
//!   undo
//!
//! Recording a snapshot clears `future` (a new branch of edits). Undo and
//! redo move snapshots between the stacks and the live slot without cloning.
//!
//! # Usage
//!
//! ```ignore
//! let mut history = History::new();
//! let mut live = Snapshot::empty();
//!
//! // Before committing an edit, record the state it replaces
//! history.record_snapshot(live.clone());
//! live = live.with_adjustments(Adjustments::new(30, 0, 0));
//!
//! assert!(history.undo(&mut live));
//! assert!(history.redo(&mut live));
//! ```

use std::mem;

use crate::snapshot::Snapshot;

/// Undo/redo stacks for the editor.
#[derive(Debug, Clone, Default)]
pub struct History {
    past: Vec<Snapshot>,
    /// Top of the stack (last element) is the nearest undone state.
    future: Vec<Snapshot>,
    /// Maximum length of `past`; `None` is unbounded.
    limit: Option<usize>,
}

impl History {
    /// Create an unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that keeps at most `limit` undo steps, dropping the
    /// oldest first.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Push the state an edit is about to replace.
    ///
    /// Clears the redo stack.
    pub fn record_snapshot(&mut self, snapshot: Snapshot) {
        self.future.clear();
        self.past.push(snapshot);

        if let Some(limit) = self.limit {
            if self.past.len() > limit {
                let excess = self.past.len() - limit;
                self.past.drain(..excess);
                tracing::debug!(dropped = excess, limit, "History trimmed");
            }
        }

        tracing::debug!(undo_depth = self.past.len(), "Snapshot recorded");
    }

    /// Step back one edit.
    ///
    /// The newest `past` entry becomes the live state and the previous live
    /// state becomes the nearest `future` entry. Returns `false` and changes
    /// nothing when there is nothing to undo.
    pub fn undo(&mut self, live: &mut Snapshot) -> bool {
        let Some(previous) = self.past.pop() else {
            tracing::debug!("Undo ignored: history empty");
            return false;
        };

        let current = mem::replace(live, previous);
        self.future.push(current);

        tracing::debug!(
            undo_remaining = self.past.len(),
            redo_depth = self.future.len(),
            "Undo"
        );
        true
    }

    /// Step forward one undone edit. Inverse of [`History::undo`].
    pub fn redo(&mut self, live: &mut Snapshot) -> bool {
        let Some(next) = self.future.pop() else {
            tracing::debug!("Redo ignored: nothing undone");
            return false;
        };

        let current = mem::replace(live, next);
        self.past.push(current);

        tracing::debug!(
            undo_depth = self.past.len(),
            redo_remaining = self.future.len(),
            "Redo"
        );
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.past.len()
    }

    pub fn redo_count(&self) -> usize {
        self.future.len()
    }

    /// Recorded states, oldest first.
    pub fn past(&self) -> &[Snapshot] {
        &self.past
    }

    /// Undone states, nearest first.
    pub fn future(&self) -> impl DoubleEndedIterator<Item = &Snapshot> + ExactSizeIterator {
        self.future.iter().rev()
    }

    /// Drop both stacks.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        tracing::debug!("History cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Adjustments;

    fn state(hue: i32) -> Snapshot {
        Snapshot::new(None, Adjustments::new(hue, 0, 0))
    }

    fn hues<'a>(snapshots: impl Iterator<Item = &'a Snapshot>) -> Vec<i32> {
        snapshots.map(|s| s.adjustments().hue).collect()
    }

    /// Commit `hue` on top of `live`, recording the old state.
    fn commit(history: &mut History, live: &mut Snapshot, hue: i32) {
        history.record_snapshot(live.clone());
        *live = state(hue);
    }

    #[test]
    fn test_new_history_is_empty() {
        let history = History::new();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo_count(), 0);
        assert_eq!(history.redo_count(), 0);
        assert_eq!(history.limit(), None);
    }

    #[test]
    fn test_undo_on_empty_is_noop() {
        let mut history = History::new();
        let mut live = state(7);

        assert!(!history.undo(&mut live));
        assert_eq!(live, state(7));
        assert_eq!(history.redo_count(), 0);
    }

    #[test]
    fn test_redo_on_empty_is_noop() {
        let mut history = History::new();
        let mut live = state(7);
        commit(&mut history, &mut live, 8);

        assert!(!history.redo(&mut live));
        assert_eq!(live, state(8));
        assert_eq!(history.undo_count(), 1);
    }

    #[test]
    fn test_undo_moves_live_to_future() {
        let mut history = History::new();
        let mut live = state(0);
        commit(&mut history, &mut live, 10);

        assert!(history.undo(&mut live));
        assert_eq!(live, state(0));
        assert_eq!(history.undo_count(), 0);
        assert_eq!(hues(history.future()), vec![10]);
    }

    #[test]
    fn test_n_commits_then_n_undos() {
        let mut history = History::new();
        let mut live = state(0);
        for hue in 1..=5 {
            commit(&mut history, &mut live, hue * 10);
        }
        assert_eq!(hues(history.past().iter()), vec![0, 10, 20, 30, 40]);

        for _ in 0..5 {
            assert!(history.undo(&mut live));
        }

        assert_eq!(live, state(0));
        assert!(!history.can_undo());
        assert_eq!(hues(history.future()), vec![10, 20, 30, 40, 50]);
    }

    #[test]
    fn test_undo_then_redo_restores_everything() {
        let mut history = History::new();
        let mut live = state(0);
        commit(&mut history, &mut live, 10);
        commit(&mut history, &mut live, 20);

        let past_before = history.past().to_vec();
        let live_before = live.clone();

        assert!(history.undo(&mut live));
        assert!(history.redo(&mut live));

        assert_eq!(live, live_before);
        assert_eq!(history.past(), past_before.as_slice());
        assert_eq!(history.redo_count(), 0);
    }

    #[test]
    fn test_record_clears_future() {
        let mut history = History::new();
        let mut live = state(0);
        commit(&mut history, &mut live, 10);
        commit(&mut history, &mut live, 20);
        history.undo(&mut live);
        history.undo(&mut live);
        assert_eq!(history.redo_count(), 2);

        commit(&mut history, &mut live, 99);

        assert!(!history.can_redo());
        assert_eq!(hues(history.past().iter()), vec![0]);
        assert_eq!(live, state(99));
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::with_limit(3);
        let mut live = state(0);
        for hue in 1..=5 {
            commit(&mut history, &mut live, hue);
        }

        assert_eq!(history.undo_count(), 3);
        assert_eq!(hues(history.past().iter()), vec![2, 3, 4]);
    }

    #[test]
    fn test_zero_limit_keeps_nothing() {
        let mut history = History::with_limit(0);
        let mut live = state(0);
        commit(&mut history, &mut live, 1);

        assert!(!history.can_undo());
        assert!(!history.undo(&mut live));
        assert_eq!(live, state(1));
    }

    #[test]
    fn test_clear() {
        let mut history = History::new();
        let mut live = state(0);
        commit(&mut history, &mut live, 1);
        commit(&mut history, &mut live, 2);
        history.undo(&mut live);

        history.clear();

        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(live, state(1));
    }
}
