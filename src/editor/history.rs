// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Undo/redo of caption edits.

use crate::models::caption::Caption;

/// Snapshots of the caption list for undo/redo.
#[derive(Debug, Default)]
pub struct History {
    /// Undo stack (past states)
    undo_stack: Vec<Vec<Caption>>,
    /// Redo stack (future states after undo)
    redo_stack: Vec<Vec<Caption>>,
}

impl History {
    /// Maximum number of undo steps kept.
    const MAX_SIZE: usize = 50;

    pub fn new() -> Self {
        Self::default()
    }

    /// Save current state before making a change
    pub fn push(&mut self, texts: Vec<Caption>) {
        self.undo_stack.push(texts);
        if self.undo_stack.len() > Self::MAX_SIZE {
            self.undo_stack.remove(0);
        }
        // A new change invalidates anything that was undone.
        self.redo_stack.clear();
    }

    /// Undo: restore previous state
    pub fn undo(&mut self, current: Vec<Caption>) -> Option<Vec<Caption>> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Redo: restore next state
    pub fn redo(&mut self, current: Vec<Caption>) -> Option<Vec<Caption>> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(n: usize) -> Vec<Caption> {
        (0..n).map(|i| Caption::new(format!("c{i}"), 0.0, 0.0)).collect()
    }

    #[test]
    fn test_undo_redo() {
        let mut history = History::new();
        assert!(!history.can_undo());

        history.push(state(0));
        history.push(state(1));

        assert_eq!(history.undo(state(2)), Some(state(1)));
        assert_eq!(history.undo(state(1)), Some(state(0)));
        assert_eq!(history.undo(state(0)), None);

        assert!(history.can_redo());
        assert_eq!(history.redo(state(0)), Some(state(1)));
        assert_eq!(history.redo(state(1)), Some(state(2)));
        assert_eq!(history.redo(state(2)), None);
    }

    #[test]
    fn test_push_clears_redo() {
        let mut history = History::new();
        history.push(state(0));
        history.undo(state(1));
        assert!(history.can_redo());

        history.push(state(0));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut history = History::new();
        for n in 0..(History::MAX_SIZE + 10) {
            history.push(state(n));
        }

        let mut undone = 0;
        let mut current = state(0);
        while let Some(previous) = history.undo(current.clone()) {
            current = previous;
            undone += 1;
        }
        assert_eq!(undone, History::MAX_SIZE);
        assert_eq!(current.len(), 10);
    }
}
