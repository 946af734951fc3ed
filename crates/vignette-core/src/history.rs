//! Linear undo/redo history over whole-state snapshots.

/// Maximum number of past snapshots retained.
pub const MAX_HISTORY: usize = 50;

/// Snapshot history with a single timeline.
///
/// Holds the current state plus bounded past and future stacks. Pushing a
/// state that is structurally equal to the present is a no-op, so callers
/// can push unconditionally at gesture end without polluting the timeline.
#[derive(Debug, Clone)]
pub struct History<T: Clone + PartialEq> {
    past: Vec<T>,
    present: T,
    future: Vec<T>,
}

impl<T: Clone + PartialEq> History<T> {
    /// Create a history seeded with an initial state.
    pub fn new(initial: T) -> Self {
        Self {
            past: Vec::new(),
            present: initial,
            future: Vec::new(),
        }
    }

    /// The current state.
    pub fn present(&self) -> &T {
        &self.present
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of undoable snapshots.
    pub fn depth(&self) -> usize {
        self.past.len()
    }

    /// Record a new state, invalidating any redo branch.
    ///
    /// Equal states are ignored. The past is bounded: once full, the
    /// oldest snapshot is evicted.
    pub fn push(&mut self, state: T) {
        if state == self.present {
            return;
        }
        self.past.push(std::mem::replace(&mut self.present, state));
        if self.past.len() > MAX_HISTORY {
            self.past.remove(0);
        }
        self.future.clear();
    }

    /// Overwrite the present without touching past or future.
    ///
    /// Used for transient states during a gesture, where only the final
    /// state should become an undo step.
    pub fn replace_present(&mut self, state: T) {
        self.present = state;
    }

    /// Step back one snapshot. Returns false at the boundary.
    pub fn undo(&mut self) -> bool {
        match self.past.pop() {
            Some(previous) => {
                self.future.push(std::mem::replace(&mut self.present, previous));
                true
            }
            None => false,
        }
    }

    /// Step forward one snapshot. Returns false at the boundary.
    pub fn redo(&mut self) -> bool {
        match self.future.pop() {
            Some(next) => {
                self.past.push(std::mem::replace(&mut self.present, next));
                true
            }
            None => false,
        }
    }

    /// Discard everything and restart from a new initial state.
    pub fn reset(&mut self, initial: T) {
        self.past.clear();
        self.future.clear();
        self.present = initial;
    }
}
