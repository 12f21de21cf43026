//! Task state definitions for one target in a batch

use std::fmt;

/// Represents the current state of a task in a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    // ===== Active States =====
    /// Task is spawned and waiting for a slot
    Pending,

    /// Task holds a slot and is fetching or hashing
    Running,

    // ===== Terminal States =====
    /// Task produced a result
    Succeeded,

    /// Task ended without a result; the batch continues
    Skipped,
}

impl TaskState {
    /// Returns true if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Skipped)
    }

    /// Checks whether moving from this state to `next` is allowed
    ///
    /// Terminal states are absorbing. A pending task may be skipped without
    /// running when its slot pool has been closed.
    pub fn can_transition_to(&self, next: TaskState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Running)
                | (Self::Pending, Self::Skipped)
                | (Self::Running, Self::Succeeded)
                | (Self::Running, Self::Skipped)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks the state of one task and traces every transition
#[derive(Debug)]
pub(crate) struct TaskTracker<'a> {
    target: &'a str,
    state: TaskState,
}

impl<'a> TaskTracker<'a> {
    pub(crate) fn new(target: &'a str) -> Self {
        Self {
            target,
            state: TaskState::Pending,
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> TaskState {
        self.state
    }

    /// Moves to `next`; invalid transitions are ignored and logged
    pub(crate) fn advance(&mut self, next: TaskState) {
        if !self.state.can_transition_to(next) {
            tracing::error!(
                input = %self.target,
                from = %self.state,
                to = %next,
                "Invalid task state transition"
            );
            return;
        }

        tracing::trace!(input = %self.target, from = %self.state, to = %next, "Task state");
        self.state = next;
    }
}
