// Session state module
//
// This module provides the StateManager which owns the SessionState for the
// one session a process runs and emits change events to subscribers.

use crate::models::{SessionPhase, SessionState};
use tokio::sync::broadcast;

/// Change events emitted when session state is modified
#[derive(Clone, Debug, PartialEq)]
pub enum StateChange {
    /// The session moved to a new phase
    PhaseChanged {
        from: SessionPhase,
        to: SessionPhase,
    },

    /// A question was presented
    QuestionAsked {
        number: usize,
        question: String,
    },

    /// The score went up
    ScoreChanged {
        correct: usize,
        total: usize,
    },

    /// The session reached a terminal phase
    SessionEnded {
        correct: usize,
        total: usize,
        timed_out: bool,
    },
}

/// Owner of the [`SessionState`], with event emission
///
/// Only the session controller holds a `StateManager`, so mutation goes
/// through `&mut self` without locking. Other parties observe the session
/// through [`subscribe()`](Self::subscribe).
pub struct StateManager {
    state: SessionState,

    /// Broadcast channel for emitting state change events
    state_tx: broadcast::Sender<StateChange>,
}

impl StateManager {
    /// Create a StateManager for a session of `total` problems
    ///
    /// # Returns
    /// A new StateManager with a broadcast channel buffer of 100 events
    pub fn new(total: usize) -> Self {
        let (state_tx, _) = broadcast::channel(100);
        Self {
            state: SessionState::new(total),
            state_tx,
        }
    }

    /// Get a copy of the current state
    pub fn snapshot(&self) -> SessionState {
        self.state.clone()
    }

    /// Execute a function with read access to the state
    ///
    /// # Example
    /// ```ignore
    /// let correct = state_manager.read(|state| state.correct);
    /// ```
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SessionState) -> R,
    {
        f(&self.state)
    }

    /// Update the state and emit change events
    ///
    /// 1. Captures the old state
    /// 2. Applies the update function
    /// 3. Detects what changed
    /// 4. Emits appropriate events
    ///
    /// # Returns
    /// A vector of StateChange events that were emitted
    pub fn update<F>(&mut self, update_fn: F) -> Vec<StateChange>
    where
        F: FnOnce(&mut SessionState),
    {
        let old_state = self.state.clone();

        update_fn(&mut self.state);

        let changes = Self::detect_changes(&old_state, &self.state);

        for change in &changes {
            // Ignore send errors - it's OK if no one is listening
            let _ = self.state_tx.send(change.clone());
        }

        changes
    }

    /// Subscribe to state change events
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.state_tx.subscribe()
    }

    fn detect_changes(old: &SessionState, new: &SessionState) -> Vec<StateChange> {
        let mut changes = Vec::new();

        if old.asked != new.asked {
            changes.push(StateChange::QuestionAsked {
                number: new.asked,
                question: new.current_question.clone().unwrap_or_default(),
            });
        }

        if old.phase != new.phase {
            tracing::debug!("Session phase: {} -> {}", old.phase, new.phase);
            changes.push(StateChange::PhaseChanged {
                from: old.phase,
                to: new.phase,
            });
        }

        if old.correct != new.correct {
            changes.push(StateChange::ScoreChanged {
                correct: new.correct,
                total: new.total,
            });
        }

        if !old.is_over() && new.is_over() {
            changes.push(StateChange::SessionEnded {
                correct: new.correct,
                total: new.total,
                timed_out: new.phase == SessionPhase::TimedOut,
            });
        }

        changes
    }

    // Convenience methods for the session cycle

    /// Present the next question
    pub fn begin_question(&mut self, question: &str) -> Vec<StateChange> {
        self.update(|state| {
            state.asked += 1;
            state.current_question = Some(question.to_string());
            state.phase = SessionPhase::Asking;
        })
    }

    /// Score the answer to the current question
    pub fn record_answer(&mut self, correct: bool) -> Vec<StateChange> {
        self.update(|state| {
            if correct {
                state.correct += 1;
            }
            state.current_question = None;
            state.phase = SessionPhase::Scored;
        })
    }

    /// Get ready for the next question
    pub fn ready(&mut self) -> Vec<StateChange> {
        self.update(|state| state.phase = SessionPhase::Ready)
    }

    /// End the session because the timer fired
    pub fn time_out(&mut self) -> Vec<StateChange> {
        self.update(|state| {
            state.current_question = None;
            state.phase = SessionPhase::TimedOut;
        })
    }

    /// End the session after the last problem
    pub fn finish(&mut self) -> Vec<StateChange> {
        self.update(|state| state.phase = SessionPhase::Finished)
    }
}
