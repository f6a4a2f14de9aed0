use std::fmt;

/// Where the session controller is in its per-question cycle.
///
/// `Ready → Asking → (Scored | TimedOut) → Ready | Finished`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Ready,
    Asking,
    Scored,
    TimedOut,
    Finished,
}

impl SessionPhase {
    /// `TimedOut` and `Finished` end the session.
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionPhase::TimedOut | SessionPhase::Finished)
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionPhase::Ready => "ready",
            SessionPhase::Asking => "asking",
            SessionPhase::Scored => "scored",
            SessionPhase::TimedOut => "timed out",
            SessionPhase::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Score and progress of the single session a process runs.
///
/// Owned by the session controller through
/// [`StateManager`](crate::state::StateManager); nothing else mutates it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Pool size at session start; never changes afterwards
    pub total: usize,

    /// Correct answers so far
    pub correct: usize,

    /// Questions presented so far
    pub asked: usize,

    pub phase: SessionPhase,

    /// Question currently waiting for an answer
    pub current_question: Option<String>,
}

impl SessionState {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Every problem was answered before the timer fired
    Completed,
    /// The timer fired first; remaining problems were abandoned
    TimedOut,
}

/// Final tally handed back to the caller once the session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome {
    pub correct: usize,
    pub total: usize,
    pub asked: usize,
    pub end: SessionEnd,
}

impl SessionOutcome {
    pub fn timed_out(&self) -> bool {
        self.end == SessionEnd::TimedOut
    }
}

impl fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "You scored {} out of {}.", self.correct, self.total)
    }
}
