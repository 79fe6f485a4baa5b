//! Per-stage status and lookup tickets.

use std::fmt;

/// Status of one pipeline stage.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum StageStatus<T> {
    /// Nothing computed yet.
    #[default]
    Idle,
    Computing,
    Ready(T),
    /// Computation failed; the message is for display.
    Failed(String),
}

impl<T> StageStatus<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            StageStatus::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            StageStatus::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, StageStatus::Ready(_))
    }

    pub fn is_computing(&self) -> bool {
        matches!(self, StageStatus::Computing)
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            StageStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StageStatus::Idle => "idle",
            StageStatus::Computing => "computing",
            StageStatus::Ready(_) => "ready",
            StageStatus::Failed(_) => "failed",
        }
    }
}

/// Identifies the route lookup a result belongs to.  Results carrying an
/// older generation than the session's current one are discarded.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LookupTicket(pub(crate) u64);

impl LookupTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LookupTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lookup#{}", self.0)
    }
}
