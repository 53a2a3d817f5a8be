// ABOUTME: Approval workflow shared by change requests and financial transactions
// ABOUTME: Pending is the only non-terminal state; it may move once to Approved or Rejected

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Status of anything that needs sign-off
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApprovalStatus::Pending => write!(f, "Pending"),
            ApprovalStatus::Approved => write!(f, "Approved"),
            ApprovalStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

/// Reasons a status change is refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("status is already {0} and can no longer change")]
    AlreadyDecided(ApprovalStatus),
    #[error("cannot move to {0}; target must be Approved or Rejected")]
    InvalidTarget(ApprovalStatus),
}

impl ApprovalStatus {
    /// Approved and Rejected are final
    pub fn is_terminal(self) -> bool {
        !matches!(self, ApprovalStatus::Pending)
    }

    /// Check a transition and return the new status.
    ///
    /// A decided status is reported before a bad target, so `Approved -> Pending`
    /// fails with [`TransitionError::AlreadyDecided`].
    pub fn transition(self, target: ApprovalStatus) -> Result<ApprovalStatus, TransitionError> {
        if self.is_terminal() {
            return Err(TransitionError::AlreadyDecided(self));
        }

        match target {
            ApprovalStatus::Approved | ApprovalStatus::Rejected => Ok(target),
            ApprovalStatus::Pending => Err(TransitionError::InvalidTarget(target)),
        }
    }
}
