//! Status vocabularies for assignments, validated in code.
//!
//! Statuses are stored as plain text columns; handlers call
//! `can_transition` before persisting a change so the database never
//! holds a status the workflow cannot reach.

use slate_core::error::CoreError;

/// Lifecycle of a talent assignment, from first proposal through the
/// negotiation chain to completed work. Character assignments usually
/// skip `in_progress` (a confirmed voice actor is simply done when the
/// recording is), so `confirmed` may move straight to `completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentStatus {
    Proposed,
    Contacted,
    Negotiating,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl AssignmentStatus {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "proposed" => Ok(Self::Proposed),
            "contacted" => Ok(Self::Contacted),
            "negotiating" => Ok(Self::Negotiating),
            "confirmed" => Ok(Self::Confirmed),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(CoreError::Validation(format!(
                "unknown assignment status: {other}"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Proposed => "proposed",
            Self::Contacted => "contacted",
            Self::Negotiating => "negotiating",
            Self::Confirmed => "confirmed",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Forward moves along the negotiation chain, an optional
    /// `in_progress` leg, and cancellation from any non-terminal state.
    pub fn can_transition(&self, to: Self) -> bool {
        use AssignmentStatus::*;
        match (self, to) {
            (Proposed, Contacted)
            | (Contacted, Negotiating)
            | (Negotiating, Confirmed)
            | (Confirmed, InProgress)
            | (Confirmed, Completed)
            | (InProgress, Completed) => true,
            (Completed | Cancelled, _) => false,
            (_, Cancelled) => true,
            _ => false,
        }
    }
}

/// Lifecycle of a department work assignment. Review gates completion:
/// approved work closes out, rejected work goes back in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkStatus {
    Pending,
    InProgress,
    Review,
    Approved,
    Rejected,
    Completed,
}

impl WorkStatus {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "review" => Ok(Self::Review),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "completed" => Ok(Self::Completed),
            other => Err(CoreError::Validation(format!(
                "unknown work status: {other}"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Review => "review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }

    pub fn can_transition(&self, to: Self) -> bool {
        use WorkStatus::*;
        matches!(
            (self, to),
            (Pending, InProgress)
                | (InProgress, Review)
                | (Review, Approved)
                | (Review, Rejected)
                | (Approved, Completed)
                | (Rejected, InProgress)
        )
    }
}
