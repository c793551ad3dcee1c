use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} value: '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! string_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(ParseEnumError { kind: $kind, value: other.to_string() }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum!(WorkItemStatus, "work item status", {
    Draft => "draft",
    NotStarted => "not_started",
    InProgress => "in_progress",
    WaitingOnNgo => "waiting_on_ngo",
    WaitingOnHpg => "waiting_on_hpg",
    Submitted => "submitted",
    UnderReview => "under_review",
    Approved => "approved",
    Rejected => "rejected",
    Complete => "complete",
    Canceled => "canceled",
});

string_enum!(EvidenceStatus, "evidence status", {
    Missing => "missing",
    Uploaded => "uploaded",
    UnderReview => "under_review",
    Approved => "approved",
});

string_enum!(Priority, "priority", {
    Low => "low",
    Medium => "medium",
    High => "high",
});

// The thirteen department areas work items are routed through.
string_enum!(Module, "module", {
    Finance => "finance",
    Hr => "hr",
    It => "it",
    Legal => "legal",
    Compliance => "compliance",
    Development => "development",
    Partnerships => "partnerships",
    Curriculum => "curriculum",
    Operations => "operations",
    Communications => "communications",
    Facilities => "facilities",
    Procurement => "procurement",
    Governance => "governance",
});

string_enum!(NgoStatus, "NGO status", {
    Prospect => "prospect",
    Onboarding => "onboarding",
    Active => "active",
    AtRisk => "at_risk",
    Offboarding => "offboarding",
    Closed => "closed",
});

impl Module {
    /// Human label used by report bucketing and list views.
    pub fn label(self) -> &'static str {
        match self {
            Module::Finance => "Finance",
            Module::Hr => "HR",
            Module::It => "IT",
            Module::Legal => "Legal",
            Module::Compliance => "Compliance",
            Module::Development => "Development",
            Module::Partnerships => "Partnerships",
            Module::Curriculum => "Curriculum",
            Module::Operations => "Operations",
            Module::Communications => "Communications",
            Module::Facilities => "Facilities",
            Module::Procurement => "Procurement",
            Module::Governance => "Governance",
        }
    }
}

impl NgoStatus {
    pub fn label(self) -> &'static str {
        match self {
            NgoStatus::Prospect => "Prospect",
            NgoStatus::Onboarding => "Onboarding",
            NgoStatus::Active => "Active",
            NgoStatus::AtRisk => "At-Risk",
            NgoStatus::Offboarding => "Offboarding",
            NgoStatus::Closed => "Closed",
        }
    }
}

impl WorkItemStatus {
    /// Terminal states admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, WorkItemStatus::Complete | WorkItemStatus::Canceled)
    }

    /// An item still counts as open until it completes or is canceled.
    pub fn is_open(self) -> bool {
        !self.is_terminal()
    }

    /// The enforced transition table. Cancellation is allowed from any
    /// non-terminal state; everything else follows the progression
    /// draft -> not_started -> in_progress -> waiting -> submitted ->
    /// under_review -> approved/rejected -> complete.
    pub fn can_transition_to(self, next: WorkItemStatus) -> bool {
        use WorkItemStatus::*;

        if self == next {
            return false;
        }
        if next == Canceled {
            return !self.is_terminal();
        }
        matches!(
            (self, next),
            (Draft, NotStarted)
                | (Draft, InProgress)
                | (NotStarted, InProgress)
                | (InProgress, WaitingOnNgo)
                | (InProgress, WaitingOnHpg)
                | (InProgress, Submitted)
                | (WaitingOnNgo, InProgress)
                | (WaitingOnNgo, Submitted)
                | (WaitingOnHpg, InProgress)
                | (WaitingOnHpg, Submitted)
                | (Submitted, UnderReview)
                | (UnderReview, Approved)
                | (UnderReview, Rejected)
                | (Approved, Complete)
                | (Rejected, InProgress)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in WorkItemStatus::ALL {
            assert_eq!(status.as_str().parse::<WorkItemStatus>().unwrap(), *status);
        }
        assert!("blocked".parse::<WorkItemStatus>().is_err());
    }

    #[test]
    fn cancel_reachable_from_any_non_terminal_state() {
        for status in WorkItemStatus::ALL {
            let allowed = status.can_transition_to(WorkItemStatus::Canceled);
            assert_eq!(allowed, !status.is_terminal(), "from {status}");
        }
    }

    #[test]
    fn terminal_states_admit_nothing() {
        for next in WorkItemStatus::ALL {
            assert!(!WorkItemStatus::Complete.can_transition_to(*next));
            assert!(!WorkItemStatus::Canceled.can_transition_to(*next));
        }
    }

    #[test]
    fn typical_progression_is_legal() {
        use WorkItemStatus::*;
        let path = [
            Draft, NotStarted, InProgress, WaitingOnNgo, InProgress, Submitted, UnderReview,
            Approved, Complete,
        ];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn illegal_jumps_are_rejected() {
        use WorkItemStatus::*;
        assert!(!Draft.can_transition_to(Complete));
        assert!(!NotStarted.can_transition_to(Approved));
        assert!(!Submitted.can_transition_to(Complete));
        assert!(!Rejected.can_transition_to(Approved));
        // Self-transition is a no-op, not a legal move.
        assert!(!InProgress.can_transition_to(InProgress));
    }

    #[test]
    fn rejected_items_can_be_reworked() {
        assert!(WorkItemStatus::Rejected.can_transition_to(WorkItemStatus::InProgress));
    }
}
