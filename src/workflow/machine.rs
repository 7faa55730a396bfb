//! The approval state machine, as a pure table.
//!
//! The server is the authority on every transition; this table exists
//! so the UI can enable exactly the actions the signed-in role could
//! take, and so tests can pin the rules without a server.

use serde::{Deserialize, Serialize};

use crate::models::{Role, TimetableStatus};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TransitionEvent {
    SendForApproval,
    Approve,
    Reject,
}

impl TransitionEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionEvent::SendForApproval => "send for approval",
            TransitionEvent::Approve => "approve",
            TransitionEvent::Reject => "reject",
        }
    }
}

/// The role allowed to trigger an event.
pub fn required_role(event: TransitionEvent) -> Role {
    match event {
        TransitionEvent::SendForApproval => Role::Scheduler,
        TransitionEvent::Approve | TransitionEvent::Reject => Role::Approver,
    }
}

pub fn permitted(role: Role, event: TransitionEvent) -> bool {
    role == required_role(event)
}

/// Where an event takes a timetable, if it applies to the current
/// status at all. Rejection reverts to draft; there is no persisted
/// rejected state.
pub fn next_status(current: TimetableStatus, event: TransitionEvent) -> Option<TimetableStatus> {
    match (current, event) {
        (TimetableStatus::Draft, TransitionEvent::SendForApproval) => Some(TimetableStatus::Pending),
        (TimetableStatus::Pending, TransitionEvent::Approve) => Some(TimetableStatus::Approved),
        (TimetableStatus::Pending, TransitionEvent::Reject) => Some(TimetableStatus::Draft),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_table() {
        assert_eq!(
            next_status(TimetableStatus::Draft, TransitionEvent::SendForApproval),
            Some(TimetableStatus::Pending)
        );
        assert_eq!(
            next_status(TimetableStatus::Pending, TransitionEvent::Approve),
            Some(TimetableStatus::Approved)
        );
        assert_eq!(
            next_status(TimetableStatus::Pending, TransitionEvent::Reject),
            Some(TimetableStatus::Draft)
        );
    }

    #[test]
    fn events_outside_the_table_do_nothing() {
        assert_eq!(
            next_status(TimetableStatus::Approved, TransitionEvent::Approve),
            None
        );
        assert_eq!(
            next_status(TimetableStatus::Draft, TransitionEvent::Approve),
            None
        );
        assert_eq!(
            next_status(TimetableStatus::Pending, TransitionEvent::SendForApproval),
            None
        );
        assert_eq!(
            next_status(TimetableStatus::Approved, TransitionEvent::Reject),
            None
        );
    }

    #[test]
    fn role_gates() {
        assert!(permitted(Role::Scheduler, TransitionEvent::SendForApproval));
        assert!(!permitted(Role::Approver, TransitionEvent::SendForApproval));
        assert!(permitted(Role::Approver, TransitionEvent::Approve));
        assert!(permitted(Role::Approver, TransitionEvent::Reject));
        assert!(!permitted(Role::Scheduler, TransitionEvent::Approve));
        assert!(!permitted(Role::Readonly, TransitionEvent::Reject));
    }
}
