//! Contract lifecycle rules.
//!
//! The broker (admin) gatekeeps only the `submitted` boundary; once a
//! contract is approved the two counterparties self-manage activation and
//! closure. Every rule here is pure — the store layer applies them inside
//! a transaction with a compare-and-swap on the source status.

use crate::models::contracts::Status;
use crate::models::profiles::Role;

/// The single legal source status for a given transition target.
///
/// Returns `None` when nothing may transition *into* the target:
/// `draft` is never entered, and `submitted` is only reached at creation.
pub fn required_source(target: Status) -> Option<Status> {
    match target {
        Status::Approved | Status::Rejected => Some(Status::Submitted),
        Status::Active => Some(Status::Approved),
        Status::Completed | Status::Terminated => Some(Status::Active),
        Status::Draft | Status::Submitted => None,
    }
}

/// Whether `role` may drive a contract into `target`.
///
/// Admin decides approval/rejection; the farmer and contractor parties
/// handle activation and closure between themselves. Party *membership*
/// (the caller actually being the farmer or contractor on the row) is
/// checked separately by the authorization layer.
pub fn actor_may_transition(role: Role, target: Status) -> bool {
    match target {
        Status::Approved | Status::Rejected => role == Role::Admin,
        Status::Active | Status::Completed | Status::Terminated => {
            matches!(role, Role::Farmer | Role::Contractor)
        }
        Status::Draft | Status::Submitted => false,
    }
}

/// Terminal statuses expose no outgoing edge for any actor.
pub fn is_terminal(status: Status) -> bool {
    matches!(
        status,
        Status::Rejected | Status::Completed | Status::Terminated
    )
}

/// Admin notes may only be attached on the admin edges out of `submitted`.
pub fn accepts_admin_notes(target: Status) -> bool {
    matches!(target, Status::Approved | Status::Rejected)
}

/// Full edge check: does the table contain `from → to` for `role`?
pub fn transition_allowed(role: Role, from: Status, to: Status) -> bool {
    required_source(to) == Some(from) && actor_may_transition(role, to)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Status; 7] = [
        Status::Draft,
        Status::Submitted,
        Status::Approved,
        Status::Rejected,
        Status::Active,
        Status::Completed,
        Status::Terminated,
    ];

    #[test]
    fn only_table_edges_are_allowed() {
        let legal = [
            (Role::Admin, Status::Submitted, Status::Approved),
            (Role::Admin, Status::Submitted, Status::Rejected),
            (Role::Farmer, Status::Approved, Status::Active),
            (Role::Contractor, Status::Approved, Status::Active),
            (Role::Farmer, Status::Active, Status::Completed),
            (Role::Contractor, Status::Active, Status::Completed),
            (Role::Farmer, Status::Active, Status::Terminated),
            (Role::Contractor, Status::Active, Status::Terminated),
        ];

        for role in [Role::Farmer, Role::Contractor, Role::Admin] {
            for from in ALL {
                for to in ALL {
                    let expected = legal.contains(&(role, from, to));
                    assert_eq!(
                        transition_allowed(role, from, to),
                        expected,
                        "{role:?}: {from:?} -> {to:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn only_admin_moves_out_of_submitted() {
        for to in [Status::Approved, Status::Rejected] {
            assert!(transition_allowed(Role::Admin, Status::Submitted, to));
            assert!(!transition_allowed(Role::Farmer, Status::Submitted, to));
            assert!(!transition_allowed(Role::Contractor, Status::Submitted, to));
        }
    }

    #[test]
    fn admin_never_drives_execution_edges() {
        for to in [Status::Active, Status::Completed, Status::Terminated] {
            for from in ALL {
                assert!(!transition_allowed(Role::Admin, from, to));
            }
        }
    }

    #[test]
    fn terminal_states_have_no_outgoing_edges() {
        for from in [Status::Rejected, Status::Completed, Status::Terminated] {
            assert!(is_terminal(from));
            for role in [Role::Farmer, Role::Contractor, Role::Admin] {
                for to in ALL {
                    assert!(!transition_allowed(role, from, to));
                }
            }
        }
    }

    #[test]
    fn nothing_transitions_into_draft_or_submitted() {
        assert_eq!(required_source(Status::Draft), None);
        assert_eq!(required_source(Status::Submitted), None);
    }

    #[test]
    fn notes_only_on_admin_edges() {
        assert!(accepts_admin_notes(Status::Approved));
        assert!(accepts_admin_notes(Status::Rejected));
        for to in [Status::Active, Status::Completed, Status::Terminated] {
            assert!(!accepts_admin_notes(to));
        }
    }

    /// The wheat scenario: submitted → approved → active → completed,
    /// then every further move is refused.
    #[test]
    fn full_lifecycle_walk() {
        let mut status = Status::Submitted;

        assert!(transition_allowed(Role::Admin, status, Status::Approved));
        status = Status::Approved;

        assert!(transition_allowed(Role::Contractor, status, Status::Active));
        status = Status::Active;

        assert!(transition_allowed(Role::Contractor, status, Status::Completed));
        status = Status::Completed;

        for role in [Role::Farmer, Role::Contractor, Role::Admin] {
            for to in ALL {
                assert!(!transition_allowed(role, status, to));
            }
        }
    }
}
