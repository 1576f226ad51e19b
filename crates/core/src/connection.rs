//! Student-to-ustaz connection statuses and the request state machine.
//!
//! A connection starts `PENDING` when the student asks; the ustaz then
//! accepts or rejects it exactly once.

use crate::error::CoreError;

pub const STATUS_PENDING: &str = "PENDING";
pub const STATUS_ACCEPTED: &str = "ACCEPTED";
pub const STATUS_REJECTED: &str = "REJECTED";

/// Statuses an ustaz may choose when answering a request.
const DECISIONS: &[&str] = &[STATUS_ACCEPTED, STATUS_REJECTED];

/// Validate the `status` sent to the handle-request endpoint.
pub fn validate_decision(status: &str) -> Result<(), CoreError> {
    if DECISIONS.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status '{status}'. Must be one of: {DECISIONS:?}"
        )))
    }
}

/// Returns the statuses reachable from `from`.
///
/// Accepted and rejected connections are terminal.
pub fn valid_transitions(from: &str) -> &'static [&'static str] {
    match from {
        STATUS_PENDING => DECISIONS,
        _ => &[],
    }
}

/// Validate a status change, returning a conflict for already-decided requests.
pub fn validate_transition(from: &str, to: &str) -> Result<(), CoreError> {
    if valid_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Connection request is already {from}; cannot change it to {to}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn pending_can_be_accepted_or_rejected() {
        assert!(validate_transition(STATUS_PENDING, STATUS_ACCEPTED).is_ok());
        assert!(validate_transition(STATUS_PENDING, STATUS_REJECTED).is_ok());
    }

    #[test]
    fn decided_requests_are_terminal() {
        assert!(valid_transitions(STATUS_ACCEPTED).is_empty());
        assert!(valid_transitions(STATUS_REJECTED).is_empty());
        assert_matches!(
            validate_transition(STATUS_ACCEPTED, STATUS_REJECTED),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn pending_is_not_a_decision() {
        assert!(validate_decision(STATUS_PENDING).is_err());
        assert!(validate_transition(STATUS_PENDING, STATUS_PENDING).is_err());
    }

    #[test]
    fn unknown_decision_is_rejected() {
        assert_matches!(validate_decision("MAYBE"), Err(CoreError::Validation(_)));
    }
}
