//! Order fulfillment state machine
//!
//! A closed transition table replaces the loosely validated status strings
//! of older systems: every move goes through [`FulfillmentStatus::can_transition`]
//! and illegal moves are rejected at the boundary, not by caller discipline.

use serde::{Deserialize, Serialize};

/// Payment state of an order, owned by the external payment processor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

/// Fulfillment state of an order
///
/// ```text
/// PENDING_PAYMENT → PAID → {QUEUED → ASSIGNED} → PREPPING → READY → SERVING → COMPLETED
///                              ↑________|
///                              (never reversed)
/// ```
///
/// `CANCELLED` and `PAYMENT_FAILED` are reachable from any pre-`PREPPING`
/// state. Once the kitchen has started (`PREPPING`), the order can only
/// move forward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FulfillmentStatus {
    PendingPayment,
    Paid,
    Queued,
    Assigned,
    Prepping,
    Ready,
    Serving,
    Completed,
    Cancelled,
    PaymentFailed,
}

impl FulfillmentStatus {
    /// Transition table. `QUEUED → ASSIGNED` is legal, the reverse is not.
    pub fn can_transition(self, to: FulfillmentStatus) -> bool {
        use FulfillmentStatus::*;
        match (self, to) {
            (PendingPayment, Paid) => true,
            (Paid, Queued) | (Paid, Assigned) => true,
            (Queued, Assigned) => true,
            (Assigned, Prepping) => true,
            (Prepping, Ready) => true,
            (Ready, Serving) => true,
            (Serving, Completed) => true,
            // Cancellation and payment failure only before the kitchen starts
            (from, Cancelled) | (from, PaymentFailed) => from.is_pre_prepping(),
            _ => false,
        }
    }

    /// States before food preparation has begun
    pub fn is_pre_prepping(self) -> bool {
        use FulfillmentStatus::*;
        matches!(self, PendingPayment | Paid | Queued | Assigned)
    }

    pub fn is_terminal(self) -> bool {
        use FulfillmentStatus::*;
        matches!(self, Completed | Cancelled | PaymentFailed)
    }

    /// States shown as "in progress" on the queue board
    pub fn is_in_progress(self) -> bool {
        use FulfillmentStatus::*;
        matches!(self, Assigned | Prepping | Ready | Serving)
    }
}

#[cfg(test)]
mod tests {
    use super::FulfillmentStatus::*;

    #[test]
    fn test_forward_path_is_legal() {
        let path = [
            PendingPayment,
            Paid,
            Queued,
            Assigned,
            Prepping,
            Ready,
            Serving,
            Completed,
        ];
        for pair in path.windows(2) {
            assert!(
                pair[0].can_transition(pair[1]),
                "{:?} -> {:?} should be legal",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_assigned_never_regresses_to_queued() {
        assert!(!Assigned.can_transition(Queued));
        assert!(!Prepping.can_transition(Queued));
        assert!(!Prepping.can_transition(Assigned));
    }

    #[test]
    fn test_cancel_only_before_prepping() {
        assert!(Paid.can_transition(Cancelled));
        assert!(Queued.can_transition(Cancelled));
        assert!(Assigned.can_transition(Cancelled));
        assert!(!Prepping.can_transition(Cancelled));
        assert!(!Serving.can_transition(Cancelled));
        assert!(!Completed.can_transition(Cancelled));
    }

    #[test]
    fn test_terminal_states_are_dead_ends() {
        for terminal in [Completed, Cancelled, PaymentFailed] {
            for to in [
                PendingPayment,
                Paid,
                Queued,
                Assigned,
                Prepping,
                Ready,
                Serving,
                Completed,
                Cancelled,
                PaymentFailed,
            ] {
                assert!(
                    !terminal.can_transition(to),
                    "{:?} -> {:?} must be illegal",
                    terminal,
                    to
                );
            }
        }
    }

    #[test]
    fn test_paid_may_skip_queue_when_pod_free() {
        assert!(Paid.can_transition(Assigned));
    }
}
