//! Seating domain types
//!
//! The order fulfillment state machine, lifecycle events and the check-in
//! response types shared between the scheduler core and the HTTP API.

pub mod event;
pub mod status;
pub mod types;

pub use event::LifecycleEvent;
pub use status::{FulfillmentStatus, PaymentStatus};
pub use types::{ArrivalPreference, BoardEntry, BoardView, CheckInOutcome, SeatingOrder};
