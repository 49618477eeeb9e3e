//! Shared types for the pod seating system
//!
//! Common types used by the pod server and its clients: pod and location
//! models, the order fulfillment state machine, lifecycle events and the
//! check-in response types.

pub mod models;
pub mod seating;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use seating::{CheckInOutcome, FulfillmentStatus, LifecycleEvent, PaymentStatus};
