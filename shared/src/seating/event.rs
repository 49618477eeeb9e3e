//! Lifecycle events
//!
//! One event per committed fulfillment transition, broadcast to the
//! notification dispatcher after the scheduling mutation commits.

use serde::{Deserialize, Serialize};

use super::FulfillmentStatus;

/// A committed fulfillment transition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LifecycleEvent {
    pub order_id: String,
    pub location_id: i64,
    pub from: FulfillmentStatus,
    pub to: FulfillmentStatus,
    /// Pod numbers touched by this transition (assignment, release)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pods: Vec<u32>,
    /// Unix millis
    pub timestamp: i64,
}

impl LifecycleEvent {
    pub fn new(
        order_id: impl Into<String>,
        location_id: i64,
        from: FulfillmentStatus,
        to: FulfillmentStatus,
        pods: Vec<u32>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            location_id,
            from,
            to,
            pods,
            timestamp: crate::util::now_millis(),
        }
    }
}
