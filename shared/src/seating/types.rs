//! Shared seating types: orders, check-in outcomes, board read model

use serde::{Deserialize, Serialize};

use super::{FulfillmentStatus, PaymentStatus};

/// Guest arrival preference, fixed at order time
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArrivalPreference {
    #[default]
    Asap,
    Offset {
        minutes: u32,
    },
}

/// A seated order as tracked by the scheduler
///
/// Invariant: `assigned_pods` is non-empty only while the order holds an
/// assignment; an order is never simultaneously queued and assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatingOrder {
    pub order_id: String,
    pub location_id: i64,
    /// Guest contact data — private, never exposed by the board read model
    pub guest_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_phone: Option<String>,
    /// Dual pairs seat two; anything larger is rejected at intake
    pub party_size: u32,
    pub arrival: ArrivalPreference,
    pub payment_status: PaymentStatus,
    pub status: FulfillmentStatus,
    /// Assigned pod numbers: one for a single, both halves for a dual pair
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assigned_pods: Vec<u32>,
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_in_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_confirmed_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
}

impl SeatingOrder {
    pub fn requires_dual(&self) -> bool {
        self.party_size > 1
    }
}

/// Check-in result. Both variants are successful outcomes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckInOutcome {
    Assigned {
        pods: Vec<u32>,
    },
    Queued {
        /// 1-based position, derived from the queue, not authoritative
        position: u32,
        /// Advisory estimate from the rolling turnover average
        estimated_wait_minutes: u32,
    },
}

/// One row on the public queue board (无隐私数据)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardEntry {
    /// Short code derived from the order ID; guests match it to their receipt
    pub code: String,
    pub status: FulfillmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pods: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_wait_minutes: Option<u32>,
}

/// Queue board snapshot for one location, polled by downstream displays
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardView {
    pub location_id: i64,
    pub queued: Vec<BoardEntry>,
    pub in_progress: Vec<BoardEntry>,
    /// Snapshot time, Unix millis
    pub as_of: i64,
}
