//! Data models shared across crates

pub mod location;
pub mod pod;

pub use location::{DayHours, LocationSchedule};
pub use pod::{Pod, PodKind, PodState};
