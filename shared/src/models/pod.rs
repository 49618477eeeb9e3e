//! Pod Model
//!
//! A pod is the physical dining unit a guest occupies while their order is
//! prepared and served. Two adjacent pods can be paired into a dual unit
//! that is always offered and occupied together.

use serde::{Deserialize, Serialize};

/// Pod kind (单人舱 / 双人联舱)
///
/// A dual pod cannot exist unpaired: the partner number is part of the
/// variant, and layout loading verifies the pairing is symmetric.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PodKind {
    Single,
    DualHalf { partner: u32 },
}

impl PodKind {
    pub fn is_dual(&self) -> bool {
        matches!(self, PodKind::DualHalf { .. })
    }

    /// Partner pod number for a dual half
    pub fn partner(&self) -> Option<u32> {
        match self {
            PodKind::Single => None,
            PodKind::DualHalf { partner } => Some(*partner),
        }
    }
}

/// Pod occupancy state
///
/// `Occupied` → `Cleaning` on release; a pod only returns to `Available`
/// after the explicit cleaning-complete signal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PodState {
    #[default]
    Available,
    Occupied,
    Cleaning,
    OutOfService,
}

/// Pod entity (餐舱)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pod {
    /// Pod number, unique within a location
    pub number: u32,
    pub kind: PodKind,
    pub state: PodState,
}

impl Pod {
    pub fn new(number: u32, kind: PodKind) -> Self {
        Self {
            number,
            kind,
            state: PodState::Available,
        }
    }

    pub fn is_available(&self) -> bool {
        self.state == PodState::Available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dual_half_carries_partner() {
        let pod = Pod::new(3, PodKind::DualHalf { partner: 4 });
        assert!(pod.kind.is_dual());
        assert_eq!(pod.kind.partner(), Some(4));
    }

    #[test]
    fn test_single_has_no_partner() {
        let pod = Pod::new(1, PodKind::Single);
        assert!(!pod.kind.is_dual());
        assert_eq!(pod.kind.partner(), None);
    }
}
