use serde::{Deserialize, Serialize};

/// how a [`super::TravelTimesForStopPath`] was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelTimeProvenance {
    /// synthesized from published schedule times
    Schedule,
    /// learned from observed vehicle data (e.g. GPS)
    Observed,
}

impl TravelTimeProvenance {
    pub fn is_schedule_based(&self) -> bool {
        matches!(self, TravelTimeProvenance::Schedule)
    }
}
