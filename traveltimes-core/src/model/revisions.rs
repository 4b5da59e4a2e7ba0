use serde::{Deserialize, Serialize};

/// the revisions currently considered authoritative by the persistence layer.
/// read once at the start of a run. promoting a new travel times revision to
/// active happens outside of this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveRevisions {
    pub config_rev: i32,
    pub travel_times_rev: i32,
}

impl ActiveRevisions {
    pub fn new(config_rev: i32, travel_times_rev: i32) -> Self {
        Self {
            config_rev,
            travel_times_rev,
        }
    }

    /// revisions that a run should tag and write its results under. the travel
    /// times revision is advanced by one so data under the active revision is
    /// never touched.
    pub fn next_run(&self) -> RunRevisions {
        RunRevisions {
            config_rev: self.config_rev,
            travel_times_rev: self.travel_times_rev + 1,
        }
    }
}

impl Default for ActiveRevisions {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// revisions threaded through every record created during a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRevisions {
    pub config_rev: i32,
    pub travel_times_rev: i32,
}
