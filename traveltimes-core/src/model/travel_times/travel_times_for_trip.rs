use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::TravelTimesForStopPath;
use crate::model::{RunRevisions, TravelTimesModelError, TripPattern};

/// travel times covering every stop path of a trip pattern. a record built for one
/// trip may be shared by any number of trips of the same pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelTimesForTrip {
    config_rev: i32,
    travel_times_rev: i32,
    trip_pattern_id: String,
    /// the trip these travel times were originally built for. diagnostic only.
    trip_created_for_id: String,
    travel_times_for_stop_paths: Vec<TravelTimesForStopPath>,
}

impl TravelTimesForTrip {
    pub fn new(revisions: RunRevisions, trip_pattern_id: &str, trip_created_for_id: &str) -> Self {
        Self {
            config_rev: revisions.config_rev,
            travel_times_rev: revisions.travel_times_rev,
            trip_pattern_id: trip_pattern_id.to_string(),
            trip_created_for_id: trip_created_for_id.to_string(),
            travel_times_for_stop_paths: vec![],
        }
    }

    pub fn add(&mut self, travel_times: TravelTimesForStopPath) {
        self.travel_times_for_stop_paths.push(travel_times);
    }

    pub fn config_rev(&self) -> i32 {
        self.config_rev
    }

    pub fn travel_times_rev(&self) -> i32 {
        self.travel_times_rev
    }

    pub fn trip_pattern_id(&self) -> &str {
        &self.trip_pattern_id
    }

    pub fn trip_created_for_id(&self) -> &str {
        &self.trip_created_for_id
    }

    pub fn travel_times_for_stop_paths(&self) -> &[TravelTimesForStopPath] {
        &self.travel_times_for_stop_paths
    }

    pub fn travel_times_for_stop_path(&self, index: usize) -> Option<&TravelTimesForStopPath> {
        self.travel_times_for_stop_paths.get(index)
    }

    pub fn n_stop_paths(&self) -> usize {
        self.travel_times_for_stop_paths.len()
    }

    /// true if no entry was derived from observed data.
    pub fn purely_schedule_based(&self) -> bool {
        self.travel_times_for_stop_paths
            .iter()
            .all(|tt| tt.provenance().is_schedule_based())
    }

    /// confirms these travel times cover exactly the stop paths of the pattern,
    /// in the same order.
    pub fn validate_against(&self, pattern: &TripPattern) -> Result<(), TravelTimesModelError> {
        if pattern.n_stop_paths() != self.n_stop_paths() {
            return Err(TravelTimesModelError::StopPathCountMismatch {
                pattern_id: pattern.id().to_string(),
                trip_created_for_id: self.trip_created_for_id.clone(),
                expected: pattern.n_stop_paths(),
                found: self.n_stop_paths(),
            });
        }
        let mismatch = pattern
            .stop_paths()
            .iter()
            .zip_eq(self.travel_times_for_stop_paths.iter())
            .find_position(|(path, tt)| path.id() != tt.stop_path_id());
        match mismatch {
            None => Ok(()),
            Some((index, (path, tt))) => Err(TravelTimesModelError::StopPathIdMismatch {
                pattern_id: pattern.id().to_string(),
                trip_created_for_id: self.trip_created_for_id.clone(),
                index,
                expected: path.id().to_string(),
                found: tt.stop_path_id().to_string(),
            }),
        }
    }
}
