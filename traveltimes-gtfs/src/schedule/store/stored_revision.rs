use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use traveltimes_core::model::TravelTimesForTrip;

/// every travel times record written under one revision, with the record
/// assigned to each trip. a record shared by many trips is stored once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredRevision {
    pub travel_times: Vec<TravelTimesForTrip>,
    /// trip id to index into `travel_times`
    pub trip_assignments: BTreeMap<String, usize>,
}

impl StoredRevision {
    pub fn n_travel_times(&self) -> usize {
        self.travel_times.len()
    }

    pub fn travel_times_for_trip(&self, trip_id: &str) -> Option<&TravelTimesForTrip> {
        self.trip_assignments
            .get(trip_id)
            .and_then(|idx| self.travel_times.get(*idx))
    }

    pub fn grouped_by_pattern(&self) -> HashMap<String, Vec<TravelTimesForTrip>> {
        self.travel_times
            .iter()
            .map(|tt| (tt.trip_pattern_id().to_string(), tt.clone()))
            .into_group_map()
    }
}

/// a revision being assembled inside a transaction. records are deduplicated by
/// identity, so trips that reuse the same shared record point at one entry.
#[derive(Debug, Default)]
pub struct StagedRevision {
    travel_times: Vec<Arc<TravelTimesForTrip>>,
    index_by_ptr: HashMap<*const TravelTimesForTrip, usize>,
    trip_assignments: BTreeMap<String, usize>,
}

impl StagedRevision {
    pub fn assign(&mut self, trip_id: &str, travel_times: &Arc<TravelTimesForTrip>) {
        let index = *self
            .index_by_ptr
            .entry(Arc::as_ptr(travel_times))
            .or_insert_with(|| {
                self.travel_times.push(travel_times.clone());
                self.travel_times.len() - 1
            });
        self.trip_assignments.insert(trip_id.to_string(), index);
    }

    pub fn n_trips(&self) -> usize {
        self.trip_assignments.len()
    }

    pub fn finish(self) -> StoredRevision {
        StoredRevision {
            travel_times: self
                .travel_times
                .into_iter()
                .map(|tt| tt.as_ref().clone())
                .collect(),
            trip_assignments: self.trip_assignments,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::schedule::test_fixtures::{pattern, travel_times_with_durations};
    use traveltimes_core::model::TravelTimeProvenance;

    #[test]
    fn test_shared_record_stored_once() {
        let p1 = pattern("p1", &[0.0, 500.0]);
        let p2 = pattern("p2", &[0.0, 700.0]);
        let shared = Arc::new(travel_times_with_durations(
            &p1,
            "t1",
            &[0, 1000],
            TravelTimeProvenance::Schedule,
        ));
        // equal by value but a distinct record
        let copy = Arc::new(shared.as_ref().clone());
        let other = Arc::new(travel_times_with_durations(
            &p2,
            "t4",
            &[0, 2000],
            TravelTimeProvenance::Schedule,
        ));

        let mut staged = StagedRevision::default();
        staged.assign("t1", &shared);
        staged.assign("t2", &shared);
        staged.assign("t3", &copy);
        staged.assign("t4", &other);
        assert_eq!(staged.n_trips(), 4);

        let revision = staged.finish();
        assert_eq!(revision.n_travel_times(), 3);
        assert_eq!(revision.trip_assignments["t1"], revision.trip_assignments["t2"]);
        assert_ne!(revision.trip_assignments["t1"], revision.trip_assignments["t3"]);
        assert_eq!(
            revision
                .travel_times_for_trip("t4")
                .map(|tt| tt.trip_pattern_id()),
            Some("p2")
        );

        let grouped = revision.grouped_by_pattern();
        assert_eq!(grouped["p1"].len(), 2);
        assert_eq!(grouped["p2"].len(), 1);
    }
}
