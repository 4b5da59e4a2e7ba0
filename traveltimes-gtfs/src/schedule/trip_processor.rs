use std::{collections::HashMap, sync::Arc};

use traveltimes_core::model::{TravelTimesForTrip, Trip};

use crate::schedule::{
    travel_times_matcher::adequate_match, ScheduleBasedTravelTimesBuilder, ScheduleData,
    ScheduleError,
};

/// travel times known during a run, keyed by trip pattern id. seeded from storage
/// and grown with every newly built set of travel times, so later trips of the same
/// pattern can reuse them. entries are searched in insertion order.
#[derive(Debug, Default, Clone)]
pub struct TravelTimesCache {
    by_pattern: HashMap<String, Vec<Arc<TravelTimesForTrip>>>,
}

impl TravelTimesCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// builds a cache from stored travel times grouped by trip pattern id.
    pub fn from_stored(stored: HashMap<String, Vec<TravelTimesForTrip>>) -> Self {
        let by_pattern = stored
            .into_iter()
            .map(|(pattern_id, tts)| (pattern_id, tts.into_iter().map(Arc::new).collect()))
            .collect();
        Self { by_pattern }
    }

    pub fn candidates(&self, pattern_id: &str) -> &[Arc<TravelTimesForTrip>] {
        self.by_pattern
            .get(pattern_id)
            .map(|v| v.as_slice())
            .unwrap_or_default()
    }

    pub fn push(&mut self, pattern_id: &str, travel_times: Arc<TravelTimesForTrip>) {
        self.by_pattern
            .entry(pattern_id.to_string())
            .or_default()
            .push(travel_times);
    }

    /// total travel times held across all patterns.
    pub fn n_travel_times(&self) -> usize {
        self.by_pattern.values().map(|v| v.len()).sum()
    }

    pub fn n_patterns(&self) -> usize {
        self.by_pattern.len()
    }
}

/// the travel times selected for a trip.
#[derive(Debug, Clone)]
pub struct TripOutcome {
    pub travel_times: Arc<TravelTimesForTrip>,
    /// true if existing travel times were reused instead of the newly built ones
    pub reused: bool,
}

/// selects travel times for one trip. builds schedule-based travel times, then uses
/// the first cached entry for the trip's pattern that is an adequate match. when
/// none match, the new travel times are used and added to the cache.
///
/// the cache is taken and returned so the dependency of each trip on the trips
/// processed before it stays explicit. trips must be processed one at a time.
pub fn process_trip(
    trip: &Trip,
    schedule: &ScheduleData,
    builder: &ScheduleBasedTravelTimesBuilder,
    mut cache: TravelTimesCache,
) -> Result<(TravelTimesCache, TripOutcome), ScheduleError> {
    let pattern = trip.pattern();
    log::debug!(
        "processing travel times for trip {} of trip pattern {} for route {}",
        trip.id(),
        pattern.id(),
        trip.route_id()
    );

    let schedule_based = builder.build(trip, schedule)?;

    let reusable = cache
        .candidates(pattern.id())
        .iter()
        .find(|existing| adequate_match(trip, &schedule_based, existing))
        .cloned();

    let outcome = match reusable {
        Some(existing) => {
            log::debug!(
                "found adequate travel times match for trip {} of trip pattern {}, using those created for trip {}",
                trip.id(),
                pattern.id(),
                existing.trip_created_for_id()
            );
            TripOutcome {
                travel_times: existing,
                reused: true,
            }
        }
        None => {
            log::debug!(
                "no adequate travel times match for trip {} of trip pattern {}, using new travel times",
                trip.id(),
                pattern.id()
            );
            let created = Arc::new(schedule_based);
            cache.push(pattern.id(), created.clone());
            TripOutcome {
                travel_times: created,
                reused: false,
            }
        }
    };

    Ok((cache, outcome))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::schedule::test_fixtures::{
        config, pattern, raw_stop_time, revisions, schedule_with_stop_times,
        travel_times_with_durations, trip,
    };
    use traveltimes_core::model::TravelTimeProvenance;

    fn schedule_for(trip_ids: &[(&str, u32)]) -> ScheduleData {
        schedule_with_stop_times(
            trip_ids
                .iter()
                .map(|(trip_id, start)| {
                    (
                        *trip_id,
                        vec![
                            raw_stop_time("s0", 0, None, Some(*start)),
                            raw_stop_time("s1", 1, Some(start + 120), Some(start + 150)),
                            raw_stop_time("s2", 2, Some(start + 300), None),
                        ],
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn test_identical_trips_share_first_record() {
        let pattern = pattern("p1", &[0.0, 1000.0, 1000.0]);
        let trips = ["t1", "t2", "t3"].map(|id| trip(id, &pattern));
        let schedule = schedule_for(&[("t1", 3600), ("t2", 7200), ("t3", 10800)]);
        let config = config(10_000, 600.0);
        let builder = ScheduleBasedTravelTimesBuilder::new(&config, revisions());

        let mut cache = TravelTimesCache::new();
        let mut outcomes = vec![];
        for trip in trips.iter() {
            let (next_cache, outcome) = process_trip(trip, &schedule, &builder, cache)
                .expect("test invariant failed: processing should succeed");
            cache = next_cache;
            outcomes.push(outcome);
        }

        assert_eq!(cache.n_travel_times(), 1);
        assert!(!outcomes[0].reused);
        for outcome in &outcomes[1..] {
            assert!(outcome.reused);
            assert!(Arc::ptr_eq(&outcome.travel_times, &outcomes[0].travel_times));
        }
        assert_eq!(outcomes[2].travel_times.trip_created_for_id(), "t1");
    }

    #[test]
    fn test_different_schedule_adds_to_cache() {
        let pattern = pattern("p1", &[0.0, 1000.0, 1000.0]);
        let t1 = trip("t1", &pattern);
        let t2 = trip("t2", &pattern);
        let mut schedule = schedule_for(&[("t1", 3600)]);
        let mut stop_times = HashMap::new();
        stop_times.insert(
            "t1".to_string(),
            schedule.stop_times_for_trip("t1").to_vec(),
        );
        // the slower trip takes 10 minutes instead of 5
        stop_times.insert(
            "t2".to_string(),
            vec![
                raw_stop_time("s0", 0, None, Some(0)),
                raw_stop_time("s2", 2, Some(600), None),
            ],
        );
        schedule.set_stop_times(stop_times);
        let config = config(10_000, 600.0);
        let builder = ScheduleBasedTravelTimesBuilder::new(&config, revisions());

        let (cache, first) = process_trip(&t1, &schedule, &builder, TravelTimesCache::new())
            .expect("test invariant failed: processing should succeed");
        let (cache, second) = process_trip(&t2, &schedule, &builder, cache)
            .expect("test invariant failed: processing should succeed");

        assert!(!first.reused);
        assert!(!second.reused);
        assert_eq!(cache.n_travel_times(), 2);
        assert_eq!(cache.candidates("p1").len(), 2);
    }

    #[test]
    fn test_stored_observed_travel_times_reused() {
        let pattern = pattern("p1", &[0.0, 1000.0, 1000.0]);
        let t1 = trip("t1", &pattern);
        let schedule = schedule_for(&[("t1", 3600)]);
        let observed = travel_times_with_durations(
            &pattern,
            "old_trip",
            &[0, 1, 2],
            TravelTimeProvenance::Observed,
        );
        let mut stored = HashMap::new();
        stored.insert("p1".to_string(), vec![observed]);
        let cache = TravelTimesCache::from_stored(stored);
        let config = config(10_000, 600.0);
        let builder = ScheduleBasedTravelTimesBuilder::new(&config, revisions());

        let (cache, outcome) = process_trip(&t1, &schedule, &builder, cache)
            .expect("test invariant failed: processing should succeed");

        assert!(outcome.reused);
        assert_eq!(outcome.travel_times.trip_created_for_id(), "old_trip");
        assert_eq!(cache.n_travel_times(), 1);
    }

    #[test]
    fn test_first_fit_not_best_fit() {
        let pattern = pattern("p1", &[0.0, 1000.0, 1000.0]);
        let t1 = trip("t1", &pattern);
        let schedule = schedule_for(&[("t1", 3600)]);
        let config = config(10_000, 600.0);
        let builder = ScheduleBasedTravelTimesBuilder::new(&config, revisions());
        let exact = builder
            .build(&t1, &schedule)
            .expect("test invariant failed: build should succeed");
        let exact_totals = exact
            .travel_times_for_stop_paths()
            .iter()
            .map(|tt| tt.stop_path_travel_time_msec() as u32)
            .collect::<Vec<_>>();
        // 20 seconds slower on each real path, 40 seconds behind by the last stop
        let close = travel_times_with_durations(
            &pattern,
            "close",
            &[0, exact_totals[1] + 20_000, exact_totals[2] + 20_000],
            TravelTimeProvenance::Schedule,
        );
        let mut stored = HashMap::new();
        stored.insert(
            "p1".to_string(),
            vec![
                close,
                travel_times_with_durations(
                    &pattern,
                    "exact",
                    &exact_totals,
                    TravelTimeProvenance::Schedule,
                ),
            ],
        );
        let (_, outcome) =
            process_trip(&t1, &schedule, &builder, TravelTimesCache::from_stored(stored))
                .expect("test invariant failed: processing should succeed");
        assert!(outcome.reused);
        assert_eq!(outcome.travel_times.trip_created_for_id(), "close");
    }
}
