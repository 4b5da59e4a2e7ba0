use std::time::{Duration, Instant};

use kdam::{BarBuilder, BarExt};
use traveltimes_core::model::Trip;

use crate::schedule::{
    store::{TravelTimesStore, TravelTimesTransaction},
    trip_processor::process_trip,
    ScheduleBasedTravelTimesBuilder, ScheduleData, ScheduleError, TravelTimesCache,
    TravelTimesConfig, TripOutcome,
};

/// counts describing one completed batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// travel times revision the run wrote under
    pub travel_times_rev: i32,
    /// travel times read from the active revision before processing
    pub n_read_from_store: usize,
    /// travel times known once every trip was processed
    pub n_after: usize,
    pub n_trips: usize,
    /// trips assigned travel times that already existed
    pub n_reused: usize,
    /// trips assigned newly built travel times
    pub n_generated: usize,
    pub elapsed: Duration,
}

/// runs schedule-based travel times over every trip of a schedule as a single unit of
/// work against a [`TravelTimesStore`].
pub struct ScheduleBasedTravelTimesProcessor {
    config: TravelTimesConfig,
}

impl ScheduleBasedTravelTimesProcessor {
    pub fn new(config: TravelTimesConfig) -> Self {
        Self { config }
    }

    /// processes all trips of the schedule in order, writing each trip's travel times
    /// through one transaction.
    ///
    /// travel times of the active revision are loaded first so later trips can reuse
    /// them. results are written under the next travel times revision. if any trip
    /// fails, the transaction is rolled back, no trip is assigned travel times and the
    /// error is returned. on success, each trip holds its selected travel times.
    pub fn process(
        &self,
        schedule: &mut ScheduleData,
        store: &mut dyn TravelTimesStore,
    ) -> Result<BatchSummary, ScheduleError> {
        if !schedule.is_trips_loaded() {
            log::error!("trips not yet read in before processing travel times");
            return Err(ScheduleError::TripsNotLoaded);
        }
        if !schedule.is_stop_times_loaded() {
            log::error!("stop times not yet read in before processing travel times");
            return Err(ScheduleError::StopTimesNotLoaded);
        }

        let start_time = Instant::now();
        let active = store.active_revisions()?;
        let run = active.next_run();
        let stored = store.read_travel_times(active.travel_times_rev)?;
        let cache = TravelTimesCache::from_stored(stored);
        let n_read_from_store = cache.n_travel_times();
        let n_trips = schedule.trips().len();
        log::info!(
            "processing schedule-based travel times for {n_trips} trips, read {n_read_from_store} travel times from rev {}, writing rev {}",
            active.travel_times_rev,
            run.travel_times_rev
        );

        let builder = ScheduleBasedTravelTimesBuilder::new(&self.config, run);
        let mut tx = store.begin(run)?;
        let processed = process_trips(schedule, &builder, cache, tx.as_mut());

        let (cache, outcomes) = match processed {
            Ok(result) => result,
            Err(e) => {
                log::error!("{e}, rolling back travel times rev {}", run.travel_times_rev);
                tx.rollback();
                return Err(e);
            }
        };
        tx.commit().inspect_err(|e| {
            log::error!("{e}, travel times rev {} was not committed", run.travel_times_rev);
        })?;

        let n_reused = outcomes.iter().filter(|o| o.reused).count();
        for (trip, outcome) in schedule.trips_mut().iter_mut().zip(outcomes) {
            trip.set_travel_times(outcome.travel_times);
        }

        let summary = BatchSummary {
            travel_times_rev: run.travel_times_rev,
            n_read_from_store,
            n_after: cache.n_travel_times(),
            n_trips,
            n_reused,
            n_generated: n_trips - n_reused,
            elapsed: start_time.elapsed(),
        };
        log::info!(
            "wrote travel times rev {} for {} trips in {:.2}s: {} reused, {} generated, {} travel times before, {} after",
            summary.travel_times_rev,
            summary.n_trips,
            summary.elapsed.as_secs_f64(),
            summary.n_reused,
            summary.n_generated,
            summary.n_read_from_store,
            summary.n_after
        );
        Ok(summary)
    }
}

/// folds every trip through [`process_trip`], writing each selection to the
/// transaction as it is made. stops at the first failure.
fn process_trips(
    schedule: &ScheduleData,
    builder: &ScheduleBasedTravelTimesBuilder,
    cache: TravelTimesCache,
    tx: &mut dyn TravelTimesTransaction,
) -> Result<(TravelTimesCache, Vec<TripOutcome>), ScheduleError> {
    let trips = schedule.trips();
    let mut bar = BarBuilder::default()
        .desc("schedule-based travel times")
        .total(trips.len())
        .animation("fillup")
        .build()
        .map_err(|e| ScheduleError::Internal(format!("failure building progress bar: {e}")))?;

    let result = trips.iter().try_fold(
        (cache, Vec::with_capacity(trips.len())),
        |(cache, mut outcomes), trip| {
            let _ = bar.update(1);
            let (cache, outcome) =
                process_trip(trip, schedule, builder, cache).map_err(|e| trip_error(trip, e))?;
            tx.write_trip_travel_times(trip.id(), &outcome.travel_times)
                .map_err(|e| ScheduleError::TripPersistence {
                    trip_id: trip.id().to_string(),
                    pattern_id: trip.pattern().id().to_string(),
                    error: e.to_string(),
                })?;
            outcomes.push(outcome);
            Ok((cache, outcomes))
        },
    );
    eprintln!(); // end progress bar
    result
}

fn trip_error(trip: &Trip, error: ScheduleError) -> ScheduleError {
    ScheduleError::TripProcessing {
        trip_id: trip.id().to_string(),
        pattern_id: trip.pattern().id().to_string(),
        source: Box::new(error),
    }
}
