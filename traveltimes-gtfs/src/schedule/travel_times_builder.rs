use traveltimes_core::model::{
    RunRevisions, StopPath, TravelTimeProvenance, TravelTimesForStopPath, TravelTimesForTrip,
    Trip, MS_PER_SEC,
};

use crate::schedule::{
    schedule_time_lookup::schedule_time_for_stop, segment_partition, ScheduleData, ScheduleError,
    TravelTimesConfig,
};

/// synthesizes travel times for trips from their published schedule times.
pub struct ScheduleBasedTravelTimesBuilder<'a> {
    config: &'a TravelTimesConfig,
    revisions: RunRevisions,
}

impl<'a> ScheduleBasedTravelTimesBuilder<'a> {
    pub fn new(config: &'a TravelTimesConfig, revisions: RunRevisions) -> Self {
        Self { config, revisions }
    }

    pub fn revisions(&self) -> RunRevisions {
        self.revisions
    }

    /// builds schedule-based travel times for every stop path of the trip's pattern.
    ///
    /// consecutive stops with schedule times bound a span of one or more stop paths.
    /// the scheduled time across the span, less the dwell time at each stop, is
    /// divided among the span's paths in proportion to their length. stops without a
    /// schedule time are covered by the next span that ends at a timed stop.
    ///
    /// stop paths after the last timed stop belong to no span and are not emitted,
    /// so the result can be shorter than the pattern.
    pub fn build(
        &self,
        trip: &Trip,
        schedule: &ScheduleData,
    ) -> Result<TravelTimesForTrip, ScheduleError> {
        let pattern = trip.pattern();
        let stop_paths = pattern.stop_paths();
        let mut travel_times = TravelTimesForTrip::new(self.revisions, pattern.id(), trip.id());

        let first_path = stop_paths.first().ok_or_else(|| {
            ScheduleError::InvalidData(format!(
                "trip {} uses trip pattern {} which has no stop paths",
                trip.id(),
                pattern.id()
            ))
        })?;
        travel_times.add(stub_travel_times(first_path));

        let mut previous_index = 0;
        let mut previous_time = schedule_time_for_stop(trip.id(), first_path.stop_id(), schedule)
            .ok_or_else(|| ScheduleError::MissingInitialScheduleTime {
                trip_id: trip.id().to_string(),
                stop_id: first_path.stop_id().to_string(),
            })?;
        let last_index = stop_paths.len() - 1;

        for (index, stop_path) in stop_paths.iter().enumerate().skip(1) {
            let Some(schedule_time) = schedule_time_for_stop(trip.id(), stop_path.stop_id(), schedule)
            else {
                continue;
            };

            let elapsed_msec =
                (schedule_time.time() as i64 - previous_time.time() as i64) * MS_PER_SEC;
            let span = &stop_paths[previous_index + 1..=index];
            let span_distance: f64 = span.iter().map(|p| p.length()).sum();
            let span_travel_msec = span_travel_time_msec(
                elapsed_msec,
                span.len(),
                span_distance,
                self.config.default_wait_time_at_stop_msec,
                self.config.max_travel_speed_meters_per_msec,
            );

            for (offset, path) in span.iter().enumerate() {
                let path_index = previous_index + 1 + offset;
                let path_travel_msec = if span_distance > 0.0 {
                    path.length() / span_distance * span_travel_msec
                } else {
                    span_travel_msec / span.len() as f64
                };
                let partition = segment_partition::partition(
                    path.length(),
                    self.config.max_travel_time_segment_length,
                    path_travel_msec,
                );
                // dwell time has no meaning at the end of the trip
                let stop_time_msec = if path_index < last_index {
                    self.config.default_wait_time_at_stop_msec
                } else {
                    0
                };
                travel_times.add(TravelTimesForStopPath::new(
                    path.id(),
                    path.length(),
                    partition.segment_length,
                    partition.segment_travel_times_msec,
                    stop_time_msec,
                    None,
                    TravelTimeProvenance::Schedule,
                ));
            }

            previous_index = index;
            previous_time = schedule_time;
        }

        if previous_index < last_index {
            log::warn!(
                "trip {} of trip pattern {} has no schedule time after stop path index {previous_index}, \
                leaving {} trailing stop paths without travel times",
                trip.id(),
                pattern.id(),
                last_index - previous_index
            );
        }

        Ok(travel_times)
    }
}

/// travel times for the first stop path of a trip, which is only a stub leading to
/// the first stop and so has no travel or dwell time.
fn stub_travel_times(stop_path: &StopPath) -> TravelTimesForStopPath {
    let n_segments = std::cmp::max(1, stop_path.locations().len().saturating_sub(1));
    TravelTimesForStopPath::new(
        stop_path.id(),
        stop_path.length(),
        stop_path.length(),
        vec![0; n_segments],
        0,
        None,
        TravelTimeProvenance::Schedule,
    )
}

/// travel time across a span of stop paths: the elapsed schedule time less the
/// dwell time at each stop in the span, where the dwell total is capped at the
/// elapsed time.
///
/// when no travel time remains, or the remainder implies a speed above the maximum,
/// the span is instead given the time needed to cover its distance at the maximum
/// speed.
pub fn span_travel_time_msec(
    elapsed_msec: i64,
    n_stop_paths: usize,
    span_distance: f64,
    wait_time_at_stop_msec: u32,
    max_speed_meters_per_msec: f64,
) -> f64 {
    let stopped_msec = std::cmp::min(
        n_stop_paths as i64 * wait_time_at_stop_msec as i64,
        elapsed_msec,
    );
    let travel_msec = elapsed_msec - stopped_msec;
    if travel_msec <= 0 || span_distance / travel_msec as f64 > max_speed_meters_per_msec {
        (span_distance / max_speed_meters_per_msec).ceil()
    } else {
        travel_msec as f64
    }
}
