use traveltimes_core::model::ScheduleTime;

use crate::schedule::ScheduleData;

/// finds the published schedule time for a stop on a trip.
///
/// this reads the full stop times of the trip rather than any filtered view, since
/// filtering down to schedule adherence stops could drop the stop being searched.
/// stop ids are only unique within a trip, and the first match wins. a match with
/// neither an arrival nor a departure time counts as no match.
///
/// this is a linear scan over the trip's stop times. a per-trip index keyed by stop
/// id would make it constant time without changing the result.
pub fn schedule_time_for_stop(
    trip_id: &str,
    stop_id: &str,
    schedule: &ScheduleData,
) -> Option<ScheduleTime> {
    schedule
        .stop_times_for_trip(trip_id)
        .iter()
        .find(|st| st.stop_id == stop_id)
        .and_then(|st| ScheduleTime::new(st.arrival_time, st.departure_time))
}
