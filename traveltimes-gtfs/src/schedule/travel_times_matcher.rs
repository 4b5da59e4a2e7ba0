use traveltimes_core::model::{TravelTimesForTrip, Trip, MS_PER_SEC};

/// cumulative travel times that differ by this much or more at any stop are not
/// considered equivalent.
pub const MATCH_TOLERANCE_MSEC: i64 = 60 * MS_PER_SEC;

/// decides whether travel times that already exist for the trip's pattern can be
/// used for the trip instead of the newly built schedule-based travel times.
///
/// the existing travel times must cover exactly the stop paths of the trip pattern.
/// travel times that include any observed data are always preferred over a
/// schedule-based estimate. otherwise the cumulative travel time at every stop
/// path must stay within [`MATCH_TOLERANCE_MSEC`] of the new travel times.
pub fn adequate_match(
    trip: &Trip,
    new_travel_times: &TravelTimesForTrip,
    existing_travel_times: &TravelTimesForTrip,
) -> bool {
    let pattern = trip.pattern();
    if let Err(e) = existing_travel_times.validate_against(pattern) {
        log::error!(
            "for trip {} travel times are associated with the same trip pattern but do not match it: {e}",
            trip.id()
        );
        return false;
    }

    if !existing_travel_times.purely_schedule_based() {
        return true;
    }

    let mut new_travel_time_msec: i64 = 0;
    let mut existing_travel_time_msec: i64 = 0;
    let pairs = new_travel_times
        .travel_times_for_stop_paths()
        .iter()
        .zip(existing_travel_times.travel_times_for_stop_paths());
    for (index, (new_tt, existing_tt)) in pairs.enumerate() {
        new_travel_time_msec += new_tt.stop_path_travel_time_msec();
        existing_travel_time_msec += existing_tt.stop_path_travel_time_msec();
        if (existing_travel_time_msec - new_travel_time_msec).abs() >= MATCH_TOLERANCE_MSEC {
            log::debug!(
                "travel times for trip {} of trip pattern {} differ from those created for trip {} \
                by at least {MATCH_TOLERANCE_MSEC} msec at stop path index {index} ({})",
                trip.id(),
                pattern.id(),
                existing_travel_times.trip_created_for_id(),
                new_tt.stop_path_id()
            );
            return false;
        }
    }

    true
}
