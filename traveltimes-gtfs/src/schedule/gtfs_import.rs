use std::{collections::HashMap, path::Path, sync::Arc};

use geo::Point;
use gtfs_structures::{Gtfs, Stop};
use itertools::Itertools;
use traveltimes_core::model::{StopPath, Trip, TripPattern};

use crate::schedule::{RawStopTime, ScheduleData, ScheduleError, SortedTrip};

/// reads a GTFS archive or directory into a loaded [`ScheduleData`].
pub fn read_gtfs(gtfs_input: &Path) -> Result<ScheduleData, ScheduleError> {
    let gtfs_input_str = gtfs_input.to_str().ok_or_else(|| {
        ScheduleError::InvalidData(format!(
            "unable to interpret GTFS input path {gtfs_input:?} as a string"
        ))
    })?;
    log::debug!("reading GTFS from {gtfs_input_str}");
    let gtfs = Gtfs::new(gtfs_input_str)?;
    from_gtfs(&gtfs)
}

/// builds trips, trip patterns and raw stop times from a GTFS feed. trips that share a
/// route and an ordered stop sequence share one trip pattern. trips are ordered by id.
/// trips without stop times are skipped.
pub fn from_gtfs(gtfs: &Gtfs) -> Result<ScheduleData, ScheduleError> {
    // Pre-compute lat,lon location of all stops
    // with `get_stop_location` which returns the lat,lon
    // or the parent's lat,lon if available
    let stop_locations: HashMap<String, Option<Point<f64>>> = gtfs
        .stops
        .iter()
        .map(|(stop_id, stop)| (stop_id.clone(), get_stop_location(stop.clone(), gtfs)))
        .collect();

    let mut patterns: HashMap<(String, Vec<String>), Arc<TripPattern>> = HashMap::new();
    let mut trips: Vec<Trip> = Vec::with_capacity(gtfs.trips.len());
    let mut stop_times: HashMap<String, Vec<RawStopTime>> = HashMap::new();

    for raw_trip in gtfs.trips.values().sorted_by(|a, b| a.id.cmp(&b.id)) {
        let trip = SortedTrip::new(raw_trip)?;
        if trip.stop_times.is_empty() {
            log::warn!("trip {} has no stop times, skipping", trip.trip_id);
            continue;
        }

        let key = (trip.route_id.clone(), trip.stop_ids());
        let pattern = match patterns.get(&key) {
            Some(pattern) => pattern.clone(),
            None => {
                let pattern_id = trip_pattern_id(&trip.route_id, &key.1);
                let pattern = Arc::new(build_trip_pattern(
                    &pattern_id,
                    &trip.route_id,
                    &key.1,
                    &stop_locations,
                )?);
                patterns.insert(key, pattern.clone());
                pattern
            }
        };

        stop_times.insert(trip.trip_id.clone(), trip.raw_stop_times());
        trips.push(Trip::new(
            &trip.trip_id,
            &trip.route_id,
            &trip.service_id,
            pattern,
        ));
    }

    log::info!(
        "read {} trips of {} trip patterns from GTFS",
        trips.len(),
        patterns.len()
    );

    let mut schedule = ScheduleData::new();
    schedule.set_trips(trips);
    schedule.set_stop_times(stop_times);
    Ok(schedule)
}

/// identifies a trip pattern by its route and ordered stops, so the same pattern
/// gets the same id from every feed that contains it.
fn trip_pattern_id(route_id: &str, stop_ids: &[String]) -> String {
    format!("{route_id}:{}", stop_ids.join(">"))
}

/// stop path `k` ends at stop `k`. the first stop path has no previous stop and is a
/// single-point stub of zero length.
fn build_trip_pattern(
    pattern_id: &str,
    route_id: &str,
    stop_ids: &[String],
    stop_locations: &HashMap<String, Option<Point<f64>>>,
) -> Result<TripPattern, ScheduleError> {
    let locations = stop_ids
        .iter()
        .map(|stop_id| {
            stop_locations.get(stop_id).copied().flatten().ok_or_else(|| {
                ScheduleError::InvalidData(format!(
                    "stop {stop_id} of trip pattern {pattern_id} has no location"
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut stop_paths = Vec::with_capacity(stop_ids.len());
    for (idx, (stop_id, location)) in stop_ids.iter().zip(locations.iter()).enumerate() {
        let stop_path = match idx.checked_sub(1) {
            None => StopPath::new(stop_id, stop_id, 0.0, vec![*location]),
            Some(prev) => {
                let path_id = format!("{}_to_{stop_id}", stop_ids[prev]);
                StopPath::from_locations(&path_id, stop_id, vec![locations[prev], *location])
            }
        };
        stop_paths.push(stop_path);
    }
    Ok(TripPattern::new(pattern_id, route_id, stop_paths))
}

fn get_stop_location(stop: Arc<Stop>, gtfs: &Gtfs) -> Option<Point<f64>> {
    // lon,lat is required if `location_type` in [0, 1, 2]
    if let (Some(lon), Some(lat)) = (stop.longitude, stop.latitude) {
        return Some(Point::new(lon, lat));
    }

    // otherwise use lon,lat from the parent station, looking only one level up
    stop.parent_station
        .clone()
        .and_then(|parent_id| gtfs.stops.get(&parent_id))
        .and_then(
            |parent_stop| match (parent_stop.longitude, parent_stop.latitude) {
                (Some(lon), Some(lat)) => Some(Point::new(lon, lat)),
                _ => None,
            },
        )
}
