use std::collections::HashMap;

use traveltimes_core::model::Trip;

/// a single row of the unfiltered stop times for a trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStopTime {
    pub stop_id: String,
    pub stop_sequence: u32,
    /// seconds since midnight
    pub arrival_time: Option<u32>,
    /// seconds since midnight
    pub departure_time: Option<u32>,
}

/// the static schedule source consumed by the travel times processor. trips and
/// stop times are loaded separately and each load is tracked so processing can
/// refuse to run against a partially loaded source.
#[derive(Debug, Default)]
pub struct ScheduleData {
    trips: Vec<Trip>,
    stop_times: HashMap<String, Vec<RawStopTime>>,
    trips_loaded: bool,
    stop_times_loaded: bool,
}

impl ScheduleData {
    pub fn new() -> Self {
        Self::default()
    }

    /// sets the trips to process, in processing order.
    pub fn set_trips(&mut self, trips: Vec<Trip>) {
        self.trips = trips;
        self.trips_loaded = true;
    }

    /// sets the stop times keyed by trip id, each list in stop sequence order.
    pub fn set_stop_times(&mut self, stop_times: HashMap<String, Vec<RawStopTime>>) {
        self.stop_times = stop_times;
        self.stop_times_loaded = true;
    }

    pub fn is_trips_loaded(&self) -> bool {
        self.trips_loaded
    }

    pub fn is_stop_times_loaded(&self) -> bool {
        self.stop_times_loaded
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn trips_mut(&mut self) -> &mut [Trip] {
        &mut self.trips
    }

    /// all stop times for a trip, or an empty slice for an unknown trip.
    pub fn stop_times_for_trip(&self, trip_id: &str) -> &[RawStopTime] {
        self.stop_times
            .get(trip_id)
            .map(|v| v.as_slice())
            .unwrap_or_default()
    }
}
