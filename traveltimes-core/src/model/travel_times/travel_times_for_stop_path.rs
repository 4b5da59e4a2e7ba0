use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::TravelTimeProvenance;

/// travel time model for a single stop path. the path is divided into equal-length
/// travel time segments, each with its own duration, followed by a dwell ("stop")
/// time at the stop the path arrives at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelTimesForStopPath {
    stop_path_id: String,
    /// meters
    path_length: f64,
    /// meters, the length of each entry in `travel_times_msec`
    travel_time_segment_length: f64,
    travel_times_msec: Vec<u32>,
    stop_time_msec: u32,
    days_of_week_override: Option<Weekday>,
    provenance: TravelTimeProvenance,
}

impl TravelTimesForStopPath {
    pub fn new(
        stop_path_id: &str,
        path_length: f64,
        travel_time_segment_length: f64,
        travel_times_msec: Vec<u32>,
        stop_time_msec: u32,
        days_of_week_override: Option<Weekday>,
        provenance: TravelTimeProvenance,
    ) -> Self {
        Self {
            stop_path_id: stop_path_id.to_string(),
            path_length,
            travel_time_segment_length,
            travel_times_msec,
            stop_time_msec,
            days_of_week_override,
            provenance,
        }
    }

    pub fn stop_path_id(&self) -> &str {
        &self.stop_path_id
    }

    pub fn path_length(&self) -> f64 {
        self.path_length
    }

    pub fn travel_time_segment_length(&self) -> f64 {
        self.travel_time_segment_length
    }

    pub fn travel_times_msec(&self) -> &[u32] {
        &self.travel_times_msec
    }

    pub fn n_travel_time_segments(&self) -> usize {
        self.travel_times_msec.len()
    }

    pub fn stop_time_msec(&self) -> u32 {
        self.stop_time_msec
    }

    pub fn days_of_week_override(&self) -> Option<Weekday> {
        self.days_of_week_override
    }

    pub fn provenance(&self) -> TravelTimeProvenance {
        self.provenance
    }

    /// total travel time across the segments of this path, excluding stop time.
    pub fn stop_path_travel_time_msec(&self) -> i64 {
        self.travel_times_msec.iter().map(|t| *t as i64).sum()
    }
}
