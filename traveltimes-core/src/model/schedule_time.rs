use serde::{Deserialize, Serialize};

/// published arrival and/or departure time of day for a stop on a trip, in
/// seconds since midnight. values past 24:00:00 are allowed for trips that
/// run over midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleTime {
    arrival_time: Option<u32>,
    departure_time: Option<u32>,
}

impl ScheduleTime {
    /// creates a schedule time, or None if both times are absent, which is
    /// treated the same as having no schedule data for the stop.
    pub fn new(arrival_time: Option<u32>, departure_time: Option<u32>) -> Option<ScheduleTime> {
        match (arrival_time, departure_time) {
            (None, None) => None,
            _ => Some(Self {
                arrival_time,
                departure_time,
            }),
        }
    }

    pub fn arrival_time(&self) -> Option<u32> {
        self.arrival_time
    }

    pub fn departure_time(&self) -> Option<u32> {
        self.departure_time
    }

    /// the departure time if there is one, otherwise the arrival time.
    pub fn time(&self) -> u32 {
        match (self.departure_time, self.arrival_time) {
            (Some(t), _) | (None, Some(t)) => t,
            // unreachable through the constructor
            (None, None) => 0,
        }
    }
}
