use std::sync::Arc;

use crate::model::{TravelTimesForTrip, TripPattern};

/// a single scheduled run of a [`TripPattern`].
#[derive(Debug, Clone)]
pub struct Trip {
    id: String,
    route_id: String,
    service_id: String,
    pattern: Arc<TripPattern>,
    travel_times: Option<Arc<TravelTimesForTrip>>,
}

impl Trip {
    pub fn new(id: &str, route_id: &str, service_id: &str, pattern: Arc<TripPattern>) -> Self {
        Self {
            id: id.to_string(),
            route_id: route_id.to_string(),
            service_id: service_id.to_string(),
            pattern,
            travel_times: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn route_id(&self) -> &str {
        &self.route_id
    }

    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    pub fn pattern(&self) -> &TripPattern {
        &self.pattern
    }

    pub fn travel_times(&self) -> Option<&Arc<TravelTimesForTrip>> {
        self.travel_times.as_ref()
    }

    /// assigns travel times to this trip, replacing any previous assignment.
    pub fn set_travel_times(&mut self, travel_times: Arc<TravelTimesForTrip>) {
        self.travel_times = Some(travel_times);
    }
}
