use geo::Point;
use serde::{Deserialize, Serialize};

use crate::util::geo_utils;

/// the segment of travel that ends at one stop of a trip pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopPath {
    id: String,
    /// the stop this path arrives at
    stop_id: String,
    /// meters
    length: f64,
    locations: Vec<Point<f64>>,
}

impl StopPath {
    pub fn new(id: &str, stop_id: &str, length: f64, locations: Vec<Point<f64>>) -> Self {
        Self {
            id: id.to_string(),
            stop_id: stop_id.to_string(),
            length,
            locations,
        }
    }

    /// builds a stop path whose length is the haversine length of its locations.
    pub fn from_locations(id: &str, stop_id: &str, locations: Vec<Point<f64>>) -> Self {
        let length = geo_utils::haversine_length_meters(&locations);
        Self::new(id, stop_id, length, locations)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn stop_id(&self) -> &str {
        &self.stop_id
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn locations(&self) -> &[Point<f64>] {
        &self.locations
    }
}
