use serde::{Deserialize, Serialize};

use crate::model::StopPath;

/// ordered stop paths shared by every trip that follows the same route variant.
/// immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPattern {
    id: String,
    route_id: String,
    stop_paths: Vec<StopPath>,
}

impl TripPattern {
    pub fn new(id: &str, route_id: &str, stop_paths: Vec<StopPath>) -> Self {
        Self {
            id: id.to_string(),
            route_id: route_id.to_string(),
            stop_paths,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn route_id(&self) -> &str {
        &self.route_id
    }

    pub fn stop_paths(&self) -> &[StopPath] {
        &self.stop_paths
    }

    pub fn n_stop_paths(&self) -> usize {
        self.stop_paths.len()
    }

    pub fn stop_path(&self, index: usize) -> Option<&StopPath> {
        self.stop_paths.get(index)
    }

    pub fn stop_path_id(&self, index: usize) -> Option<&str> {
        self.stop_paths.get(index).map(|p| p.id())
    }

    pub fn stop_id(&self, index: usize) -> Option<&str> {
        self.stop_paths.get(index).map(|p| p.stop_id())
    }
}
