mod provenance;
mod travel_times_for_stop_path;
mod travel_times_for_trip;

pub use provenance::TravelTimeProvenance;
pub use travel_times_for_stop_path::TravelTimesForStopPath;
pub use travel_times_for_trip::TravelTimesForTrip;
