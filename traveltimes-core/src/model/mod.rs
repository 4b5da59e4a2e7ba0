mod error;
mod revisions;
mod schedule_time;
mod stop_path;
pub mod travel_times;
mod trip;
mod trip_pattern;

pub use error::TravelTimesModelError;
pub use revisions::{ActiveRevisions, RunRevisions};
pub use schedule_time::ScheduleTime;
pub use stop_path::StopPath;
pub use travel_times::{TravelTimeProvenance, TravelTimesForStopPath, TravelTimesForTrip};
pub use trip::Trip;
pub use trip_pattern::TripPattern;

/// milliseconds per second, for converting schedule seconds into travel time units.
pub const MS_PER_SEC: i64 = 1000;
