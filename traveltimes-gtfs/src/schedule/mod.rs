pub mod batch_ops;
pub mod gtfs_import;
mod schedule_data;
mod schedule_error;
pub mod schedule_time_lookup;
pub mod segment_partition;
mod sorted_trip;
pub mod store;
mod travel_times_builder;
mod travel_times_config;
pub mod travel_times_matcher;
pub mod trip_processor;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use batch_ops::{BatchSummary, ScheduleBasedTravelTimesProcessor};
pub use schedule_data::{RawStopTime, ScheduleData};
pub use schedule_error::ScheduleError;
pub use sorted_trip::SortedTrip;
pub use travel_times_builder::ScheduleBasedTravelTimesBuilder;
pub use travel_times_config::TravelTimesConfig;
pub use trip_processor::{TravelTimesCache, TripOutcome};
