#[derive(thiserror::Error, Debug)]
pub enum ScheduleError {
    #[error("Failed to parse gtfs bundle file into `Gtfs` struct: {0}")]
    BundleRead(#[from] gtfs_structures::Error),
    #[error("trips not yet read in before processing travel times")]
    TripsNotLoaded,
    #[error("stop times not yet read in before processing travel times")]
    StopTimesNotLoaded,
    #[error("trip {trip_id} has no schedule time for its first stop {stop_id}")]
    MissingInitialScheduleTime { trip_id: String, stop_id: String },
    #[error("invalid travel times configuration: {0}")]
    InvalidConfig(String),
    #[error("failure writing travel times for trip {trip_id} of trip pattern {pattern_id}: {error}")]
    TripPersistence {
        trip_id: String,
        pattern_id: String,
        error: String,
    },
    #[error("failure in travel times store: {0}")]
    Persistence(String),
    #[error("while processing trip {trip_id} of trip pattern {pattern_id}, {source}")]
    TripProcessing {
        trip_id: String,
        pattern_id: String,
        source: Box<ScheduleError>,
    },
    #[error("error due to dataset contents: {0}")]
    InvalidData(String),
    #[error("GTFS archive is malformed: {0}")]
    MalformedGtfs(String),
    #[error("Internal Error: {0}")]
    Internal(String),
}
