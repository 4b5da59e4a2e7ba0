mod traveltimes_app;

pub use traveltimes_app::{TravelTimesApp, TravelTimesOperation};
