#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TravelTimesModelError {
    #[error("trip pattern {pattern_id} has {expected} stop paths but travel times created for trip {trip_created_for_id} have {found}")]
    StopPathCountMismatch {
        pattern_id: String,
        trip_created_for_id: String,
        expected: usize,
        found: usize,
    },
    #[error("trip pattern {pattern_id} has stop path {expected} at index {index} but travel times created for trip {trip_created_for_id} have {found}")]
    StopPathIdMismatch {
        pattern_id: String,
        trip_created_for_id: String,
        index: usize,
        expected: String,
        found: String,
    },
}
