mod in_memory_store;
mod json_file_store;
mod stored_revision;
mod travel_times_store;

pub use in_memory_store::InMemoryTravelTimesStore;
pub use json_file_store::{revision_filename, JsonFileTravelTimesStore, ACTIVE_REVISIONS_FILENAME};
pub use stored_revision::{StagedRevision, StoredRevision};
pub use travel_times_store::{TravelTimesStore, TravelTimesTransaction};
