use std::{
    collections::HashMap,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::de::DeserializeOwned;
use traveltimes_core::model::{ActiveRevisions, RunRevisions, TravelTimesForTrip};

use super::{StagedRevision, StoredRevision, TravelTimesStore, TravelTimesTransaction};
use crate::schedule::ScheduleError;

pub const ACTIVE_REVISIONS_FILENAME: &str = "active_revisions.json";

pub fn revision_filename(travel_times_rev: i32) -> String {
    format!("travel-times-rev-{travel_times_rev}.json")
}

/// a [`TravelTimesStore`] backed by JSON files in a directory: one file naming the
/// active revisions and one file per travel times revision. a revision file only
/// appears once its transaction commits.
#[derive(Debug, Clone)]
pub struct JsonFileTravelTimesStore {
    directory: PathBuf,
}

impl JsonFileTravelTimesStore {
    pub fn new(directory: &Path) -> Result<Self, ScheduleError> {
        std::fs::create_dir_all(directory).map_err(|e| {
            ScheduleError::Persistence(format!(
                "unable to create store directory '{}': {e}",
                directory.to_string_lossy()
            ))
        })?;
        Ok(Self {
            directory: directory.to_path_buf(),
        })
    }

    /// records which revisions are active. this is the promotion step that makes a
    /// newly written travel times revision the one later runs read from.
    pub fn set_active_revisions(&self, active: &ActiveRevisions) -> Result<(), ScheduleError> {
        let contents = serde_json::to_string_pretty(active).map_err(|e| {
            ScheduleError::Persistence(format!("failure serializing active revisions: {e}"))
        })?;
        write_atomic(&self.directory, ACTIVE_REVISIONS_FILENAME, &contents)
    }

    pub fn read_revision(
        &self,
        travel_times_rev: i32,
    ) -> Result<Option<StoredRevision>, ScheduleError> {
        read_json(&self.directory.join(revision_filename(travel_times_rev)))
    }
}

impl TravelTimesStore for JsonFileTravelTimesStore {
    fn active_revisions(&self) -> Result<ActiveRevisions, ScheduleError> {
        let filepath = self.directory.join(ACTIVE_REVISIONS_FILENAME);
        match read_json(&filepath)? {
            Some(active) => Ok(active),
            None => {
                log::info!(
                    "no {ACTIVE_REVISIONS_FILENAME} in '{}', starting from default revisions",
                    self.directory.to_string_lossy()
                );
                Ok(ActiveRevisions::default())
            }
        }
    }

    fn read_travel_times(
        &self,
        travel_times_rev: i32,
    ) -> Result<HashMap<String, Vec<TravelTimesForTrip>>, ScheduleError> {
        Ok(self
            .read_revision(travel_times_rev)?
            .map(|r| r.grouped_by_pattern())
            .unwrap_or_default())
    }

    fn begin(
        &mut self,
        revisions: RunRevisions,
    ) -> Result<Box<dyn TravelTimesTransaction + '_>, ScheduleError> {
        Ok(Box::new(JsonFileTransaction {
            directory: &self.directory,
            travel_times_rev: revisions.travel_times_rev,
            staged: StagedRevision::default(),
        }))
    }
}

struct JsonFileTransaction<'a> {
    directory: &'a Path,
    travel_times_rev: i32,
    staged: StagedRevision,
}

impl TravelTimesTransaction for JsonFileTransaction<'_> {
    fn write_trip_travel_times(
        &mut self,
        trip_id: &str,
        travel_times: &Arc<TravelTimesForTrip>,
    ) -> Result<(), ScheduleError> {
        self.staged.assign(trip_id, travel_times);
        Ok(())
    }

    fn commit(self: Box<Self>) -> Result<(), ScheduleError> {
        let this = *self;
        let filename = revision_filename(this.travel_times_rev);
        let revision = this.staged.finish();
        let contents = serde_json::to_string(&revision).map_err(|e| {
            ScheduleError::Persistence(format!("failure serializing {filename}: {e}"))
        })?;
        write_atomic(this.directory, &filename, &contents)
    }

    fn rollback(self: Box<Self>) {
        log::debug!(
            "discarding {} staged trip assignments for {}",
            self.staged.n_trips(),
            revision_filename(self.travel_times_rev)
        );
    }
}

/// writes to a temporary file then renames it over the destination, so readers
/// never observe a partially written file. the temporary file is removed if the
/// rename fails.
fn write_atomic(directory: &Path, filename: &str, contents: &str) -> Result<(), ScheduleError> {
    let tmp_filepath = directory.join(format!("{filename}.tmp"));
    let filepath = directory.join(filename);
    std::fs::write(&tmp_filepath, contents).map_err(|e| {
        ScheduleError::Persistence(format!(
            "failure writing to {}: {e}",
            tmp_filepath.to_string_lossy()
        ))
    })?;
    std::fs::rename(&tmp_filepath, &filepath).map_err(|e| {
        if let Err(remove_error) = std::fs::remove_file(&tmp_filepath) {
            log::warn!(
                "unable to remove {}: {remove_error}",
                tmp_filepath.to_string_lossy()
            );
        }
        ScheduleError::Persistence(format!(
            "failure moving {} to {}: {e}",
            tmp_filepath.to_string_lossy(),
            filepath.to_string_lossy()
        ))
    })
}

/// reads a JSON file, or None if the file does not exist.
fn read_json<T: DeserializeOwned>(filepath: &Path) -> Result<Option<T>, ScheduleError> {
    if !filepath.is_file() {
        return Ok(None);
    }
    let file = File::open(filepath).map_err(|e| {
        ScheduleError::Persistence(format!(
            "failure reading {}: {e}",
            filepath.to_string_lossy()
        ))
    })?;
    let value = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        ScheduleError::Persistence(format!(
            "failure parsing {}: {e}",
            filepath.to_string_lossy()
        ))
    })?;
    Ok(Some(value))
}
