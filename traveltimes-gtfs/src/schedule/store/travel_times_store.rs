use std::{collections::HashMap, sync::Arc};

use traveltimes_core::model::{ActiveRevisions, RunRevisions, TravelTimesForTrip};

use crate::schedule::ScheduleError;

/// durable storage of travel times, versioned by travel times revision.
pub trait TravelTimesStore {
    /// the revisions currently considered authoritative.
    fn active_revisions(&self) -> Result<ActiveRevisions, ScheduleError>;

    /// stored travel times for a revision grouped by trip pattern id. an unknown
    /// revision has no travel times.
    fn read_travel_times(
        &self,
        travel_times_rev: i32,
    ) -> Result<HashMap<String, Vec<TravelTimesForTrip>>, ScheduleError>;

    /// opens a unit of work that writes under the run's travel times revision.
    /// nothing written through it is visible until it is committed.
    fn begin(
        &mut self,
        revisions: RunRevisions,
    ) -> Result<Box<dyn TravelTimesTransaction + '_>, ScheduleError>;
}

/// all-or-nothing writes of trip travel time assignments.
pub trait TravelTimesTransaction {
    fn write_trip_travel_times(
        &mut self,
        trip_id: &str,
        travel_times: &Arc<TravelTimesForTrip>,
    ) -> Result<(), ScheduleError>;

    fn commit(self: Box<Self>) -> Result<(), ScheduleError>;

    /// discards every write made through this transaction.
    fn rollback(self: Box<Self>);
}
