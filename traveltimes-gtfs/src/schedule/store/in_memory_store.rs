use std::{collections::HashMap, sync::Arc};

use traveltimes_core::model::{ActiveRevisions, RunRevisions, TravelTimesForTrip};

use super::{StagedRevision, StoredRevision, TravelTimesStore, TravelTimesTransaction};
use crate::schedule::ScheduleError;

/// a [`TravelTimesStore`] held in memory, for embedding callers and tests.
#[derive(Debug, Default)]
pub struct InMemoryTravelTimesStore {
    active: ActiveRevisions,
    revisions: HashMap<i32, StoredRevision>,
}

impl InMemoryTravelTimesStore {
    pub fn new(active: ActiveRevisions) -> Self {
        Self {
            active,
            revisions: HashMap::new(),
        }
    }

    pub fn with_revision(mut self, travel_times_rev: i32, revision: StoredRevision) -> Self {
        self.revisions.insert(travel_times_rev, revision);
        self
    }

    pub fn revision(&self, travel_times_rev: i32) -> Option<&StoredRevision> {
        self.revisions.get(&travel_times_rev)
    }

    pub fn set_active_revisions(&mut self, active: ActiveRevisions) {
        self.active = active;
    }
}

impl TravelTimesStore for InMemoryTravelTimesStore {
    fn active_revisions(&self) -> Result<ActiveRevisions, ScheduleError> {
        Ok(self.active)
    }

    fn read_travel_times(
        &self,
        travel_times_rev: i32,
    ) -> Result<HashMap<String, Vec<TravelTimesForTrip>>, ScheduleError> {
        Ok(self
            .revisions
            .get(&travel_times_rev)
            .map(|r| r.grouped_by_pattern())
            .unwrap_or_default())
    }

    fn begin(
        &mut self,
        revisions: RunRevisions,
    ) -> Result<Box<dyn TravelTimesTransaction + '_>, ScheduleError> {
        Ok(Box::new(InMemoryTransaction {
            store: self,
            travel_times_rev: revisions.travel_times_rev,
            staged: StagedRevision::default(),
        }))
    }
}

struct InMemoryTransaction<'a> {
    store: &'a mut InMemoryTravelTimesStore,
    travel_times_rev: i32,
    staged: StagedRevision,
}

impl TravelTimesTransaction for InMemoryTransaction<'_> {
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
        this.store
            .revisions
            .insert(this.travel_times_rev, this.staged.finish());
        Ok(())
    }

    fn rollback(self: Box<Self>) {
        log::debug!(
            "discarding {} staged trip assignments for travel times rev {}",
            self.staged.n_trips(),
            self.travel_times_rev
        );
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::schedule::test_fixtures::{pattern, revisions, travel_times_with_durations};
    use traveltimes_core::model::TravelTimeProvenance;

    #[test]
    fn test_uncommitted_writes_are_not_visible() {
        let mut store = InMemoryTravelTimesStore::new(ActiveRevisions::default());
        let p1 = pattern("p1", &[0.0, 500.0]);
        let tt = Arc::new(travel_times_with_durations(
            &p1,
            "t1",
            &[0, 1000],
            TravelTimeProvenance::Schedule,
        ));

        let mut tx = store
            .begin(revisions())
            .expect("test invariant failed: begin");
        tx.write_trip_travel_times("t1", &tt)
            .expect("test invariant failed: write");
        tx.rollback();
        assert!(store.revision(1).is_none());

        let mut tx = store
            .begin(revisions())
            .expect("test invariant failed: begin");
        tx.write_trip_travel_times("t1", &tt)
            .expect("test invariant failed: write");
        tx.commit().expect("commit should succeed");
        let revision = store.revision(1).expect("revision 1 should be committed");
        assert_eq!(revision.travel_times_for_trip("t1"), Some(tt.as_ref()));
    }

    #[test]
    fn test_read_unknown_revision_is_empty() {
        let store = InMemoryTravelTimesStore::new(ActiveRevisions::new(0, 4));
        let stored = store
            .read_travel_times(4)
            .expect("test invariant failed: read");
        assert!(stored.is_empty());
    }
}
