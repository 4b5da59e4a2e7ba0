use std::collections::BinaryHeap;

use gtfs_structures::{StopTime, Trip};

use crate::schedule::{schedule_error::ScheduleError, RawStopTime};

/// a GTFS trip with its stop times in stop sequence order, prepared for building
/// trip patterns and schedule stop times.
pub struct SortedTrip {
    /// GTFS trip identifier
    pub trip_id: String,
    /// GTFS route_id associated with this [`Trip`]
    pub route_id: String,
    /// service associated with this trip
    pub service_id: String,
    /// list of [`StopTime`] values associated with this [`Trip`] in sorted order
    pub stop_times: Vec<StopTime>,
}

impl SortedTrip {
    pub fn new(trip: &Trip) -> Result<SortedTrip, ScheduleError> {
        let stop_times = get_ordered_stops(trip)?;
        Ok(Self {
            trip_id: trip.id.clone(),
            route_id: trip.route_id.clone(),
            service_id: trip.service_id.clone(),
            stop_times,
        })
    }

    /// stop ids visited by this trip, in order.
    pub fn stop_ids(&self) -> Vec<String> {
        self.stop_times.iter().map(|st| st.stop.id.clone()).collect()
    }

    pub fn raw_stop_times(&self) -> Vec<RawStopTime> {
        self.stop_times
            .iter()
            .map(|st| RawStopTime {
                stop_id: st.stop.id.clone(),
                stop_sequence: st.stop_sequence,
                arrival_time: st.arrival_time,
                departure_time: st.departure_time,
            })
            .collect()
    }
}

/// Returns an ordered (ascending) vector of [StopTime]. Internally uses [BinaryHeap] to sort. In order to return the
/// [BinaryHeap] itself, [StopTime] would need to implement [Ord].
fn get_ordered_stops(trip: &Trip) -> Result<Vec<StopTime>, ScheduleError> {
    let stop_queue_order: BinaryHeap<(u32, usize)> = trip
        .stop_times
        .iter()
        .enumerate()
        .map(|(i, st)| (st.stop_sequence, i))
        .collect();

    stop_queue_order
        .into_sorted_vec()
        .iter()
        .map(|(_, idx)| {
            trip.stop_times.get(*idx).cloned().ok_or_else(|| {
                let msg = format!("expected stop index {idx} not found in trip {}", trip.id);
                ScheduleError::MalformedGtfs(msg)
            })
        })
        .collect::<Result<Vec<_>, _>>()
}

#[cfg(test)]
mod test {
    use super::SortedTrip;
    use crate::schedule::test_fixtures::write_gtfs_feed;
    use gtfs_structures::Gtfs;

    #[test]
    fn test_stop_times_ordered_by_stop_sequence() {
        let feed = write_gtfs_feed("sorted-trip");
        let gtfs = Gtfs::new(&feed.to_string_lossy()).expect("test invariant failed: read feed");

        for trip in gtfs.trips.values() {
            let sorted = SortedTrip::new(trip).expect("should not fail");
            assert!(sorted
                .stop_times
                .iter()
                .map(|st| st.stop_sequence)
                .collect::<Vec<u32>>()
                .is_sorted());
        }
        // the feed lists the stop times of t3 out of order
        let t3 = SortedTrip::new(&gtfs.trips["t3"]).expect("should not fail");
        assert_eq!(t3.stop_ids(), vec!["a", "b", "c"]);
        let raw = t3.raw_stop_times();
        assert_eq!(raw[0].departure_time, Some(8 * 3600 + 30 * 60));
        assert_eq!(raw[1].arrival_time, None);
    }
}
