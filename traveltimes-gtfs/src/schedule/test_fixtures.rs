//! builders for the small trip patterns and schedules used across unit tests.
use std::{
    collections::HashMap,
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

use geo::Point;
use traveltimes_core::model::{
    RunRevisions, StopPath, TravelTimeProvenance, TravelTimesForStopPath, TravelTimesForTrip,
    Trip, TripPattern,
};

use crate::schedule::{RawStopTime, ScheduleData, TravelTimesConfig};

pub fn raw_stop_time(
    stop_id: &str,
    stop_sequence: u32,
    arrival_time: Option<u32>,
    departure_time: Option<u32>,
) -> RawStopTime {
    RawStopTime {
        stop_id: stop_id.to_string(),
        stop_sequence,
        arrival_time,
        departure_time,
    }
}

pub fn schedule_with_stop_times(stop_times: Vec<(&str, Vec<RawStopTime>)>) -> ScheduleData {
    let mut schedule = ScheduleData::new();
    schedule.set_stop_times(
        stop_times
            .into_iter()
            .map(|(trip_id, rows)| (trip_id.to_string(), rows))
            .collect::<HashMap<_, _>>(),
    );
    schedule
}

/// a pattern whose stop path `k` has the given length and ends at stop `s{k}`.
/// the first path is a single-point stub regardless of the length passed for it.
pub fn pattern(id: &str, lengths: &[f64]) -> Arc<TripPattern> {
    let paths = lengths
        .iter()
        .enumerate()
        .map(|(k, length)| {
            let path_id = format!("{id}_path{k}");
            let stop_id = format!("s{k}");
            if k == 0 {
                StopPath::new(&path_id, &stop_id, 0.0, vec![Point::new(0.0, 0.0)])
            } else {
                let locations = vec![Point::new(0.0, k as f64 - 1.0), Point::new(0.0, k as f64)];
                StopPath::new(&path_id, &stop_id, *length, locations)
            }
        })
        .collect();
    Arc::new(TripPattern::new(id, "r1", paths))
}

pub fn trip(id: &str, pattern: &Arc<TripPattern>) -> Trip {
    Trip::new(id, pattern.route_id(), "weekday", pattern.clone())
}

pub fn config(default_wait_time_at_stop_msec: u32, max_segment_length: f64) -> TravelTimesConfig {
    TravelTimesConfig {
        default_wait_time_at_stop_msec,
        max_travel_time_segment_length: max_segment_length,
        ..TravelTimesConfig::default()
    }
}

pub fn revisions() -> RunRevisions {
    RunRevisions {
        config_rev: 0,
        travel_times_rev: 1,
    }
}

/// travel times for every path of the pattern with one segment per path holding
/// the given duration.
pub fn travel_times_with_durations(
    pattern: &TripPattern,
    trip_created_for_id: &str,
    durations_msec: &[u32],
    provenance: TravelTimeProvenance,
) -> TravelTimesForTrip {
    let mut travel_times = TravelTimesForTrip::new(revisions(), pattern.id(), trip_created_for_id);
    for (path, duration) in pattern.stop_paths().iter().zip(durations_msec) {
        travel_times.add(TravelTimesForStopPath::new(
            path.id(),
            path.length(),
            path.length(),
            vec![*duration],
            0,
            None,
            provenance,
        ));
    }
    travel_times
}

/// writes a small GTFS feed to a fresh temporary directory and returns its path.
///
/// route r1 runs stops a, b, c on trips t1, t2 and t3, and stops a, b on trip t4.
/// stop c has no coordinates of its own and takes them from parent station cs.
/// t3 lists its stop times out of order and has no time at b. t5 has no stop times.
pub fn write_gtfs_feed(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "traveltimes-gtfs-feed-{}-{name}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("test invariant failed: create feed directory");
    let files = [
        (
            "agency.txt",
            "agency_id,agency_name,agency_url,agency_timezone\n\
             ag1,Test Transit,https://example.com,America/Denver\n",
        ),
        (
            "calendar.txt",
            "service_id,monday,tuesday,wednesday,thursday,friday,saturday,sunday,start_date,end_date\n\
             weekday,1,1,1,1,1,0,0,20250101,20251231\n",
        ),
        (
            "routes.txt",
            "route_id,agency_id,route_short_name,route_long_name,route_type\n\
             r1,ag1,1,Main Street,3\n",
        ),
        (
            "stops.txt",
            "stop_id,stop_name,stop_lat,stop_lon,location_type,parent_station\n\
             a,A,40.0,-105.0,0,\n\
             b,B,40.0045,-105.0,0,\n\
             cs,C Station,40.009,-105.0,1,\n\
             c,C,,,0,cs\n",
        ),
        (
            "trips.txt",
            "route_id,service_id,trip_id\n\
             r1,weekday,t1\n\
             r1,weekday,t2\n\
             r1,weekday,t3\n\
             r1,weekday,t4\n\
             r1,weekday,t5\n",
        ),
        (
            "stop_times.txt",
            "trip_id,arrival_time,departure_time,stop_id,stop_sequence\n\
             t1,08:00:00,08:00:00,a,1\n\
             t1,08:02:00,08:02:00,b,2\n\
             t1,08:04:00,08:04:00,c,3\n\
             t2,08:15:00,08:15:00,a,1\n\
             t2,08:17:00,08:17:00,b,2\n\
             t2,08:19:00,08:19:00,c,3\n\
             t3,08:36:00,08:36:00,c,3\n\
             t3,08:30:00,08:30:00,a,1\n\
             t3,,,b,2\n\
             t4,09:00:00,09:00:00,a,1\n\
             t4,09:02:00,09:02:00,b,2\n",
        ),
    ];
    for (filename, contents) in files {
        std::fs::write(dir.join(filename), contents)
            .expect("test invariant failed: write feed file");
    }
    dir
}

/// appends trip t0 to a feed written by [`write_gtfs_feed`], running r1 over stops b
/// and c only, a stop sequence no other trip uses.
pub fn add_route_variant(feed: &Path) {
    let append = |filename: &str, rows: &str| {
        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(feed.join(filename))
            .expect("test invariant failed: open feed file");
        file.write_all(rows.as_bytes())
            .expect("test invariant failed: append to feed file");
    };
    append("trips.txt", "r1,weekday,t0\n");
    append(
        "stop_times.txt",
        "t0,07:00:00,07:00:00,b,1\n\
         t0,07:02:00,07:02:00,c,2\n",
    );
}
