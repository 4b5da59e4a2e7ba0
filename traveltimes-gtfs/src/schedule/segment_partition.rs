/// a stop path divided into equal-length travel time segments.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentPartition {
    /// meters
    pub segment_length: f64,
    pub segment_travel_times_msec: Vec<u32>,
}

impl SegmentPartition {
    pub fn n_segments(&self) -> usize {
        self.segment_travel_times_msec.len()
    }
}

/// number of travel time segments for a path. paths no longer than the maximum
/// use one segment, longer paths use floor(length / max) + 1, which adds a segment
/// even when the length is an exact multiple of the maximum.
pub fn n_segments(path_length: f64, max_segment_length: f64) -> usize {
    if path_length > max_segment_length {
        (path_length / max_segment_length + 1.0) as usize
    } else {
        1
    }
}

/// splits a path into equal-length segments that share the travel time allotted to
/// the path in proportion to their length.
pub fn partition(
    path_length: f64,
    max_segment_length: f64,
    path_travel_time_msec: f64,
) -> SegmentPartition {
    let n = n_segments(path_length, max_segment_length);
    let segment_length = path_length / n as f64;
    let segment_msec = if path_length > 0.0 {
        segment_length / path_length * path_travel_time_msec
    } else {
        path_travel_time_msec / n as f64
    };
    // float-to-int casts saturate, so negative or NaN durations become zero
    SegmentPartition {
        segment_length,
        segment_travel_times_msec: vec![segment_msec as u32; n],
    }
}
