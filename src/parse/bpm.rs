use std::collections::BTreeMap;

use super::TimingPoint;

/// The beat length that governs the largest share of the map until
/// `last_time`, expressed as bpm.
///
/// The first timing point is considered to start at `0`.
pub(crate) fn dominant_bpm(timing_points: &[TimingPoint], last_time: f64) -> f64 {
    let mut durations = BeatLenDuration::new(last_time);

    let uninherited: Vec<&TimingPoint> = timing_points.iter().filter(|t| t.uninherited).collect();

    match uninherited.as_slice() {
        [curr] => durations.add(curr.beat_length, 0.0, last_time),
        [curr, next, ..] => durations.add(curr.beat_length, 0.0, next.offset),
        [] => return 0.0,
    }

    uninherited
        .iter()
        .skip(1)
        .zip(uninherited.iter().skip(2).map(|t| t.offset))
        .for_each(|(curr, next_time)| durations.add(curr.beat_length, curr.offset, next_time));

    if let [.., _, curr] = uninherited.as_slice() {
        durations.add(curr.beat_length, curr.offset, last_time);
    }

    let beat_length = durations
        .map
        .into_iter()
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map_or(0.0, |(beat_length, _)| f64::from_bits(beat_length));

    if beat_length > 0.0 {
        60_000.0 / beat_length
    } else {
        0.0
    }
}

/// Maps `beat_length` to a cumulative duration.
///
/// Ordered by beat length so that ties resolve deterministically.
struct BeatLenDuration {
    last_time: f64,
    map: BTreeMap<u64, f64>,
}

impl BeatLenDuration {
    fn new(last_time: f64) -> Self {
        Self {
            last_time,
            map: BTreeMap::new(),
        }
    }

    fn add(&mut self, beat_length: f64, curr_time: f64, next_time: f64) {
        let beat_length = (1000.0 * beat_length).round() / 1000.0;
        let entry = self.map.entry(beat_length.to_bits()).or_default();

        if curr_time <= self.last_time {
            *entry += next_time.min(self.last_time) - curr_time;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(offset: f64, beat_length: f64) -> TimingPoint {
        TimingPoint {
            offset,
            beat_length,
            ..Default::default()
        }
    }

    #[test]
    fn single_point() {
        let bpm = dominant_bpm(&[point(500.0, 500.0)], 10_000.0);

        assert!((bpm - 120.0).abs() < 1e-9);
    }

    #[test]
    fn longest_section_wins() {
        let points = [point(0.0, 500.0), point(2000.0, 250.0), point(9000.0, 500.0)];
        let bpm = dominant_bpm(&points, 10_000.0);

        assert!((bpm - 240.0).abs() < 1e-9);
    }

    #[test]
    fn sections_after_last_object_ignored() {
        let points = [point(0.0, 500.0), point(5000.0, 250.0), point(6000.0, 300.0)];
        let bpm = dominant_bpm(&points, 4000.0);

        assert!((bpm - 120.0).abs() < 1e-9);
    }
}
