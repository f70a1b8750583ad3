use std::cmp::Ordering;

/// A timing point as found in the `[TimingPoints]` section.
///
/// After parsing, `beat_length` and `bpm` of inherited points carry the
/// values of the closest preceding uninherited point.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimingPoint {
    /// Start time in milliseconds.
    pub offset: f64,
    /// Milliseconds per beat.
    pub beat_length: f64,
    /// Whether this point defines a new bpm rather than a velocity change.
    pub uninherited: bool,
    /// `1.0` for uninherited points.
    pub velocity_multiplier: f64,
    /// Rounded beats per minute, `0.0` if the beat length was unusable.
    pub bpm: f64,
    pub meter: u32,
    pub sample_set: u8,
    pub sample_index: u32,
    pub volume: u32,
    pub kiai: bool,
}

impl TimingPoint {
    pub const DEFAULT_BEAT_LEN: f64 = 1000.0;

    pub(crate) const DEFAULT: Self = Self {
        offset: 0.0,
        beat_length: Self::DEFAULT_BEAT_LEN,
        uninherited: true,
        velocity_multiplier: 1.0,
        bpm: 60.0,
        meter: 4,
        sample_set: 0,
        sample_index: 0,
        volume: 100,
        kiai: false,
    };

    /// Whether this point inherits its bpm.
    #[inline]
    pub fn is_inherited(&self) -> bool {
        !self.uninherited
    }
}

impl Default for TimingPoint {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl PartialOrd for TimingPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.offset.partial_cmp(&other.offset)
    }
}

/// `60_000 / beat_length` rounded, `None` for unusable beat lengths.
#[inline]
pub(crate) fn bpm_of(beat_length: f64) -> Option<f64> {
    (beat_length.is_finite() && beat_length > 0.0).then(|| (60_000.0 / beat_length).round())
}

/// `|100 / beat_length|` of an inherited point, `1.0` if not finite.
#[inline]
pub(crate) fn velocity_of(beat_length: f64) -> f64 {
    let velocity = (100.0 / beat_length).abs();

    if velocity.is_finite() {
        velocity
    } else {
        1.0
    }
}

/// Sort the points and resolve each inherited point's beat length and bpm.
///
/// The first point is always treated as uninherited.
pub(crate) fn resolve(mut points: Vec<TimingPoint>) -> Vec<TimingPoint> {
    points.sort_by(|a, b| a.offset.partial_cmp(&b.offset).unwrap_or(Ordering::Equal));

    let mut resolved = Vec::with_capacity(points.len().max(1));
    let mut iter = points.into_iter();

    let mut governing = match iter.next() {
        Some(first) if first.uninherited && bpm_of(first.beat_length).is_some() => first,
        Some(first) => TimingPoint {
            uninherited: true,
            beat_length: TimingPoint::DEFAULT_BEAT_LEN,
            velocity_multiplier: 1.0,
            bpm: 60.0,
            ..first
        },
        None => TimingPoint::DEFAULT,
    };

    resolved.push(governing);

    for point in iter {
        if point.uninherited && bpm_of(point.beat_length).is_some() {
            governing = point;
            resolved.push(point);
        } else {
            resolved.push(TimingPoint {
                beat_length: governing.beat_length,
                bpm: governing.bpm,
                ..point
            });
        }
    }

    resolved
}

/// Find the point that is active at `offset`.
///
/// Objects before the first point use the first point.
pub(crate) fn point_at(points: &[TimingPoint], offset: f64) -> &TimingPoint {
    points
        .iter()
        .rev()
        .find(|point| point.offset <= offset)
        .or_else(|| points.first())
        .unwrap_or(&TimingPoint::DEFAULT)
}
