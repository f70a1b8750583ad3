use super::{EdgeSound, Pos2};

use std::cmp::Ordering;

/// Hitobject as parsed from the `[HitObjects]` section.
///
/// Derived values like a slider's end time and end position are computed
/// while the [`Beatmap`](crate::Beatmap) is built.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitObject {
    /// Position in osu!pixels.
    pub pos: Pos2,
    /// Start time in milliseconds.
    pub start_time: f64,
    /// Whether the object starts a new combo.
    pub new_combo: bool,
    /// Amount of combo colours to skip.
    pub combo_skip: u8,
    /// Sound bit set, see [`HitSound`](crate::parse::HitSound).
    pub sound: u8,
    /// Data specific to the object type.
    pub kind: HitObjectKind,
}

impl HitObject {
    /// End time in milliseconds. Equals the start time for circles.
    #[inline]
    pub fn end_time(&self) -> f64 {
        match &self.kind {
            HitObjectKind::Circle => self.start_time,
            HitObjectKind::Slider(slider) => slider.end_time,
            HitObjectKind::Spinner { end_time } | HitObjectKind::Hold { end_time } => *end_time,
        }
    }

    /// Position at the end of the object, i.e. the slider end for sliders.
    #[inline]
    pub fn end_pos(&self) -> Pos2 {
        match &self.kind {
            HitObjectKind::Slider(slider) => slider.end_pos,
            _ => self.pos,
        }
    }

    #[inline]
    pub fn is_circle(&self) -> bool {
        matches!(self.kind, HitObjectKind::Circle)
    }

    #[inline]
    pub fn is_slider(&self) -> bool {
        matches!(self.kind, HitObjectKind::Slider(_))
    }

    #[inline]
    pub fn is_spinner(&self) -> bool {
        matches!(self.kind, HitObjectKind::Spinner { .. })
    }

    #[inline]
    pub fn is_hold(&self) -> bool {
        matches!(self.kind, HitObjectKind::Hold { .. })
    }
}

impl PartialOrd for HitObject {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.start_time.partial_cmp(&other.start_time)
    }
}

/// Further data related to specific object types.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HitObjectKind {
    Circle,
    Slider(Slider),
    Spinner { end_time: f64 },
    /// osu!mania hold note.
    Hold { end_time: f64 },
}

/// Slider data.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slider {
    pub curve_type: CurveType,
    /// Control points in osu!pixels, the slider head being the first one.
    pub control_points: Vec<Pos2>,
    /// Amount of times the slider path is traversed.
    pub repeat_count: u32,
    /// Length of a single traversal, rounded to an integer.
    pub pixel_length: f64,
    /// One entry per edge, i.e. `repeat_count + 1` entries.
    pub edge_sounds: Vec<EdgeSound>,
    /// Computed through the timing point that is active at the slider head.
    pub duration: f64,
    pub end_time: f64,
    /// Cursor position once the last traversal is done.
    pub end_pos: Pos2,
}

/// The type of a slider's path.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveType {
    CatmullRom,
    Bezier,
    Linear,
    /// Circular arc through three points.
    PassThrough,
    /// Anything unrecognized; its end point is the last control point.
    Unknown,
}

impl CurveType {
    /// Map the first token of a slider's curve specification.
    #[inline]
    pub fn from_token(token: &str) -> Self {
        match token {
            "C" => Self::CatmullRom,
            "B" => Self::Bezier,
            "L" => Self::Linear,
            "P" => Self::PassThrough,
            _ => Self::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_tokens() {
        assert_eq!(CurveType::from_token("B"), CurveType::Bezier);
        assert_eq!(CurveType::from_token("P"), CurveType::PassThrough);
        assert_eq!(CurveType::from_token("L"), CurveType::Linear);
        assert_eq!(CurveType::from_token("C"), CurveType::CatmullRom);
        assert_eq!(CurveType::from_token("X"), CurveType::Unknown);
        assert_eq!(CurveType::from_token("b"), CurveType::Unknown);
    }
}
