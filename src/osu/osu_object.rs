use crate::parse::{HitObject, HitObjectKind, Pos2};

/// A hit object with positions in normalized osu!pixels.
pub(crate) struct OsuObject {
    pub(crate) time: f64,
    pub(crate) pos: Pos2,
    pub(crate) end_pos: Pos2,
    /// Spinners and holds have no position worth jumping to.
    pub(crate) is_spinner: bool,
}

impl OsuObject {
    pub(crate) fn new(h: &HitObject, scaling_factor: f64) -> Self {
        let pos = h.pos * scaling_factor;

        let (end_pos, is_spinner) = match &h.kind {
            HitObjectKind::Circle => (pos, false),
            HitObjectKind::Slider(slider) => (slider.end_pos * scaling_factor, false),
            HitObjectKind::Spinner { .. } | HitObjectKind::Hold { .. } => (pos, true),
        };

        Self {
            time: h.start_time,
            pos,
            end_pos,
            is_spinner,
        }
    }

    #[inline]
    pub(crate) fn is_spinner(&self) -> bool {
        self.is_spinner
    }
}
