use std::fmt::{Display, Formatter, Result as FmtResult};

/// The letter rank of a play.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Grade {
    /// Silver SS, requires HD or FL.
    XH,
    /// SS
    X,
    /// Silver S, requires HD or FL.
    SH,
    S,
    A,
    B,
    C,
    D,
}

impl Default for Grade {
    #[inline]
    fn default() -> Self {
        Self::D
    }
}

impl Grade {
    /// Turn SS and S into their silver variants.
    #[inline]
    pub(crate) fn silver(self, hidden_or_flashlight: bool) -> Self {
        match self {
            Self::X if hidden_or_flashlight => Self::XH,
            Self::S if hidden_or_flashlight => Self::SH,
            other => other,
        }
    }

    /// Grade in osu!standard and osu!taiko based on the hit ratios.
    pub(crate) fn from_hit_ratios(n300: u32, n50: u32, n_misses: u32, n_objects: u32) -> Self {
        if n_objects == 0 {
            return Self::D;
        }

        let total = f64::from(n_objects);
        let ratio300 = f64::from(n300) / total;
        let ratio50 = f64::from(n50) / total;

        if n300 >= n_objects {
            Self::X
        } else if ratio300 > 0.9 && ratio50 < 0.01 && n_misses == 0 {
            Self::S
        } else if (ratio300 > 0.8 && n_misses == 0) || ratio300 > 0.9 {
            Self::A
        } else if (ratio300 > 0.7 && n_misses == 0) || ratio300 > 0.8 {
            Self::B
        } else if ratio300 > 0.6 {
            Self::C
        } else {
            Self::D
        }
    }

    /// Grade based on accuracy thresholds for S, A, B and C.
    ///
    /// `accuracy` is expected between `0.0` and `1.0`.
    pub(crate) fn from_accuracy(accuracy: f64, thresholds: [f64; 4]) -> Self {
        let [s, a, b, c] = thresholds;

        if accuracy >= 1.0 {
            Self::X
        } else if accuracy > s {
            Self::S
        } else if accuracy > a {
            Self::A
        } else if accuracy > b {
            Self::B
        } else if accuracy > c {
            Self::C
        } else {
            Self::D
        }
    }
}

impl Display for Grade {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let s = match self {
            Self::XH => "XH",
            Self::X => "X",
            Self::SH => "SH",
            Self::S => "S",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        };

        f.write_str(s)
    }
}
