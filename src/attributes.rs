use crate::{Beatmap, GameMode, GameMods, Grade};

/// Difficulty values and map statistics w.r.t. a set of mods.
///
/// Star values of modes other than osu!standard are not computed and stay `0.0`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultyAttributes {
    pub mode: GameMode,
    /// The final star rating.
    pub stars: f64,
    /// Star value of the aim skill.
    pub aim: f64,
    /// Star value of the speed skill.
    pub speed: f64,
    /// Weighted sum of the aim strain peaks.
    pub aim_difficulty: f64,
    /// Weighted sum of the speed strain peaks.
    pub speed_difficulty: f64,
    pub aim_length_bonus: f64,
    pub speed_length_bonus: f64,
    /// Objects whose spacing exceeds the streaming threshold.
    pub n_singles: u32,
    pub max_combo: u32,
    pub n_circles: u32,
    pub n_sliders: u32,
    pub n_spinners: u32,
    pub n_holds: u32,
    pub ar: f64,
    pub od: f64,
    pub cs: f64,
    pub hp: f64,
    /// The dominant bpm.
    pub bpm: f64,
    pub bpm_min: f64,
    pub bpm_max: f64,
    /// Seconds until the end of the last object.
    pub length: f64,
    /// Seconds of playtime without breaks.
    pub drain_length: f64,
    pub clock_rate: f64,
}

impl DifficultyAttributes {
    /// Stats of the first `passed_objects` objects with zeroed star values.
    pub(crate) fn base(map: &Beatmap, mods: GameMods, passed_objects: Option<usize>) -> Self {
        let attrs = map.attributes().mods(mods);

        let n_passed = passed_objects.map_or(map.hit_objects.len(), |n| n.min(map.hit_objects.len()));
        let objects = &map.hit_objects[..n_passed];

        let mut this = Self {
            mode: map.mode,
            max_combo: map.combo_of(objects),
            ar: attrs.ar,
            od: attrs.od,
            cs: attrs.cs,
            hp: attrs.hp,
            bpm: attrs.bpm(map.bpm()),
            bpm_min: attrs.bpm(map.bpm_min),
            bpm_max: attrs.bpm(map.bpm_max),
            length: attrs.duration(map.length()) / 1000.0,
            drain_length: attrs.duration(map.drain_length()) / 1000.0,
            clock_rate: attrs.clock_rate,
            ..Default::default()
        };

        for h in objects {
            if h.is_circle() {
                this.n_circles += 1;
            } else if h.is_slider() {
                this.n_sliders += 1;
            } else if h.is_spinner() {
                this.n_spinners += 1;
            } else {
                this.n_holds += 1;
            }
        }

        this
    }

    /// Total amount of hit objects.
    #[inline]
    pub fn n_objects(&self) -> u32 {
        self.n_circles + self.n_sliders + self.n_spinners + self.n_holds
    }
}

/// Peaks of the aim and speed strains, one value per section.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OsuStrains {
    /// Milliseconds covered by each section, unaffected by the clock rate.
    pub section_length: f64,
    pub aim: Vec<f64>,
    pub speed: Vec<f64>,
}

impl OsuStrains {
    /// Sum of both skills' peaks per section.
    pub fn combined(&self) -> Vec<f64> {
        self.aim
            .iter()
            .zip(self.speed.iter())
            .map(|(aim, speed)| aim + speed)
            .collect()
    }
}

/// Performance of an osu!standard play.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OsuPerformanceAttributes {
    pub difficulty: DifficultyAttributes,
    pub pp: f64,
    pub pp_aim: f64,
    pub pp_speed: f64,
    pub pp_acc: f64,
    /// Accuracy between `0.0` and `100.0`.
    pub accuracy: f64,
    pub grade: Grade,
}

/// Performance of an osu!taiko play.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaikoPerformanceAttributes {
    pub difficulty: DifficultyAttributes,
    /// The star rating the pp are based on.
    pub stars: f64,
    pub pp: f64,
    pub accuracy: f64,
    pub grade: Grade,
}

/// Performance of an osu!catch play.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FruitsPerformanceAttributes {
    pub difficulty: DifficultyAttributes,
    pub stars: f64,
    pub pp: f64,
    pub accuracy: f64,
    pub grade: Grade,
}

/// Performance of an osu!mania play.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ManiaPerformanceAttributes {
    pub difficulty: DifficultyAttributes,
    pub stars: f64,
    pub pp: f64,
    pub accuracy: f64,
    pub grade: Grade,
}

/// The result of a performance calculation based on the mode.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PerformanceAttributes {
    Osu(OsuPerformanceAttributes),
    Taiko(TaikoPerformanceAttributes),
    Fruits(FruitsPerformanceAttributes),
    Mania(ManiaPerformanceAttributes),
}

impl PerformanceAttributes {
    /// The pp value.
    #[inline]
    pub fn pp(&self) -> f64 {
        match self {
            Self::Osu(attrs) => attrs.pp,
            Self::Taiko(attrs) => attrs.pp,
            Self::Fruits(attrs) => attrs.pp,
            Self::Mania(attrs) => attrs.pp,
        }
    }

    /// The star value the pp are based on.
    #[inline]
    pub fn stars(&self) -> f64 {
        match self {
            Self::Osu(attrs) => attrs.difficulty.stars,
            Self::Taiko(attrs) => attrs.stars,
            Self::Fruits(attrs) => attrs.stars,
            Self::Mania(attrs) => attrs.stars,
        }
    }

    /// Accuracy between `0.0` and `100.0`.
    #[inline]
    pub fn accuracy(&self) -> f64 {
        match self {
            Self::Osu(attrs) => attrs.accuracy,
            Self::Taiko(attrs) => attrs.accuracy,
            Self::Fruits(attrs) => attrs.accuracy,
            Self::Mania(attrs) => attrs.accuracy,
        }
    }

    #[inline]
    pub fn grade(&self) -> Grade {
        match self {
            Self::Osu(attrs) => attrs.grade,
            Self::Taiko(attrs) => attrs.grade,
            Self::Fruits(attrs) => attrs.grade,
            Self::Mania(attrs) => attrs.grade,
        }
    }

    /// The difficulty attributes the calculation was based on.
    #[inline]
    pub fn difficulty(&self) -> &DifficultyAttributes {
        match self {
            Self::Osu(attrs) => &attrs.difficulty,
            Self::Taiko(attrs) => &attrs.difficulty,
            Self::Fruits(attrs) => &attrs.difficulty,
            Self::Mania(attrs) => &attrs.difficulty,
        }
    }

    /// The maximum combo of the map.
    #[inline]
    pub fn max_combo(&self) -> u32 {
        self.difficulty().max_combo
    }
}

impl From<OsuPerformanceAttributes> for DifficultyAttributes {
    #[inline]
    fn from(attributes: OsuPerformanceAttributes) -> Self {
        attributes.difficulty
    }
}

impl From<PerformanceAttributes> for DifficultyAttributes {
    #[inline]
    fn from(attributes: PerformanceAttributes) -> Self {
        match attributes {
            PerformanceAttributes::Osu(attrs) => attrs.difficulty,
            PerformanceAttributes::Taiko(attrs) => attrs.difficulty,
            PerformanceAttributes::Fruits(attrs) => attrs.difficulty,
            PerformanceAttributes::Mania(attrs) => attrs.difficulty,
        }
    }
}
