use crate::{Beatmap, DifficultyAttributes, GameMode, GameMods, OsuStars, OsuStrains};

/// Difficulty calculator on maps of any mode.
///
/// Only osu!standard maps get a star rating. Other modes are processed into
/// their map statistics with zeroed star values.
///
/// # Example
///
/// ```
/// use beatmap_pp::{AnyStars, Beatmap};
///
/// # /*
/// let map: Beatmap = ...
/// # */
/// # let map = Beatmap::default();
///
/// let difficulty_attrs = AnyStars::new(&map)
///     .mods(8 + 64) // HDDT
///     .calculate();
///
/// println!("Stars: {}", difficulty_attrs.stars);
/// ```
#[derive(Clone, Debug)]
pub struct AnyStars<'m> {
    map: &'m Beatmap,
    mods: GameMods,
    passed_objects: Option<usize>,
}

impl<'m> AnyStars<'m> {
    /// Create a new difficulty calculator for maps of any mode.
    #[inline]
    pub fn new(map: &'m Beatmap) -> Self {
        Self {
            map,
            mods: GameMods::default(),
            passed_objects: None,
        }
    }

    /// Specify mods through their bit values or a [`GameMods`] value.
    ///
    /// See [https://github.com/ppy/osu-api/wiki#mods](https://github.com/ppy/osu-api/wiki#mods)
    #[inline]
    pub fn mods(mut self, mods: impl Into<GameMods>) -> Self {
        self.mods = mods.into();

        self
    }

    /// Amount of passed objects for partial plays, e.g. a fail.
    #[inline]
    pub fn passed_objects(mut self, passed_objects: usize) -> Self {
        self.passed_objects = Some(passed_objects);

        self
    }

    /// Consume the difficulty calculator and calculate
    /// difficulty attributes for the given parameters.
    pub fn calculate(self) -> DifficultyAttributes {
        match self.map.mode {
            GameMode::Osu => self.osu().calculate(),
            GameMode::Taiko | GameMode::Catch | GameMode::Mania => {
                DifficultyAttributes::base(self.map, self.mods, self.passed_objects)
            }
        }
    }

    /// Strain peaks of each section.
    ///
    /// Empty for modes other than osu!standard.
    pub fn strains(self) -> OsuStrains {
        match self.map.mode {
            GameMode::Osu => self.osu().strains(),
            GameMode::Taiko | GameMode::Catch | GameMode::Mania => OsuStrains::default(),
        }
    }

    fn osu(&self) -> OsuStars<'m> {
        let stars = OsuStars::new(self.map).mods(self.mods);

        match self.passed_objects {
            Some(passed_objects) => stars.passed_objects(passed_objects),
            None => stars,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAIKO: &str = "osu file format v14

[General]
Mode: 1

[HitObjects]
256,192,1000,1,0
256,192,1200,1,8
256,192,1400,1,2
";

    #[test]
    fn other_modes_have_no_stars() {
        let map: Beatmap = TAIKO.parse().unwrap();
        let attrs = AnyStars::new(&map).mods(GameMods::HR).calculate();

        assert_eq!(attrs.mode, GameMode::Taiko);
        assert!(attrs.stars.abs() < f64::EPSILON);
        assert_eq!(attrs.max_combo, 3);
        assert_eq!(attrs.n_circles, 3);
        assert!((attrs.od - 7.0).abs() < 1e-12);
        assert!(AnyStars::new(&map).strains().aim.is_empty());
    }
}
