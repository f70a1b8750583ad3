use crate::{
    Beatmap, DifficultyAttributes, FruitsPP, GameMode, GameMods, ManiaPP, OsuPP,
    PerformanceAttributes, ScoreState, TaikoPP,
};

/// Performance calculator on maps of any mode.
///
/// # Example
///
/// ```
/// use beatmap_pp::{AnyPP, Beatmap};
///
/// # /*
/// let map: Beatmap = ...
/// # */
///
/// # let map = Beatmap::default();
/// let pp_result = AnyPP::new(&map)
///     .mods(8 + 64) // HDDT
///     .combo(1234)
///     .misses(1)
///     .accuracy(98.5)
///     .calculate();
///
/// println!("PP: {} | Stars: {}", pp_result.pp(), pp_result.stars());
///
/// let next_result = AnyPP::new(&map)
///     .attributes(pp_result)  // reusing previous results for performance
///     .mods(8 + 64)           // has to be the same to reuse attributes
///     .accuracy(99.5)
///     .calculate();
///
/// println!("PP: {} | Stars: {}", next_result.pp(), next_result.stars());
/// ```
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Debug)]
pub enum AnyPP<'m> {
    /// osu!catch performance calculator
    Fruits(FruitsPP<'m>),
    /// osu!mania performance calculator
    Mania(ManiaPP<'m>),
    /// osu!standard performance calculator
    Osu(OsuPP<'m>),
    /// osu!taiko performance calculator
    Taiko(TaikoPP<'m>),
}

impl<'m> AnyPP<'m> {
    /// Create a new performance calculator for maps of any mode.
    #[inline]
    pub fn new(map: &'m Beatmap) -> Self {
        match map.mode {
            GameMode::Catch => Self::Fruits(FruitsPP::new(map)),
            GameMode::Mania => Self::Mania(ManiaPP::new(map)),
            GameMode::Osu => Self::Osu(OsuPP::new(map)),
            GameMode::Taiko => Self::Taiko(TaikoPP::new(map)),
        }
    }

    /// Consume the performance calculator and calculate
    /// performance attributes for the given parameters.
    #[inline]
    pub fn calculate(self) -> PerformanceAttributes {
        match self {
            Self::Fruits(f) => PerformanceAttributes::Fruits(f.calculate()),
            Self::Mania(m) => PerformanceAttributes::Mania(m.calculate()),
            Self::Osu(o) => PerformanceAttributes::Osu(o.calculate()),
            Self::Taiko(t) => PerformanceAttributes::Taiko(t.calculate()),
        }
    }

    /// Provide the result of a previous difficulty or performance calculation.
    /// If you already calculated the attributes for the current map-mod combination,
    /// be sure to put them in here so that they don't have to be recalculated.
    ///
    /// Previous performance attributes also provide the star rating for modes
    /// whose stars are not computed, unless that rating is zero.
    #[inline]
    pub fn attributes(self, attributes: impl AttributeProvider) -> Self {
        let stars = attributes.stars();

        let this = match self {
            Self::Fruits(f) => Self::Fruits(f.attributes(attributes.attributes())),
            Self::Mania(m) => Self::Mania(m.attributes(attributes.attributes())),
            Self::Osu(o) => Self::Osu(o.attributes(attributes.attributes())),
            Self::Taiko(t) => Self::Taiko(t.attributes(attributes.attributes())),
        };

        if stars > 0.0 {
            this.stars(stars)
        } else {
            this
        }
    }

    /// The star rating for modes whose difficulty is not computed by this crate.
    ///
    /// Irrelevant for osu!standard.
    #[inline]
    pub fn stars(self, stars: f64) -> Self {
        match self {
            Self::Fruits(f) => Self::Fruits(f.stars(stars)),
            Self::Mania(m) => Self::Mania(m.stars(stars)),
            Self::Osu(_) => self,
            Self::Taiko(t) => Self::Taiko(t.stars(stars)),
        }
    }

    /// Specify mods through their bit values or a [`GameMods`] value.
    ///
    /// See [https://github.com/ppy/osu-api/wiki#mods](https://github.com/ppy/osu-api/wiki#mods)
    #[inline]
    pub fn mods(self, mods: impl Into<GameMods>) -> Self {
        let mods = mods.into();

        match self {
            Self::Fruits(f) => Self::Fruits(f.mods(mods)),
            Self::Mania(m) => Self::Mania(m.mods(mods)),
            Self::Osu(o) => Self::Osu(o.mods(mods)),
            Self::Taiko(t) => Self::Taiko(t.mods(mods)),
        }
    }

    /// Amount of passed objects for partial plays, e.g. a fail.
    #[inline]
    pub fn passed_objects(self, passed_objects: usize) -> Self {
        match self {
            Self::Fruits(f) => Self::Fruits(f.passed_objects(passed_objects)),
            Self::Mania(m) => Self::Mania(m.passed_objects(passed_objects)),
            Self::Osu(o) => Self::Osu(o.passed_objects(passed_objects)),
            Self::Taiko(t) => Self::Taiko(t.passed_objects(passed_objects)),
        }
    }

    /// Provide parameters through a [`ScoreState`].
    ///
    /// Hit results of an empty state are left unspecified i.e. a perfect play.
    pub fn state(self, state: ScoreState) -> Self {
        let mut this = self;

        if let Some(combo) = state.max_combo {
            this = this.combo(combo);
        }

        if let Some(score) = state.score {
            this = this.score(score);
        }

        if let Some(stars) = state.stars {
            this = this.stars(stars);
        }

        if state.is_empty() {
            return this;
        }

        match this {
            Self::Fruits(f) => Self::Fruits(
                f.fruits(state.n300)
                    .droplets(state.n100)
                    .tiny_droplets(state.n50)
                    .tiny_droplet_misses(state.n_katu)
                    .misses(state.n_misses),
            ),
            Self::Mania(m) => Self::Mania(
                m.n320(state.n_geki)
                    .n300(state.n300)
                    .n200(state.n_katu)
                    .n100(state.n100)
                    .n50(state.n50)
                    .misses(state.n_misses),
            ),
            Self::Osu(o) => Self::Osu(
                o.n300(state.n300)
                    .n100(state.n100)
                    .n50(state.n50)
                    .misses(state.n_misses),
            ),
            Self::Taiko(t) => Self::Taiko(
                t.n300(state.n300)
                    .n100(state.n100)
                    .misses(state.n_misses),
            ),
        }
    }

    /// Set the accuracy between 0.0 and 100.0.
    ///
    /// Irrelevant for osu!mania.
    #[inline]
    pub fn accuracy(self, acc: f64) -> Self {
        match self {
            Self::Fruits(f) => Self::Fruits(f.accuracy(acc)),
            Self::Mania(_) => self,
            Self::Osu(o) => Self::Osu(o.accuracy(acc)),
            Self::Taiko(t) => Self::Taiko(t.accuracy(acc)),
        }
    }

    /// Specify the amount of misses of a play.
    #[inline]
    pub fn misses(self, n_misses: u32) -> Self {
        match self {
            Self::Fruits(f) => Self::Fruits(f.misses(n_misses)),
            Self::Mania(m) => Self::Mania(m.misses(n_misses)),
            Self::Osu(o) => Self::Osu(o.misses(n_misses)),
            Self::Taiko(t) => Self::Taiko(t.misses(n_misses)),
        }
    }

    /// Specify the max combo of the play.
    ///
    /// Irrelevant for osu!mania and osu!taiko.
    #[inline]
    pub fn combo(self, combo: u32) -> Self {
        match self {
            Self::Fruits(f) => Self::Fruits(f.combo(combo)),
            Self::Osu(o) => Self::Osu(o.combo(combo)),
            Self::Mania(_) | Self::Taiko(_) => self,
        }
    }

    /// Specify the amount of 300s of a play.
    #[inline]
    pub fn n300(self, n300: u32) -> Self {
        match self {
            Self::Fruits(f) => Self::Fruits(f.fruits(n300)),
            Self::Mania(m) => Self::Mania(m.n300(n300)),
            Self::Osu(o) => Self::Osu(o.n300(n300)),
            Self::Taiko(t) => Self::Taiko(t.n300(n300)),
        }
    }

    /// Specify the amount of 100s of a play.
    #[inline]
    pub fn n100(self, n100: u32) -> Self {
        match self {
            Self::Fruits(f) => Self::Fruits(f.droplets(n100)),
            Self::Mania(m) => Self::Mania(m.n100(n100)),
            Self::Osu(o) => Self::Osu(o.n100(n100)),
            Self::Taiko(t) => Self::Taiko(t.n100(n100)),
        }
    }

    /// Specify the amount of 50s of a play.
    ///
    /// Irrelevant for osu!taiko.
    #[inline]
    pub fn n50(self, n50: u32) -> Self {
        match self {
            Self::Fruits(f) => Self::Fruits(f.tiny_droplets(n50)),
            Self::Mania(m) => Self::Mania(m.n50(n50)),
            Self::Osu(o) => Self::Osu(o.n50(n50)),
            Self::Taiko(_) => self,
        }
    }

    /// Specify the amount of katus of a play.
    ///
    /// Tiny droplet misses for osu!catch and n200 for osu!mania.
    #[inline]
    pub fn n_katu(self, n_katu: u32) -> Self {
        match self {
            Self::Fruits(f) => Self::Fruits(f.tiny_droplet_misses(n_katu)),
            Self::Mania(m) => Self::Mania(m.n200(n_katu)),
            Self::Osu(_) | Self::Taiko(_) => self,
        }
    }

    /// Specify the amount of gekis of a play.
    ///
    /// Only relevant for osu!mania for which it represents the n320.
    #[inline]
    pub fn n_geki(self, n_geki: u32) -> Self {
        match self {
            Self::Mania(m) => Self::Mania(m.n320(n_geki)),
            _ => self,
        }
    }

    /// Specify the score of a play.
    ///
    /// This value is only relevant for osu!mania.
    ///
    /// On `NoMod` its between 0 and 1,000,000, on `Easy` between 0 and 500,000, etc.
    #[inline]
    pub fn score(self, score: u32) -> Self {
        match self {
            Self::Mania(m) => Self::Mania(m.score(score)),
            _ => self,
        }
    }
}

/// Abstract type to provide flexibility when passing difficulty attributes to a performance calculation.
pub trait AttributeProvider {
    /// Provide the actual difficulty attributes.
    fn attributes(self) -> DifficultyAttributes;

    /// The star rating the attributes were based on.
    fn stars(&self) -> f64;
}

impl AttributeProvider for DifficultyAttributes {
    #[inline]
    fn attributes(self) -> DifficultyAttributes {
        self
    }

    #[inline]
    fn stars(&self) -> f64 {
        self.stars
    }
}

impl AttributeProvider for PerformanceAttributes {
    #[inline]
    fn attributes(self) -> DifficultyAttributes {
        self.into()
    }

    #[inline]
    fn stars(&self) -> f64 {
        PerformanceAttributes::stars(self)
    }
}
