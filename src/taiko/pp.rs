use crate::{
    parse::difficulty_range, Beatmap, DifficultyAttributes, GameMods, Grade, PerformanceAttributes,
    TaikoPerformanceAttributes,
};

/// Performance calculator on osu!taiko maps.
///
/// Star ratings of osu!taiko maps are not computed by this crate so the
/// star rating must be provided, e.g. as published by the osu!api.
///
/// # Example
///
/// ```
/// # use beatmap_pp::{TaikoPP, Beatmap};
/// # /*
/// let map: Beatmap = ...
/// # */
/// # let map = Beatmap::default();
/// let attrs = TaikoPP::new(&map)
///     .stars(4.2)
///     .mods(8 + 64) // HDDT
///     .misses(1)
///     .accuracy(98.5)
///     .calculate();
///
/// println!("PP: {}", attrs.pp);
/// ```
#[derive(Clone, Debug)]
pub struct TaikoPP<'m> {
    map: &'m Beatmap,
    attributes: Option<DifficultyAttributes>,
    stars: f64,
    mods: GameMods,
    acc: Option<f64>,

    n300: Option<u32>,
    n100: Option<u32>,
    n_misses: u32,
    passed_objects: Option<usize>,
}

impl<'m> TaikoPP<'m> {
    #[inline]
    pub fn new(map: &'m Beatmap) -> Self {
        Self {
            map,
            attributes: None,
            stars: 0.0,
            mods: GameMods::default(),
            acc: None,
            n300: None,
            n100: None,
            n_misses: 0,
            passed_objects: None,
        }
    }

    /// Reuse the map statistics of a previous calculation.
    #[inline]
    pub fn attributes(mut self, attributes: impl Into<DifficultyAttributes>) -> Self {
        self.attributes = Some(attributes.into());

        self
    }

    /// The map's star rating w.r.t. the mods.
    #[inline]
    pub fn stars(mut self, stars: f64) -> Self {
        self.stars = stars;

        self
    }

    #[inline]
    pub fn mods(mut self, mods: impl Into<GameMods>) -> Self {
        self.mods = mods.into();

        self
    }

    #[inline]
    pub fn n300(mut self, n300: u32) -> Self {
        self.n300 = Some(n300);

        self
    }

    #[inline]
    pub fn n100(mut self, n100: u32) -> Self {
        self.n100 = Some(n100);

        self
    }

    #[inline]
    pub fn misses(mut self, n_misses: u32) -> Self {
        self.n_misses = n_misses;

        self
    }

    /// Generate the hit results with respect to the given accuracy between `0` and `100`.
    #[inline]
    pub fn accuracy(mut self, acc: f64) -> Self {
        self.acc = Some(acc);

        self
    }

    #[inline]
    pub fn passed_objects(mut self, passed_objects: usize) -> Self {
        self.passed_objects = Some(passed_objects);

        self
    }

    pub fn calculate(self) -> TaikoPerformanceAttributes {
        let attributes = self.attributes.clone().unwrap_or_else(|| {
            DifficultyAttributes::base(self.map, self.mods, self.passed_objects)
        });

        log_debug!(mods = %self.mods, stars = self.stars, "osu!taiko pp");

        let (n300, n100, n_misses) = self.hit_results(attributes.n_circles);
        let total_hits = n300.saturating_add(n100).saturating_add(n_misses);

        let acc = if total_hits == 0 {
            0.0
        } else {
            let hits = f64::from(n300) + f64::from(n100) + f64::from(n_misses);

            (f64::from(n300) + f64::from(n100) / 2.0) / hits
        };

        let grade = Grade::from_hit_ratios(n300, 0, n_misses, total_hits)
            .silver(self.mods.hd() || self.mods.fl());

        if total_hits == 0 {
            return TaikoPerformanceAttributes {
                difficulty: attributes,
                stars: self.stars,
                grade,
                ..Default::default()
            };
        }

        let total_hits = f64::from(total_hits);

        let mut multiplier = 1.1;

        if self.mods.nf() {
            multiplier *= 0.9;
        }

        if self.mods.hd() {
            multiplier *= 1.1;
        }

        let strain_value = self.compute_strain_value(total_hits, f64::from(n_misses), acc);
        let acc_value = self.compute_accuracy_value(total_hits, acc);

        let pp = (strain_value.powf(1.1) + acc_value.powf(1.1)).powf(1.0 / 1.1) * multiplier;

        TaikoPerformanceAttributes {
            difficulty: attributes,
            stars: self.stars,
            pp,
            accuracy: acc * 100.0,
            grade,
        }
    }

    fn hit_results(&self, n_objects: u32) -> (u32, u32, u32) {
        let n_misses = self.n_misses.min(n_objects);
        let remaining = n_objects - n_misses;

        if let Some(acc) = self.acc {
            let n = f64::from(n_objects);
            let acc = (acc / 100.0).clamp(0.0, 1.0);
            let n100 = (2.0 * (f64::from(remaining) - acc * n)).round().max(0.0) as u32;
            let n100 = n100.min(remaining);

            return (remaining - n100, n100, n_misses);
        }

        let n100 = self.n100.unwrap_or(0);
        let n300 = self
            .n300
            .unwrap_or_else(|| remaining.saturating_sub(n100));

        (n300, n100, n_misses)
    }

    fn compute_strain_value(&self, total_hits: f64, n_misses: f64, acc: f64) -> f64 {
        let exp_base = 5.0 * (self.stars / 0.0075).max(1.0) - 4.0;
        let mut strain = exp_base * exp_base / 100_000.0;

        // Longer maps are worth more
        let len_bonus = 1.0 + 0.1 * (total_hits / 1500.0).min(1.0);
        strain *= len_bonus;

        // Penalize misses exponentially
        strain *= 0.985_f64.powf(n_misses);

        if self.mods.hd() {
            strain *= 1.025;
        }

        if self.mods.fl() {
            strain *= 1.05 * len_bonus;
        }

        strain * acc
    }

    fn compute_accuracy_value(&self, total_hits: f64, acc: f64) -> f64 {
        let od = (self.map.od * self.mods.od_ar_hp_multiplier()).min(10.0);
        let hit_window = difficulty_range(od, 50.0, 35.0, 20.0) / self.mods.clock_rate();

        if hit_window <= 0.0 {
            return 0.0;
        }

        (150.0 / hit_window).powf(1.1)
            * acc.powi(15)
            * 22.0
            * (total_hits / 1500.0).powf(0.3).min(1.15)
    }
}

impl<'m> From<TaikoPP<'m>> for PerformanceAttributes {
    #[inline]
    fn from(calculator: TaikoPP<'m>) -> Self {
        Self::Taiko(calculator.calculate())
    }
}
