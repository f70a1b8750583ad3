use crate::{
    Beatmap, DifficultyAttributes, FruitsPerformanceAttributes, GameMods, Grade,
    PerformanceAttributes,
};

const GRADE_THRESHOLDS: [f64; 4] = [0.98, 0.94, 0.90, 0.85];

/// Performance calculator on osu!catch maps.
///
/// The star rating must be provided by the caller.
///
/// # Example
///
/// ```
/// # use beatmap_pp::{FruitsPP, Beatmap};
/// # /*
/// let map: Beatmap = ...
/// # */
/// # let map = Beatmap::default();
/// let attrs = FruitsPP::new(&map)
///     .stars(5.1)
///     .mods(8 + 64) // HDDT
///     .combo(1234)
///     .misses(1)
///     .accuracy(98.5)
///     .calculate();
///
/// println!("PP: {}", attrs.pp);
/// ```
#[derive(Clone, Debug)]
pub struct FruitsPP<'m> {
    map: &'m Beatmap,
    attributes: Option<DifficultyAttributes>,
    stars: f64,
    mods: GameMods,
    combo: Option<u32>,
    acc: Option<f64>,

    n_fruits: Option<u32>,
    n_droplets: Option<u32>,
    n_tiny_droplets: Option<u32>,
    n_tiny_droplet_misses: Option<u32>,
    n_misses: u32,
    passed_objects: Option<usize>,
}

impl<'m> FruitsPP<'m> {
    #[inline]
    pub fn new(map: &'m Beatmap) -> Self {
        Self {
            map,
            attributes: None,
            stars: 0.0,
            mods: GameMods::default(),
            combo: None,
            acc: None,
            n_fruits: None,
            n_droplets: None,
            n_tiny_droplets: None,
            n_tiny_droplet_misses: None,
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
    pub fn combo(mut self, combo: u32) -> Self {
        self.combo = Some(combo);

        self
    }

    /// Specify the amount of fruits of a play i.e. n300.
    #[inline]
    pub fn fruits(mut self, n_fruits: u32) -> Self {
        self.n_fruits = Some(n_fruits);

        self
    }

    /// Specify the amount of droplets of a play i.e. n100.
    #[inline]
    pub fn droplets(mut self, n_droplets: u32) -> Self {
        self.n_droplets = Some(n_droplets);

        self
    }

    /// Specify the amount of tiny droplets of a play i.e. n50.
    #[inline]
    pub fn tiny_droplets(mut self, n_tiny_droplets: u32) -> Self {
        self.n_tiny_droplets = Some(n_tiny_droplets);

        self
    }

    /// Specify the amount of tiny droplet misses of a play i.e. n_katu.
    #[inline]
    pub fn tiny_droplet_misses(mut self, n_tiny_droplet_misses: u32) -> Self {
        self.n_tiny_droplet_misses = Some(n_tiny_droplet_misses);

        self
    }

    /// Specify the amount of fruit and droplet misses of the play.
    #[inline]
    pub fn misses(mut self, n_misses: u32) -> Self {
        self.n_misses = n_misses;

        self
    }

    /// Accuracy between `0` and `100`, used instead of the hit counts.
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

    pub fn calculate(self) -> FruitsPerformanceAttributes {
        let attributes = self.attributes.clone().unwrap_or_else(|| {
            DifficultyAttributes::base(self.map, self.mods, self.passed_objects)
        });

        log_debug!(mods = %self.mods, stars = self.stars, "osu!catch pp");

        let max_combo = attributes.max_combo;
        let n_misses = self.n_misses.min(max_combo);

        let n_droplets = self.n_droplets.unwrap_or(0);
        let n_fruits = self
            .n_fruits
            .unwrap_or_else(|| max_combo.saturating_sub(n_misses).saturating_sub(n_droplets));
        let n_tiny_droplets = self.n_tiny_droplets.unwrap_or(0);
        let n_tiny_droplet_misses = self.n_tiny_droplet_misses.unwrap_or(0);

        let acc = match self.acc {
            Some(acc) => (acc / 100.0).clamp(0.0, 1.0),
            None => {
                let successful =
                    f64::from(n_fruits) + f64::from(n_droplets) + f64::from(n_tiny_droplets);
                let total = successful + f64::from(n_tiny_droplet_misses) + f64::from(n_misses);

                if total <= 0.0 {
                    0.0
                } else {
                    successful / total
                }
            }
        };

        let grade =
            Grade::from_accuracy(acc, GRADE_THRESHOLDS).silver(self.mods.hd() || self.mods.fl());

        let combo_hits = match n_fruits.saturating_add(n_droplets).saturating_add(n_misses) {
            0 => max_combo,
            hits => hits,
        };

        if combo_hits == 0 {
            return FruitsPerformanceAttributes {
                difficulty: attributes,
                stars: self.stars,
                accuracy: acc * 100.0,
                grade,
                ..Default::default()
            };
        }

        let combo_hits = f64::from(combo_hits);
        let ar = attributes.ar;

        let exp_base = 5.0 * (self.stars / 0.0049).max(1.0) - 4.0;
        let mut pp = exp_base * exp_base / 100_000.0;

        // Longer maps are worth more
        let mut len_bonus = 0.95 + 0.3 * (combo_hits / 2500.0).min(1.0);

        if combo_hits > 2500.0 {
            len_bonus += (combo_hits / 2500.0).log10() * 0.475;
        }

        pp *= len_bonus;

        // Penalize misses exponentially
        pp *= 0.97_f64.powf(f64::from(n_misses));

        // Combo scaling
        if max_combo > 0 {
            let combo = self.combo.unwrap_or(max_combo);
            pp *= (f64::from(combo) / f64::from(max_combo)).powf(0.8).min(1.0);
        }

        // AR scaling
        let mut ar_factor = 1.0;

        if ar > 9.0 {
            ar_factor += 0.1 * (ar - 9.0);

            if ar > 10.0 {
                ar_factor += 0.1 * (ar - 10.0);
            }
        } else if ar < 8.0 {
            ar_factor += 0.025 * (8.0 - ar);
        }

        pp *= ar_factor;

        // HD bonus
        if self.mods.hd() {
            if ar <= 10.0 {
                pp *= 1.05 + 0.075 * (10.0 - ar);
            } else {
                pp *= 1.01 + 0.04 * (11.0 - ar.min(11.0));
            }
        }

        // FL bonus
        if self.mods.fl() {
            pp *= 1.35 * len_bonus;
        }

        // Accuracy scaling
        pp *= acc.powf(5.5);

        // NF penalty
        if self.mods.nf() {
            pp *= 0.9;
        }

        FruitsPerformanceAttributes {
            difficulty: attributes,
            stars: self.stars,
            pp,
            accuracy: acc * 100.0,
            grade,
        }
    }
}

impl<'m> From<FruitsPP<'m>> for PerformanceAttributes {
    #[inline]
    fn from(calculator: FruitsPP<'m>) -> Self {
        Self::Fruits(calculator.calculate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameMode;

    fn attributes() -> DifficultyAttributes {
        DifficultyAttributes {
            mode: GameMode::Catch,
            max_combo: 1000,
            n_circles: 800,
            n_sliders: 50,
            ar: 9.0,
            ..Default::default()
        }
    }

    #[test]
    fn full_combo_value() {
        let map = Beatmap::default();
        let attrs = FruitsPP::new(&map)
            .attributes(attributes())
            .stars(5.0)
            .calculate();

        let exp_base = 5.0 * (5.0 / 0.0049) - 4.0;
        let expected = exp_base * exp_base / 100_000.0 * (0.95 + 0.3 * 0.4);

        assert!((attrs.pp - expected).abs() < 1e-9);
        assert!((attrs.accuracy - 100.0).abs() < f64::EPSILON);
        assert_eq!(attrs.grade, Grade::X);
    }

    #[test]
    fn hit_counts() {
        let map = Beatmap::default();
        let attrs = FruitsPP::new(&map)
            .attributes(attributes())
            .stars(5.0)
            .fruits(900)
            .droplets(95)
            .tiny_droplets(200)
            .tiny_droplet_misses(5)
            .misses(5)
            .calculate();

        let expected_acc = 1195.0 / 1205.0;

        assert!((attrs.accuracy / 100.0 - expected_acc).abs() < 1e-12);
        assert_eq!(attrs.grade, Grade::S);
    }

    #[test]
    fn misses_and_combo_lower_pp() {
        let map = Beatmap::default();
        let calc = || FruitsPP::new(&map).attributes(attributes()).stars(5.0);

        let fc = calc().calculate().pp;

        assert!(calc().misses(3).calculate().pp < fc);
        assert!(calc().combo(500).calculate().pp < fc);
        assert!(calc().mods(GameMods::HD).calculate().pp > fc);
    }
}
