use crate::{
    Beatmap, DifficultyAttributes, GameMods, Grade, ManiaPerformanceAttributes,
    PerformanceAttributes,
};

const GRADE_THRESHOLDS: [f64; 4] = [0.95, 0.90, 0.80, 0.70];
const MAX_SCORE: f64 = 1_000_000.0;

/// Performance calculator on osu!mania maps.
///
/// The star rating must be provided by the caller. Unlike the other modes,
/// pp are based on the score rather than the accuracy.
///
/// # Example
///
/// ```
/// # use beatmap_pp::{ManiaPP, Beatmap};
/// # /*
/// let map: Beatmap = ...
/// # */
/// # let map = Beatmap::default();
/// let attrs = ManiaPP::new(&map)
///     .stars(3.9)
///     .mods(64) // DT
///     .score(765_432)
///     .calculate();
///
/// println!("PP: {}", attrs.pp);
/// ```
#[derive(Clone, Debug)]
pub struct ManiaPP<'m> {
    map: &'m Beatmap,
    attributes: Option<DifficultyAttributes>,
    stars: f64,
    mods: GameMods,
    score: Option<u32>,

    n320: Option<u32>,
    n300: u32,
    n200: u32,
    n100: u32,
    n50: u32,
    n_misses: u32,
    passed_objects: Option<usize>,
}

impl<'m> ManiaPP<'m> {
    #[inline]
    pub fn new(map: &'m Beatmap) -> Self {
        Self {
            map,
            attributes: None,
            stars: 0.0,
            mods: GameMods::default(),
            score: None,
            n320: None,
            n300: 0,
            n200: 0,
            n100: 0,
            n50: 0,
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

    /// The score of the play, `1_000_000` if not specified.
    ///
    /// Score reducing mods are expected to be applied already.
    #[inline]
    pub fn score(mut self, score: u32) -> Self {
        self.score = Some(score);

        self
    }

    /// Amount of MAX judgements. Defaults to the remaining objects.
    #[inline]
    pub fn n320(mut self, n320: u32) -> Self {
        self.n320 = Some(n320);

        self
    }

    #[inline]
    pub fn n300(mut self, n300: u32) -> Self {
        self.n300 = n300;

        self
    }

    #[inline]
    pub fn n200(mut self, n200: u32) -> Self {
        self.n200 = n200;

        self
    }

    #[inline]
    pub fn n100(mut self, n100: u32) -> Self {
        self.n100 = n100;

        self
    }

    #[inline]
    pub fn n50(mut self, n50: u32) -> Self {
        self.n50 = n50;

        self
    }

    #[inline]
    pub fn misses(mut self, n_misses: u32) -> Self {
        self.n_misses = n_misses;

        self
    }

    #[inline]
    pub fn passed_objects(mut self, passed_objects: usize) -> Self {
        self.passed_objects = Some(passed_objects);

        self
    }

    pub fn calculate(self) -> ManiaPerformanceAttributes {
        let attributes = self.attributes.clone().unwrap_or_else(|| {
            DifficultyAttributes::base(self.map, self.mods, self.passed_objects)
        });

        log_debug!(mods = %self.mods, stars = self.stars, "osu!mania pp");

        let acc = self.accuracy(attributes.n_objects());
        let grade =
            Grade::from_accuracy(acc, GRADE_THRESHOLDS).silver(self.mods.hd() || self.mods.fl());

        let ez = self.mods.ez();
        let nf = self.mods.nf();
        let ht = self.mods.ht();

        let score_multiplier = 0.5_f64.powi(i32::from(ez) + i32::from(nf) + i32::from(ht));
        let score = self.score.map_or(MAX_SCORE, f64::from);
        let scaled_score = score / score_multiplier;

        let mut multiplier = 0.8;

        if nf {
            multiplier *= 0.9;
        }

        if ez {
            multiplier *= 0.5;
        }

        let hit_window = {
            let od = (10.0 - self.map.od).clamp(0.0, 10.0);
            let mut val = 34.0 + 3.0 * od;

            if ez {
                val *= 1.4;
            } else if self.mods.hr() {
                val /= 1.4;
            }

            val * self.mods.clock_rate()
        };

        let n_objects = f64::from(attributes.n_objects());
        let strain_value = self.compute_strain(scaled_score, n_objects);
        let acc_value = compute_accuracy_value(scaled_score, strain_value, hit_window);

        let pp = (strain_value.powf(1.1) + acc_value.powf(1.1)).powf(1.0 / 1.1) * multiplier;

        ManiaPerformanceAttributes {
            difficulty: attributes,
            stars: self.stars,
            pp,
            accuracy: acc * 100.0,
            grade,
        }
    }

    /// Accuracy between `0.0` and `1.0`.
    fn accuracy(&self, n_objects: u32) -> f64 {
        let others = self
            .n300
            .saturating_add(self.n200)
            .saturating_add(self.n100)
            .saturating_add(self.n50)
            .saturating_add(self.n_misses);

        let n320 = self
            .n320
            .unwrap_or_else(|| n_objects.saturating_sub(others));

        let n300 = f64::from(n320) + f64::from(self.n300);
        let n200 = f64::from(self.n200);
        let n100 = f64::from(self.n100);
        let n50 = f64::from(self.n50);
        let total = n300 + n200 + n100 + n50 + f64::from(self.n_misses);

        if total <= 0.0 {
            return 0.0;
        }

        (300.0 * n300 + 200.0 * n200 + 100.0 * n100 + 50.0 * n50) / (300.0 * total)
    }

    fn compute_strain(&self, score: f64, n_objects: f64) -> f64 {
        let mut strain_value = (5.0 * (self.stars / 0.2).max(1.0) - 4.0).powf(2.2) / 135.0;

        strain_value *= 1.0 + 0.1 * (n_objects / 1500.0).min(1.0);

        if score <= 500_000.0 {
            strain_value = 0.0;
        } else if score <= 600_000.0 {
            strain_value *= (score - 500_000.0) / 100_000.0 * 0.3;
        } else if score <= 700_000.0 {
            strain_value *= 0.3 + (score - 600_000.0) / 100_000.0 * 0.25;
        } else if score <= 800_000.0 {
            strain_value *= 0.55 + (score - 700_000.0) / 100_000.0 * 0.2;
        } else if score <= 900_000.0 {
            strain_value *= 0.75 + (score - 800_000.0) / 100_000.0 * 0.15;
        } else {
            strain_value *= 0.9 + (score - 900_000.0) / 100_000.0 * 0.1;
        }

        strain_value
    }
}

#[inline]
fn compute_accuracy_value(score: f64, strain: f64, hit_window: f64) -> f64 {
    (0.2 - (hit_window - 34.0) * 0.006667).max(0.0)
        * strain
        * ((score - 960_000.0).max(0.0) / 40_000.0).powf(1.1)
}

impl<'m> From<ManiaPP<'m>> for PerformanceAttributes {
    #[inline]
    fn from(calculator: ManiaPP<'m>) -> Self {
        Self::Mania(calculator.calculate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameMode;

    fn map() -> Beatmap {
        Beatmap {
            mode: GameMode::Mania,
            od: 8.0,
            ..Default::default()
        }
    }

    fn attributes() -> DifficultyAttributes {
        DifficultyAttributes {
            mode: GameMode::Mania,
            n_circles: 1200,
            n_holds: 300,
            max_combo: 1500,
            ..Default::default()
        }
    }

    #[test]
    fn low_score_has_no_strain() {
        let map = map();
        let attrs = ManiaPP::new(&map)
            .attributes(attributes())
            .stars(4.0)
            .score(450_000)
            .calculate();

        assert!(attrs.pp.abs() < f64::EPSILON);
    }

    #[test]
    fn max_score_value() {
        let map = map();
        let attrs = ManiaPP::new(&map)
            .attributes(attributes())
            .stars(4.0)
            .calculate();

        let strain = (5.0 * (4.0 / 0.2) - 4.0_f64).powf(2.2) / 135.0 * 1.1;
        let hit_window = 34.0 + 3.0 * 2.0;
        let acc_value = (0.2 - (hit_window - 34.0) * 0.006667) * strain;
        let expected = (strain.powf(1.1) + acc_value.powf(1.1)).powf(1.0 / 1.1) * 0.8;

        assert!((attrs.pp - expected).abs() < 1e-9);
        assert_eq!(attrs.grade, Grade::X);
    }

    #[test]
    fn score_reducing_mods() {
        let map = map();
        let calc = || {
            ManiaPP::new(&map)
                .attributes(attributes())
                .stars(4.0)
                .score(800_000)
        };

        let nomod = calc().calculate().pp;
        let nf = calc().mods(GameMods::NF).calculate().pp;

        // the halved score multiplier lifts the scaled score past the ladder
        assert!(nf > nomod);
    }

    #[test]
    fn accuracy_from_judgements() {
        let map = map();
        let attrs = ManiaPP::new(&map)
            .attributes(attributes())
            .n300(100)
            .n200(50)
            .misses(10)
            .calculate();

        let expected = (300.0 * 1440.0 + 200.0 * 50.0) / (300.0 * 1500.0);

        assert!((attrs.accuracy / 100.0 - expected).abs() < 1e-12);
        assert_eq!(attrs.grade, Grade::S);
    }

    #[test]
    fn huge_judgement_counts() {
        let map = map();
        let attrs = ManiaPP::new(&map)
            .attributes(attributes())
            .stars(4.0)
            .n320(u32::MAX)
            .n300(u32::MAX)
            .n50(u32::MAX)
            .calculate();

        let expected = (300.0 + 300.0 + 50.0) / (300.0 * 3.0);

        assert!((attrs.accuracy / 100.0 - expected).abs() < 1e-9);
        assert!(attrs.pp.is_finite());
    }
}
