use super::OsuStars;
use crate::{
    Beatmap, DifficultyAttributes, GameMods, Grade, OsuPerformanceAttributes,
    PerformanceAttributes,
};

/// Calculator for pp on osu!standard maps.
///
/// # Example
///
/// ```
/// # use beatmap_pp::{OsuPP, Beatmap};
/// # /*
/// let map: Beatmap = ...
/// # */
/// # let map = Beatmap::default();
/// let attrs = OsuPP::new(&map)
///     .mods(8 + 64) // HDDT
///     .combo(1234)
///     .misses(1)
///     .accuracy(98.5)
///     .calculate();
///
/// println!("PP: {} | Stars: {}", attrs.pp, attrs.difficulty.stars);
///
/// let next_result = OsuPP::new(&map)
///     .attributes(attrs) // reusing previous results for performance
///     .mods(8 + 64)      // has to be the same to reuse attributes
///     .accuracy(99.5)
///     .calculate();
///
/// println!("PP: {} | Stars: {}", next_result.pp, next_result.difficulty.stars);
/// ```
#[derive(Clone, Debug)]
pub struct OsuPP<'m> {
    map: &'m Beatmap,
    attributes: Option<DifficultyAttributes>,
    mods: GameMods,
    combo: Option<u32>,
    acc: Option<f64>,

    n300: Option<u32>,
    n100: Option<u32>,
    n50: Option<u32>,
    n_misses: u32,
    passed_objects: Option<usize>,
}

impl<'m> OsuPP<'m> {
    #[inline]
    pub fn new(map: &'m Beatmap) -> Self {
        Self {
            map,
            attributes: None,
            mods: GameMods::default(),
            combo: None,
            acc: None,
            n300: None,
            n100: None,
            n50: None,
            n_misses: 0,
            passed_objects: None,
        }
    }

    /// Provide the result of a previous difficulty or performance calculation.
    /// If you already calculated the attributes for the current map-mod combination,
    /// be sure to put them in here so that they don't have to be recalculated.
    #[inline]
    pub fn attributes(mut self, attributes: impl Into<DifficultyAttributes>) -> Self {
        self.attributes = Some(attributes.into());

        self
    }

    /// Specify mods through their bit values or a [`GameMods`] value.
    ///
    /// See [https://github.com/ppy/osu-api/wiki#mods](https://github.com/ppy/osu-api/wiki#mods)
    #[inline]
    pub fn mods(mut self, mods: impl Into<GameMods>) -> Self {
        self.mods = mods.into();

        self
    }

    /// Specify the max combo of the play.
    #[inline]
    pub fn combo(mut self, combo: u32) -> Self {
        self.combo = Some(combo);

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
    pub fn n50(mut self, n50: u32) -> Self {
        self.n50 = Some(n50);

        self
    }

    #[inline]
    pub fn misses(mut self, n_misses: u32) -> Self {
        self.n_misses = n_misses;

        self
    }

    /// Amount of passed objects for partial plays, e.g. a fail.
    ///
    /// If you want to calculate the performance after every few objects, instead of
    /// using [`OsuPP`] multiple times with different `passed_objects`, you should use
    /// the same attributes and only change the hit results.
    #[inline]
    pub fn passed_objects(mut self, passed_objects: usize) -> Self {
        self.passed_objects = Some(passed_objects);

        self
    }

    /// Generate the hit results with respect to the given accuracy between `0` and `100`.
    ///
    /// Hit results are only generated on [`OsuPP::calculate`] so the order of
    /// `accuracy` and `misses` does not matter.
    #[inline]
    pub fn accuracy(mut self, acc: f64) -> Self {
        self.acc = Some(acc);

        self
    }

    /// Calculate all performance related values, including pp and stars.
    pub fn calculate(self) -> OsuPerformanceAttributes {
        let attributes = match self.attributes {
            Some(ref attributes) => attributes.clone(),
            None => {
                let mut stars = OsuStars::new(self.map).mods(self.mods);

                if let Some(passed_objects) = self.passed_objects {
                    stars = stars.passed_objects(passed_objects);
                }

                stars.calculate()
            }
        };

        log_debug!(mods = %self.mods, stars = attributes.stars, "osu!standard pp");

        let n_objects = attributes.n_circles + attributes.n_sliders + attributes.n_spinners;
        let state = self.hit_results(n_objects);

        OsuPpInner {
            attrs: attributes,
            mods: self.mods,
            combo: self.combo,
            state,
        }
        .calculate()
    }

    fn hit_results(&self, n_objects: u32) -> HitResults {
        let n_misses = self.n_misses.min(n_objects);

        if let Some(acc) = self.acc {
            let (n300, n100, n50) = round_accuracy(acc, n_objects, n_misses);

            return HitResults {
                n300,
                n100,
                n50,
                n_misses,
            };
        }

        let n100 = self.n100.unwrap_or(0);
        let n50 = self.n50.unwrap_or(0);

        let n300 = self.n300.unwrap_or_else(|| {
            n_objects
                .saturating_sub(n100)
                .saturating_sub(n50)
                .saturating_sub(n_misses)
        });

        HitResults {
            n300,
            n100,
            n50,
            n_misses,
        }
    }
}

/// Closed-form hit results `(n300, n100, n50)` for an accuracy between `0` and `100`.
///
/// Misses are capped at `n_objects` and the accuracy at the maximum that is
/// still reachable with those misses. 100s are preferred over 50s.
///
/// ```
/// use beatmap_pp::round_accuracy;
///
/// assert_eq!(round_accuracy(100.0, 500, 0), (500, 0, 0));
/// assert_eq!(round_accuracy(96.0, 150, 0), (141, 9, 0));
/// ```
pub fn round_accuracy(acc: f64, n_objects: u32, n_misses: u32) -> (u32, u32, u32) {
    if n_objects == 0 {
        return (0, 0, 0);
    }

    let n_misses = n_misses.min(n_objects);
    let n = f64::from(n_objects);
    let misses = f64::from(n_misses);
    let remaining = n_objects - n_misses;

    let max_acc = f64::from(remaining) / n;
    let acc = (acc / 100.0).clamp(0.0, max_acc);

    let missing = (acc - 1.0) * n + misses;

    let mut n100 = round_half_up(-3.0 * missing * 0.5);
    let mut n50 = 0;

    if n100 > remaining {
        n50 = remaining.min(round_half_up(-6.0 * missing * 0.2));
        n100 = 0;
    }

    let n300 = remaining.saturating_sub(n100).saturating_sub(n50);

    (n300, n100, n50)
}

#[inline]
fn round_half_up(x: f64) -> u32 {
    (x + 0.5).floor().max(0.0) as u32
}

struct HitResults {
    n300: u32,
    n100: u32,
    n50: u32,
    n_misses: u32,
}

impl HitResults {
    #[inline]
    fn total_hits(&self) -> u32 {
        self.n300
            .saturating_add(self.n100)
            .saturating_add(self.n50)
            .saturating_add(self.n_misses)
    }

    /// Accuracy between `0.0` and `1.0`.
    fn accuracy(&self) -> f64 {
        let n300 = f64::from(self.n300);
        let n100 = f64::from(self.n100);
        let n50 = f64::from(self.n50);
        let total_hits = n300 + n100 + n50 + f64::from(self.n_misses);

        if total_hits <= 0.0 {
            return 0.0;
        }

        let numerator = 6.0 * n300 + 2.0 * n100 + n50;

        numerator / (6.0 * total_hits)
    }
}

struct OsuPpInner {
    attrs: DifficultyAttributes,
    mods: GameMods,
    combo: Option<u32>,
    state: HitResults,
}

impl OsuPpInner {
    fn calculate(self) -> OsuPerformanceAttributes {
        let total_hits = f64::from(self.state.total_hits());
        let acc = self.state.accuracy();

        let grade = Grade::from_hit_ratios(
            self.state.n300,
            self.state.n50,
            self.state.n_misses,
            self.state.total_hits(),
        )
        .silver(self.mods.hd() || self.mods.fl());

        if total_hits <= 0.0 {
            return OsuPerformanceAttributes {
                difficulty: self.attrs,
                accuracy: acc * 100.0,
                grade,
                ..Default::default()
            };
        }

        let mut multiplier = 1.12;

        // NF penalty
        if self.mods.nf() {
            multiplier *= (1.0 - 0.02 * f64::from(self.state.n_misses)).max(0.9);
        }

        // SO penalty
        if self.mods.so() {
            multiplier *= 1.0 - (f64::from(self.attrs.n_spinners) / total_hits).powf(0.85);
        }

        let aim_value = self.compute_aim_value(total_hits, acc);
        let speed_value = self.compute_speed_value(total_hits, acc);
        let acc_value = self.compute_accuracy_value();

        let mut pp = (aim_value.powf(1.1) + speed_value.powf(1.1) + acc_value.powf(1.1))
            .powf(1.0 / 1.1)
            * multiplier;

        pp *= extreme_penalty(aim_value, speed_value);

        OsuPerformanceAttributes {
            difficulty: self.attrs,
            pp,
            pp_aim: aim_value,
            pp_speed: speed_value,
            pp_acc: acc_value,
            accuracy: acc * 100.0,
            grade,
        }
    }

    fn compute_aim_value(&self, total_hits: f64, acc: f64) -> f64 {
        let attrs = &self.attrs;
        let n_misses = f64::from(self.state.n_misses);

        let mut aim_value = base_value(attrs.aim);

        // Longer maps are worth more
        aim_value *= length_bonus(total_hits);

        // Penalize misses
        if n_misses > 0.0 {
            aim_value *= 0.97 * (1.0 - (n_misses / total_hits).powf(0.775)).powf(n_misses);
        }

        aim_value *= self.combo_scaling();

        // AR bonus
        let ar_factor = if attrs.ar > 10.33 {
            0.4 * (attrs.ar - 10.33)
        } else if attrs.ar < 8.0 {
            0.01 * (8.0 - attrs.ar)
        } else {
            0.0
        };

        aim_value *= 1.0 + ar_factor.min(ar_factor * total_hits / 1000.0);

        // HD bonus
        if self.mods.hd() {
            aim_value *= 1.0 + 0.04 * (12.0 - attrs.ar);
        }

        // FL bonus
        if self.mods.fl() {
            let mut fl_bonus = 1.0 + 0.35 * (total_hits / 200.0).min(1.0);

            if total_hits > 200.0 {
                fl_bonus += 0.3 * ((total_hits - 200.0) / 300.0).min(1.0);

                if total_hits > 500.0 {
                    fl_bonus += (total_hits - 500.0) / 1200.0;
                }
            }

            aim_value *= fl_bonus;
        }

        // Scale with accuracy
        aim_value *= 0.5 + acc / 2.0;
        aim_value *= 0.98 + attrs.od * attrs.od / 2500.0;

        aim_value
    }

    fn compute_speed_value(&self, total_hits: f64, acc: f64) -> f64 {
        let attrs = &self.attrs;
        let n_misses = f64::from(self.state.n_misses);

        let mut speed_value = base_value(attrs.speed);

        speed_value *= length_bonus(total_hits);

        if n_misses > 0.0 {
            speed_value *=
                0.97 * (1.0 - (n_misses / total_hits).powf(0.775)).powf(n_misses.powf(0.875));
        }

        speed_value *= self.combo_scaling();

        if attrs.ar > 10.33 {
            let ar_factor = 0.4 * (attrs.ar - 10.33);
            speed_value *= 1.0 + ar_factor.min(ar_factor * total_hits / 1000.0);
        }

        if self.mods.hd() {
            speed_value *= 1.0 + 0.04 * (12.0 - attrs.ar);
        }

        // Scale with accuracy and OD
        speed_value *= (0.95 + attrs.od * attrs.od / 750.0)
            * acc.powf((12.0 - attrs.od.max(2.5)) / 2.0);

        // Penalize 50s beyond a small allowance
        let n50 = f64::from(self.state.n50);
        let allowed_n50 = total_hits / 500.0;

        if n50 >= allowed_n50 {
            speed_value *= 0.98_f64.powf(n50 - allowed_n50);
        }

        speed_value
    }

    fn compute_accuracy_value(&self) -> f64 {
        let attrs = &self.attrs;
        let n_circles = f64::from(attrs.n_circles);

        let real_acc = if attrs.n_circles > 0 {
            let n300 = f64::from(self.state.n300);
            let total_hits = f64::from(self.state.total_hits());

            let better_acc_percentage = ((n300 - (total_hits - n_circles)) * 6.0
                + f64::from(self.state.n100) * 2.0
                + f64::from(self.state.n50))
                / (n_circles * 6.0);

            better_acc_percentage.clamp(0.0, 1.0)
        } else {
            0.0
        };

        let mut acc_value =
            1.4_f64.powf(attrs.od) * (attrs.ar / 10.0).max(1.0).powi(3) * real_acc.powi(12) * 10.0;

        // Bonus for many hitcircles
        acc_value *= (n_circles / 1000.0).powf(0.3).min(1.15);

        if self.mods.hd() {
            acc_value *= 1.08;
        }

        if self.mods.fl() {
            acc_value *= 1.02;
        }

        acc_value
    }

    fn combo_scaling(&self) -> f64 {
        let max_combo = self.attrs.max_combo;

        if max_combo == 0 {
            return 1.0;
        }

        let combo = self.combo.unwrap_or(max_combo);

        (f64::from(combo) / f64::from(max_combo)).powf(0.8).min(1.0)
    }
}

#[inline]
fn base_value(stars: f64) -> f64 {
    (5.0 * (stars / 0.0675).max(1.0) - 4.0).powi(3) / 100_000.0
}

#[inline]
fn length_bonus(total_hits: f64) -> f64 {
    let mut len_bonus = 0.95 + 0.4 * (total_hits / 2000.0).min(1.0);

    if total_hits > 2000.0 {
        len_bonus += 0.5 * (total_hits / 2000.0).log10();
    }

    len_bonus
}

/// Penalty for plays where one skill dwarfs the other.
fn extreme_penalty(aim_value: f64, speed_value: f64) -> f64 {
    let max = aim_value.max(speed_value);
    let min = aim_value.min(speed_value);

    if max <= 0.0 {
        return 1.0;
    } else if min <= 0.0 {
        return 0.8;
    }

    let ratio = max / min;

    if ratio > 3.0 {
        (3.0 / ratio).powf(0.25).max(0.8)
    } else {
        1.0
    }
}

impl<'m> From<OsuPP<'m>> for PerformanceAttributes {
    #[inline]
    fn from(calculator: OsuPP<'m>) -> Self {
        Self::Osu(calculator.calculate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attributes() -> DifficultyAttributes {
        DifficultyAttributes {
            stars: 5.0,
            aim: 2.5,
            speed: 2.2,
            max_combo: 909,
            n_circles: 307,
            n_sliders: 293,
            n_spinners: 1,
            ar: 9.0,
            od: 8.5,
            cs: 4.0,
            hp: 6.0,
            clock_rate: 1.0,
            ..Default::default()
        }
    }

    fn calculator(map: &Beatmap) -> OsuPP<'_> {
        OsuPP::new(map).attributes(attributes())
    }

    #[test]
    fn accuracy_rounding() {
        assert_eq!(round_accuracy(100.0, 601, 0), (601, 0, 0));

        let (n300, n100, n50) = round_accuracy(95.0, 601, 2);
        assert_eq!(n300 + n100 + n50 + 2, 601);
        assert_eq!(n50, 0);

        // unreachable accuracy gets clamped
        let (n300, n100, n50) = round_accuracy(100.0, 100, 10);
        assert_eq!((n300, n100, n50), (90, 0, 0));

        // too low for 100s only
        let (n300, n100, n50) = round_accuracy(20.0, 100, 0);
        assert_eq!(n100, 0);
        assert!(n50 > 0);
        assert_eq!(n300 + n50, 100);

        assert_eq!(round_accuracy(95.0, 0, 3), (0, 0, 0));
    }

    #[test]
    fn ss_beats_misses() {
        let map = Beatmap::default();
        let ss = calculator(&map).calculate();
        let misses = calculator(&map).misses(5).calculate();

        assert!(ss.pp > misses.pp);
        assert!((ss.accuracy - 100.0).abs() < 1e-12);
        assert_eq!(ss.grade, Grade::X);
        assert_eq!(misses.grade, Grade::A);
    }

    #[test]
    fn combo_scales_down() {
        let map = Beatmap::default();
        let fc = calculator(&map).combo(909).calculate();
        let choke = calculator(&map).combo(300).calculate();

        assert!(fc.pp > choke.pp);
        assert!((fc.pp_acc - choke.pp_acc).abs() < 1e-12);
    }

    #[test]
    fn hidden_bonus_and_silver() {
        let map = Beatmap::default();
        let nomod = calculator(&map).calculate();
        let hidden = calculator(&map).mods(GameMods::HD).calculate();

        assert!(hidden.pp > nomod.pp);
        assert_eq!(hidden.grade, Grade::XH);
    }

    #[test]
    fn penalty_for_lopsided_skills() {
        assert!((extreme_penalty(100.0, 90.0) - 1.0).abs() < f64::EPSILON);
        assert!((extreme_penalty(100.0, 0.0) - 0.8).abs() < f64::EPSILON);
        assert!((extreme_penalty(0.0, 0.0) - 1.0).abs() < f64::EPSILON);
        assert!((extreme_penalty(120.0, 10.0) - 0.8).abs() < f64::EPSILON);

        let ratio_four = (0.75_f64).powf(0.25);
        assert!((extreme_penalty(40.0, 10.0) - ratio_four).abs() < 1e-12);
    }

    #[test]
    fn huge_hit_counts() {
        let map = Beatmap::default();
        let attrs = calculator(&map)
            .n300(u32::MAX)
            .n100(u32::MAX)
            .n50(u32::MAX)
            .misses(1)
            .calculate();

        let expected = 100.0 * (6.0 + 2.0 + 1.0) / (6.0 * 3.0);

        assert!((attrs.accuracy - expected).abs() < 1e-6);
        assert!(attrs.pp.is_finite());
    }

    #[test]
    fn empty_attributes() {
        let map = Beatmap::default();
        let attrs = OsuPP::new(&map).calculate();

        assert!(attrs.pp.abs() < f64::EPSILON);
        assert!(!attrs.pp.is_nan());
    }
}
