use crate::GameMods;

/// Summary struct for a [`Beatmap`](crate::Beatmap)'s attributes.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeatmapAttributes {
    pub ar: f64,
    pub od: f64,
    pub cs: f64,
    pub hp: f64,
    pub clock_rate: f64,
}

impl BeatmapAttributes {
    const AR0_MS: f64 = 1800.0;
    const AR5_MS: f64 = 1200.0;
    const AR10_MS: f64 = 450.0;
    const AR_MS_STEP_1: f64 = (Self::AR0_MS - Self::AR5_MS) / 5.0;
    const AR_MS_STEP_2: f64 = (Self::AR5_MS - Self::AR10_MS) / 5.0;

    const OD0_MS: f64 = 80.0;
    const OD10_MS: f64 = 20.0;
    const OD_MS_STEP: f64 = (Self::OD0_MS - Self::OD10_MS) / 10.0;

    #[inline]
    pub(crate) fn new(ar: f64, od: f64, cs: f64, hp: f64) -> Self {
        Self {
            ar,
            od,
            cs,
            hp,
            clock_rate: 1.0,
        }
    }

    /// Adjusts attributes w.r.t. mods.
    ///
    /// AR and OD are adjusted through their hit windows so that speed
    /// changing mods are reflected in them.
    pub fn mods(self, mods: GameMods) -> Self {
        if !mods.change_map() {
            return self;
        }

        let clock_rate = mods.clock_rate();
        let multiplier = mods.od_ar_hp_multiplier();

        // AR
        let ar = self.ar * multiplier;

        let mut ar_ms = if ar <= 5.0 {
            Self::AR0_MS - Self::AR_MS_STEP_1 * ar
        } else {
            Self::AR5_MS - Self::AR_MS_STEP_2 * (ar - 5.0)
        };

        ar_ms = ar_ms.max(Self::AR10_MS).min(Self::AR0_MS);
        ar_ms /= clock_rate;

        let ar = if ar_ms > Self::AR5_MS {
            (Self::AR0_MS - ar_ms) / Self::AR_MS_STEP_1
        } else {
            5.0 + (Self::AR5_MS - ar_ms) / Self::AR_MS_STEP_2
        };

        // OD
        let od = self.od * multiplier;
        let mut od_ms = Self::OD0_MS - (Self::OD_MS_STEP * od).ceil();
        od_ms = od_ms.max(Self::OD10_MS).min(Self::OD0_MS);
        od_ms /= clock_rate;
        let od = (Self::OD0_MS - od_ms) / Self::OD_MS_STEP;

        // CS
        let mut cs = self.cs;

        if mods.hr() {
            cs *= 1.3;
        } else if mods.ez() {
            cs *= 0.5;
        }

        cs = cs.min(10.0);

        // HP
        let hp = (self.hp * multiplier).min(10.0);

        Self {
            ar,
            od,
            cs,
            hp,
            clock_rate,
        }
    }

    /// Bpm as perceived with the current clock rate.
    #[inline]
    pub fn bpm(&self, bpm: f64) -> f64 {
        bpm * self.clock_rate
    }

    /// Duration in milliseconds as perceived with the current clock rate.
    #[inline]
    pub fn duration(&self, ms: f64) -> f64 {
        ms / self.clock_rate
    }
}

/// Linear interpolation of a difficulty value between its values at 0, 5 and 10.
#[inline]
pub(crate) fn difficulty_range(difficulty: f64, min: f64, mid: f64, max: f64) -> f64 {
    if difficulty > 5.0 {
        mid + (max - mid) * (difficulty - 5.0) / 5.0
    } else if difficulty < 5.0 {
        mid - (mid - min) * (5.0 - difficulty) / 5.0
    } else {
        mid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> BeatmapAttributes {
        BeatmapAttributes::new(9.0, 8.0, 4.0, 6.0)
    }

    #[test]
    fn no_mods_unchanged() {
        let attrs = base().mods(GameMods::new());

        assert_eq!(attrs, base());

        let attrs = base().mods(GameMods::from(GameMods::HD | GameMods::FL));

        assert_eq!(attrs, base());
    }

    #[test]
    fn hard_rock() {
        let attrs = base().mods(GameMods::from(GameMods::HR));

        assert!((attrs.ar - 10.0).abs() < 1e-9);
        assert!((attrs.cs - 5.2).abs() < 1e-9);
        assert!((attrs.hp - 8.4).abs() < 1e-9);
        // 80 - ceil(6 * 11.2) = 12 -> clamped to 20ms
        assert!((attrs.od - 10.0).abs() < 1e-9);
    }

    #[test]
    fn double_time() {
        let attrs = base().mods(GameMods::from(GameMods::DT));

        // 600ms / 1.5 = 400ms
        assert!((attrs.ar - (5.0 + 800.0 / 150.0)).abs() < 1e-9);
        // (80 - 48) / 1.5 ms
        assert!((attrs.od - (80.0 - 32.0 / 1.5) / 6.0).abs() < 1e-9);
        assert!((attrs.clock_rate - 1.5).abs() < f64::EPSILON);
        assert!((attrs.bpm(120.0) - 180.0).abs() < f64::EPSILON);
        assert!((attrs.duration(3000.0) - 2000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn half_time_easy() {
        let attrs = base().mods(GameMods::from(GameMods::HT | GameMods::EZ));

        assert!((attrs.cs - 2.0).abs() < 1e-9);
        assert!((attrs.hp - 3.0).abs() < 1e-9);
        assert!(attrs.ar < 4.5);
        assert!(attrs.od < 4.0);
        assert!((attrs.clock_rate - 0.75).abs() < f64::EPSILON);
    }
}
