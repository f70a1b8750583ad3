use crate::{AnyPP, AnyStars, Beatmap, GameMods, OsuStrains, PerformanceAttributes};

/// Provides some additional methods on [`Beatmap`].
pub trait BeatmapExt {
    /// Calculate the stars and other attributes of a beatmap which are required for pp calculation.
    fn stars(&self) -> AnyStars<'_>;

    /// Calculate the max pp of a beatmap.
    ///
    /// Modes other than osu!standard need a star rating so if you seek
    /// more fine-tuning you can use the [`pp`](BeatmapExt::pp) method.
    fn max_pp(&self, mods: impl Into<GameMods>) -> PerformanceAttributes;

    /// Returns a builder for performance calculation.
    ///
    /// Convenient method that matches on the map's mode to choose the appropriate calculator.
    fn pp(&self) -> AnyPP<'_>;

    /// Calculate the strains of a map.
    /// This essentially performs the same calculation as [`BeatmapExt::stars`] but
    /// instead of evaluating the final strains, they are just returned as is.
    ///
    /// Suitable to plot the difficulty of a map over time.
    fn strains(&self, mods: impl Into<GameMods>) -> OsuStrains;
}

impl BeatmapExt for Beatmap {
    #[inline]
    fn stars(&self) -> AnyStars<'_> {
        AnyStars::new(self)
    }

    #[inline]
    fn max_pp(&self, mods: impl Into<GameMods>) -> PerformanceAttributes {
        AnyPP::new(self).mods(mods).calculate()
    }

    #[inline]
    fn pp(&self) -> AnyPP<'_> {
        AnyPP::new(self)
    }

    #[inline]
    fn strains(&self, mods: impl Into<GameMods>) -> OsuStrains {
        AnyStars::new(self).mods(mods).strains()
    }
}
