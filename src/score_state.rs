use crate::GameMode;

/// Aggregation for a score's state i.e. what is the maximum combo,
/// what are the hit results and what is the score.
///
/// Hit results are interpreted based on the map's mode.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreState {
    /// Maximum combo of the play.
    /// **Not** the maximum possible combo of the map.
    ///
    /// Irrelevant for osu!mania. `None` is treated as a full combo.
    pub max_combo: Option<u32>,
    /// Amount of gekis (n320 for osu!mania).
    pub n_geki: u32,
    /// Amount of katus (tiny droplet misses for osu!catch / n200 for osu!mania).
    pub n_katu: u32,
    /// Amount of 300s (fruits for osu!catch).
    pub n300: u32,
    /// Amount of 100s (droplets for osu!catch).
    pub n100: u32,
    /// Amount of 50s (tiny droplets for osu!catch).
    pub n50: u32,
    /// Amount of misses (fruits + droplets for osu!catch).
    pub n_misses: u32,
    /// Score of the play, only relevant for osu!mania.
    pub score: Option<u32>,
    /// Star rating of the map for osu!taiko, osu!catch, and osu!mania.
    ///
    /// Irrelevant for osu!standard whose stars are computed.
    pub stars: Option<f64>,
}

impl ScoreState {
    /// Create a new empty score state.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the total amount of hits by adding everything up based on the mode.
    #[inline]
    pub fn total_hits(&self, mode: GameMode) -> u32 {
        let mut amount = self
            .n300
            .saturating_add(self.n100)
            .saturating_add(self.n_misses);

        if mode != GameMode::Taiko {
            amount = amount.saturating_add(self.n50);

            if mode != GameMode::Osu {
                amount = amount.saturating_add(self.n_katu);

                if mode != GameMode::Catch {
                    amount = amount.saturating_add(self.n_geki);
                }
            }
        }

        amount
    }

    /// Whether no hit result has been specified.
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        [
            self.n_geki,
            self.n_katu,
            self.n300,
            self.n100,
            self.n50,
            self.n_misses,
        ]
        .iter()
        .all(|&n| n == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_hits_per_mode() {
        let state = ScoreState {
            n_geki: 1,
            n_katu: 2,
            n300: 3,
            n100: 4,
            n50: 5,
            n_misses: 6,
            ..Default::default()
        };

        assert_eq!(state.total_hits(GameMode::Osu), 3 + 4 + 5 + 6);
        assert_eq!(state.total_hits(GameMode::Taiko), 3 + 4 + 6);
        assert_eq!(state.total_hits(GameMode::Catch), 2 + 3 + 4 + 5 + 6);
        assert_eq!(state.total_hits(GameMode::Mania), 1 + 2 + 3 + 4 + 5 + 6);
        assert!(ScoreState::new().is_empty());
        assert!(!state.is_empty());
    }

    #[test]
    fn huge_counts_saturate() {
        let state = ScoreState {
            n300: u32::MAX,
            n100: 1,
            n_misses: 1,
            ..Default::default()
        };

        assert!(!state.is_empty());
        assert_eq!(state.total_hits(GameMode::Osu), u32::MAX);
        assert_eq!(state.total_hits(GameMode::Mania), u32::MAX);
    }
}
