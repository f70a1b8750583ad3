mod difficulty_object;
use difficulty_object::DifficultyObject;

mod osu_object;
use osu_object::OsuObject;

mod pp;
pub use pp::{round_accuracy, OsuPP};

mod skill;
use skill::Skill;

mod skill_kind;
use skill_kind::{SkillKind, SINGLE_SPACING_THRESHOLD};

use crate::{Beatmap, DifficultyAttributes, GameMods, OsuStrains};

const SECTION_LEN: f64 = 400.0;
const DIFFICULTY_MULTIPLIER: f64 = 0.0675;
const NORMALIZED_RADIUS: f64 = 52.0;
const STAR_SKILL_DIFF_FACTOR: f64 = 0.4;

/// Star calculation for osu!standard maps.
///
/// Strains are based on the jumps between objects, slider bodies are only
/// considered through their end position. Stack leniency is ignored.
///
/// In case of a partial play, e.g. a fail, one can specify the amount of passed objects.
///
/// # Example
///
/// ```
/// use beatmap_pp::{Beatmap, OsuStars};
///
/// # let map = Beatmap::default();
/// let attrs = OsuStars::new(&map)
///     .mods(8 + 64) // HDDT
///     .calculate();
///
/// println!("Stars: {}", attrs.stars);
/// ```
#[derive(Clone, Debug)]
pub struct OsuStars<'m> {
    map: &'m Beatmap,
    mods: GameMods,
    passed_objects: Option<usize>,
}

impl<'m> OsuStars<'m> {
    #[inline]
    pub fn new(map: &'m Beatmap) -> Self {
        Self {
            map,
            mods: GameMods::default(),
            passed_objects: None,
        }
    }

    /// Specify mods through their bit values or a [`GameMods`] value.
    #[inline]
    pub fn mods(mut self, mods: impl Into<GameMods>) -> Self {
        self.mods = mods.into();

        self
    }

    /// Only consider the first `passed_objects` hit objects.
    #[inline]
    pub fn passed_objects(mut self, passed_objects: usize) -> Self {
        self.passed_objects = Some(passed_objects);

        self
    }

    /// Calculate the star rating along with the map's other attributes.
    pub fn calculate(self) -> DifficultyAttributes {
        log_debug!(mods = %self.mods, passed_objects = ?self.passed_objects, "osu!standard stars");

        let mut attrs = DifficultyAttributes::base(self.map, self.mods, self.passed_objects);

        let StrainSkills {
            aim,
            speed,
            n_singles,
            ..
        } = match self.skills(attrs.cs, attrs.clock_rate) {
            Some(skills) => skills,
            None => return attrs,
        };

        let aim_difficulty = aim.difficulty_value();
        let speed_difficulty = speed.difficulty_value();

        let aim_rating = (aim_difficulty.sqrt() * DIFFICULTY_MULTIPLIER).powf(0.8);
        let speed_rating = speed_difficulty.sqrt() * DIFFICULTY_MULTIPLIER;

        attrs.aim = aim_rating;
        attrs.speed = speed_rating;
        attrs.aim_difficulty = aim_difficulty;
        attrs.speed_difficulty = speed_difficulty;
        attrs.aim_length_bonus = aim.length_bonus(aim_difficulty);
        attrs.speed_length_bonus = speed.length_bonus(speed_difficulty);
        attrs.n_singles = n_singles;
        attrs.stars = aim_rating
            + speed_rating
            + STAR_SKILL_DIFF_FACTOR * (speed_rating - aim_rating).abs();

        attrs
    }

    /// The strain peaks of each section, in chronological order.
    pub fn strains(self) -> OsuStrains {
        let attrs = self.map.attributes().mods(self.mods);

        match self.skills(attrs.cs, attrs.clock_rate) {
            Some(StrainSkills {
                aim,
                speed,
                section_len,
                ..
            }) => OsuStrains {
                section_length: section_len,
                aim: aim.strain_peaks,
                speed: speed.strain_peaks,
            },
            None => OsuStrains {
                section_length: SECTION_LEN * attrs.clock_rate,
                ..Default::default()
            },
        }
    }

    fn skills(&self, cs: f64, clock_rate: f64) -> Option<StrainSkills> {
        let take = self
            .passed_objects
            .unwrap_or(self.map.hit_objects.len())
            .min(self.map.hit_objects.len());

        if take < 2 {
            return None;
        }

        let section_len = SECTION_LEN * clock_rate;
        let scaling_factor = scaling_factor(cs);

        let hit_objects: Vec<_> = self.map.hit_objects[..take]
            .iter()
            .map(|h| OsuObject::new(h, scaling_factor))
            .collect();

        let mut aim = Skill::new(SkillKind::Aim);
        let mut speed = Skill::new(SkillKind::Speed);
        let mut n_singles = 0;

        // First object has no predecessor and thus no strain
        let mut current_section_end = (hit_objects[0].time / section_len).ceil() * section_len;

        let mut prev_vals = None;

        for (i, window) in hit_objects.windows(2).enumerate() {
            let (prev, curr) = (&window[0], &window[1]);
            let prev_prev = i.checked_sub(1).map(|idx| &hit_objects[idx]);

            let h = DifficultyObject::new(curr, prev, prev_vals, prev_prev, clock_rate);

            while h.base.time > current_section_end {
                aim.save_current_peak();
                aim.start_new_section_from(current_section_end);
                speed.save_current_peak();
                speed.start_new_section_from(current_section_end);

                current_section_end += section_len;
            }

            aim.process(&h);
            speed.process(&h);

            if h.jump_dist > SINGLE_SPACING_THRESHOLD {
                n_singles += 1;
            }

            prev_vals = Some((h.jump_dist, h.strain_time));
        }

        aim.save_current_peak();
        speed.save_current_peak();

        Some(StrainSkills {
            aim,
            speed,
            section_len,
            n_singles,
        })
    }
}

struct StrainSkills {
    aim: Skill,
    speed: Skill,
    section_len: f64,
    n_singles: u32,
}

/// Factor that normalizes distances to a circle radius of 52.
fn scaling_factor(cs: f64) -> f64 {
    let radius = (54.4 - 4.48 * cs).max(1.0);
    let mut scaling_factor = NORMALIZED_RADIUS / radius;

    if radius < 30.0 {
        let small_circle_bonus = (30.0 - radius).min(5.0) / 50.0;
        scaling_factor *= 1.0 + small_circle_bonus;
    }

    scaling_factor
}
