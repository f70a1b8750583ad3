use super::{DifficultyObject, SkillKind};

use std::cmp::Ordering;

const SPEED_SKILL_MULTIPLIER: f64 = 1400.0;
const SPEED_STRAIN_DECAY_BASE: f64 = 0.3;

const AIM_SKILL_MULTIPLIER: f64 = 26.25;
const AIM_STRAIN_DECAY_BASE: f64 = 0.15;

const DECAY_WEIGHT: f64 = 0.9;

const LENGTH_BONUS_BASE: f64 = 0.32;
const LENGTH_BONUS_EXP: f64 = 1.2;

pub(crate) struct Skill {
    current_strain: f64,
    current_section_peak: f64,

    kind: SkillKind,
    /// Section peaks in chronological order.
    pub(crate) strain_peaks: Vec<f64>,

    prev_time: Option<f64>,
}

impl Skill {
    #[inline]
    pub(crate) fn new(kind: SkillKind) -> Self {
        Self {
            current_strain: 1.0,
            current_section_peak: 1.0,

            kind,
            strain_peaks: Vec::with_capacity(128),

            prev_time: None,
        }
    }

    #[inline]
    pub(crate) fn save_current_peak(&mut self) {
        if self.prev_time.is_some() {
            self.strain_peaks.push(self.current_section_peak);
        }
    }

    /// The new section's peak starts at the strain decayed up to `time`.
    #[inline]
    pub(crate) fn start_new_section_from(&mut self, time: f64) {
        if let Some(prev_time) = self.prev_time {
            self.current_section_peak = self.peak_strain(time - prev_time);
        }
    }

    #[inline]
    pub(crate) fn process(&mut self, current: &DifficultyObject<'_>) {
        self.current_strain *= self.strain_decay(current.delta);
        self.current_strain += self.kind.strain_value_of(current) * self.skill_multiplier();

        self.current_section_peak = self.current_section_peak.max(self.current_strain);
        self.prev_time = Some(current.base.time);
    }

    /// Weighted sum of the peaks, strongest first.
    pub(crate) fn difficulty_value(&self) -> f64 {
        let mut peaks = self.strain_peaks.clone();
        peaks.sort_unstable_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));

        let mut difficulty = 0.0;
        let mut weight = 1.0;

        for strain in peaks {
            difficulty += strain * weight;
            weight *= DECAY_WEIGHT;
        }

        difficulty
    }

    pub(crate) fn length_bonus(&self, difficulty: f64) -> f64 {
        if difficulty <= 0.0 {
            return LENGTH_BONUS_BASE;
        }

        let total: f64 = self
            .strain_peaks
            .iter()
            .map(|peak| peak.powf(LENGTH_BONUS_EXP))
            .sum();

        LENGTH_BONUS_BASE + 0.5 * ((difficulty + total).log10() - difficulty.log10())
    }

    #[inline]
    fn skill_multiplier(&self) -> f64 {
        match self.kind {
            SkillKind::Aim => AIM_SKILL_MULTIPLIER,
            SkillKind::Speed => SPEED_SKILL_MULTIPLIER,
        }
    }

    #[inline]
    fn strain_decay_base(&self) -> f64 {
        match self.kind {
            SkillKind::Aim => AIM_STRAIN_DECAY_BASE,
            SkillKind::Speed => SPEED_STRAIN_DECAY_BASE,
        }
    }

    #[inline]
    fn peak_strain(&self, delta_time: f64) -> f64 {
        self.current_strain * self.strain_decay(delta_time)
    }

    #[inline]
    fn strain_decay(&self, ms: f64) -> f64 {
        self.strain_decay_base().powf(ms / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_peaks() {
        let mut skill = Skill::new(SkillKind::Aim);
        skill.strain_peaks = vec![1.0, 3.0, 2.0];

        let expected = 3.0 + 2.0 * 0.9 + 1.0 * 0.81;

        assert!((skill.difficulty_value() - expected).abs() < 1e-12);
        assert_eq!(skill.strain_peaks, vec![1.0, 3.0, 2.0]);
    }

    #[test]
    fn no_peaks() {
        let skill = Skill::new(SkillKind::Speed);

        assert!(skill.difficulty_value().abs() < f64::EPSILON);
        assert!((skill.length_bonus(0.0) - LENGTH_BONUS_BASE).abs() < f64::EPSILON);
    }

    #[test]
    fn length_bonus_grows() {
        let mut skill = Skill::new(SkillKind::Aim);
        skill.strain_peaks = vec![2.0; 10];
        let short = skill.length_bonus(skill.difficulty_value());

        skill.strain_peaks = vec![2.0; 100];
        let long = skill.length_bonus(skill.difficulty_value());

        assert!(long > short);
        assert!(short > LENGTH_BONUS_BASE);
    }
}
