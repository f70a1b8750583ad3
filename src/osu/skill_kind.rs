use super::DifficultyObject;

use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, FRAC_PI_6};

pub(crate) const SINGLE_SPACING_THRESHOLD: f64 = 125.0;
const SPEED_ANGLE_BONUS_BEGIN: f64 = 5.0 * FRAC_PI_6;

const MIN_SPEED_BONUS: f64 = 75.0;
const MAX_SPEED_BONUS: f64 = 45.0;
const SPEED_BALANCING_FACTOR: f64 = 40.0;

const AIM_ANGLE_BONUS_BEGIN: f64 = FRAC_PI_3;
const TIMING_THRESHOLD: f64 = 107.0;
const ANGLE_BONUS_SCALE: f64 = 90.0;

#[derive(Copy, Clone, Debug)]
pub(crate) enum SkillKind {
    Aim,
    Speed,
}

impl SkillKind {
    pub(crate) fn strain_value_of(self, current: &DifficultyObject<'_>) -> f64 {
        if current.base.is_spinner() {
            return 0.0;
        }

        match self {
            Self::Aim => {
                let mut result = 0.0;

                if let Some((prev_jump_dist, prev_strain_time)) = current.prev {
                    if let Some(angle) = current.angle.filter(|a| *a > AIM_ANGLE_BONUS_BEGIN) {
                        let angle_bonus = ((angle - AIM_ANGLE_BONUS_BEGIN).sin().powi(2)
                            * (prev_jump_dist - ANGLE_BONUS_SCALE).max(0.0)
                            * (current.jump_dist - ANGLE_BONUS_SCALE).max(0.0))
                        .sqrt();

                        result = 1.5 * apply_diminishing_exp(angle_bonus.max(0.0))
                            / TIMING_THRESHOLD.max(prev_strain_time);
                    }
                }

                let jump_dist_exp = apply_diminishing_exp(current.jump_dist);

                (result + jump_dist_exp / current.strain_time.max(TIMING_THRESHOLD))
                    .max(jump_dist_exp / current.strain_time)
            }
            Self::Speed => {
                let dist = SINGLE_SPACING_THRESHOLD.min(current.jump_dist);
                let delta_time = MAX_SPEED_BONUS.max(current.delta);

                let mut speed_bonus = 1.0;

                if delta_time < MIN_SPEED_BONUS {
                    let exp_base = (MIN_SPEED_BONUS - delta_time) / SPEED_BALANCING_FACTOR;
                    speed_bonus += exp_base * exp_base;
                }

                let mut angle_bonus = 1.0;

                if let Some(angle) = current.angle.filter(|a| *a < SPEED_ANGLE_BONUS_BEGIN) {
                    let exp_base = (1.5 * (SPEED_ANGLE_BONUS_BEGIN - angle)).sin();
                    angle_bonus = 1.0 + exp_base * exp_base / 3.57;

                    if angle < FRAC_PI_2 {
                        angle_bonus = 1.28;

                        if dist < ANGLE_BONUS_SCALE && angle < FRAC_PI_4 {
                            angle_bonus += (1.0 - angle_bonus)
                                * ((ANGLE_BONUS_SCALE - dist) / 10.0).min(1.0);
                        } else if dist < ANGLE_BONUS_SCALE {
                            angle_bonus += (1.0 - angle_bonus)
                                * ((ANGLE_BONUS_SCALE - dist) / 10.0).min(1.0)
                                * ((FRAC_PI_2 - angle) / FRAC_PI_4).sin();
                        }
                    }
                }

                (1.0 + (speed_bonus - 1.0) * 0.75)
                    * angle_bonus
                    * (0.95 + speed_bonus * (dist / SINGLE_SPACING_THRESHOLD).powf(3.5))
                    / current.strain_time
            }
        }
    }
}

#[inline]
fn apply_diminishing_exp(val: f64) -> f64 {
    val.powf(0.99)
}
