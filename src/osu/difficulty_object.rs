use super::OsuObject;

const MIN_STRAIN_TIME: f64 = 50.0;

pub(crate) struct DifficultyObject<'o> {
    pub(crate) base: &'o OsuObject,
    pub(crate) prev: Option<(f64, f64)>, // (jump_dist, strain_time)

    pub(crate) jump_dist: f64,
    pub(crate) angle: Option<f64>,

    pub(crate) delta: f64,
    pub(crate) strain_time: f64,
}

impl<'o> DifficultyObject<'o> {
    pub(crate) fn new(
        base: &'o OsuObject,
        prev: &OsuObject,
        prev_vals: Option<(f64, f64)>, // (jump_dist, strain_time)
        prev_prev: Option<&OsuObject>,
        clock_rate: f64,
    ) -> Self {
        let delta = (base.time - prev.time) / clock_rate;
        let strain_time = delta.max(MIN_STRAIN_TIME);

        let jump_dist = if base.is_spinner() {
            0.0
        } else {
            (base.pos - prev.end_pos).length()
        };

        let angle = prev_prev.map(|prev_prev| {
            let v1 = prev_prev.end_pos - prev.pos;
            let v2 = base.pos - prev.end_pos;

            let dot = v1.dot(v2);
            let det = v1.x * v2.y - v1.y * v2.x;

            det.atan2(dot).abs()
        });

        Self {
            base,
            prev: prev_vals,

            jump_dist,
            angle,

            delta,
            strain_time,
        }
    }
}
