/// Overshoot constant of [`Ease::OutBack`].
pub const BACK_C1: f64 = 1.70158;
/// Cubic coefficient of [`Ease::OutBack`].
pub const BACK_C3: f64 = BACK_C1 + 1.0;

/// Named easing curves. Input is clamped to `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// `x`
    Linear,
    /// `1 - (1 - x)^2`, decelerating.
    OutQuad,
    /// `1 + c3 (x - 1)^3 + c1 (x - 1)^2`, overshoots past 1 before settling.
    OutBack,
}

impl Ease {
    /// Evaluate the curve at `t`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::OutBack => {
                let x = t - 1.0;
                1.0 + BACK_C3 * x.powi(3) + BACK_C1 * x.powi(2)
            }
        }
    }
}

/// `easeOutQuad`.
pub fn ease_out_quad(x: f64) -> f64 {
    Ease::OutQuad.apply(x)
}

/// `easeOutBack`.
pub fn ease_out_back(x: f64) -> f64 {
    Ease::OutBack.apply(x)
}
