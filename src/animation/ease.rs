use std::f32::consts::PI;

use kurbo::ParamCurve as _;

use crate::foundation::core::Vec2f;

/// Which end(s) of the timeline an easing function shapes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EaseMode {
    /// No easing: progress is passed through unchanged.
    None,
    /// Shape the start of the motion.
    In,
    /// Shape the end of the motion.
    Out,
    /// Shape both ends of the motion.
    #[default]
    InOut,
}

/// Easing curve family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EaseFunction {
    /// `t^2`.
    Quadratic,
    /// `t^3`.
    #[default]
    Cubic,
    /// `t^4`.
    Quartic,
    /// `t^5`.
    Quintic,
    /// Quarter sine wave.
    Sine,
    /// Quarter circle.
    Circular,
    /// Base-2 exponential.
    Exponential,
    /// Damped sine that overshoots the end points.
    Elastic,
    /// Piecewise parabolas that bounce against the end.
    Bounce,
    /// Cubic with a small backwards pull.
    Back,
}

/// An easing mode paired with a curve family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Easing {
    /// Which end(s) to shape.
    pub mode: EaseMode,
    /// Curve family.
    pub function: EaseFunction,
}

impl Easing {
    /// Identity easing.
    pub const LINEAR: Self = Self {
        mode: EaseMode::None,
        function: EaseFunction::Quadratic,
    };

    /// Pair a mode with a curve family.
    pub const fn new(mode: EaseMode, function: EaseFunction) -> Self {
        Self { mode, function }
    }

    /// Map normalized progress `t` to eased progress.
    ///
    /// Inputs at or beyond the ends return exactly `0` or `1`, so every curve lands on its end
    /// points without floating-point residue. Elastic and back curves may leave `[0, 1]` in
    /// between.
    pub fn apply(self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self.mode {
            EaseMode::None => t,
            EaseMode::In => self.function.ease_in(t),
            EaseMode::Out => self.function.ease_out(t),
            EaseMode::InOut => self.function.ease_in_out(t),
        }
    }
}

impl EaseFunction {
    /// Every supported curve family.
    pub const ALL: [Self; 10] = [
        Self::Quadratic,
        Self::Cubic,
        Self::Quartic,
        Self::Quintic,
        Self::Sine,
        Self::Circular,
        Self::Exponential,
        Self::Elastic,
        Self::Bounce,
        Self::Back,
    ];

    /// Accelerating variant.
    pub fn ease_in(self, p: f32) -> f32 {
        match self {
            Self::Quadratic => p * p,
            Self::Cubic => p * p * p,
            Self::Quartic => p * p * p * p,
            Self::Quintic => p * p * p * p * p,
            Self::Sine => ((p - 1.0) * PI * 0.5).sin() + 1.0,
            Self::Circular => 1.0 - (1.0 - p * p).sqrt(),
            Self::Exponential => {
                if p == 0.0 {
                    p
                } else {
                    2f32.powf(10.0 * (p - 1.0))
                }
            }
            Self::Elastic => (13.0 * PI * 0.5 * p).sin() * 2f32.powf(10.0 * (p - 1.0)),
            Self::Bounce => 1.0 - bounce_out(1.0 - p),
            Self::Back => p * p * p - p * (p * PI).sin(),
        }
    }

    /// Decelerating variant.
    pub fn ease_out(self, p: f32) -> f32 {
        match self {
            Self::Quadratic => -(p * (p - 2.0)),
            Self::Cubic => {
                let f = p - 1.0;
                f * f * f + 1.0
            }
            Self::Quartic => {
                let f = p - 1.0;
                f * f * f * (1.0 - p) + 1.0
            }
            Self::Quintic => {
                let f = p - 1.0;
                f * f * f * f * f + 1.0
            }
            Self::Sine => (p * PI * 0.5).sin(),
            Self::Circular => ((2.0 - p) * p).sqrt(),
            Self::Exponential => {
                if p == 1.0 {
                    p
                } else {
                    1.0 - 2f32.powf(-10.0 * p)
                }
            }
            Self::Elastic => (-13.0 * PI * 0.5 * (p + 1.0)).sin() * 2f32.powf(-10.0 * p) + 1.0,
            Self::Bounce => bounce_out(p),
            Self::Back => {
                let f = 1.0 - p;
                1.0 - (f * f * f - f * (f * PI).sin())
            }
        }
    }

    /// Symmetric variant: accelerate through the first half, decelerate through the second.
    pub fn ease_in_out(self, p: f32) -> f32 {
        match self {
            Self::Quadratic => {
                if p < 0.5 {
                    2.0 * p * p
                } else {
                    (-2.0 * p * p) + (4.0 * p) - 1.0
                }
            }
            Self::Cubic => {
                if p < 0.5 {
                    4.0 * p * p * p
                } else {
                    let f = 2.0 * p - 2.0;
                    0.5 * f * f * f + 1.0
                }
            }
            Self::Quartic => {
                if p < 0.5 {
                    8.0 * p * p * p * p
                } else {
                    let f = p - 1.0;
                    -8.0 * f * f * f * f + 1.0
                }
            }
            Self::Quintic => {
                if p < 0.5 {
                    16.0 * p * p * p * p * p
                } else {
                    let f = 2.0 * p - 2.0;
                    0.5 * f * f * f * f * f + 1.0
                }
            }
            Self::Sine => 0.5 * (1.0 - (p * PI).cos()),
            Self::Circular => {
                if p < 0.5 {
                    0.5 * (1.0 - (1.0 - 4.0 * (p * p)).sqrt())
                } else {
                    0.5 * ((-((2.0 * p) - 3.0) * ((2.0 * p) - 1.0)).sqrt() + 1.0)
                }
            }
            Self::Exponential => {
                if p == 0.0 || p == 1.0 {
                    p
                } else if p < 0.5 {
                    0.5 * 2f32.powf((20.0 * p) - 10.0)
                } else {
                    -0.5 * 2f32.powf((-20.0 * p) + 10.0) + 1.0
                }
            }
            Self::Elastic => {
                if p < 0.5 {
                    0.5 * (13.0 * PI * 0.5 * (2.0 * p)).sin()
                        * 2f32.powf(10.0 * ((2.0 * p) - 1.0))
                } else {
                    0.5 * ((-13.0 * PI * 0.5 * ((2.0 * p - 1.0) + 1.0)).sin()
                        * 2f32.powf(-10.0 * (2.0 * p - 1.0))
                        + 2.0)
                }
            }
            Self::Bounce => {
                if p < 0.5 {
                    0.5 * (1.0 - bounce_out(1.0 - p * 2.0))
                } else {
                    0.5 * bounce_out(p * 2.0 - 1.0) + 0.5
                }
            }
            Self::Back => {
                if p < 0.5 {
                    let f = 2.0 * p;
                    0.5 * (f * f * f - f * (f * PI).sin())
                } else {
                    let f = 1.0 - (2.0 * p - 1.0);
                    0.5 * (1.0 - (f * f * f - f * (f * PI).sin())) + 0.5
                }
            }
        }
    }
}

fn bounce_out(p: f32) -> f32 {
    if p < 4.0 / 11.0 {
        (121.0 * p * p) / 16.0
    } else if p < 8.0 / 11.0 {
        (363.0 / 40.0 * p * p) - (99.0 / 10.0 * p) + 17.0 / 5.0
    } else if p < 9.0 / 10.0 {
        (4356.0 / 361.0 * p * p) - (35442.0 / 1805.0 * p) + 16061.0 / 1805.0
    } else {
        (54.0 / 5.0 * p * p) - (513.0 / 25.0 * p) + 268.0 / 25.0
    }
}

/// Point on the quadratic Bezier `begin -> control -> end` at parameter `t`.
pub fn quad_bezier(begin: Vec2f, control: Vec2f, end: Vec2f, t: f32) -> Vec2f {
    let curve = kurbo::QuadBez::new(begin.to_point(), control.to_point(), end.to_point());
    Vec2f::from_point(curve.eval(f64::from(t)))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
