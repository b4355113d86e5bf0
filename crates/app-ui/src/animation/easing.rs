//! Easing curves for timing animations

use crate::tokens::easing as curves;
use serde::{Deserialize, Serialize};

/// Maps linear progress `t` in `[0, 1]` to eased progress
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    /// No easing
    Linear,
    /// Standard ease
    Ease,
    /// Accelerate from rest
    EaseIn,
    /// Decelerate to rest
    EaseOut,
    /// Accelerate then decelerate
    #[default]
    EaseInOut,
    /// Bouncing arrival
    Bounce,
    /// Arbitrary cubic-bezier `(x1, y1, x2, y2)`
    CubicBezier(f64, f64, f64, f64),
}

impl Easing {
    /// Apply the curve
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::Ease => bezier_tuple(curves::EASE, t),
            Easing::EaseIn => bezier_tuple(curves::EASE_IN, t),
            Easing::EaseOut => bezier_tuple(curves::EASE_OUT, t),
            Easing::EaseInOut => bezier_tuple(curves::EASE_IN_OUT, t),
            Easing::Bounce => bounce(t),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

fn bezier_tuple((x1, y1, x2, y2): (f64, f64, f64, f64), t: f64) -> f64 {
    cubic_bezier(x1, y1, x2, y2, t)
}

fn bounce(t: f64) -> f64 {
    const N: f64 = 7.5625;
    const D: f64 = 2.75;

    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

// One coordinate of the curve through (0,0), (p1), (p2), (1,1) at parameter s.
fn bezier_at(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_slope(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    if x1 == y1 && x2 == y2 {
        return x;
    }

    let s = solve_parameter(x, x1, x2);
    bezier_at(s, y1, y2)
}

// Find s with bezier_at(s, x1, x2) == x. Newton first, bisection if the slope flattens.
fn solve_parameter(x: f64, x1: f64, x2: f64) -> f64 {
    const EPSILON: f64 = 1e-7;

    let mut s = x;
    for _ in 0..8 {
        let error = bezier_at(s, x1, x2) - x;
        if error.abs() < EPSILON {
            return s;
        }
        let slope = bezier_slope(s, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        s = (s - error / slope).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    s = x;
    for _ in 0..64 {
        let current = bezier_at(s, x1, x2);
        if (current - x).abs() < EPSILON {
            break;
        }
        if x > current {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    s
}
