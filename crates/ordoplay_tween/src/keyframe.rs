// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe definitions and the spline math used to blend between them.

use serde::{Deserialize, Serialize};

/// Handle length (as a fraction of the segment width) of an unweighted tangent.
///
/// A cubic Bézier with both handles at one third of the segment is exactly the
/// Hermite segment built from the same tangents.
pub const DEFAULT_TANGENT_WEIGHT: f32 = 1.0 / 3.0;

/// A keyframe on a shaping curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Normalized time position
    pub time: f32,
    /// Curve value at this keyframe
    pub value: f32,
    /// Slope arriving at this keyframe
    pub in_tangent: f32,
    /// Slope leaving this keyframe
    pub out_tangent: f32,
    /// Influence of the in-tangent (0 = unweighted)
    #[serde(default)]
    pub in_weight: f32,
    /// Influence of the out-tangent (0 = unweighted)
    #[serde(default)]
    pub out_weight: f32,
}

impl Keyframe {
    /// Create an unweighted keyframe
    pub const fn new(time: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Self {
        Self {
            time,
            value,
            in_tangent,
            out_tangent,
            in_weight: 0.0,
            out_weight: 0.0,
        }
    }

    /// Create a keyframe with explicit tangent weights
    pub const fn weighted(
        time: f32,
        value: f32,
        in_tangent: f32,
        out_tangent: f32,
        in_weight: f32,
        out_weight: f32,
    ) -> Self {
        Self {
            time,
            value,
            in_tangent,
            out_tangent,
            in_weight,
            out_weight,
        }
    }

    /// Whether either tangent carries a custom weight
    pub fn is_weighted(&self) -> bool {
        self.in_weight != 0.0 || self.out_weight != 0.0
    }

    /// Effective handle length of the in-tangent
    pub fn effective_in_weight(&self) -> f32 {
        effective_weight(self.in_weight)
    }

    /// Effective handle length of the out-tangent
    pub fn effective_out_weight(&self) -> f32 {
        effective_weight(self.out_weight)
    }
}

fn effective_weight(weight: f32) -> f32 {
    if weight == 0.0 {
        DEFAULT_TANGENT_WEIGHT
    } else {
        weight
    }
}

/// Interpolation utilities
pub struct Interpolation;

impl Interpolation {
    /// Unclamped linear interpolation between two floats
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Cubic bezier interpolation
    pub fn bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        p0 * mt3 + 3.0 * p1 * mt2 * t + 3.0 * p2 * mt * t2 + p3 * t3
    }

    /// Hermite spline interpolation
    pub fn hermite(p0: f32, m0: f32, p1: f32, m1: f32, t: f32) -> f32 {
        let t2 = t * t;
        let t3 = t2 * t;

        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;

        h00 * p0 + h10 * m0 + h01 * p1 + h11 * m1
    }

    /// Blend between two keyframes at an absolute `time` inside `[a.time, b.time]`.
    ///
    /// Unweighted segments use the Hermite basis with tangents scaled by the
    /// segment width. As soon as either side carries a weight the segment is
    /// treated as a weighted Bézier: handles sit at `weight * width` along the
    /// time axis, and the curve parameter for `time` is solved numerically.
    pub fn segment(a: &Keyframe, b: &Keyframe, time: f32) -> f32 {
        let width = b.time - a.time;
        if width <= f32::EPSILON {
            return b.value;
        }
        let u = (time - a.time) / width;

        if !a.is_weighted() && !b.is_weighted() {
            return Self::hermite(
                a.value,
                a.out_tangent * width,
                b.value,
                b.in_tangent * width,
                u,
            );
        }

        let w0 = a.effective_out_weight();
        let w1 = b.effective_in_weight();
        let s = solve_bezier_parameter(u, w0, 1.0 - w1);

        Self::bezier(
            a.value,
            a.value + w0 * width * a.out_tangent,
            b.value - w1 * width * b.in_tangent,
            b.value,
            s,
        )
    }
}

/// Find `s` such that the time component of a unit-span Bézier with inner
/// control points `x1`, `x2` equals `x`.
///
/// Newton-Raphson first, bisection when the slope flattens out. Works in f64
/// so tiny tick deltas do not jitter.
fn solve_bezier_parameter(x: f32, x1: f32, x2: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let x = x as f64;
    let x1 = x1 as f64;
    let x2 = x2 as f64;

    let mut p = x;
    for _ in 0..8 {
        let err = unit_bezier_sample(p, x1, x2) - x;
        if err.abs() < 1e-7 {
            return p as f32;
        }
        let slope = unit_bezier_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p = (p - err / slope).clamp(0.0, 1.0);
    }

    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    p = x;
    for _ in 0..32 {
        let val = unit_bezier_sample(p, x1, x2);
        if (val - x).abs() < 1e-7 {
            break;
        }
        if val < x {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    p as f32
}

/// B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³, with endpoints fixed at 0 and 1
#[inline]
fn unit_bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

#[inline]
fn unit_bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hermite_endpoints() {
        assert_eq!(Interpolation::hermite(2.0, 5.0, 7.0, -3.0, 0.0), 2.0);
        assert_eq!(Interpolation::hermite(2.0, 5.0, 7.0, -3.0, 1.0), 7.0);
    }

    #[test]
    fn test_unweighted_segment_matches_hermite() {
        let a = Keyframe::new(0.0, 0.0, 0.0, 0.0);
        let b = Keyframe::new(1.0, 1.0, 2.0, 0.0);

        // Quadratic-style segment: h01 + h11 * 2 = t^2
        let v = Interpolation::segment(&a, &b, 0.5);
        assert!((v - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_segment_scales_tangents_by_width() {
        let a = Keyframe::new(0.0, 0.0, 1.0, 1.0);
        let b = Keyframe::new(2.0, 2.0, 1.0, 1.0);

        // Slope 1 across a width-2 segment from 0 to 2 is a straight line
        let v = Interpolation::segment(&a, &b, 0.5);
        assert!((v - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_default_weights_reproduce_hermite() {
        let a = Keyframe::weighted(0.0, 0.0, 0.0, 0.5, 0.0, DEFAULT_TANGENT_WEIGHT);
        let b = Keyframe::new(1.0, 1.0, 1.5, 0.0);
        let plain_a = Keyframe::new(0.0, 0.0, 0.0, 0.5);

        for i in 1..10 {
            let t = i as f32 / 10.0;
            let weighted = Interpolation::segment(&a, &b, t);
            let plain = Interpolation::segment(&plain_a, &b, t);
            assert!((weighted - plain).abs() < 1e-4, "t={t}: {weighted} vs {plain}");
        }
    }

    #[test]
    fn test_heavier_weight_bends_curve() {
        let a = Keyframe::new(0.0, 0.0, 0.0, 0.0);
        let light = Keyframe::new(1.0, 1.0, 1.0, 0.0);
        let heavy = Keyframe::weighted(1.0, 1.0, 1.0, 0.0, 0.25, 0.0);

        let v_light = Interpolation::segment(&a, &light, 0.5);
        let v_heavy = Interpolation::segment(&a, &heavy, 0.5);
        assert!((v_light - v_heavy).abs() > 1e-3);
    }

    #[test]
    fn test_solve_bezier_parameter_linear_handles() {
        // Handles at thirds make x(s) = s
        for i in 0..=10 {
            let x = i as f32 / 10.0;
            let s = solve_bezier_parameter(x, 1.0 / 3.0, 2.0 / 3.0);
            assert!((s - x).abs() < 1e-5);
        }
    }

    #[test]
    fn test_keyframe_deserializes_without_weights() {
        let kf: Keyframe =
            ron::from_str("(time: 1.0, value: 1.0, in_tangent: 2.0, out_tangent: 0.0)").unwrap();
        assert_eq!(kf, Keyframe::new(1.0, 1.0, 2.0, 0.0));
        assert!(!kf.is_weighted());
    }
}
