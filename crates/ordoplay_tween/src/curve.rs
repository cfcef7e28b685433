// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe shaping curves.
//!
//! A curve maps normalized progress to shaped progress. Between keyframes it
//! is a cubic Hermite segment; outside the keyframe range it holds the
//! boundary value.

use std::borrow::Cow;
use std::ops::Deref;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TweenError};
use crate::keyframe::{Interpolation, Keyframe};

/// An immutable keyframe curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
pub struct Curve {
    keys: Cow<'static, [Keyframe]>,
}

impl Curve {
    /// Create a curve from keyframes.
    ///
    /// Requires at least two keyframes with strictly increasing, finite times.
    pub fn new(keys: Vec<Keyframe>) -> Result<Self> {
        validate(&keys)?;
        Ok(Self {
            keys: Cow::Owned(keys),
        })
    }

    /// Wrap a literal keyframe table. The table must already be valid.
    pub(crate) const fn from_static(keys: &'static [Keyframe]) -> Self {
        Self {
            keys: Cow::Borrowed(keys),
        }
    }

    /// Parse a curve from RON (a list of keyframes)
    pub fn from_ron(source: &str) -> Result<Self> {
        Ok(ron::from_str(source)?)
    }

    /// Evaluate the curve at `t`
    pub fn evaluate(&self, t: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };

        if t.is_nan() || t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        match self.keys.iter().position(|k| k.time >= t) {
            Some(idx) if idx > 0 => Interpolation::segment(&self.keys[idx - 1], &self.keys[idx], t),
            _ => first.value,
        }
    }

    /// Get all keyframes
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Get keyframe count
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always false for a constructed curve
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl TryFrom<Vec<Keyframe>> for Curve {
    type Error = TweenError;

    fn try_from(keys: Vec<Keyframe>) -> Result<Self> {
        Self::new(keys)
    }
}

impl From<Curve> for Vec<Keyframe> {
    fn from(curve: Curve) -> Self {
        curve.keys.into_owned()
    }
}

fn validate(keys: &[Keyframe]) -> Result<()> {
    if keys.len() < 2 {
        return Err(TweenError::InvalidCurve(format!(
            "need at least 2 keyframes, got {}",
            keys.len()
        )));
    }
    if let Some(bad) = keys.iter().find(|k| {
        !(k.time.is_finite()
            && k.value.is_finite()
            && k.in_tangent.is_finite()
            && k.out_tangent.is_finite()
            && k.in_weight.is_finite()
            && k.out_weight.is_finite())
    }) {
        return Err(TweenError::InvalidCurve(format!(
            "non-finite keyframe at time {}",
            bad.time
        )));
    }
    if let Some(bad) = keys.iter().find(|k| {
        !((0.0..=1.0).contains(&k.in_weight) && (0.0..=1.0).contains(&k.out_weight))
    }) {
        return Err(TweenError::InvalidCurve(format!(
            "tangent weights must lie in [0, 1] (keyframe at time {})",
            bad.time
        )));
    }
    if let Some(pair) = keys.windows(2).find(|pair| pair[1].time <= pair[0].time) {
        return Err(TweenError::InvalidCurve(format!(
            "keyframe times must increase ({} then {})",
            pair[0].time, pair[1].time
        )));
    }
    Ok(())
}

/// A curve as held by a running task: either a built-in with static
/// lifetime or a user curve shared with the caller.
#[derive(Debug, Clone)]
pub enum SharedCurve {
    /// Process-wide built-in
    Static(&'static Curve),
    /// Caller-owned curve
    Owned(Rc<Curve>),
}

impl Deref for SharedCurve {
    type Target = Curve;

    fn deref(&self) -> &Curve {
        match self {
            SharedCurve::Static(curve) => curve,
            SharedCurve::Owned(curve) => curve,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Curve {
        Curve::new(vec![
            Keyframe::new(0.0, 0.0, 1.0, 1.0),
            Keyframe::new(0.5, 2.0, 0.0, 0.0),
            Keyframe::new(1.0, 1.0, 1.0, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_flat_extrapolation() {
        let curve = ramp();
        assert_eq!(curve.evaluate(-3.0), 0.0);
        assert_eq!(curve.evaluate(0.0), 0.0);
        assert_eq!(curve.evaluate(1.0), 1.0);
        assert_eq!(curve.evaluate(42.0), 1.0);
        assert_eq!(curve.evaluate(f32::NAN), 0.0);
    }

    #[test]
    fn test_hits_interior_keyframe() {
        let curve = ramp();
        assert!((curve.evaluate(0.5) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_brackets_each_segment() {
        let curve = ramp();
        // First segment rises towards the 2.0 peak, second falls back to 1.0
        assert!(curve.evaluate(0.25) > 0.0 && curve.evaluate(0.25) < 2.0);
        assert!(curve.evaluate(0.75) > 1.0 && curve.evaluate(0.75) < 2.0);
    }

    #[test]
    fn test_rejects_invalid_tables() {
        assert!(matches!(
            Curve::new(vec![Keyframe::new(0.0, 0.0, 0.0, 0.0)]),
            Err(TweenError::InvalidCurve(_))
        ));
        assert!(matches!(
            Curve::new(vec![
                Keyframe::new(0.5, 0.0, 0.0, 0.0),
                Keyframe::new(0.5, 1.0, 0.0, 0.0),
            ]),
            Err(TweenError::InvalidCurve(_))
        ));
        assert!(matches!(
            Curve::new(vec![
                Keyframe::new(0.0, 0.0, 0.0, 0.0),
                Keyframe::new(1.0, f32::INFINITY, 0.0, 0.0),
            ]),
            Err(TweenError::InvalidCurve(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_weights() {
        for weight in [-0.1, 1.5] {
            let result = Curve::new(vec![
                Keyframe::weighted(0.0, 0.0, 0.0, 1.0, 0.0, weight),
                Keyframe::new(1.0, 1.0, 0.0, 0.0),
            ]);
            assert!(matches!(result, Err(TweenError::InvalidCurve(_))), "{weight}");
        }

        let full = Curve::new(vec![
            Keyframe::weighted(0.0, 0.0, 0.0, 1.0, 0.0, 1.0),
            Keyframe::weighted(1.0, 1.0, 1.0, 0.0, 1.0, 0.0),
        ]);
        assert!(full.is_ok());
    }

    #[test]
    fn test_from_ron() {
        let curve = Curve::from_ron(
            "[
                (time: 0.0, value: 0.0, in_tangent: 0.0, out_tangent: 0.0),
                (time: 1.0, value: 1.0, in_tangent: 3.0, out_tangent: 0.0),
            ]",
        )
        .unwrap();
        assert_eq!(curve.len(), 2);
        assert!((curve.evaluate(0.5) - 0.125).abs() < 1e-6);
    }

    #[test]
    fn test_from_ron_validates() {
        let result = Curve::from_ron("[(time: 0.0, value: 0.0, in_tangent: 0.0, out_tangent: 0.0)]");
        assert!(matches!(result, Err(TweenError::CurveParse(_))));
    }

    #[test]
    fn test_shared_curve_derefs() {
        let owned = SharedCurve::Owned(Rc::new(ramp()));
        assert_eq!(owned.len(), 3);
    }
}
