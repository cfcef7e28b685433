// SPDX-License-Identifier: MIT OR Apache-2.0
//! Interpolation requests.

use crate::library::CurveRef;
use crate::task::RateMode;
use crate::value::Tweenable;

/// Parameters of one interpolation, built fluently:
///
/// ```
/// use ordoplay_tween::{BuiltinCurve, RateMode, TweenRequest};
///
/// let request = TweenRequest::to(10.0f32, 5.0)
///     .starting_at(0.0)
///     .curve(BuiltinCurve::EaseInOut)
///     .mode(RateMode::Speed);
/// assert_eq!(request.start, Some(0.0));
/// ```
#[derive(Debug, Clone)]
pub struct TweenRequest<V> {
    /// Start value; `None` reads the property when the task is created
    pub start: Option<V>,
    /// Goal value
    pub goal: V,
    /// Duration in seconds, or speed in units per second
    pub rate: f32,
    /// Shaping curve; `None` is linear
    pub curve: Option<CurveRef>,
    /// How `rate` is interpreted
    pub mode: RateMode,
}

impl<V: Tweenable> TweenRequest<V> {
    /// Animate to `goal` at `rate`, starting from the current value
    pub fn to(goal: V, rate: f32) -> Self {
        Self {
            start: None,
            goal,
            rate,
            curve: None,
            mode: RateMode::Time,
        }
    }

    /// Start from an explicit value
    #[must_use]
    pub fn starting_at(mut self, start: V) -> Self {
        self.start = Some(start);
        self
    }

    /// Shape progress with a curve
    #[must_use]
    pub fn curve(mut self, curve: impl Into<CurveRef>) -> Self {
        self.curve = Some(curve.into());
        self
    }

    /// Set the rate mode
    #[must_use]
    pub fn mode(mut self, mode: RateMode) -> Self {
        self.mode = mode;
        self
    }

    /// Shorthand for `mode(RateMode::Speed)`
    #[must_use]
    pub fn at_speed(self) -> Self {
        self.mode(RateMode::Speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::BuiltinCurve;
    use crate::value::Vec2;

    #[test]
    fn test_defaults() {
        let request = TweenRequest::to(Vec2::new(1.0, 2.0), 0.5);
        assert_eq!(request.start, None);
        assert_eq!(request.mode, RateMode::Time);
        assert!(request.curve.is_none());
    }

    #[test]
    fn test_builder() {
        let request = TweenRequest::to(1.0f32, 2.0)
            .starting_at(-1.0)
            .curve(BuiltinCurve::Cubic)
            .at_speed();
        assert_eq!(request.start, Some(-1.0));
        assert_eq!(request.mode, RateMode::Speed);
        assert!(matches!(request.curve, Some(CurveRef::Builtin(BuiltinCurve::Cubic))));
    }
}
