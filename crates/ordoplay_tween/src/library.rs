// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in curve catalog and named curve lookup.

use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::curve::{Curve, SharedCurve};
use crate::error::{Result, TweenError};
use crate::keyframe::Keyframe;

const LINEAR_KEYS: [Keyframe; 2] = [
    Keyframe::new(0.0, 0.0, 1.0, 1.0),
    Keyframe::new(1.0, 1.0, 1.0, 1.0),
];
/// Straight line from 0 to 1
pub static LINEAR: Curve = Curve::from_static(&LINEAR_KEYS);

const QUADRATIC_KEYS: [Keyframe; 2] = [
    Keyframe::new(0.0, 0.0, 0.0, 0.0),
    Keyframe::new(1.0, 1.0, 2.0, 0.0),
];
/// Accelerating, t²
pub static QUADRATIC: Curve = Curve::from_static(&QUADRATIC_KEYS);

const CUBIC_KEYS: [Keyframe; 2] = [
    Keyframe::new(0.0, 0.0, 0.0, 0.0),
    Keyframe::new(1.0, 1.0, 3.0, 0.0),
];
/// Accelerating, t³
pub static CUBIC: Curve = Curve::from_static(&CUBIC_KEYS);

const BOUNCING_KEYS: [Keyframe; 2] = [
    Keyframe::new(0.0, 0.0, 0.0, -1.5),
    Keyframe::new(1.0, 1.0, -1.5, 0.0),
];
/// Dips below 0 at the start and overshoots 1 before settling
pub static BOUNCING: Curve = Curve::from_static(&BOUNCING_KEYS);

const OVERSHOOT_KEYS: [Keyframe; 2] = [
    Keyframe::new(0.0, 0.0, 0.0, 0.0),
    Keyframe::new(1.0, 1.0, -1.5, 0.0),
];
/// Overshoots 1 before settling
pub static OVERSHOOT: Curve = Curve::from_static(&OVERSHOOT_KEYS);

const RECOVERY_KEYS: [Keyframe; 2] = [
    Keyframe::new(0.0, 0.0, 0.0, -1.5),
    Keyframe::new(1.0, 1.0, 0.0, 0.0),
];
/// Dips below 0 before recovering towards 1
pub static RECOVERY: Curve = Curve::from_static(&RECOVERY_KEYS);

const EASE_IN_KEYS: [Keyframe; 2] = [
    Keyframe::new(0.0, 0.0, 0.0, 0.0),
    Keyframe::weighted(1.0, 1.0, 1.0, 0.0, 0.25, 0.0),
];
/// Slow start
pub static EASE_IN: Curve = Curve::from_static(&EASE_IN_KEYS);

const EASE_OUT_KEYS: [Keyframe; 2] = [
    Keyframe::weighted(0.0, 0.0, 0.0, 1.0, 0.0, 0.25),
    Keyframe::new(1.0, 1.0, 0.0, 0.0),
];
/// Slow finish
pub static EASE_OUT: Curve = Curve::from_static(&EASE_OUT_KEYS);

const EASE_IN_OUT_KEYS: [Keyframe; 2] = [
    Keyframe::new(0.0, 0.0, 0.0, 0.0),
    Keyframe::new(1.0, 1.0, 0.0, 0.0),
];
/// Slow start and finish (smoothstep)
pub static EASE_IN_OUT: Curve = Curve::from_static(&EASE_IN_OUT_KEYS);

/// Built-in curve identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinCurve {
    /// See [`LINEAR`]
    #[default]
    Linear,
    /// See [`QUADRATIC`]
    Quadratic,
    /// See [`CUBIC`]
    Cubic,
    /// See [`BOUNCING`]
    Bouncing,
    /// See [`OVERSHOOT`]
    Overshoot,
    /// See [`RECOVERY`]
    Recovery,
    /// See [`EASE_IN`]
    EaseIn,
    /// See [`EASE_OUT`]
    EaseOut,
    /// See [`EASE_IN_OUT`]
    EaseInOut,
}

impl BuiltinCurve {
    /// Every built-in, in catalog order
    pub const ALL: [BuiltinCurve; 9] = [
        Self::Linear,
        Self::Quadratic,
        Self::Cubic,
        Self::Bouncing,
        Self::Overshoot,
        Self::Recovery,
        Self::EaseIn,
        Self::EaseOut,
        Self::EaseInOut,
    ];

    /// The shared curve for this built-in
    pub fn curve(&self) -> &'static Curve {
        match self {
            Self::Linear => &LINEAR,
            Self::Quadratic => &QUADRATIC,
            Self::Cubic => &CUBIC,
            Self::Bouncing => &BOUNCING,
            Self::Overshoot => &OVERSHOOT,
            Self::Recovery => &RECOVERY,
            Self::EaseIn => &EASE_IN,
            Self::EaseOut => &EASE_OUT,
            Self::EaseInOut => &EASE_IN_OUT,
        }
    }

    /// Get the catalog name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Quadratic => "quadratic",
            Self::Cubic => "cubic",
            Self::Bouncing => "bouncing",
            Self::Overshoot => "overshoot",
            Self::Recovery => "recovery",
            Self::EaseIn => "easeIn",
            Self::EaseOut => "easeOut",
            Self::EaseInOut => "easeInOut",
        }
    }

    /// Look up a built-in by catalog name. Accepts `easeIn`, `ease_in`
    /// and `ease-in` spellings, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let folded: String = name
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        Self::ALL
            .into_iter()
            .find(|builtin| builtin.name().to_lowercase() == folded)
    }
}

/// How a request names its shaping curve
#[derive(Debug, Clone)]
pub enum CurveRef {
    /// A built-in curve
    Builtin(BuiltinCurve),
    /// A curve registered in the engine's library under this name
    Named(String),
    /// A caller-owned curve
    Custom(Rc<Curve>),
}

impl Default for CurveRef {
    fn default() -> Self {
        CurveRef::Builtin(BuiltinCurve::Linear)
    }
}

impl From<BuiltinCurve> for CurveRef {
    fn from(builtin: BuiltinCurve) -> Self {
        CurveRef::Builtin(builtin)
    }
}

impl From<Rc<Curve>> for CurveRef {
    fn from(curve: Rc<Curve>) -> Self {
        CurveRef::Custom(curve)
    }
}

impl From<Curve> for CurveRef {
    fn from(curve: Curve) -> Self {
        CurveRef::Custom(Rc::new(curve))
    }
}

impl From<&str> for CurveRef {
    fn from(name: &str) -> Self {
        CurveRef::Named(name.to_string())
    }
}

/// Registry of user curves, backed by the built-in catalog
#[derive(Debug, Default)]
pub struct CurveLibrary {
    curves: IndexMap<String, Rc<Curve>>,
}

impl CurveLibrary {
    /// Create a library holding only the built-ins
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a named user curve
    pub fn register(&mut self, name: impl Into<String>, curve: impl Into<Rc<Curve>>) {
        let name = name.into();
        if BuiltinCurve::from_name(&name).is_some() {
            tracing::debug!("User curve '{}' shadows a built-in", name);
        }
        self.curves.insert(name, curve.into());
    }

    /// Remove a named user curve
    pub fn unregister(&mut self, name: &str) -> Option<Rc<Curve>> {
        self.curves.shift_remove(name)
    }

    /// Get a user curve by name
    pub fn get(&self, name: &str) -> Option<&Rc<Curve>> {
        self.curves.get(name)
    }

    /// Names of registered user curves
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.curves.keys().map(String::as_str)
    }

    /// Resolve a request's curve. `None` means linear.
    ///
    /// Named lookups try user curves first, then built-in names.
    pub fn resolve(&self, curve: Option<&CurveRef>) -> Result<SharedCurve> {
        match curve {
            None => Ok(SharedCurve::Static(&LINEAR)),
            Some(CurveRef::Builtin(builtin)) => Ok(SharedCurve::Static(builtin.curve())),
            Some(CurveRef::Custom(curve)) => Ok(SharedCurve::Owned(Rc::clone(curve))),
            Some(CurveRef::Named(name)) => {
                if let Some(curve) = self.curves.get(name) {
                    return Ok(SharedCurve::Owned(Rc::clone(curve)));
                }
                BuiltinCurve::from_name(name)
                    .map(|builtin| SharedCurve::Static(builtin.curve()))
                    .ok_or_else(|| TweenError::UnknownCurve(name.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_endpoints_are_exact() {
        for builtin in BuiltinCurve::ALL {
            let curve = builtin.curve();
            let first = curve.keys().first().unwrap().value;
            let last = curve.keys().last().unwrap().value;
            assert_eq!(curve.evaluate(0.0), first, "{}", builtin.name());
            assert_eq!(curve.evaluate(1.0), last, "{}", builtin.name());
        }
    }

    #[test]
    fn test_builtin_tables() {
        assert_eq!(QUADRATIC.keys()[1], Keyframe::new(1.0, 1.0, 2.0, 0.0));
        assert_eq!(EASE_IN.keys()[1].in_weight, 0.25);
        assert_eq!(EASE_OUT.keys()[0].out_weight, 0.25);
        assert_eq!(BOUNCING.keys()[0].out_tangent, -1.5);
        assert_eq!(BOUNCING.keys()[1].in_tangent, -1.5);
    }

    #[test]
    fn test_linear_is_identity() {
        for i in 0..=20 {
            let t = i as f32 / 20.0;
            assert!((LINEAR.evaluate(t) - t).abs() < 1e-6);
        }
    }

    #[test]
    fn test_shapes() {
        assert!((QUADRATIC.evaluate(0.5) - 0.25).abs() < 1e-6);
        assert!((CUBIC.evaluate(0.5) - 0.125).abs() < 1e-6);
        assert!((EASE_IN_OUT.evaluate(0.5) - 0.5).abs() < 1e-6);

        // Overshoot passes 1 late in the segment, recovery dips below 0 early
        assert!(OVERSHOOT.evaluate(0.8) > 1.0);
        assert!(RECOVERY.evaluate(0.1) < 0.0);
        assert!(BOUNCING.evaluate(0.1) < 0.0);
        assert!(BOUNCING.evaluate(0.9) > 1.0);
    }

    #[test]
    fn test_ease_in_and_out_are_asymmetric() {
        assert!(EASE_IN.evaluate(0.25) < 0.25);
        assert!(EASE_OUT.evaluate(0.75) > 0.75);
        assert!(EASE_IN.evaluate(0.5) < EASE_OUT.evaluate(0.5));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(BuiltinCurve::from_name("easeIn"), Some(BuiltinCurve::EaseIn));
        assert_eq!(BuiltinCurve::from_name("ease_in_out"), Some(BuiltinCurve::EaseInOut));
        assert_eq!(BuiltinCurve::from_name("ease-out"), Some(BuiltinCurve::EaseOut));
        assert_eq!(BuiltinCurve::from_name("LINEAR"), Some(BuiltinCurve::Linear));
        assert_eq!(BuiltinCurve::from_name("wobble"), None);
    }

    #[test]
    fn test_resolve_defaults_to_linear() {
        let library = CurveLibrary::new();
        let curve = library.resolve(None).unwrap();
        assert_eq!(&*curve, &LINEAR);
    }

    #[test]
    fn test_resolve_named() {
        let mut library = CurveLibrary::new();
        library.register("snap", QUADRATIC.clone());

        let snap = library.resolve(Some(&CurveRef::from("snap"))).unwrap();
        assert!(matches!(snap, SharedCurve::Owned(_)));

        let cubic = library.resolve(Some(&CurveRef::from("cubic"))).unwrap();
        assert!(matches!(cubic, SharedCurve::Static(_)));

        let missing = library.resolve(Some(&CurveRef::from("nope")));
        assert!(matches!(missing, Err(TweenError::UnknownCurve(name)) if name == "nope"));
    }
}
