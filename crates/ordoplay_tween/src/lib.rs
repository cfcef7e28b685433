// SPDX-License-Identifier: MIT OR Apache-2.0
//! Property tweening for `OrdoPlay`.
//!
//! This crate animates typed properties of host objects over time:
//! - Keyframe curves (cubic Hermite, optionally weighted) that shape progress
//! - Built-in curve catalog plus named user curves
//! - Interpolation tasks for scalars, vectors, rotations and colors
//! - A tick-driven engine with pause, resume and cancel
//!
//! ## Architecture
//!
//! The engine is built on:
//! - [`Accessor`]: a get/set capability bound to one property
//! - [`InterpolationTask`]: explicit progress record advanced once per tick
//! - [`Tweener`]: registry of tasks, driven by the host's `tick(dt)`
//! - [`global`]: optional per-thread installed engine
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use indexmap::IndexMap;
//! use ordoplay_tween::{BuiltinCurve, TweenRequest, Tweener, Value};
//!
//! let mut props = IndexMap::new();
//! props.insert("alpha".to_string(), Value::Float(0.0));
//! let sprite = Rc::new(RefCell::new(props));
//!
//! let engine = Tweener::new();
//! let id = engine
//!     .interpolate_float(&sprite, "alpha", TweenRequest::to(1.0, 0.5).curve(BuiltinCurve::EaseOut))
//!     .unwrap();
//!
//! engine.tick(0.25);
//! engine.tick(0.25);
//! assert!(!engine.exists(id));
//! assert_eq!(sprite.borrow()["alpha"], Value::Float(1.0));
//! ```

pub mod accessor;
pub mod config;
pub mod curve;
pub mod error;
pub mod global;
pub mod keyframe;
pub mod library;
pub mod request;
pub mod task;
pub mod tweener;
pub mod value;

pub use accessor::{accessor, Accessor, FnAccessor, PropertyAccessor, PropertyTarget};
pub use config::TweenerConfig;
pub use curve::{Curve, SharedCurve};
pub use error::{Result, TweenError};
pub use keyframe::{Interpolation, Keyframe, DEFAULT_TANGENT_WEIGHT};
pub use library::{BuiltinCurve, CurveLibrary, CurveRef};
pub use request::TweenRequest;
pub use task::{derive_duration, ErasedTask, InterpolationTask, RateMode, Step, TweenId};
pub use tweener::Tweener;
pub use value::{Color, Quat, Tweenable, Value, ValueKind, Vec2, Vec3};
