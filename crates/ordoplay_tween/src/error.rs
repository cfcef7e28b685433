// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for the tweening engine.

use crate::task::{RateMode, TweenId};
use crate::value::ValueKind;

/// Errors reported by tween requests and task management
#[derive(Debug, thiserror::Error)]
pub enum TweenError {
    /// The target has no property with this name
    #[error("Property '{property}' not found on target")]
    PropertyNotFound {
        /// Requested property name
        property: String,
    },

    /// The property holds a different kind of value than requested
    #[error("Property '{property}' holds {found}, expected {expected}")]
    TypeMismatch {
        /// Requested property name
        property: String,
        /// Kind the request asked for
        expected: ValueKind,
        /// Kind the property actually holds
        found: ValueKind,
    },

    /// No engine has been installed for this thread
    #[error("Tween engine is not initialized")]
    Uninitialized,

    /// No task with this ID exists (or, for resume, it is not paused)
    #[error("Tween not found: {0}")]
    UnknownId(TweenId),

    /// Every task ID the engine can hand out has been used
    #[error("Tween IDs exhausted")]
    IdsExhausted,

    /// Pause requested for a task that is already paused
    #[error("Tween {0} is already paused")]
    AlreadyPaused(TweenId),

    /// Rate is not usable for the requested pacing mode
    #[error("Invalid {mode:?} rate: {rate}")]
    InvalidRate {
        /// Pacing mode of the request
        mode: RateMode,
        /// Offending rate value
        rate: f32,
    },

    /// Keyframe table does not describe a valid curve
    #[error("Invalid curve: {0}")]
    InvalidCurve(String),

    /// Named curve is not registered
    #[error("Curve not found: {0}")]
    UnknownCurve(String),

    /// RON parse error in a curve or config document
    #[error("Parse error: {0}")]
    CurveParse(#[from] ron::error::SpannedError),

    /// IO error while loading a config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TweenError {
    /// Whether the failed operation had any effect worth aborting over.
    ///
    /// Redundant pauses leave the task untouched and can be ignored.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, TweenError::AlreadyPaused(_))
    }
}

/// Result type for tween operations
pub type Result<T> = std::result::Result<T, TweenError>;
