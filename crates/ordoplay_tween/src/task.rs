// SPDX-License-Identifier: MIT OR Apache-2.0
//! Interpolation tasks.
//!
//! A task is the explicit progress record of one running animation: the
//! registry advances it once per tick and it writes the shaped value through
//! its accessor until normalized time reaches 1.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::accessor::Accessor;
use crate::curve::SharedCurve;
use crate::error::{Result, TweenError};
use crate::value::{Tweenable, ValueKind};

/// Stable identifier of an interpolation task
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TweenId(u64);

impl TweenId {
    /// Wrap a raw ID value
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw ID value
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TweenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How the rate of a request is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RateMode {
    /// Rate is the duration in seconds
    #[default]
    Time,
    /// Rate is a speed; duration is `distance(start, goal) / rate`
    Speed,
}

/// Turn a request's rate into a duration in seconds
pub fn derive_duration<V: Tweenable>(mode: RateMode, rate: f32, start: &V, goal: &V) -> Result<f32> {
    match mode {
        RateMode::Time => {
            if rate.is_finite() && rate >= 0.0 {
                Ok(rate)
            } else {
                Err(TweenError::InvalidRate { mode, rate })
            }
        }
        RateMode::Speed => {
            if !(rate.is_finite() && rate > 0.0) {
                return Err(TweenError::InvalidRate { mode, rate });
            }
            Ok(start.distance(goal) / rate)
        }
    }
}

/// Outcome of advancing a task by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The task wrote an intermediate value and wants more ticks
    Running,
    /// The task wrote its final value and must be removed
    Completed,
}

/// One running animation of a value of type `V`
pub struct InterpolationTask<V, A> {
    id: TweenId,
    accessor: A,
    start: V,
    goal: V,
    duration: f32,
    curve: SharedCurve,
    elapsed: f32,
}

impl<V, A> InterpolationTask<V, A>
where
    V: Tweenable,
    A: Accessor<V>,
{
    /// Create a task at zero elapsed time
    pub fn new(id: TweenId, accessor: A, start: V, goal: V, duration: f32, curve: SharedCurve) -> Self {
        Self {
            id,
            accessor,
            start,
            goal,
            duration,
            curve,
            elapsed: 0.0,
        }
    }

    /// Start value
    pub fn start(&self) -> &V {
        &self.start
    }

    /// Goal value
    pub fn goal(&self) -> &V {
        &self.goal
    }

    /// Value at normalized time `t`. Shaped progress of exactly 0 or 1
    /// yields the endpoint itself rather than a recomputed blend.
    pub fn sample(&self, t: f32) -> V {
        let shaped = self.curve.evaluate(t);
        if shaped == 1.0 {
            self.goal.clone()
        } else if shaped == 0.0 {
            self.start.clone()
        } else {
            self.start.lerp_unclamped(&self.goal, shaped)
        }
    }

    /// Write the sample at the current progress without advancing
    pub fn write_current(&mut self) {
        let value = self.sample(self.normalized());
        self.accessor.set(value);
    }

    fn normalized(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            self.elapsed / self.duration
        }
    }
}

/// Type-erased view of a task, so tasks of every value kind share one registry
pub trait ErasedTask {
    /// Task identifier
    fn id(&self) -> TweenId;

    /// Kind of value the task drives
    fn kind(&self) -> ValueKind;

    /// Duration in seconds
    fn duration(&self) -> f32;

    /// Seconds accumulated so far
    fn elapsed(&self) -> f32;

    /// Normalized progress, clamped to `[0, 1]`
    fn progress(&self) -> f32;

    /// Advance by `dt` seconds and write through the accessor
    fn advance(&mut self, dt: f32) -> Step;
}

impl<V, A> ErasedTask for InterpolationTask<V, A>
where
    V: Tweenable,
    A: Accessor<V>,
{
    fn id(&self) -> TweenId {
        self.id
    }

    fn kind(&self) -> ValueKind {
        V::KIND
    }

    fn duration(&self) -> f32 {
        self.duration
    }

    fn elapsed(&self) -> f32 {
        self.elapsed
    }

    fn progress(&self) -> f32 {
        self.normalized().clamp(0.0, 1.0)
    }

    fn advance(&mut self, dt: f32) -> Step {
        self.elapsed += dt.max(0.0);

        let t = self.normalized();
        if t >= 1.0 {
            // Final write uses the exact endpoint, however far the last tick overshot
            let value = self.sample(1.0);
            self.accessor.set(value);
            Step::Completed
        } else {
            let value = self.sample(t);
            self.accessor.set(value);
            Step::Running
        }
    }
}

impl<V: fmt::Debug, A> fmt::Debug for InterpolationTask<V, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterpolationTask")
            .field("id", &self.id)
            .field("start", &self.start)
            .field("goal", &self.goal)
            .field("duration", &self.duration)
            .field("elapsed", &self.elapsed)
            .finish_non_exhaustive()
    }
}
