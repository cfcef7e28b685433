// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-thread installed engine.
//!
//! Hosts that prefer one ambient engine over passing a [`Tweener`] around
//! install it here once and reach it from anywhere on the same thread.
//! Requests made before [`init`] fail with [`TweenError::Uninitialized`].

use std::cell::RefCell;

use crate::config::TweenerConfig;
use crate::error::{Result, TweenError};
use crate::tweener::Tweener;

thread_local! {
    static ENGINE: RefCell<Option<Tweener>> = const { RefCell::new(None) };
}

/// Install a fresh engine, replacing (and cancelling every task of) any
/// previous one. Returns a handle to the new engine.
pub fn init(config: TweenerConfig) -> Tweener {
    let engine = Tweener::with_config(config);
    let previous = ENGINE.with(|slot| slot.borrow_mut().replace(engine.clone()));
    if let Some(previous) = previous {
        let cancelled = previous.cancel_all();
        tracing::warn!(
            "Tween engine re-initialized; {} running tweens cancelled",
            cancelled
        );
    } else {
        tracing::debug!("Tween engine initialized");
    }
    engine
}

/// Remove the installed engine, cancelling its tasks. Returns how many
/// tasks were cancelled.
pub fn shutdown() -> usize {
    let previous = ENGINE.with(|slot| slot.borrow_mut().take());
    match previous {
        Some(engine) => {
            let cancelled = engine.cancel_all();
            tracing::debug!("Tween engine shut down ({} tweens cancelled)", cancelled);
            cancelled
        }
        None => 0,
    }
}

/// Whether an engine is installed on this thread
pub fn is_initialized() -> bool {
    ENGINE.with(|slot| slot.borrow().is_some())
}

/// Handle to the installed engine
pub fn engine() -> Result<Tweener> {
    try_engine().ok_or(TweenError::Uninitialized)
}

/// Handle to the installed engine, if any
pub fn try_engine() -> Option<Tweener> {
    ENGINE.with(|slot| slot.borrow().clone())
}

/// Tick the installed engine
pub fn tick(dt: f32) -> Result<()> {
    engine()?.tick(dt);
    Ok(())
}
