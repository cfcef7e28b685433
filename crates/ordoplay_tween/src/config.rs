// SPDX-License-Identifier: MIT OR Apache-2.0
//! Engine configuration.
//!
//! Stored as RON, for example:
//!
//! ```ron
//! (
//!     first_id: 100,
//!     snap_on_create: true,
//!     curves: {
//!         "fade": [
//!             (time: 0.0, value: 0.0, in_tangent: 0.0, out_tangent: 0.0),
//!             (time: 1.0, value: 1.0, in_tangent: 2.0, out_tangent: 0.0),
//!         ],
//!     },
//! )
//! ```

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::curve::Curve;
use crate::error::Result;

/// Settings applied when a [`Tweener`](crate::Tweener) is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TweenerConfig {
    /// Raw value of the first task ID handed out
    pub first_id: u64,
    /// Write the start sample to the property as soon as a task is created
    pub snap_on_create: bool,
    /// User curves registered under their names
    pub curves: IndexMap<String, Curve>,
}

impl Default for TweenerConfig {
    fn default() -> Self {
        Self {
            first_id: 0,
            snap_on_create: true,
            curves: IndexMap::new(),
        }
    }
}

impl TweenerConfig {
    /// Parse a config from RON text
    pub fn from_ron(source: &str) -> Result<Self> {
        Ok(ron::from_str(source)?)
    }

    /// Serialize to pretty RON
    pub fn to_ron(&self) -> std::result::Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_ron(&content)?;
        tracing::debug!(
            "Loaded tween config from {:?} ({} curves)",
            path,
            config.curves.len()
        );
        Ok(config)
    }

    /// Add a named curve
    #[must_use]
    pub fn with_curve(mut self, name: impl Into<String>, curve: Curve) -> Self {
        self.curves.insert(name.into(), curve);
        self
    }
}
