//! Editor configuration.

use serde::{Deserialize, Serialize};

use crate::{PageResult, Placement};

/// Tunables for one editing session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Where new elements are placed.
    pub placement: Placement,
    /// Record a history step for a drag that ends where it started.
    ///
    /// When `false` a plain click on an element only changes selection.
    pub commit_zero_delta_drags: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            placement: Placement::default(),
            commit_zero_delta_drags: false,
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PageError::Serialization`] if the JSON is malformed.
    pub fn from_json(json: &str) -> PageResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the placement.
    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Set whether zero-movement drags are committed.
    #[must_use]
    pub fn with_zero_delta_commits(mut self, enabled: bool) -> Self {
        self.commit_zero_delta_drags = enabled;
        self
    }
}
