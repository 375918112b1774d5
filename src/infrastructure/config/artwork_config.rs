//! Artwork cache and pipeline configuration.

use serde::{Deserialize, Serialize};

use crate::domain::entities::TargetSize;
use crate::domain::errors::ArtworkError;
use crate::domain::services::capacity_bytes;

/// Default capacity ceiling (12 MiB).
pub const DEFAULT_CAPACITY_CEILING: u64 = 12 * 1024 * 1024;

/// Default rewind window for the bounds probe (1 MiB).
pub const DEFAULT_REWIND_WINDOW: usize = 1024 * 1024;

/// Tunables for the artwork cache and fetch pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkConfig {
    /// Upper bound on cache capacity regardless of host memory.
    #[serde(default = "default_capacity_ceiling")]
    pub capacity_ceiling_bytes: u64,

    /// Cache takes `1 / memory_budget_divisor` of the host memory hint.
    #[serde(default = "default_memory_budget_divisor")]
    pub memory_budget_divisor: u64,

    /// Host memory budget. When unset, capacity is the ceiling.
    #[serde(default)]
    pub host_memory_hint_bytes: Option<u64>,

    /// Full-size bounding box width.
    #[serde(default = "default_full_width")]
    pub full_max_width: u32,

    /// Full-size bounding box height.
    #[serde(default = "default_full_height")]
    pub full_max_height: u32,

    /// Icon bounding box width.
    #[serde(default = "default_icon_side")]
    pub icon_max_width: u32,

    /// Icon bounding box height.
    #[serde(default = "default_icon_side")]
    pub icon_max_height: u32,

    /// Bytes buffered ahead of the bounds probe and replayed for decode.
    #[serde(default = "default_rewind_window")]
    pub rewind_window_bytes: usize,

    /// Transport timeout for one artwork request.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl ArtworkConfig {
    /// Cache capacity derived from the ceiling and host memory hint.
    #[must_use]
    pub fn capacity_bytes(&self) -> usize {
        let hint = self.host_memory_hint_bytes.unwrap_or_else(|| {
            self.capacity_ceiling_bytes
                .saturating_mul(self.memory_budget_divisor.max(1))
        });
        capacity_bytes(self.capacity_ceiling_bytes, hint, self.memory_budget_divisor)
    }

    /// Full-size bounding box.
    ///
    /// # Errors
    /// Returns `ArtworkError::InvalidTarget` if a side is zero.
    pub fn full_target(&self) -> Result<TargetSize, ArtworkError> {
        TargetSize::new(self.full_max_width, self.full_max_height)
    }

    /// Icon bounding box.
    ///
    /// # Errors
    /// Returns `ArtworkError::InvalidTarget` if a side is zero.
    pub fn icon_target(&self) -> Result<TargetSize, ArtworkError> {
        TargetSize::new(self.icon_max_width, self.icon_max_height)
    }
}

impl Default for ArtworkConfig {
    fn default() -> Self {
        Self {
            capacity_ceiling_bytes: DEFAULT_CAPACITY_CEILING,
            memory_budget_divisor: default_memory_budget_divisor(),
            host_memory_hint_bytes: None,
            full_max_width: TargetSize::FULL.width(),
            full_max_height: TargetSize::FULL.height(),
            icon_max_width: TargetSize::ICON.width(),
            icon_max_height: TargetSize::ICON.height(),
            rewind_window_bytes: DEFAULT_REWIND_WINDOW,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_capacity_ceiling() -> u64 {
    DEFAULT_CAPACITY_CEILING
}

fn default_memory_budget_divisor() -> u64 {
    4
}

fn default_full_width() -> u32 {
    TargetSize::FULL.width()
}

fn default_full_height() -> u32 {
    TargetSize::FULL.height()
}

fn default_icon_side() -> u32 {
    TargetSize::ICON.width()
}

fn default_rewind_window() -> usize {
    DEFAULT_REWIND_WINDOW
}

fn default_request_timeout() -> u64 {
    30
}
