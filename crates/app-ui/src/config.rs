//! Swipe configuration
//!
//! Hosts ship swipe tuning as JSON next to their other UI settings. Every
//! field has a default, so an empty object is a valid configuration.

use crate::animation::{AnimationError, SpringConfig};
use crate::tokens::frame;
use app_platform::{GesturePolicy, Platform};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors loading a swipe configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Spring parameters are invalid
    #[error(transparent)]
    Spring(#[from] AnimationError),

    /// A field has an out-of-range value
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Tuning for a swipe-to-reveal container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SwipeConfig {
    /// Spring used to settle into the shown or hidden state
    pub spring: SpringConfig,
    /// Override the platform's touch slop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub touch_slop: Option<f64>,
    /// Override the detected platform
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    /// Frame interval for the animation loop, in milliseconds
    pub frame_interval_ms: u64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            spring: SpringConfig::default(),
            touch_slop: None,
            platform: None,
            frame_interval_ms: frame::INTERVAL_MS,
        }
    }
}

impl SwipeConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SwipeConfig = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            tracing::warn!("Rejected swipe configuration: {}", e);
            return Err(e);
        }
        Ok(config)
    }

    /// Check every field is usable
    pub fn validate(&self) -> Result<()> {
        self.spring.validate()?;

        if let Some(slop) = self.touch_slop {
            if !slop.is_finite() || slop < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: "touchSlop",
                    reason: format!("must be a non-negative number, got {}", slop),
                });
            }
        }
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "frameIntervalMs",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Platform in effect
    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or_else(Platform::current)
    }

    /// Gesture policy in effect, with the slop override applied
    pub fn gesture_policy(&self) -> GesturePolicy {
        let policy = self.platform().gesture_policy();
        match self.touch_slop {
            Some(slop) => policy.with_touch_slop(slop),
            None => policy,
        }
    }

    /// Frame interval as a duration
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}
