//! Platform identity and per-platform gesture policy for Reveal Kit
//!
//! The two mobile targets disagree on how a native scroll view competes
//! with a nested horizontal pan. On iOS the scroll view steals horizontal
//! drags unless scrolling is disabled for the duration of the pan, on
//! Android it does not. Everything that depends on that asymmetry asks
//! [`GesturePolicy`] instead of checking the platform directly.

#![warn(missing_docs)]
#![warn(clippy::all)]

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Touch slop on iOS, in logical points
pub const IOS_TOUCH_SLOP: f64 = 10.0;

/// Touch slop on Android, in density-independent pixels
pub const ANDROID_TOUCH_SLOP: f64 = 8.0;

/// Platform errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlatformError {
    /// The platform name is not recognized
    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),
}

/// Target platform of the hosting view runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Apple iOS / iPadOS
    Ios,
    /// Android
    Android,
}

impl Platform {
    /// The platform this binary was compiled for
    ///
    /// Hosts that are neither iOS nor Android (desktop test runners) behave
    /// like Android.
    pub const fn current() -> Self {
        if cfg!(target_os = "ios") {
            Platform::Ios
        } else {
            Platform::Android
        }
    }

    /// Get the platform name as used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
        }
    }

    /// Gesture policy for this platform
    pub fn gesture_policy(&self) -> GesturePolicy {
        GesturePolicy::for_platform(*self)
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            other => Err(PlatformError::UnknownPlatform(other.to_string())),
        }
    }
}

/// How gestures interact with the native view hierarchy on a platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GesturePolicy {
    /// Platform this policy was derived from
    pub platform: Platform,
    /// Whether a horizontal pan must disable the ancestor scroll view
    /// while it is active
    pub locks_scroll_during_swipe: bool,
    /// Distance the pointer must travel before a pan is recognized
    pub touch_slop: f64,
}

impl GesturePolicy {
    /// Policy for the given platform
    pub const fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Ios => Self {
                platform,
                locks_scroll_during_swipe: true,
                touch_slop: IOS_TOUCH_SLOP,
            },
            Platform::Android => Self {
                platform,
                locks_scroll_during_swipe: false,
                touch_slop: ANDROID_TOUCH_SLOP,
            },
        }
    }

    /// Replace the touch slop, keeping the rest of the policy
    pub fn with_touch_slop(mut self, touch_slop: f64) -> Self {
        self.touch_slop = touch_slop.max(0.0);
        self
    }
}

impl Default for GesturePolicy {
    fn default() -> Self {
        Self::for_platform(Platform::current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_from_str() {
        assert_eq!("ios".parse::<Platform>().unwrap(), Platform::Ios);
        assert_eq!(" Android ".parse::<Platform>().unwrap(), Platform::Android);
        assert_eq!(
            "web".parse::<Platform>(),
            Err(PlatformError::UnknownPlatform("web".to_string()))
        );
    }

    #[test]
    fn test_platform_display_matches_serde() {
        for platform in [Platform::Ios, Platform::Android] {
            let json = serde_json::to_string(&platform).unwrap();
            assert_eq!(json, format!("\"{}\"", platform));
        }
    }

    #[test]
    fn test_only_ios_locks_scroll() {
        assert!(Platform::Ios.gesture_policy().locks_scroll_during_swipe);
        assert!(!Platform::Android.gesture_policy().locks_scroll_during_swipe);
    }

    #[test]
    fn test_touch_slop_override() {
        let policy = GesturePolicy::for_platform(Platform::Android).with_touch_slop(4.0);
        assert_eq!(policy.touch_slop, 4.0);
        assert!(!policy.locks_scroll_during_swipe);

        let negative = policy.with_touch_slop(-3.0);
        assert_eq!(negative.touch_slop, 0.0);
    }

    #[test]
    fn test_desktop_host_behaves_like_android() {
        if !cfg!(target_os = "ios") {
            assert_eq!(Platform::current(), Platform::Android);
        }
    }
}
