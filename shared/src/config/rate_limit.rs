//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

/// A fixed-window limit: `max_requests` per `window_seconds`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct WindowLimit {
    /// Requests allowed inside one window
    pub max_requests: u32,

    /// Window length in seconds
    pub window_seconds: u64,
}

impl WindowLimit {
    pub const fn new(max_requests: u32, window_seconds: u64) -> Self {
        Self {
            max_requests,
            window_seconds,
        }
    }

    /// Window length as a duration
    pub fn window(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.window_seconds)
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Contact form submissions per IP
    #[serde(default = "default_contact")]
    pub contact: WindowLimit,

    /// Audit generations per IP
    #[serde(default = "default_audit")]
    pub audit: WindowLimit,

    /// Places lookups per IP
    #[serde(default = "default_places")]
    pub places: WindowLimit,

    /// Everything else per IP
    #[serde(default = "default_api")]
    pub api: WindowLimit,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            contact: default_contact(),
            audit: default_audit(),
            places: default_places(),
            api: default_api(),
        }
    }
}

impl RateLimitConfig {
    /// Create a development configuration (more lenient limits)
    pub fn development() -> Self {
        Self {
            enabled: true,
            contact: WindowLimit::new(50, 3600),
            audit: WindowLimit::new(30, 3600),
            places: WindowLimit::new(600, 60),
            api: WindowLimit::new(1200, 60),
        }
    }

    /// Create a production configuration (stricter limits)
    pub fn production() -> Self {
        Self::default()
    }

    /// Configuration that never limits
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_contact() -> WindowLimit {
    WindowLimit::new(5, 3600)
}

fn default_audit() -> WindowLimit {
    WindowLimit::new(3, 3600)
}

fn default_places() -> WindowLimit {
    WindowLimit::new(60, 60)
}

fn default_api() -> WindowLimit {
    WindowLimit::new(120, 60)
}
