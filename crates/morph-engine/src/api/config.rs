use serde::{Deserialize, Serialize};

use crate::api::error::MorphError;
use crate::api::types::AdvanceMode;
use crate::extensions::easing::Easing;

/// Timing and curve settings for the sequencer, validated once at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MorphConfig {
    /// Seconds per animation pass (default: 1.0). Must be > 0.
    pub animation_duration: f32,
    /// Seconds to hold before and after each pass (default: 0.2). Must be >= 0.
    pub delay_between_animations: f32,
    /// Curve applied to linear pass progress (default: Linear).
    #[serde(rename = "easingFunction")]
    pub easing: Easing,
    /// When the next image is swapped in (default: PerCycle).
    pub advance: AdvanceMode,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            animation_duration: 1.0,
            delay_between_animations: 0.2,
            easing: Easing::Linear,
            advance: AdvanceMode::PerCycle,
        }
    }
}

impl MorphConfig {
    /// Parse a config from a JSON string. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, MorphError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_duration(mut self, seconds: f32) -> Self {
        self.animation_duration = seconds;
        self
    }

    pub fn with_delay(mut self, seconds: f32) -> Self {
        self.delay_between_animations = seconds;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_advance(mut self, advance: AdvanceMode) -> Self {
        self.advance = advance;
        self
    }

    /// Reject durations that would divide by zero and negative delays.
    pub fn validate(&self) -> Result<(), MorphError> {
        let d = self.animation_duration;
        if !d.is_finite() || d <= 0.0 {
            return Err(MorphError::InvalidDuration(d));
        }
        let delay = self.delay_between_animations;
        if !delay.is_finite() || delay < 0.0 {
            return Err(MorphError::InvalidDelay(delay));
        }
        Ok(())
    }
}
