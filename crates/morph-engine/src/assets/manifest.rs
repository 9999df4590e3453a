use serde::{Deserialize, Serialize};

use crate::api::error::MorphError;

/// Manifest describing the ordered image sequence to morph through.
/// Loaded from a JSON file at runtime; pixels are resolved by an `ImageSource`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceManifest {
    /// Frames in playback order.
    pub frames: Vec<FrameDescriptor>,
    /// Offset applied to the center point of frames without explicit points
    /// or their own `offset`.
    #[serde(default)]
    pub feature_offset: [f32; 2],
}

/// Describes a single image in the sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameDescriptor {
    /// Human-readable name (e.g., "portrait_a").
    pub name: String,
    /// Path handed to the image source (e.g., "portrait_a.png").
    pub path: String,
    /// Explicit control points in pixel space. When absent the frame uses
    /// the corners plus the offset center.
    #[serde(default)]
    pub points: Option<Vec<[f32; 2]>>,
    /// Center offset for this frame, overriding the manifest's `featureOffset`.
    #[serde(default)]
    pub offset: Option<[f32; 2]>,
}

impl SequenceManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, MorphError> {
        Ok(serde_json::from_str(json)?)
    }
}
