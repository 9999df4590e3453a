//! Error type shared by every fallible morph operation.

use thiserror::Error;

/// Everything that can go wrong while configuring or feeding the morph.
///
/// Variants up to `InvalidImage` form the configuration class: they are
/// raised before any state is touched and are never retried.
#[derive(Debug, Error)]
pub enum MorphError {
    #[error("control point count mismatch: slot A has {a}, slot B has {b}")]
    PointCountMismatch { a: usize, b: usize },

    #[error("a control point set needs at least 4 corner points, got {count}")]
    TooFewControlPoints { count: usize },

    #[error("control point {index} is not finite")]
    NonFinitePoint { index: usize },

    #[error("flat control point list needs x/y pairs, got {len} coordinates")]
    OddCoordinateCount { len: usize },

    #[error("animation duration must be finite and > 0, got {0}")]
    InvalidDuration(f32),

    #[error("delay between animations must be finite and >= 0, got {0}")]
    InvalidDelay(f32),

    #[error("image sequence needs at least 2 entries, got {len}")]
    SequenceTooShort { len: usize },

    #[error("invalid image buffer {width}x{height} with {len} bytes of RGBA8 data")]
    InvalidImage { width: u32, height: u32, len: usize },

    #[error("malformed manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("failed to load image '{path}': {reason}")]
    ImageLoad { path: String, reason: String },
}

impl MorphError {
    /// Whether this is a (fatal) configuration error.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, MorphError::Manifest(_) | MorphError::ImageLoad { .. })
    }
}
