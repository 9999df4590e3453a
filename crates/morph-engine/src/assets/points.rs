//! Control point sets: the interpolation anchors of a morph.

use glam::Vec2;

use crate::api::error::MorphError;

/// Number of leading points that are image corners (TL, TR, BL, BR).
pub const CORNER_COUNT: usize = 4;

/// Ordered control points for one image. Point `i` of one set corresponds to
/// point `i` of the other set by index, never by position.
///
/// The first four points are the corners top-left, top-right, bottom-left,
/// bottom-right. Any further points are interior features.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPointSet {
    points: Vec<Vec2>,
}

impl ControlPointSet {
    /// Build a set; requires at least the four corners, all finite.
    pub fn new(points: Vec<Vec2>) -> Result<Self, MorphError> {
        if points.len() < CORNER_COUNT {
            return Err(MorphError::TooFewControlPoints { count: points.len() });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(MorphError::NonFinitePoint { index });
        }
        Ok(Self { points })
    }

    /// Build a set from `[x, y]` pairs.
    pub fn from_pairs(pairs: &[[f32; 2]]) -> Result<Self, MorphError> {
        Self::new(pairs.iter().map(|&p| Vec2::from(p)).collect())
    }

    /// The four image corners plus the center, nudged by `feature_offset`.
    ///
    /// The center uses integer halving of the pixel dimensions.
    pub fn framed(width: u32, height: u32, feature_offset: Vec2) -> Self {
        let (w, h) = (width as f32, height as f32);
        let center = Vec2::new((width / 2) as f32, (height / 2) as f32);
        Self {
            points: vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(w, 0.0),
                Vec2::new(0.0, h),
                Vec2::new(w, h),
                center + feature_offset,
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn as_slice(&self) -> &[Vec2] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vec2> {
        self.points.iter()
    }
}
