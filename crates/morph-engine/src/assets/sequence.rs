use glam::Vec2;

use crate::api::error::MorphError;
use crate::assets::buffer::{ImageBuffer, ImageSource};
use crate::assets::manifest::SequenceManifest;
use crate::assets::points::ControlPointSet;

/// One image of the sequence together with its control points.
#[derive(Debug, Clone)]
pub struct SequenceFrame {
    pub name: String,
    pub image: ImageBuffer,
    pub points: ControlPointSet,
}

impl SequenceFrame {
    pub fn new(name: impl Into<String>, image: ImageBuffer, points: ControlPointSet) -> Self {
        Self {
            name: name.into(),
            image,
            points,
        }
    }

    /// Frame with the default corners + center layout.
    pub fn framed(name: impl Into<String>, image: ImageBuffer, feature_offset: Vec2) -> Self {
        let points = ControlPointSet::framed(image.width(), image.height(), feature_offset);
        Self::new(name, image, points)
    }
}

/// Ordered, wrap-around list of images the sequencer morphs through.
#[derive(Debug, Clone)]
pub struct ImageSequence {
    frames: Vec<SequenceFrame>,
}

impl ImageSequence {
    /// Requires at least two frames, all with the same point count.
    pub fn new(frames: Vec<SequenceFrame>) -> Result<Self, MorphError> {
        if frames.len() < 2 {
            return Err(MorphError::SequenceTooShort { len: frames.len() });
        }
        let expected = frames[0].points.len();
        if let Some(bad) = frames.iter().find(|f| f.points.len() != expected) {
            return Err(MorphError::PointCountMismatch {
                a: expected,
                b: bad.points.len(),
            });
        }
        Ok(Self { frames })
    }

    /// Build a sequence from a parsed manifest, loading pixels through `source`.
    pub fn from_manifest(
        manifest: &SequenceManifest,
        source: &mut impl ImageSource,
    ) -> Result<Self, MorphError> {
        let offset = Vec2::from(manifest.feature_offset);
        let mut frames = Vec::with_capacity(manifest.frames.len());
        for desc in &manifest.frames {
            let image = source.load(&desc.path)?;
            let frame = match &desc.points {
                Some(pairs) => {
                    SequenceFrame::new(desc.name.clone(), image, ControlPointSet::from_pairs(pairs)?)
                }
                None => {
                    let center = desc.offset.map_or(offset, Vec2::from);
                    SequenceFrame::framed(desc.name.clone(), image, center)
                }
            };
            frames.push(frame);
        }
        log::info!("loaded image sequence with {} frames", frames.len());
        Self::new(frames)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame at `index`, wrapping around the end of the sequence.
    pub fn frame(&self, index: usize) -> &SequenceFrame {
        &self.frames[index % self.frames.len()]
    }

    /// Frame at `index` without wrapping.
    pub fn get(&self, index: usize) -> Option<&SequenceFrame> {
        self.frames.get(index)
    }

    /// Look up a frame by name.
    pub fn find(&self, name: &str) -> Option<&SequenceFrame> {
        self.frames.iter().find(|f| f.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SequenceFrame> {
        self.frames.iter()
    }
}
