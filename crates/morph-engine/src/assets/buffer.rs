//! RGBA8 image buffers and the loader seam that produces them.

use std::sync::Arc;

use crate::api::error::MorphError;

/// Immutable RGBA8 pixel buffer.
///
/// Pixels sit behind an `Arc` so handing a sequence frame to a morph slot is a
/// pointer copy. A slot's buffer is only ever replaced wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
}

impl ImageBuffer {
    pub const BYTES_PER_PIXEL: usize = 4;

    /// Wrap raw RGBA8 data. Dimensions must be non-zero and match the data.
    pub fn new(width: u32, height: u32, pixels: impl Into<Arc<[u8]>>) -> Result<Self, MorphError> {
        let pixels = pixels.into();
        match Self::byte_len(width, height) {
            Some(expected) if width != 0 && height != 0 && pixels.len() == expected => {
                Ok(Self { width, height, pixels })
            }
            _ => Err(MorphError::InvalidImage {
                width,
                height,
                len: pixels.len(),
            }),
        }
    }

    /// A single-color image.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, MorphError> {
        let len = Self::byte_len(width, height).ok_or(MorphError::InvalidImage {
            width,
            height,
            len: 0,
        })?;
        let pixels: Vec<u8> = rgba.iter().copied().cycle().take(len).collect();
        Self::new(width, height, pixels)
    }

    /// RGBA8 byte count for the given size, `None` if it overflows `usize`.
    fn byte_len(width: u32, height: u32) -> Option<usize> {
        (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(Self::BYTES_PER_PIXEL)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width and height as floats, for UV normalization.
    pub fn extent(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width as f32, self.height as f32)
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Whether two buffers share the same pixel allocation.
    pub fn shares_pixels(&self, other: &ImageBuffer) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

/// External asset loader: turns a path from a manifest into pixels.
pub trait ImageSource {
    fn load(&mut self, path: &str) -> Result<ImageBuffer, MorphError>;
}

impl<F> ImageSource for F
where
    F: FnMut(&str) -> Result<ImageBuffer, MorphError>,
{
    fn load(&mut self, path: &str) -> Result<ImageBuffer, MorphError> {
        self(path)
    }
}

#[cfg(feature = "decode")]
impl TryFrom<image::RgbaImage> for ImageBuffer {
    type Error = MorphError;

    fn try_from(img: image::RgbaImage) -> Result<Self, Self::Error> {
        let (width, height) = img.dimensions();
        ImageBuffer::new(width, height, img.into_raw())
    }
}

/// Decodes image files from disk, resolving paths against a root directory.
#[cfg(feature = "decode")]
#[derive(Debug, Clone, Default)]
pub struct FileImageSource {
    root: std::path::PathBuf,
}

#[cfg(feature = "decode")]
impl FileImageSource {
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[cfg(feature = "decode")]
impl ImageSource for FileImageSource {
    fn load(&mut self, path: &str) -> Result<ImageBuffer, MorphError> {
        let full = self.root.join(path);
        let decoded = image::open(&full).map_err(|e| MorphError::ImageLoad {
            path: full.display().to_string(),
            reason: e.to_string(),
        })?;
        log::debug!("decoded {} ({}x{})", full.display(), decoded.width(), decoded.height());
        ImageBuffer::try_from(decoded.into_rgba8())
    }
}
