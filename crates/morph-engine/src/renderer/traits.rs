//! Renderer contract for hosts that draw the morph.
//!
//! The engine only produces geometry and a blend factor. Binding the two
//! textures and compositing them is the renderer's job, as is reporting its
//! own (transient) failures through `Renderer::Error`.

use super::mesh::MorphVertex;
use crate::assets::buffer::ImageBuffer;

/// Everything a renderer needs to draw one frame of the morph.
#[derive(Debug, Clone, Copy)]
pub struct FrameData<'a> {
    /// One vertex per control point.
    pub vertices: &'a [MorphVertex],
    /// Two triangles over the corner vertices.
    pub indices: &'a [u32; 6],
    /// Shader blend between texture A (0.0) and texture B (1.0).
    pub blend_factor: f32,
    /// Texture shown at blend 0.
    pub texture_a: &'a ImageBuffer,
    /// Texture shown at blend 1.
    pub texture_b: &'a ImageBuffer,
    /// Bumped whenever a slot image changes; rebind textures when it moves.
    pub texture_generation: u32,
}

/// Draws morph frames. Implementors own their GPU/canvas state.
///
/// # Example Implementation
///
/// ```ignore
/// struct CanvasRenderer { /* ... */ }
///
/// impl Renderer for CanvasRenderer {
///     type Error = JsValue;
///
///     fn draw(&mut self, frame: &FrameData<'_>) -> Result<(), JsValue> {
///         // Upload vertices, bind textures, set the blend uniform...
///         Ok(())
///     }
/// }
/// ```
pub trait Renderer {
    /// Backend failure (e.g. a lost texture binding).
    type Error;

    /// Draw one frame.
    fn draw(&mut self, frame: &FrameData<'_>) -> Result<(), Self::Error>;
}
