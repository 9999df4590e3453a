pub mod api;
pub mod assets;
pub mod core;
pub mod extensions;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::config::MorphConfig;
pub use api::error::MorphError;
pub use api::types::{AdvanceMode, Direction, Slot};
pub use assets::buffer::{ImageBuffer, ImageSource};
#[cfg(feature = "decode")]
pub use assets::buffer::FileImageSource;
pub use assets::manifest::{FrameDescriptor, SequenceManifest};
pub use assets::points::{ControlPointSet, CORNER_COUNT};
pub use assets::sequence::{ImageSequence, SequenceFrame};
pub use core::morph::MorphEngine;
pub use core::sequencer::{DelayPhase, Sequencer, SequencerState, TickOutcome};
pub use renderer::mesh::{MorphMesh, MorphVertex, QUAD_INDICES};
pub use renderer::traits::{FrameData, Renderer};

pub use extensions::{Easing, lerp, lerp_vec2, ease, ease_vec2};

// glam types appear in the public API.
pub use glam;
