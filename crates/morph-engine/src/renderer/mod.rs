pub mod mesh;
pub mod traits;

pub use mesh::{MorphMesh, MorphVertex, QUAD_INDICES};
pub use traits::{FrameData, Renderer};
