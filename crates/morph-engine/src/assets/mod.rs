pub mod buffer;
pub mod manifest;
pub mod points;
pub mod sequence;
