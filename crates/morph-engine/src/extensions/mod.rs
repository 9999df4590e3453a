// extensions/mod.rs
//
// Math helpers with no dependency on engine state.
// The morph engine and sequencer build on these; hosts may use them directly.

pub mod easing;

pub use easing::{Easing, lerp, lerp_vec2, ease, ease_vec2};
