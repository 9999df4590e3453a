pub mod morph;
pub mod sequencer;
