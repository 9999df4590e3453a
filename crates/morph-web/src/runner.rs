use morph_engine::{
    ControlPointSet, ImageBuffer, ImageSequence, MorphConfig, MorphError, SequenceFrame,
    Sequencer, Slot, TickOutcome,
};
use morph_engine::glam::Vec2;

/// Host-facing wrapper around the sequencer.
///
/// The browser pushes decoded frames, starts the loop with a JSON config, then
/// calls `tick` once per animation frame and reads the geometry back through
/// raw pointers (wasm-bindgen cannot hand out borrowed slices).
#[derive(Default)]
pub struct MorphRunner {
    /// Frames pushed since the last `clear_frames`.
    frames: Vec<SequenceFrame>,
    sequencer: Option<Sequencer>,
}

impl MorphRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one RGBA8 frame. `points` is a flat `[x0, y0, x1, y1, ...]`
    /// list; an empty list selects the corners + center layout, with the
    /// center moved by `feature_offset`.
    pub fn push_frame(
        &mut self,
        name: &str,
        width: u32,
        height: u32,
        pixels: &[u8],
        points: &[f32],
        feature_offset: Vec2,
    ) -> Result<(), MorphError> {
        if points.len() % 2 != 0 {
            return Err(MorphError::OddCoordinateCount { len: points.len() });
        }
        let image = ImageBuffer::new(width, height, pixels.to_vec())?;
        let frame = if points.is_empty() {
            SequenceFrame::framed(name, image, feature_offset)
        } else {
            let set = ControlPointSet::new(
                points.chunks_exact(2).map(|xy| Vec2::new(xy[0], xy[1])).collect(),
            )?;
            SequenceFrame::new(name, image, set)
        };
        self.frames.push(frame);
        Ok(())
    }

    /// Number of frames queued.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Drop queued frames and any running sequencer.
    pub fn clear_frames(&mut self) {
        self.frames.clear();
        self.sequencer = None;
    }

    /// Build the sequencer from the queued frames and start it.
    /// An empty `config_json` uses the default config.
    pub fn start(&mut self, config_json: &str) -> Result<(), MorphError> {
        let config = if config_json.trim().is_empty() {
            MorphConfig::default()
        } else {
            MorphConfig::from_json(config_json)?
        };
        let sequence = ImageSequence::new(self.frames.clone())?;
        let mut sequencer = Sequencer::new(config, sequence)?;
        sequencer.start();
        self.sequencer = Some(sequencer);
        Ok(())
    }

    /// Pause the loop, keeping the current geometry.
    pub fn stop(&mut self) {
        if let Some(seq) = self.sequencer.as_mut() {
            seq.stop();
        }
    }

    /// Resume a stopped loop.
    pub fn resume(&mut self) {
        if let Some(seq) = self.sequencer.as_mut() {
            seq.start();
        }
    }

    /// Run one frame.
    pub fn tick(&mut self, dt: f32) -> TickOutcome {
        match self.sequencer.as_mut() {
            Some(seq) => seq.tick(dt),
            None => TickOutcome::default(),
        }
    }

    pub fn sequencer(&self) -> Option<&Sequencer> {
        self.sequencer.as_ref()
    }

    // ---- Pointer accessors for shared-memory reads ----

    pub fn vertices_ptr(&self) -> *const f32 {
        self.sequencer
            .as_ref()
            .map_or(std::ptr::null(), |s| s.engine().mesh().vertices_ptr())
    }

    pub fn vertex_count(&self) -> u32 {
        self.sequencer
            .as_ref()
            .map_or(0, |s| s.engine().mesh().vertex_count() as u32)
    }

    pub fn indices_ptr(&self) -> *const u32 {
        self.sequencer
            .as_ref()
            .map_or(std::ptr::null(), |s| s.engine().mesh().indices().as_ptr())
    }

    pub fn index_count(&self) -> u32 {
        self.sequencer
            .as_ref()
            .map_or(0, |s| s.engine().mesh().indices().len() as u32)
    }

    pub fn blend_factor(&self) -> f32 {
        self.sequencer.as_ref().map_or(0.0, |s| s.engine().blend_factor())
    }

    pub fn texture_generation(&self) -> u32 {
        self.sequencer
            .as_ref()
            .map_or(0, |s| s.engine().texture_generation())
    }

    pub fn slot_pixels_ptr(&self, slot: Slot) -> *const u8 {
        self.sequencer
            .as_ref()
            .map_or(std::ptr::null(), |s| s.engine().image(slot).pixels().as_ptr())
    }

    pub fn slot_width(&self, slot: Slot) -> u32 {
        self.sequencer.as_ref().map_or(0, |s| s.engine().image(slot).width())
    }

    pub fn slot_height(&self, slot: Slot) -> u32 {
        self.sequencer.as_ref().map_or(0, |s| s.engine().image(slot).height())
    }
}

/// Map the host's numeric slot id (0 = A, anything else = B).
pub fn slot_from_id(id: u32) -> Slot {
    if id == 0 {
        Slot::A
    } else {
        Slot::B
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_solid(runner: &mut MorphRunner, name: &str, size: u32) {
        let pixels = vec![200u8; (size * size * 4) as usize];
        runner.push_frame(name, size, size, &pixels, &[], Vec2::ZERO).unwrap();
    }

    #[test]
    fn tick_before_start_is_inert() {
        let mut runner = MorphRunner::new();
        assert_eq!(runner.tick(0.016), TickOutcome::default());
        assert!(runner.vertices_ptr().is_null());
        assert_eq!(runner.vertex_count(), 0);
        assert_eq!(runner.blend_factor(), 0.0);
    }

    #[test]
    fn start_needs_two_frames() {
        let mut runner = MorphRunner::new();
        push_solid(&mut runner, "a", 4);
        let err = runner.start("").unwrap_err();
        assert!(matches!(err, MorphError::SequenceTooShort { len: 1 }));
        assert_eq!(runner.frame_count(), 1);
    }

    #[test]
    fn rejects_bad_pixels() {
        let mut runner = MorphRunner::new();
        let err = runner.push_frame("bad", 4, 4, &[0u8; 10], &[], Vec2::ZERO).unwrap_err();
        assert!(matches!(err, MorphError::InvalidImage { .. }));
        assert_eq!(runner.frame_count(), 0);
    }

    #[test]
    fn runs_with_explicit_points() {
        let mut runner = MorphRunner::new();
        let pixels = vec![0u8; 8 * 8 * 4];
        let a: [f32; 8] = [0.0, 0.0, 8.0, 0.0, 0.0, 8.0, 8.0, 8.0];
        let b: [f32; 8] = [1.0, 1.0, 7.0, 1.0, 1.0, 7.0, 7.0, 7.0];
        runner.push_frame("a", 8, 8, &pixels, &a, Vec2::ZERO).unwrap();
        runner.push_frame("b", 8, 8, &pixels, &b, Vec2::ZERO).unwrap();
        runner
            .start(r#"{ "animationDuration": 2.0, "delayBetweenAnimations": 0.5 }"#)
            .unwrap();

        assert_eq!(runner.vertex_count(), 4);
        assert_eq!(runner.index_count(), 6);
        assert!(!runner.vertices_ptr().is_null());

        runner.tick(0.5);
        runner.tick(1.0);
        assert_eq!(runner.blend_factor(), 0.5);
        let seq = runner.sequencer().unwrap();
        assert_eq!(seq.engine().interpolated()[0], Vec2::new(0.5, 0.5));
    }

    #[test]
    fn rejects_odd_coordinate_lists() {
        let mut runner = MorphRunner::new();
        let pixels = vec![0u8; 8 * 8 * 4];
        let points: [f32; 9] = [0.0, 0.0, 8.0, 0.0, 0.0, 8.0, 8.0, 8.0, 4.0];
        let err = runner
            .push_frame("a", 8, 8, &pixels, &points, Vec2::ZERO)
            .unwrap_err();
        assert!(matches!(err, MorphError::OddCoordinateCount { len: 9 }));
        assert!(err.is_configuration());
        assert_eq!(runner.frame_count(), 0);
    }

    #[test]
    fn offset_frames_move_the_center() {
        let mut runner = MorphRunner::new();
        let pixels = vec![0u8; 64 * 64 * 4];
        runner.push_frame("a", 64, 64, &pixels, &[], Vec2::ZERO).unwrap();
        runner
            .push_frame("b", 64, 64, &pixels, &[], Vec2::new(10.0, 10.0))
            .unwrap();
        runner.start(r#"{ "delayBetweenAnimations": 0.0 }"#).unwrap();
        runner.tick(0.5);
        let seq = runner.sequencer().unwrap();
        assert_eq!(seq.engine().interpolated()[4], Vec2::new(37.0, 37.0));
    }

    #[test]
    fn exposes_slot_textures() {
        let mut runner = MorphRunner::new();
        push_solid(&mut runner, "small", 4);
        push_solid(&mut runner, "large", 16);
        runner.start("").unwrap();
        assert_eq!(runner.slot_width(slot_from_id(0)), 4);
        assert_eq!(runner.slot_height(slot_from_id(1)), 16);
        assert!(!runner.slot_pixels_ptr(Slot::B).is_null());
        assert_eq!(runner.texture_generation(), 0);
    }

    #[test]
    fn stop_and_resume() {
        let mut runner = MorphRunner::new();
        push_solid(&mut runner, "a", 4);
        push_solid(&mut runner, "b", 4);
        runner.start("").unwrap();
        runner.tick(0.2);
        runner.tick(0.5);
        runner.stop();
        let frozen = runner.blend_factor();
        runner.tick(10.0);
        assert_eq!(runner.blend_factor(), frozen);
        runner.resume();
        assert!(runner.sequencer().unwrap().is_running());
    }
}
