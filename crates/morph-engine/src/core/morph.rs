//! Morph engine: control-point interpolation and mesh reconstruction.
//!
//! Owns the two image slots and their point sets. `set_progress` is the hot
//! path: it lerps every control point and rewrites vertex positions in
//! buffers sized once at construction.

use glam::Vec2;

use crate::api::error::MorphError;
use crate::api::types::Slot;
use crate::assets::buffer::ImageBuffer;
use crate::assets::points::ControlPointSet;
use crate::extensions::easing::lerp_vec2;
use crate::renderer::mesh::MorphMesh;
use crate::renderer::traits::{FrameData, Renderer};

#[derive(Debug, Clone)]
struct SlotContent {
    image: ImageBuffer,
    points: ControlPointSet,
}

/// Two-slot image morph producing geometry and a blend factor.
#[derive(Debug, Clone)]
pub struct MorphEngine {
    a: SlotContent,
    b: SlotContent,
    interpolated: Vec<Vec2>,
    mesh: MorphMesh,
    progress: f32,
    texture_generation: u32,
}

impl MorphEngine {
    /// Set up a morph from slot A to slot B.
    ///
    /// Fails without side effects when the point sets differ in length. The
    /// initial geometry is slot A's points, unmodified.
    pub fn new(
        image_a: ImageBuffer,
        points_a: ControlPointSet,
        image_b: ImageBuffer,
        points_b: ControlPointSet,
    ) -> Result<Self, MorphError> {
        if points_a.len() != points_b.len() {
            return Err(MorphError::PointCountMismatch {
                a: points_a.len(),
                b: points_b.len(),
            });
        }
        let count = points_a.len();
        let mut engine = Self {
            interpolated: points_a.as_slice().to_vec(),
            mesh: MorphMesh::with_capacity(count),
            a: SlotContent { image: image_a, points: points_a },
            b: SlotContent { image: image_b, points: points_b },
            progress: 0.0,
            texture_generation: 0,
        };
        engine.reinitialize();
        Ok(engine)
    }

    /// Move the morph to `t` and rebuild the geometry.
    ///
    /// Callers pass `t` in [0, 1]. Anything else is clamped with a warning;
    /// NaN counts as 0.
    pub fn set_progress(&mut self, t: f32) {
        let clamped = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        if clamped != t {
            log::warn!("morph progress {} clamped to {}", t, clamped);
        }
        self.progress = clamped;

        let pairs = self.a.points.iter().zip(self.b.points.iter());
        for (dst, (a, b)) in self.interpolated.iter_mut().zip(pairs) {
            *dst = lerp_vec2(*a, *b, clamped);
        }
        self.mesh.write_positions(&self.interpolated);
    }

    /// Swap the image and points held by `slot`.
    ///
    /// The new point count must equal the other slot's; on mismatch nothing
    /// changes. Progress and geometry are left as they are until the next
    /// [`MorphEngine::reinitialize`] or [`MorphEngine::set_progress`].
    pub fn replace_slot(
        &mut self,
        slot: Slot,
        image: ImageBuffer,
        points: ControlPointSet,
    ) -> Result<(), MorphError> {
        let other = self.points(slot.other()).len();
        if points.len() != other {
            let (a, b) = match slot {
                Slot::A => (points.len(), other),
                Slot::B => (other, points.len()),
            };
            return Err(MorphError::PointCountMismatch { a, b });
        }
        log::info!(
            "slot {:?} replaced with {}x{} image",
            slot,
            image.width(),
            image.height()
        );
        *self.slot_mut(slot) = SlotContent { image, points };
        self.texture_generation = self.texture_generation.wrapping_add(1);
        Ok(())
    }

    /// Recompute derived state for the current pairing.
    ///
    /// UVs are always derived from slot A's points against slot A's image
    /// extent, even if slot B holds an image of a different size. Geometry is
    /// then rebuilt at the current progress.
    pub fn reinitialize(&mut self) {
        self.mesh.write_uvs(self.a.points.as_slice(), self.a.image.extent());
        self.set_progress(self.progress);
    }

    /// Current morph progress; also the shader blend factor.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Blend uniform for the compositing pass.
    pub fn blend_factor(&self) -> f32 {
        self.progress
    }

    /// Control points at the current progress.
    pub fn interpolated(&self) -> &[Vec2] {
        &self.interpolated
    }

    pub fn mesh(&self) -> &MorphMesh {
        &self.mesh
    }

    pub fn image(&self, slot: Slot) -> &ImageBuffer {
        &self.slot(slot).image
    }

    pub fn points(&self, slot: Slot) -> &ControlPointSet {
        &self.slot(slot).points
    }

    /// Number of control points per slot.
    pub fn point_count(&self) -> usize {
        self.interpolated.len()
    }

    /// Incremented on every successful `replace_slot`.
    pub fn texture_generation(&self) -> u32 {
        self.texture_generation
    }

    /// Snapshot of everything a renderer needs for this frame.
    pub fn frame(&self) -> FrameData<'_> {
        FrameData {
            vertices: self.mesh.vertices(),
            indices: self.mesh.indices(),
            blend_factor: self.progress,
            texture_a: &self.a.image,
            texture_b: &self.b.image,
            texture_generation: self.texture_generation,
        }
    }

    /// Hand the current frame to `renderer`.
    pub fn render<R: Renderer>(&self, renderer: &mut R) -> Result<(), R::Error> {
        renderer.draw(&self.frame())
    }

    fn slot(&self, slot: Slot) -> &SlotContent {
        match slot {
            Slot::A => &self.a,
            Slot::B => &self.b,
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut SlotContent {
        match slot {
            Slot::A => &mut self.a,
            Slot::B => &mut self.b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::points::CORNER_COUNT;

    fn image(w: u32, h: u32) -> ImageBuffer {
        ImageBuffer::solid(w, h, [128, 128, 128, 255]).unwrap()
    }

    fn engine() -> MorphEngine {
        MorphEngine::new(
            image(100, 80),
            ControlPointSet::framed(100, 80, Vec2::ZERO),
            image(100, 80),
            ControlPointSet::framed(100, 80, Vec2::new(10.0, 10.0)),
        )
        .unwrap()
    }

    fn positions(engine: &MorphEngine) -> Vec<Vec2> {
        engine
            .mesh()
            .vertices()
            .iter()
            .map(|v| {
                assert_eq!(v.position[2], 0.0);
                Vec2::new(v.position[0], v.position[1])
            })
            .collect()
    }

    #[test]
    fn initial_geometry_is_slot_a() {
        let e = engine();
        assert_eq!(e.progress(), 0.0);
        assert_eq!(positions(&e), e.points(Slot::A).as_slice());
        assert_eq!(e.mesh().vertices()[3].uv, [1.0, 1.0]);
        assert_eq!(e.mesh().vertices()[4].uv, [0.5, 0.5]);
    }

    #[test]
    fn endpoints_reproduce_point_sets_exactly() {
        let mut e = engine();
        e.set_progress(1.0);
        assert_eq!(positions(&e), e.points(Slot::B).as_slice());
        assert_eq!(e.blend_factor(), 1.0);
        e.set_progress(0.0);
        assert_eq!(positions(&e), e.points(Slot::A).as_slice());
        assert_eq!(e.blend_factor(), 0.0);
    }

    #[test]
    fn midpoint_lerps_feature_point() {
        let mut e = engine();
        e.set_progress(0.5);
        assert_eq!(e.interpolated()[4], Vec2::new(55.0, 45.0));
        // Corners coincide in both sets and stay put.
        assert_eq!(e.interpolated()[3], Vec2::new(100.0, 80.0));
    }

    #[test]
    fn set_progress_is_idempotent() {
        let mut e = engine();
        e.set_progress(0.37);
        let first = e.mesh().clone();
        e.set_progress(0.37);
        assert_eq!(e.mesh(), &first);
    }

    #[test]
    fn identical_sets_never_move() {
        let points = ControlPointSet::from_pairs(&[
            [0.1, 0.3],
            [9.7, 0.3],
            [0.1, 7.9],
            [9.7, 7.9],
            [3.3, 4.4],
        ])
        .unwrap();
        let mut e = MorphEngine::new(image(10, 8), points.clone(), image(10, 8), points.clone()).unwrap();
        for i in 0..=20 {
            e.set_progress(i as f32 / 20.0);
            assert_eq!(e.interpolated(), points.as_slice());
        }
    }

    #[test]
    fn mismatched_sets_fail() {
        let corners = ControlPointSet::from_pairs(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]).unwrap();
        let err = MorphEngine::new(
            image(4, 4),
            ControlPointSet::framed(4, 4, Vec2::ZERO),
            image(4, 4),
            corners,
        )
        .unwrap_err();
        assert!(matches!(err, MorphError::PointCountMismatch { a: 5, b: 4 }));
        assert!(err.is_configuration());
    }

    #[test]
    fn progress_is_clamped() {
        let mut e = engine();
        e.set_progress(1.5);
        assert_eq!(e.progress(), 1.0);
        e.set_progress(-2.0);
        assert_eq!(e.progress(), 0.0);
        e.set_progress(f32::NAN);
        assert_eq!(e.progress(), 0.0);
        assert!(e.mesh().as_floats().iter().all(|f| f.is_finite()));
    }

    #[test]
    fn hot_path_reuses_buffers() {
        let mut e = engine();
        let ptr = e.mesh().vertices_ptr();
        let cap = e.interpolated.capacity();
        for i in 0..100 {
            e.set_progress(i as f32 / 100.0);
        }
        assert_eq!(e.mesh().vertices_ptr(), ptr);
        assert_eq!(e.interpolated.capacity(), cap);
    }

    #[test]
    fn triangulation_is_fixed() {
        let mut e = engine();
        e.set_progress(0.8);
        let indices = e.mesh().indices();
        assert_eq!(indices.len(), 6);
        assert!(indices.iter().all(|&i| (i as usize) < CORNER_COUNT));
        assert_eq!(e.mesh().vertex_count(), 5);
    }

    #[test]
    fn replace_slot_checks_counts_without_mutating() {
        let mut e = engine();
        let corners = ControlPointSet::from_pairs(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]).unwrap();
        let err = e.replace_slot(Slot::B, image(2, 2), corners).unwrap_err();
        assert!(matches!(err, MorphError::PointCountMismatch { a: 5, b: 4 }));
        assert_eq!(e.image(Slot::B).width(), 100);
        assert_eq!(e.texture_generation(), 0);
    }

    #[test]
    fn replace_slot_keeps_progress() {
        let mut e = engine();
        e.set_progress(1.0);
        let before = e.mesh().clone();
        e.replace_slot(Slot::A, image(50, 40), ControlPointSet::framed(50, 40, Vec2::ZERO))
            .unwrap();
        assert_eq!(e.progress(), 1.0);
        assert_eq!(e.mesh(), &before);
        assert_eq!(e.texture_generation(), 1);

        e.reinitialize();
        assert_eq!(positions(&e), e.points(Slot::B).as_slice());
    }

    #[test]
    fn uvs_follow_slot_a_extent() {
        let mut e = engine();
        // A bigger image in slot B does not change the UV reference.
        e.replace_slot(Slot::B, image(200, 160), ControlPointSet::framed(200, 160, Vec2::ZERO))
            .unwrap();
        e.reinitialize();
        assert_eq!(e.mesh().vertices()[3].uv, [1.0, 1.0]);

        // A new slot A image with a different extent does.
        e.replace_slot(Slot::A, image(50, 40), ControlPointSet::framed(100, 80, Vec2::ZERO))
            .unwrap();
        e.reinitialize();
        assert_eq!(e.mesh().vertices()[3].uv, [2.0, 2.0]);
    }

    #[test]
    fn renders_current_frame() {
        struct Recorder {
            blends: Vec<f32>,
            vertex_counts: Vec<usize>,
        }

        impl Renderer for Recorder {
            type Error = String;

            fn draw(&mut self, frame: &FrameData<'_>) -> Result<(), String> {
                if frame.texture_a.width() == 0 {
                    return Err("unbound texture".into());
                }
                self.blends.push(frame.blend_factor);
                self.vertex_counts.push(frame.vertices.len());
                Ok(())
            }
        }

        let mut e = engine();
        let mut recorder = Recorder { blends: Vec::new(), vertex_counts: Vec::new() };
        e.render(&mut recorder).unwrap();
        e.set_progress(0.25);
        e.render(&mut recorder).unwrap();
        assert_eq!(recorder.blends, vec![0.0, 0.25]);
        assert_eq!(recorder.vertex_counts, vec![5, 5]);
    }
}
