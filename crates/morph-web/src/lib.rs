//! `wasm_bindgen` exports for driving the morph from the browser.
//!
//! The JS host decodes images, pushes them with `morph_push_frame` (pass an
//! empty point list and a center offset for the default layout), calls
//! `morph_start` once and `morph_tick(dt)` every animation frame, then reads
//! vertex/index data straight out of wasm memory through the pointer getters.

pub mod runner;

use std::cell::RefCell;

use morph_engine::glam::Vec2;
use wasm_bindgen::prelude::*;

pub use runner::MorphRunner;
use runner::slot_from_id;

thread_local! {
    static RUNNER: RefCell<MorphRunner> = RefCell::new(MorphRunner::new());
}

fn with_runner<R>(f: impl FnOnce(&mut MorphRunner) -> R) -> R {
    RUNNER.with(|cell| f(&mut cell.borrow_mut()))
}

fn to_js(err: morph_engine::MorphError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

#[wasm_bindgen]
pub fn morph_init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    with_runner(|r| r.clear_frames());
    log::info!("morph-web: initialized");
}

#[wasm_bindgen]
pub fn morph_push_frame(
    name: &str,
    width: u32,
    height: u32,
    pixels: &[u8],
    points: &[f32],
    offset_x: f32,
    offset_y: f32,
) -> Result<(), JsValue> {
    let offset = Vec2::new(offset_x, offset_y);
    with_runner(|r| r.push_frame(name, width, height, pixels, points, offset)).map_err(to_js)
}

#[wasm_bindgen]
pub fn morph_start(config_json: &str) -> Result<(), JsValue> {
    with_runner(|r| r.start(config_json)).map_err(to_js)
}

#[wasm_bindgen]
pub fn morph_stop() {
    with_runner(|r| r.stop());
}

#[wasm_bindgen]
pub fn morph_resume() {
    with_runner(|r| r.resume());
}

/// Returns true when a slot texture changed this frame.
#[wasm_bindgen]
pub fn morph_tick(dt: f32) -> bool {
    with_runner(|r| r.tick(dt).slot_replaced.is_some())
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_vertices_ptr() -> *const f32 {
    with_runner(|r| r.vertices_ptr())
}

#[wasm_bindgen]
pub fn get_vertex_count() -> u32 {
    with_runner(|r| r.vertex_count())
}

#[wasm_bindgen]
pub fn get_indices_ptr() -> *const u32 {
    with_runner(|r| r.indices_ptr())
}

#[wasm_bindgen]
pub fn get_index_count() -> u32 {
    with_runner(|r| r.index_count())
}

#[wasm_bindgen]
pub fn get_blend_factor() -> f32 {
    with_runner(|r| r.blend_factor())
}

#[wasm_bindgen]
pub fn get_texture_generation() -> u32 {
    with_runner(|r| r.texture_generation())
}

// ---- Slot texture accessors (0 = A, 1 = B) ----

#[wasm_bindgen]
pub fn get_slot_pixels_ptr(slot: u32) -> *const u8 {
    with_runner(|r| r.slot_pixels_ptr(slot_from_id(slot)))
}

#[wasm_bindgen]
pub fn get_slot_width(slot: u32) -> u32 {
    with_runner(|r| r.slot_width(slot_from_id(slot)))
}

#[wasm_bindgen]
pub fn get_slot_height(slot: u32) -> u32 {
    with_runner(|r| r.slot_height(slot_from_id(slot)))
}
