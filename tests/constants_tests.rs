// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core_constants {
    include!("../src/core/constants.rs");
}

use constants::*;
use core_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn smoothing_constants_are_proper_fractions() {
    for k in [FAST_SMOOTHING, MEDIUM_SMOOTHING] {
        assert!(k > 0.0 && k < 1.0);
    }
    // Scene motion trails the per-tile fades.
    assert!(FAST_SMOOTHING < MEDIUM_SMOOTHING);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn shell_geometry_is_sane() {
    assert!(POINT_COUNT > 0);
    assert!(SPHERE_RADIUS > 0.0);
    // Jitter never pushes a particle through the center.
    assert!(RADIUS_JITTER / 2.0 < SPHERE_RADIUS);
    assert!(HOVER_SCALE > 1.0);
    assert!(AUTO_ROTATION_STEP < 0.0);
    assert!((0.0..1.0).contains(&BASE_OPACITY_MIN));
    assert!((0.0..=1.0).contains(&CAPTION_OPACITY_SCALE));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn tile_layers_stack_toward_the_viewer() {
    assert!(IMAGE_LAYER_Z > 0.0);
    assert!(CAPTION_LAYER_Z > IMAGE_LAYER_Z);
    // Caption strip sits entirely below the image tile.
    assert!(CAPTION_OFFSET_Y + CAPTION_HEIGHT / 2.0 <= -TILE_SIZE / 2.0 + 1e-6);
    assert!(CAMERA_NEAR > 0.0 && CAMERA_FAR > CAMERA_NEAR);
    assert!(CAMERA_FOV_DEG > 0.0 && CAMERA_FOV_DEG < 180.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn atlas_tiles_fit_the_texture_limit() {
    assert!(IMAGE_TILE_PX <= ATLAS_MAX_DIM);
    assert!(CAPTION_TILE_W_PX <= ATLAS_MAX_DIM && CAPTION_TILE_H_PX <= ATLAS_MAX_DIM);
    // Caption raster keeps the 4:1 aspect of the caption quad.
    assert_eq!(CAPTION_TILE_W_PX / CAPTION_TILE_H_PX, 4);
    assert!((CAPTION_WIDTH / CAPTION_HEIGHT - 4.0).abs() < 1e-4);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn web_tuning_is_within_bounds() {
    assert!(UPLOADS_PER_FRAME > 0);
    assert!(FPS_LOG_INTERVAL > 0);
    assert!(MAX_DEVICE_PIXEL_RATIO >= 1.0);
    assert!(VIGNETTE_INNER < VIGNETTE_MID && VIGNETTE_MID < 1.0);
    assert!(VIGNETTE_MID_ALPHA < VIGNETTE_OUTER_ALPHA && VIGNETTE_OUTER_ALPHA <= 1.0);
    assert!(CAPTION_LINE_Y[0] < CAPTION_LINE_Y[1]);
    assert!(CAPTION_LINE_Y[1] < CAPTION_TILE_H_PX as f64);
    assert!(HEADLINE_WEIGHT_MIN < HEADLINE_WEIGHT_MAX);
    assert!(FALLBACK_GRAY.iter().all(|c| (0.0..=1.0).contains(c)));
    assert!(CLEAR_RGBA[3] == 1.0);
}
