// Host-side tests for centered square crops.

#![allow(dead_code)]
mod common;

use common::scene_core::crop::*;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn wide_image_keeps_middle_columns() {
    let uv = square_crop(1600, 800).unwrap();
    assert!(close(uv.repeat.x, 0.5));
    assert!(close(uv.repeat.y, 1.0));
    assert!(close(uv.offset.x, 0.25));
    assert!(close(uv.offset.y, 0.0));
}

#[test]
fn tall_image_keeps_middle_rows() {
    let uv = square_crop(600, 1200).unwrap();
    assert!(close(uv.repeat.x, 1.0));
    assert!(close(uv.repeat.y, 0.5));
    assert!(close(uv.offset.x, 0.0));
    assert!(close(uv.offset.y, 0.25));
}

#[test]
fn square_image_is_untouched() {
    assert_eq!(square_crop(512, 512), Some(UvRect::FULL));
}

#[test]
fn empty_image_has_no_crop() {
    assert_eq!(square_crop(0, 100), None);
    assert_eq!(square_crop(100, 0), None);
}

#[test]
fn crop_is_centered_and_inside_unit_square() {
    for &(w, h) in &[(1920u32, 1080u32), (1080, 1920), (3000, 1000), (7, 5), (1, 1000)] {
        let uv = square_crop(w, h).unwrap();
        let c = uv.center();
        assert!(close(c.x, 0.5) && close(c.y, 0.5), "{w}x{h} center {c:?}");
        assert!(uv.offset.x >= 0.0 && uv.offset.y >= 0.0);
        assert!(uv.offset.x + uv.repeat.x <= 1.0 + 1e-6);
        assert!(uv.offset.y + uv.repeat.y <= 1.0 + 1e-6);
        // Sampled region is square in pixels.
        let (_, _, sw, sh) = uv.source_px(w, h);
        assert!((sw - sh).abs() < 1e-3 * sw.max(1.0), "{w}x{h}: {sw} vs {sh}");
    }
}
