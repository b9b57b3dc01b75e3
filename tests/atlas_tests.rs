// Host-side tests for atlas grid packing.

#![allow(dead_code)]
mod common;

use common::scene_core::atlas::*;
use common::scene_core::constants::{ATLAS_MAX_DIM, IMAGE_TILE_PX};

#[test]
fn small_catalog_keeps_full_tile_size() {
    let l = AtlasLayout::new(10, IMAGE_TILE_PX, IMAGE_TILE_PX, ATLAS_MAX_DIM);
    assert_eq!(l.tile_w, IMAGE_TILE_PX);
    assert!(l.capacity >= 10);
    assert!(l.width() <= ATLAS_MAX_DIM && l.height() <= ATLAS_MAX_DIM);
}

#[test]
fn large_catalog_shrinks_tiles_to_fit() {
    let l = AtlasLayout::new(10_000, 128, 128, 2048);
    assert!(l.tile_w < 128);
    assert!(l.capacity >= 10_000);
    assert!(l.width() <= 2048 && l.height() <= 2048);
}

#[test]
fn empty_catalog_still_has_one_slot() {
    let l = AtlasLayout::new(0, 256, 64, ATLAS_MAX_DIM);
    assert_eq!(l.capacity, 1);
    assert_eq!(l.width(), 256);
    assert_eq!(l.height(), 64);
}

#[test]
fn slots_do_not_overlap() {
    let l = AtlasLayout::new(37, 64, 64, 1024);
    let mut seen = std::collections::HashSet::new();
    for slot in 0..37 {
        let (x, y) = l.origin(slot).unwrap();
        assert!(x + l.tile_w <= l.width());
        assert!(y + l.tile_h <= l.height());
        assert!(seen.insert((x, y)));
    }
    assert_eq!(l.origin(l.capacity), None);
}

#[test]
fn uv_rect_covers_exactly_one_tile() {
    let l = AtlasLayout::new(6, 256, 64, ATLAS_MAX_DIM);
    let uv = l.uv_rect(5).unwrap();
    let (x, y) = l.origin(5).unwrap();
    assert!((uv.offset.x * l.width() as f32 - x as f32).abs() < 1e-3);
    assert!((uv.offset.y * l.height() as f32 - y as f32).abs() < 1e-3);
    assert!((uv.repeat.x * l.width() as f32 - 256.0).abs() < 1e-3);
    assert!((uv.repeat.y * l.height() as f32 - 64.0).abs() < 1e-3);
}
