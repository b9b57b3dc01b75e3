// Host-side tests for the scroll-to-phase mapping.

#![allow(dead_code)]
mod common;

use common::scene_core::constants::{HEADLINE_WEIGHT_MAX, HEADLINE_WEIGHT_MIN};
use common::scene_core::phase::*;
use std::f32::consts::PI;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn phase_ranges_tile_the_unit_interval() {
    assert_eq!(PHASES[0].start, 0.0);
    assert_eq!(PHASES[PHASES.len() - 1].end, 1.0);
    for w in PHASES.windows(2) {
        assert_eq!(w[0].end, w[1].start);
        assert!(w[0].start < w[0].end);
    }
}

#[test]
fn boundaries_belong_to_the_later_phase() {
    assert_eq!(phase_index(0.0), 0);
    assert_eq!(phase_index(0.3299), 0);
    assert_eq!(phase_index(0.33), 1);
    assert_eq!(phase_index(0.40), 2);
    assert_eq!(phase_index(0.60), 3);
    assert_eq!(phase_index(0.80), 4);
    assert_eq!(phase_index(1.0), 4);
    assert_eq!(phase_index(5.0), 4);
    assert_eq!(phase_index(f32::NAN), 0);
}

#[test]
fn poses_are_continuous_across_boundaries() {
    for w in PHASES.windows(2) {
        let before = phase_targets(w[0].end - 1e-4).pose;
        let after = phase_targets(w[1].start).pose;
        assert!(before.camera.distance(after.camera) < 0.05, "camera jump at {}", w[1].start);
        assert!((before.rotation_y - after.rotation_y).abs() < 0.05);
        assert!((before.scale - after.scale).abs() < 0.01);
    }
}

#[test]
fn intro_starts_far_out_and_flies_in() {
    let t0 = phase_targets(0.0);
    assert_eq!(t0.pose.camera, glam::Vec3::new(-4.0, 1.0, 18.0));
    assert!(close(t0.visuals.wordmark, 1.0));
    assert!(close(t0.visuals.image, 0.0));
    assert!(close(t0.visuals.text, 0.0));

    let mid = phase_targets(0.165);
    assert!(close(mid.pose.camera.z, 9.15));
    assert!(mid.visuals.wordmark > 0.45 && mid.visuals.wordmark < 0.55);
}

#[test]
fn images_then_captions_fade_in() {
    let t = phase_targets(0.365);
    assert_eq!(t.phase, 1);
    assert!(close(t.visuals.image, 0.5));
    assert!(close(t.visuals.text, 0.0));
    assert!(close(t.pose.camera.z, -0.2));

    let t = phase_targets(0.5);
    assert_eq!(t.phase, 2);
    assert!(close(t.visuals.image, 1.0));
    assert!(close(t.visuals.text, 0.5));
    assert!(close(t.pose.camera.z, -0.9));
}

#[test]
fn expansion_fades_tiles_and_raises_headline() {
    let t = phase_targets(0.7);
    assert_eq!(t.phase, 3);
    assert!(close(t.pose.scale, 2.0));
    assert!(close(t.visuals.base_factor, 0.5));
    assert!(close(t.visuals.image, 0.5));
    assert!(close(t.visuals.headline, 0.5));
    assert!(close(
        t.visuals.headline_weight,
        (HEADLINE_WEIGHT_MIN + HEADLINE_WEIGHT_MAX) / 2.0
    ));

    let end = phase_targets(1.0);
    assert_eq!(end.phase, 4);
    assert!(close(end.pose.scale, 3.0));
    assert!(close(end.pose.camera.z, -1.1));
    assert!(close(end.pose.rotation_y, -3.15 * PI));
    assert!(close(end.visuals.image, 0.0));
    assert!(close(end.visuals.base_factor, 0.0));
    assert!(close(end.visuals.headline, 1.0));
    assert!(close(end.visuals.headline_weight, HEADLINE_WEIGHT_MAX));
}

#[test]
fn final_phase_holds_still() {
    let a = phase_targets(0.8);
    let b = phase_targets(0.95);
    assert_eq!(a.pose, b.pose);
    assert_eq!(a.visuals, b.visuals);
}

#[test]
fn out_of_range_progress_is_clamped() {
    assert_eq!(phase_targets(-3.0), phase_targets(0.0));
    assert_eq!(phase_targets(7.0), phase_targets(1.0));
    assert_eq!(phase_targets(f32::NAN), phase_targets(0.0));
}

#[test]
fn visuals_stay_in_unit_range() {
    for i in 0..=1000 {
        let v = phase_targets(i as f32 / 1000.0).visuals;
        for x in [v.image, v.text, v.base_factor, v.wordmark, v.headline] {
            assert!((0.0..=1.0).contains(&x), "p={} value {x}", i as f32 / 1000.0);
        }
        assert!((HEADLINE_WEIGHT_MIN..=HEADLINE_WEIGHT_MAX).contains(&v.headline_weight));
    }
}

#[test]
fn scroll_progress_normalizes_and_guards() {
    assert_eq!(scroll_progress(0.0, 3000.0, 1000.0), 0.0);
    assert!(close(scroll_progress(1000.0, 3000.0, 1000.0), 0.5));
    assert_eq!(scroll_progress(5000.0, 3000.0, 1000.0), 1.0);
    assert_eq!(scroll_progress(-20.0, 3000.0, 1000.0), 0.0);
    // Page shorter than the viewport cannot scroll.
    assert_eq!(scroll_progress(10.0, 800.0, 1000.0), 0.0);
    assert_eq!(scroll_progress(10.0, 1000.0, 1000.0), 0.0);
    assert_eq!(scroll_progress(f64::NAN, 3000.0, 1000.0), 0.0);
}

#[test]
fn ramp_handles_degenerate_ranges() {
    assert_eq!(ramp(0.5, 0.5, 0.5), 1.0);
    assert_eq!(ramp(0.4, 0.5, 0.5), 0.0);
    assert!(close(ramp(0.25, 0.0, 0.5), 0.5));
}

#[test]
fn phases_hand_off_at_exact_boundaries() {
    for i in 0..PHASES.len() - 1 {
        assert_eq!(PHASES[i].to, PHASES[i + 1].from, "pose hand-off into phase {}", i + 2);
    }
    for b in [0.33f32, 0.40, 0.60, 0.80] {
        let before = phase_targets(b - 1e-5).visuals;
        let at = phase_targets(b).visuals;
        let pairs = [
            ("image", before.image, at.image),
            ("text", before.text, at.text),
            ("base_factor", before.base_factor, at.base_factor),
            ("wordmark", before.wordmark, at.wordmark),
            ("headline", before.headline, at.headline),
        ];
        for (name, x, y) in pairs {
            assert!((x - y).abs() < 1e-3, "{name} jumps at p={b}: {x} -> {y}");
        }
    }
}
