// Host-side tests for exponential smoothing.

#![allow(dead_code)]
mod common;

use common::scene_core::constants::{FAST_SMOOTHING, MEDIUM_SMOOTHING};
use common::scene_core::tween::*;

// Closed-form frame count for a decay `k` to shrink a gap to `epsilon`.
fn steps_to_settle(initial_gap: f32, epsilon: f32, k: f32) -> u32 {
    if initial_gap <= epsilon {
        return 0;
    }
    ((epsilon / initial_gap).ln() / (1.0 - k).ln()).ceil() as u32
}

#[test]
fn approach_moves_a_fixed_fraction() {
    assert!((approach(0.0, 1.0, 0.1) - 0.1).abs() < 1e-6);
    assert!((approach(1.0, 0.0, 0.05) - 0.95).abs() < 1e-6);
    assert_eq!(approach(0.5, 0.5, 0.1), 0.5);
}

#[test]
fn smoothed_is_monotone_and_never_overshoots() {
    for &k in &[FAST_SMOOTHING, MEDIUM_SMOOTHING] {
        let mut s = Smoothed::new(0.0);
        s.set_target(1.0);
        let mut prev = s.current;
        for _ in 0..200 {
            s.step(k);
            assert!(s.current >= prev, "not monotone at k={k}");
            assert!(s.current <= 1.0, "overshoot at k={k}");
            prev = s.current;
        }
    }
}

#[test]
fn first_step_does_not_snap() {
    let mut s = Smoothed::new(-1.0);
    s.set_target(1.0);
    s.step(MEDIUM_SMOOTHING);
    assert!(s.current > -1.0 && s.current < 1.0);
    assert!(s.distance() > 1.0);
}

#[test]
fn converges_within_precision() {
    let mut s = Smoothed::new(0.0);
    s.set_target(1.0);
    for _ in 0..1000 {
        s.step(FAST_SMOOTHING);
    }
    assert!(s.distance() < 1e-6, "distance {}", s.distance());
}

#[test]
fn retarget_mid_flight_heads_to_new_target() {
    let mut s = Smoothed::new(0.0);
    s.set_target(1.0);
    for _ in 0..10 {
        s.step(MEDIUM_SMOOTHING);
    }
    let mid = s.current;
    s.set_target(0.0);
    s.step(MEDIUM_SMOOTHING);
    assert!(s.current < mid);
    assert!(s.current > 0.0);
}

#[test]
fn steps_to_settle_matches_simulation() {
    let k = MEDIUM_SMOOTHING;
    let n = steps_to_settle(1.0, 0.01, k);
    let mut s = Smoothed::new(0.0);
    s.set_target(1.0);
    for _ in 0..n {
        s.step(k);
    }
    assert!(s.distance() <= 0.0101);
    assert_eq!(steps_to_settle(0.001, 0.01, k), 0);
    // A 0.1 decay closes 99% of the gap in about 44 frames.
    assert!((43..=45).contains(&n), "n = {n}");
}
