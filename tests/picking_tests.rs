// Host-side tests for ray picking and hover bookkeeping.

#![allow(dead_code)]
mod common;

use common::field;
use common::scene_core::constants::HOVER_SCALE;
use common::scene_core::field::{SubElementId, SubElementKind};
use common::scene_core::phase::VisualTargets;
use common::scene_core::picking::*;
use common::scene_core::scene::SceneState;
use glam::{Mat4, Quat, Vec3};
use std::f32::consts::FRAC_PI_2;

// A one-particle field sits on +X facing the origin.
fn lone() -> common::scene_core::field::ParticleField {
    let f = field(1, 1);
    let p = &f.particles()[0];
    assert!(p.position.x > 1.0 && p.position.y.abs() < 1e-5 && p.position.z.abs() < 1e-5);
    f
}

#[test]
fn ray_hits_front_layer_first() {
    let f = lone();
    let hit = pick(&f, &Mat4::IDENTITY, Vec3::new(10.0, 0.0, 0.0), Vec3::NEG_X).unwrap();
    assert_eq!(hit.particle, 0);
    // Approaching from outside, the base quad is nearer than the image layer.
    assert_eq!(hit.element, SubElementId::new(0, SubElementKind::Base));
    let x = f.particles()[0].position.x;
    assert!((hit.t - (10.0 - x)).abs() < 1e-3);
}

#[test]
fn quads_are_double_sided() {
    let f = lone();
    let hit = pick(&f, &Mat4::IDENTITY, Vec3::ZERO, Vec3::X).unwrap();
    assert_eq!(hit.particle, 0);
    // From the inside the image layer is in front of the base.
    assert_eq!(hit.element, SubElementId::new(0, SubElementKind::Image));
}

#[test]
fn ray_past_the_tile_misses() {
    let f = lone();
    assert_eq!(pick(&f, &Mat4::IDENTITY, Vec3::new(10.0, 1.0, 0.0), Vec3::NEG_X), None);
    assert_eq!(pick(&f, &Mat4::IDENTITY, Vec3::new(10.0, 0.0, 0.0), Vec3::X), None);
}

#[test]
fn caption_strip_is_pickable() {
    let f = lone();
    // Just below the base tile, inside the caption band.
    let hit = pick(&f, &Mat4::IDENTITY, Vec3::new(10.0, -0.05, 0.0), Vec3::NEG_X).unwrap();
    assert_eq!(hit.element, SubElementId::new(0, SubElementKind::Caption));
    assert_eq!(hit.particle, 0);
}

#[test]
fn group_transform_is_applied() {
    let f = lone();
    // Yaw +90 degrees carries +X onto -Z.
    let model = Mat4::from_quat(Quat::from_rotation_y(FRAC_PI_2));
    assert!(pick(&f, &model, Vec3::new(10.0, 0.0, 0.0), Vec3::NEG_X).is_none());
    let hit = pick(&f, &model, Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z).unwrap();
    assert_eq!(hit.particle, 0);
}

#[test]
fn hovered_scale_widens_hit_area() {
    let mut f = lone();
    let origin = Vec3::new(10.0, 0.06, 0.0);
    assert!(pick(&f, &Mat4::IDENTITY, origin, Vec3::NEG_X).is_none());

    let mut hover = HoverState::default();
    hover.apply(Some(0), &mut f);
    let scene = SceneState::default();
    let v = VisualTargets::default();
    for _ in 0..200 {
        f.update(&scene, &hover, &v);
    }
    assert!((f.particles()[0].scale.current - HOVER_SCALE).abs() < 1e-3);
    assert!(pick(&f, &Mat4::IDENTITY, origin, Vec3::NEG_X).is_some());
}

#[test]
fn invisible_tiles_still_pick() {
    // Freshly built particles have zero opacity everywhere.
    let f = lone();
    assert_eq!(f.particles()[0].base.current, 0.0);
    assert!(pick(&f, &Mat4::IDENTITY, Vec3::new(10.0, 0.0, 0.0), Vec3::NEG_X).is_some());
}

#[test]
fn nearest_particle_wins_in_a_full_field() {
    let f = field(1500, 3);
    let eye = Vec3::new(0.0, 0.0, 20.0);
    let target = f
        .particles()
        .iter()
        .max_by(|a, b| a.position.z.total_cmp(&b.position.z))
        .unwrap();
    let dir = (target.position - eye).normalize();
    let hit = pick(&f, &Mat4::IDENTITY, eye, dir).unwrap();
    let hit_pos = f.particles()[hit.particle].position;
    assert!(hit_pos.z > 0.0, "picked a back-side particle");
    assert!(hit.t <= (target.position - eye).length() + 1e-3);
}

#[test]
fn hover_transitions_keep_one_particle() {
    let mut f = field(10, 1);
    let mut h = HoverState::default();
    assert_eq!(h.apply(None, &mut f), HoverTransition::Unchanged);
    assert_eq!(h.apply(Some(3), &mut f), HoverTransition::Enter(3));
    assert!(h.rotation_suspended());
    assert_eq!(h.apply(Some(3), &mut f), HoverTransition::Unchanged);
    assert_eq!(h.apply(Some(5), &mut f), HoverTransition::Switch { from: 3, to: 5 });
    assert_eq!(f.particles()[3].scale.target, 1.0);
    assert_eq!(f.particles()[5].scale.target, HOVER_SCALE);
    assert_eq!(h.apply(None, &mut f), HoverTransition::Exit(5));
    assert_eq!(f.particles()[5].scale.target, 1.0);
    assert_eq!(h.hovered(), None);
    assert!(!h.rotation_suspended());
}

#[test]
fn out_of_range_hit_counts_as_miss() {
    let mut f = field(4, 1);
    let mut h = HoverState::default();
    assert_eq!(h.apply(Some(99), &mut f), HoverTransition::Unchanged);
    h.apply(Some(1), &mut f);
    assert_eq!(h.apply(Some(99), &mut f), HoverTransition::Exit(1));
}
