use glam::{Mat4, Vec3};

use super::constants::HOVER_SCALE;
use super::field::{ParticleField, SubElement, SubElementId};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    pub element: SubElementId,
    pub particle: usize,
    /// Distance along the world ray (in units of the ray direction).
    pub t: f32,
}

/// Ray against a double-sided quad lying in the local plane `z = offset.z`.
#[inline]
pub fn ray_quad(origin: Vec3, dir: Vec3, quad: &SubElement) -> Option<f32> {
    if dir.z.abs() <= 1e-9 {
        return None;
    }
    let t = (quad.offset.z - origin.z) / dir.z;
    if !(t >= 0.0) {
        return None;
    }
    let hit = origin + dir * t;
    let inside = (hit.x - quad.offset.x).abs() <= quad.half_extent.x
        && (hit.y - quad.offset.y).abs() <= quad.half_extent.y;
    inside.then_some(t)
}

/// Nearest sub-element hit by a world-space ray, resolved to its particle.
///
/// Every sub-element is tested regardless of its current opacity.
pub fn pick(
    field: &ParticleField,
    scene_model: &Mat4,
    ray_origin: Vec3,
    ray_dir: Vec3,
) -> Option<PickHit> {
    let inv_model = scene_model.inverse();
    if !inv_model.is_finite() {
        return None;
    }
    let group_origin = inv_model.transform_point3(ray_origin);
    let group_dir = inv_model.transform_vector3(ray_dir);

    let mut best: Option<(SubElementId, f32)> = None;
    for p in field.particles() {
        let s = p.scale.current;
        if s <= 0.0 {
            continue;
        }
        // Same parameterisation as the world ray, so `t` stays comparable.
        let inv_rot = p.orientation.conjugate();
        let local_origin = inv_rot * (group_origin - p.position) / s;
        let local_dir = inv_rot * group_dir / s;
        for e in &p.elements {
            if let Some(t) = ray_quad(local_origin, local_dir, e) {
                match best {
                    Some((_, bt)) if t >= bt => {}
                    _ => best = Some((e.id, t)),
                }
            }
        }
    }

    let (element, t) = best?;
    let particle = field.owner_of(element)?;
    Some(PickHit {
        element,
        particle,
        t,
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverTransition {
    Unchanged,
    Enter(usize),
    Switch { from: usize, to: usize },
    Exit(usize),
}

/// At most one hovered particle; hovering pauses the autonomous spin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoverState {
    hovered: Option<usize>,
}

impl HoverState {
    #[inline]
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    #[inline]
    pub fn rotation_suspended(&self) -> bool {
        self.hovered.is_some()
    }

    pub fn apply(&mut self, hit: Option<usize>, field: &mut ParticleField) -> HoverTransition {
        let hit = hit.filter(|&i| i < field.len());
        match (self.hovered, hit) {
            (Some(prev), Some(next)) if prev == next => HoverTransition::Unchanged,
            (Some(prev), Some(next)) => {
                field.set_scale_target(prev, 1.0);
                field.set_scale_target(next, HOVER_SCALE);
                self.hovered = Some(next);
                HoverTransition::Switch {
                    from: prev,
                    to: next,
                }
            }
            (None, Some(next)) => {
                field.set_scale_target(next, HOVER_SCALE);
                self.hovered = Some(next);
                HoverTransition::Enter(next)
            }
            (Some(prev), None) => {
                field.set_scale_target(prev, 1.0);
                self.hovered = None;
                HoverTransition::Exit(prev)
            }
            (None, None) => HoverTransition::Unchanged,
        }
    }
}
