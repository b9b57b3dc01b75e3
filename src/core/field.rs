use fnv::FnvHashMap;
use glam::{Mat4, Quat, Vec2, Vec3};
use rand::Rng;
use smallvec::SmallVec;
use std::f32::consts::PI;

use super::constants::{
    BASE_OPACITY_MIN, CAPTION_HEIGHT, CAPTION_LAYER_Z, CAPTION_OFFSET_Y, CAPTION_OPACITY_SCALE,
    CAPTION_WIDTH, FALLBACK_GRAY, HOVER_SCALE, IMAGE_LAYER_Z, MEDIUM_SMOOTHING, POINT_COUNT,
    RADIUS_JITTER, SPHERE_RADIUS, TILE_SIZE,
};
use super::error::SceneError;
use super::phase::VisualTargets;
use super::picking::HoverState;
use super::scene::SceneState;
use super::tween::Smoothed;

/// Runtime layout parameters for a field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneConfig {
    pub count: usize,
    pub radius: f32,
    pub jitter: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            count: POINT_COUNT,
            radius: SPHERE_RADIUS,
            jitter: RADIUS_JITTER,
        }
    }
}

/// What a particle's image tile currently shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureState {
    /// Load in flight; the tile renders plain white.
    Pending,
    /// Decoded and uploaded into the image atlas.
    Ready { slot: usize },
    /// Load failed for good; the tile renders flat gray.
    Fallback,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SubElementKind {
    Base = 0,
    Image = 1,
    Caption = 2,
}

impl SubElementKind {
    pub const ALL: [SubElementKind; 3] = [Self::Base, Self::Image, Self::Caption];
}

/// Stable identity of one renderable quad across the whole field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubElementId(pub u32);

impl SubElementId {
    #[inline]
    pub fn new(particle: usize, kind: SubElementKind) -> Self {
        Self(particle as u32 * SubElementKind::ALL.len() as u32 + kind as u32)
    }
}

/// One quad in its particle's local frame, facing local +Z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SubElement {
    pub id: SubElementId,
    pub kind: SubElementKind,
    pub offset: Vec3,
    pub half_extent: Vec2,
}

impl SubElement {
    fn new(particle: usize, kind: SubElementKind) -> Self {
        let (offset, size) = match kind {
            SubElementKind::Base => (Vec3::ZERO, Vec2::splat(TILE_SIZE)),
            SubElementKind::Image => (Vec3::new(0.0, 0.0, IMAGE_LAYER_Z), Vec2::splat(TILE_SIZE)),
            SubElementKind::Caption => (
                Vec3::new(0.0, CAPTION_OFFSET_Y, CAPTION_LAYER_Z),
                Vec2::new(CAPTION_WIDTH, CAPTION_HEIGHT),
            ),
        };
        Self {
            id: SubElementId::new(particle, kind),
            kind,
            offset,
            half_extent: size * 0.5,
        }
    }
}

pub type OwnerMap = FnvHashMap<SubElementId, usize>;

/// Which atlas (if any) a quad samples from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileTexture {
    Flat,
    Image { slot: usize },
    Caption { slot: usize },
}

/// Resolved look of one quad for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Appearance {
    /// sRGB tint multiplied with the sampled texel.
    pub color: [f32; 3],
    pub opacity: f32,
    pub texture: TileTexture,
}

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

#[derive(Clone, Debug)]
pub struct Particle {
    pub index: usize,
    pub position: Vec3,
    pub orientation: Quat,
    /// Index into the image catalog; `None` when the catalog is empty.
    pub image: Option<usize>,
    pub base: Smoothed,
    pub image_opacity: Smoothed,
    pub text: Smoothed,
    pub scale: Smoothed,
    pub texture: TextureState,
    pub elements: SmallVec<[SubElement; 3]>,
}

impl Particle {
    /// Particle-local to group-local transform at the current scale.
    #[inline]
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale.current),
            self.orientation,
            self.position,
        )
    }

    pub fn element(&self, kind: SubElementKind) -> Option<&SubElement> {
        self.elements.iter().find(|e| e.kind == kind)
    }

    pub fn appearance(&self, kind: SubElementKind) -> Appearance {
        match kind {
            SubElementKind::Base => Appearance {
                color: WHITE,
                opacity: self.base.current,
                texture: TileTexture::Flat,
            },
            SubElementKind::Image => {
                let (color, texture) = match self.texture {
                    TextureState::Pending => (WHITE, TileTexture::Flat),
                    TextureState::Ready { slot } => (WHITE, TileTexture::Image { slot }),
                    TextureState::Fallback => (FALLBACK_GRAY, TileTexture::Flat),
                };
                Appearance {
                    color,
                    opacity: self.image_opacity.current,
                    texture,
                }
            }
            // Captions are keyed by catalog image; no image means nothing to show.
            SubElementKind::Caption => match self.image {
                Some(slot) => Appearance {
                    color: WHITE,
                    opacity: self.text.current * CAPTION_OPACITY_SCALE,
                    texture: TileTexture::Caption { slot },
                },
                None => Appearance {
                    color: WHITE,
                    opacity: 0.0,
                    texture: TileTexture::Flat,
                },
            },
        }
    }
}

/// Unit direction of point `i` of `count` on a Fibonacci sphere.
pub fn fibonacci_direction(i: usize, count: usize) -> Vec3 {
    let n = count.max(1) as f32;
    let phi = (1.0 - 2.0 * (i as f32 + 0.5) / n).clamp(-1.0, 1.0).acos();
    let theta = PI * (1.0 + 5f32.sqrt()) * i as f32;
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    Vec3::new(sin_phi * cos_theta, sin_phi * sin_theta, cos_phi)
}

/// Rotation whose local +Z axis points from `position` toward the origin.
pub fn facing_origin(position: Vec3) -> Quat {
    let Some(forward) = (-position).try_normalize() else {
        return Quat::IDENTITY;
    };
    let up = if forward.cross(Vec3::Y).length_squared() < 1e-8 {
        Vec3::Z
    } else {
        Vec3::Y
    };
    let right = up.cross(forward).normalize();
    let true_up = forward.cross(right);
    Quat::from_mat3(&glam::Mat3::from_cols(right, true_up, forward))
}

pub struct ParticleField {
    particles: Vec<Particle>,
    radius: f32,
    owners: OwnerMap,
}

impl ParticleField {
    /// Lay out `count` particles around a shell of `radius` and assign each one
    /// a random catalog image.
    pub fn build<R: Rng>(
        count: usize,
        radius: f32,
        image_count: usize,
        rng: &mut R,
    ) -> Result<Self, SceneError> {
        Self::build_with(
            SceneConfig {
                count,
                radius,
                ..SceneConfig::default()
            },
            image_count,
            rng,
        )
    }

    pub fn build_with<R: Rng>(
        config: SceneConfig,
        image_count: usize,
        rng: &mut R,
    ) -> Result<Self, SceneError> {
        if config.count == 0 {
            return Err(SceneError::EmptyField);
        }
        let mut particles = Vec::with_capacity(config.count);
        let mut owners = OwnerMap::default();
        owners.reserve(config.count * SubElementKind::ALL.len());

        for i in 0..config.count {
            let r = config.radius + (rng.gen::<f32>() - 0.5) * config.jitter;
            let position = fibonacci_direction(i, config.count) * r;
            let image = (image_count > 0).then(|| rng.gen_range(0..image_count));
            let elements: SmallVec<[SubElement; 3]> = SubElementKind::ALL
                .iter()
                .map(|&kind| SubElement::new(i, kind))
                .collect();
            for e in &elements {
                owners.insert(e.id, i);
            }
            particles.push(Particle {
                index: i,
                position,
                orientation: facing_origin(position),
                image,
                base: Smoothed::new(0.0),
                image_opacity: Smoothed::new(0.0),
                text: Smoothed::new(0.0),
                scale: Smoothed::new(1.0),
                texture: if image.is_some() {
                    TextureState::Pending
                } else {
                    TextureState::Fallback
                },
                elements,
            });
        }

        Ok(Self {
            particles,
            radius: config.radius,
            owners,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn particle(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    #[inline]
    pub fn owners(&self) -> &OwnerMap {
        &self.owners
    }

    #[inline]
    pub fn owner_of(&self, id: SubElementId) -> Option<usize> {
        self.owners.get(&id).copied()
    }

    pub fn set_texture(&mut self, index: usize, state: TextureState) {
        if let Some(p) = self.particles.get_mut(index) {
            p.texture = state;
        }
    }

    /// Mark every particle showing `image` with the same texture state.
    pub fn set_texture_for_image(&mut self, image: usize, state: TextureState) -> usize {
        let mut touched = 0;
        for p in self.particles.iter_mut().filter(|p| p.image == Some(image)) {
            p.texture = state;
            touched += 1;
        }
        touched
    }

    pub fn set_scale_target(&mut self, index: usize, target: f32) {
        if let Some(p) = self.particles.get_mut(index) {
            p.scale.set_target(target);
        }
    }

    /// Retarget and advance every particle channel by one frame.
    pub fn update(&mut self, scene: &SceneState, hover: &HoverState, visuals: &VisualTargets) {
        let model = scene.model();
        let diameter = self.radius * 2.0;
        let hovered = hover.hovered();
        for p in &mut self.particles {
            let z = model.transform_point3(p.position).z;
            let normalized = if diameter > 0.0 {
                (z + self.radius) / diameter
            } else {
                0.5
            };
            let depth_opacity =
                (BASE_OPACITY_MIN + normalized * (1.0 - BASE_OPACITY_MIN)).clamp(0.0, 1.0);

            p.base.set_target(depth_opacity * visuals.base_factor.clamp(0.0, 1.0));
            p.image_opacity.set_target(visuals.image.clamp(0.0, 1.0));
            p.text.set_target(visuals.text.clamp(0.0, 1.0));
            p.scale.set_target(if hovered == Some(p.index) {
                HOVER_SCALE
            } else {
                1.0
            });

            p.base.step(MEDIUM_SMOOTHING);
            p.image_opacity.step(MEDIUM_SMOOTHING);
            p.text.step(MEDIUM_SMOOTHING);
            p.scale.step(MEDIUM_SMOOTHING);
        }
    }

    /// Fill `order` with particle indices sorted back to front under `view_model`.
    pub fn depth_order(&self, view_model: &Mat4, order: &mut Vec<usize>) {
        order.clear();
        order.extend(0..self.particles.len());
        let depth = |i: usize| view_model.transform_point3(self.particles[i].position).z;
        order.sort_by(|&a, &b| depth(a).total_cmp(&depth(b)));
    }
}
