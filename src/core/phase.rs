use glam::Vec3;
use std::f32::consts::PI;

use super::constants::{HEADLINE_WEIGHT_MAX, HEADLINE_WEIGHT_MIN};

/// Scene-level pose the camera and sphere group are driven toward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub camera: Vec3,
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub scale: f32,
}

impl Pose {
    pub fn lerp(&self, other: &Pose, t: f32) -> Pose {
        Pose {
            camera: self.camera.lerp(other.camera, t),
            rotation_x: self.rotation_x + (other.rotation_x - self.rotation_x) * t,
            rotation_y: self.rotation_y + (other.rotation_y - self.rotation_y) * t,
            scale: self.scale + (other.scale - self.scale) * t,
        }
    }
}

/// One contiguous slice `[start, end)` of scroll progress.
#[derive(Clone, Copy, Debug)]
pub struct PhaseSpec {
    pub start: f32,
    pub end: f32,
    pub from: Pose,
    pub to: Pose,
}

impl PhaseSpec {
    /// Local progress inside this phase, clamped to `[0, 1]`.
    #[inline]
    pub fn local(&self, p: f32) -> f32 {
        ramp(p, self.start, self.end)
    }
}

const INTRO: Pose = Pose {
    camera: Vec3::new(-4.0, 1.0, 18.0),
    rotation_x: 0.0,
    rotation_y: 0.0,
    scale: 1.0,
};
const WALL: Pose = Pose {
    camera: Vec3::new(0.0, 0.5, 0.3),
    rotation_x: 0.0,
    rotation_y: -1.4 * PI,
    scale: 1.0,
};
const INSIDE: Pose = Pose {
    camera: Vec3::new(0.0, 0.5, -0.7),
    rotation_x: 0.0,
    rotation_y: -1.75 * PI,
    scale: 1.0,
};
const DEEP: Pose = Pose {
    camera: Vec3::new(0.0, 0.5, -1.1),
    rotation_x: 0.0,
    rotation_y: -2.35 * PI,
    scale: 1.0,
};
const EXPANDED: Pose = Pose {
    camera: Vec3::new(0.0, 0.5, -1.1),
    rotation_x: 0.0,
    rotation_y: -3.15 * PI,
    scale: 3.0,
};

// Boundaries and rotation totals as authored.
pub const PHASES: [PhaseSpec; 5] = [
    PhaseSpec { start: 0.00, end: 0.33, from: INTRO, to: WALL },
    PhaseSpec { start: 0.33, end: 0.40, from: WALL, to: INSIDE },
    PhaseSpec { start: 0.40, end: 0.60, from: INSIDE, to: DEEP },
    PhaseSpec { start: 0.60, end: 0.80, from: DEEP, to: EXPANDED },
    PhaseSpec { start: 0.80, end: 1.00, from: EXPANDED, to: EXPANDED },
];

const IMAGE_FADE: usize = 1;
const TEXT_FADE: usize = 2;
const FADE_OUT: usize = 3;

/// Global opacity curves and overlay signals for a scroll position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VisualTargets {
    pub image: f32,
    pub text: f32,
    pub base_factor: f32,
    pub wordmark: f32,
    pub headline: f32,
    pub headline_weight: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseTargets {
    pub phase: usize,
    pub pose: Pose,
    pub visuals: VisualTargets,
}

#[inline]
pub fn ramp(p: f32, start: f32, end: f32) -> f32 {
    if end <= start {
        return if p >= end { 1.0 } else { 0.0 };
    }
    ((p - start) / (end - start)).clamp(0.0, 1.0)
}

/// Normalized page scroll; 0 when the document cannot scroll.
pub fn scroll_progress(scroll_y: f64, document_height: f64, viewport_height: f64) -> f32 {
    let range = document_height - viewport_height;
    if !(range > 0.0) || !scroll_y.is_finite() {
        return 0.0;
    }
    (scroll_y / range).clamp(0.0, 1.0) as f32
}

/// Index of the phase whose half-open range contains `p`; the last phase
/// also owns `p >= 1`.
pub fn phase_index(p: f32) -> usize {
    let p = if p.is_nan() { 0.0 } else { p };
    PHASES
        .iter()
        .position(|ph| p < ph.end)
        .unwrap_or(PHASES.len() - 1)
}

/// Pure mapping from scroll progress to every scene-level target.
pub fn phase_targets(p: f32) -> PhaseTargets {
    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
    let phase = phase_index(p);
    let spec = &PHASES[phase];
    let pose = spec.from.lerp(&spec.to, spec.local(p));

    let image_fade = PHASES[IMAGE_FADE].local(p);
    let text_fade = PHASES[TEXT_FADE].local(p);
    let fade_out = PHASES[FADE_OUT].local(p);
    let keep = 1.0 - fade_out;

    PhaseTargets {
        phase,
        pose,
        visuals: VisualTargets {
            image: image_fade * keep,
            text: text_fade * keep,
            base_factor: keep,
            wordmark: 1.0 - PHASES[0].local(p),
            headline: fade_out,
            headline_weight: HEADLINE_WEIGHT_MIN
                + (HEADLINE_WEIGHT_MAX - HEADLINE_WEIGHT_MIN) * fade_out,
        },
    }
}
