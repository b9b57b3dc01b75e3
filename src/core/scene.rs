use glam::{Mat4, Quat, Vec2, Vec3};

use super::camera::{Camera, Viewport};
use super::constants::{AUTO_ROTATION_STEP, FAST_SMOOTHING};
use super::error::SceneError;
use super::field::{ParticleField, TextureState};
use super::phase::{phase_targets, PhaseTargets, Pose, PHASES};
use super::picking::{pick, HoverState, HoverTransition, PickHit};
use super::tween::Smoothed;

/// Smoothed scene-level values: camera position, group rotation and scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneState {
    pub camera_x: Smoothed,
    pub camera_y: Smoothed,
    pub camera_z: Smoothed,
    pub rotation_x: Smoothed,
    pub rotation_y: Smoothed,
    pub scale: Smoothed,
    /// Accumulated autonomous spin, added on top of `rotation_y`.
    pub auto_rotation: f32,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::at_pose(&PHASES[0].from)
    }
}

impl SceneState {
    pub fn at_pose(pose: &Pose) -> Self {
        Self {
            camera_x: Smoothed::new(pose.camera.x),
            camera_y: Smoothed::new(pose.camera.y),
            camera_z: Smoothed::new(pose.camera.z),
            rotation_x: Smoothed::new(pose.rotation_x),
            rotation_y: Smoothed::new(pose.rotation_y),
            scale: Smoothed::new(pose.scale),
            auto_rotation: 0.0,
        }
    }

    pub fn set_targets(&mut self, pose: &Pose) {
        self.camera_x.set_target(pose.camera.x);
        self.camera_y.set_target(pose.camera.y);
        self.camera_z.set_target(pose.camera.z);
        self.rotation_x.set_target(pose.rotation_x);
        self.rotation_y.set_target(pose.rotation_y);
        self.scale.set_target(pose.scale);
    }

    pub fn step(&mut self, k: f32) {
        self.camera_x.step(k);
        self.camera_y.step(k);
        self.camera_z.step(k);
        self.rotation_x.step(k);
        self.rotation_y.step(k);
        self.scale.step(k);
    }

    #[inline]
    pub fn camera_position(&self) -> Vec3 {
        Vec3::new(
            self.camera_x.current,
            self.camera_y.current,
            self.camera_z.current,
        )
    }

    /// Group transform: uniform scale, then yaw, then pitch.
    pub fn model(&self) -> Mat4 {
        let rotation = Quat::from_rotation_x(self.rotation_x.current)
            * Quat::from_rotation_y(self.rotation_y.current + self.auto_rotation);
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale.current), rotation, Vec3::ZERO)
    }
}

/// Everything a frame needs from the outside world.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub scroll_progress: f32,
    pub elapsed: f32,
    pub viewport: Viewport,
}

/// Values pushed to the page overlay after each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OverlaySignals {
    pub phase: usize,
    pub scroll_progress: f32,
    pub wordmark_opacity: f32,
    pub headline_opacity: f32,
    pub headline_weight: f32,
}

impl OverlaySignals {
    fn from_targets(p: f32, targets: &PhaseTargets) -> Self {
        Self {
            phase: targets.phase,
            scroll_progress: p,
            wordmark_opacity: targets.visuals.wordmark,
            headline_opacity: targets.visuals.headline,
            headline_weight: targets.visuals.headline_weight,
        }
    }
}

/// Owns the field and the scene values and advances them one frame at a time.
pub struct SceneController {
    field: ParticleField,
    state: SceneState,
    hover: HoverState,
    viewport: Viewport,
    targets: PhaseTargets,
    elapsed: f32,
    frames: u64,
}

impl SceneController {
    pub fn new(field: ParticleField) -> Self {
        Self {
            field,
            state: SceneState::default(),
            hover: HoverState::default(),
            viewport: Viewport::default(),
            targets: phase_targets(0.0),
            elapsed: 0.0,
            frames: 0,
        }
    }

    /// Only projection parameters depend on the viewport.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<(), SceneError> {
        if !viewport.is_ready() {
            return Err(SceneError::DegenerateViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.viewport = viewport;
        Ok(())
    }

    /// Advance the scene by one frame. Nothing changes while the viewport is
    /// not ready.
    pub fn tick(&mut self, input: FrameInput) -> Result<OverlaySignals, SceneError> {
        self.set_viewport(input.viewport)?;
        let p = if input.scroll_progress.is_finite() {
            input.scroll_progress.clamp(0.0, 1.0)
        } else {
            0.0
        };

        self.targets = phase_targets(p);
        self.state.set_targets(&self.targets.pose);
        if !self.hover.rotation_suspended() {
            self.state.auto_rotation += AUTO_ROTATION_STEP;
        }
        self.state.step(FAST_SMOOTHING);
        self.field
            .update(&self.state, &self.hover, &self.targets.visuals);

        self.elapsed = input.elapsed;
        self.frames += 1;
        Ok(OverlaySignals::from_targets(p, &self.targets))
    }

    /// Hit-test a pointer position (canvas pixels) and update hover.
    pub fn pointer_move(&mut self, px: Vec2) -> HoverTransition {
        let hit = self.pick_at(px).map(|h| h.particle);
        self.hover.apply(hit, &mut self.field)
    }

    pub fn pointer_leave(&mut self) -> HoverTransition {
        self.hover.apply(None, &mut self.field)
    }

    pub fn pick_at(&self, px: Vec2) -> Option<PickHit> {
        let ndc = self.viewport.to_ndc(px)?;
        let camera = self.camera()?;
        let (origin, dir) = camera.ray_from_ndc(ndc);
        pick(&self.field, &self.state.model(), origin, dir)
    }

    pub fn camera(&self) -> Option<Camera> {
        let aspect = self.viewport.aspect()?;
        Some(Camera::new(self.state.camera_position(), aspect))
    }

    #[inline]
    pub fn scene_model(&self) -> Mat4 {
        self.state.model()
    }

    pub fn set_texture(&mut self, index: usize, texture: TextureState) {
        self.field.set_texture(index, texture);
    }

    pub fn set_image_texture(&mut self, image: usize, texture: TextureState) -> usize {
        self.field.set_texture_for_image(image, texture)
    }

    #[inline]
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    #[inline]
    pub fn state(&self) -> &SceneState {
        &self.state
    }

    #[inline]
    pub fn hover(&self) -> &HoverState {
        &self.hover
    }

    #[inline]
    pub fn targets(&self) -> &PhaseTargets {
        &self.targets
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
