use glam::{Mat4, Vec2, Vec3, Vec4};

use super::constants::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR};

/// Drawing surface size in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero, negative or non-finite sizes mean layout has not happened yet.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    #[inline]
    pub fn aspect(&self) -> Option<f32> {
        self.is_ready().then(|| self.width / self.height)
    }

    /// Pixel position (origin top-left) to normalized device coordinates.
    pub fn to_ndc(&self, px: Vec2) -> Option<Vec2> {
        if !self.is_ready() {
            return None;
        }
        Some(Vec2::new(
            (px.x / self.width) * 2.0 - 1.0,
            -(px.y / self.height) * 2.0 + 1.0,
        ))
    }
}

/// Perspective camera looking down -Z without rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(position: Vec3, aspect: f32) -> Self {
        Self {
            position,
            aspect,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(-self.position)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through a point given in normalized device coordinates.
    ///
    /// Returns `(origin, direction)` with a unit-length direction.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let half_h = (self.fovy_radians * 0.5).tan();
        let half_w = half_h * self.aspect;
        let dir = Vec3::new(ndc.x * half_w, ndc.y * half_h, -1.0).normalize();
        (self.position, dir)
    }

    /// Project a world-space point to NDC; `None` when it lies behind the eye.
    pub fn project(&self, world: Vec3) -> Option<Vec3> {
        let clip = self.view_proj() * Vec4::from((world, 1.0));
        (clip.w > 0.0).then(|| clip.truncate() / clip.w)
    }
}
