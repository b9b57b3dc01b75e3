// Shared layout and visual tuning constants for the sphere scene.

// Field layout
pub const POINT_COUNT: usize = 1500;
pub const SPHERE_RADIUS: f32 = 2.0;
pub const RADIUS_JITTER: f32 = 1.2; // total spread of the per-point radius offset

// Tile geometry (local units, particle frame)
pub const TILE_SIZE: f32 = 0.08;
pub const CAPTION_WIDTH: f32 = 0.08;
pub const CAPTION_HEIGHT: f32 = 0.02;
pub const CAPTION_OFFSET_Y: f32 = -0.05; // caption sits below the image
pub const IMAGE_LAYER_Z: f32 = 0.001;
pub const CAPTION_LAYER_Z: f32 = 0.002;

// Opacity shaping
pub const BASE_OPACITY_MIN: f32 = 0.1; // base tile opacity at the far side of the shell
pub const CAPTION_OPACITY_SCALE: f32 = 0.8;

// Interaction
pub const HOVER_SCALE: f32 = 2.0;
pub const AUTO_ROTATION_STEP: f32 = -0.0005; // radians per frame, left to right

// Interpolator decay constants (per frame)
pub const FAST_SMOOTHING: f32 = 0.05; // camera pose, rotation, scene scale
pub const MEDIUM_SMOOTHING: f32 = 0.1; // particle opacity channels, hover scale

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

// Headline typography
pub const HEADLINE_WEIGHT_MIN: f32 = 100.0;
pub const HEADLINE_WEIGHT_MAX: f32 = 500.0;

// Flat color used when an image cannot be loaded (#888888)
pub const FALLBACK_GRAY: [f32; 3] = [0.533, 0.533, 0.533];

// Atlas tiles (texels)
pub const IMAGE_TILE_PX: u32 = 128;
pub const CAPTION_TILE_W_PX: u32 = 256;
pub const CAPTION_TILE_H_PX: u32 = 64;
pub const ATLAS_MAX_DIM: u32 = 8192;
