// Frame, interaction and render tuning constants for the web layer.
//
// Layout and animation constants shared with host tests live in
// `core::constants`; these only matter once a canvas exists.

// DOM hooks
pub const WORDMARK_ID: &str = "sphere-wordmark";
pub const HEADLINE_ID: &str = "sphere-headline";

// Backing store is canvas CSS size times devicePixelRatio, capped here
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

// Decoded tiles copied into the atlases per frame; the rest wait a frame
pub const UPLOADS_PER_FRAME: usize = 12;

// Frame statistics cadence (frames between `[frame]` debug logs)
pub const FPS_LOG_INTERVAL: u64 = 600;

// Scene clear color (black page background)
pub const CLEAR_RGBA: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

// Vignette: transparent inside INNER, MID_ALPHA black at MID, OUTER_ALPHA at the corners.
// Distances are normalized to the center-to-corner length.
pub const VIGNETTE_INNER: f32 = 0.2;
pub const VIGNETTE_MID: f32 = 0.6;
pub const VIGNETTE_MID_ALPHA: f32 = 0.5;
pub const VIGNETTE_OUTER_ALPHA: f32 = 0.95;

// Caption raster (logical canvas pixels before scaling into the atlas tile)
pub const CAPTION_FONT: &str = "16px \"Google Sans\", sans-serif";
pub const CAPTION_FILL: &str = "rgba(255, 255, 255, 0.8)";
pub const CAPTION_TEXT_X: f64 = 10.0;
pub const CAPTION_LINE_Y: [f64; 2] = [24.0, 44.0];
