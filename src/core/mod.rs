pub mod atlas;
pub mod camera;
pub mod catalog;
pub mod constants;
pub mod crop;
pub mod error;
pub mod field;
pub mod phase;
pub mod picking;
pub mod scene;
pub mod tween;

pub use atlas::AtlasLayout;
pub use camera::{Camera, Viewport};
pub use catalog::{Caption, ImageCatalog};
pub use crop::{square_crop, UvRect};
pub use error::SceneError;
pub use field::{ParticleField, SceneConfig, SubElementKind, TextureState};
pub use phase::scroll_progress;
pub use picking::HoverTransition;
pub use scene::{FrameInput, OverlaySignals, SceneController};

// Shaders bundled as string constants
pub static SPHERE_WGSL: &str = include_str!("../../shaders/sphere.wgsl");
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");
