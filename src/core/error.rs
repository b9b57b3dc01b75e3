use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("viewport not ready ({width}x{height})")]
    DegenerateViewport { width: f32, height: f32 },
    #[error("particle field must contain at least one particle")]
    EmptyField,
}
