use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("map dimensions are not usable: container {container_w}x{container_h}, content {content_w}x{content_h}")]
    DegenerateDimensions {
        container_w: f64,
        container_h: f64,
        content_w: f64,
        content_h: f64,
    },
    #[error("invalid map config: {0}")]
    InvalidConfig(String),
    #[error("map config is not valid json: {0}")]
    ConfigJson(#[from] serde_json::Error),
}
