use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while finding, loading and configuring slides.
#[derive(Debug, Error)]
pub enum Error {
    /// The photo directory is missing or not a directory.
    #[error("photos directory not found: {}", .0.display())]
    BadDir(PathBuf),

    /// An image could not be read, decoded or uploaded to the GPU.
    #[error("could not load image {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    /// GPU resource creation failed.
    #[error("render error: {0}")]
    Render(String),

    /// Underlying IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML configuration error.
    #[error(transparent)]
    Config(#[from] serde_yaml::Error),
}

impl Error {
    pub fn load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::Load {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
