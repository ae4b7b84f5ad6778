use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while opening a frame source or running the pipeline.
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("frame directory not found: {path}")]
    MissingFrameDir { path: PathBuf },

    #[error("frame directory contains no PNG frames: {path}")]
    EmptyFrameDir { path: PathBuf },

    #[error("failed to scan frame directory: {0}")]
    DirRead(#[source] std::io::Error),

    #[error("failed to encode frame: {0}")]
    Encode(#[source] image::ImageError),

    #[error("failed to spawn vision worker '{name}': {source}")]
    WorkerSpawn {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },
}
