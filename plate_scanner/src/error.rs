use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScannerError {
    #[error("could not find cascade at: {}", path.display())]
    CascadeNotFound { path: PathBuf },
    #[error("failed to load Haar cascade from {}", path.display())]
    CascadeLoad {
        path: PathBuf,
        #[source]
        source: opencv::Error,
    },
    #[error("failed to load Haar cascade (file is corrupt or wrong path): {}", path.display())]
    CascadeEmpty { path: PathBuf },
    #[error("could not open webcam {index}. Is it in use by another app?")]
    CameraUnavailable { index: i32 },
    #[error("cannot create output directory {}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("encoder refused to write {}", path.display())]
    EncodeFailed { path: PathBuf },
    #[error(transparent)]
    OpenCv(#[from] opencv::Error),
    #[error(transparent)]
    Metrics(#[from] prometheus::Error),
}

pub type Result<T> = std::result::Result<T, ScannerError>;
