use std::path::Path;

use log::info;
use opencv::core::Rect;
use opencv::core::Size;
use opencv::core::Vector;
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::CascadeClassifierTrait;
use opencv::prelude::CascadeClassifierTraitConst;
use opencv::prelude::Mat;

use crate::config::ScannerConfig;
use crate::error::{Result, ScannerError};
use crate::plate_detection::PlateDetector;

/// Haar cascade detector run at a fixed scale step and neighbor count.
pub struct CascadeDetector {
    classifier: CascadeClassifier,
    scale_factor: f64,
    min_neighbors: i32,
}

impl CascadeDetector {
    pub fn plate_detector(config: &ScannerConfig) -> Result<Self> {
        Self::from_file(&config.cascade_path, config.scale_factor, config.min_neighbors)
    }

    pub fn from_file(path: &Path, scale_factor: f64, min_neighbors: i32) -> Result<Self> {
        if !path.exists() {
            return Err(ScannerError::CascadeNotFound {
                path: path.to_path_buf(),
            });
        }

        let classifier = CascadeClassifier::new(&path.to_string_lossy()).map_err(|source| {
            ScannerError::CascadeLoad {
                path: path.to_path_buf(),
                source,
            }
        })?;
        if classifier.empty()? {
            return Err(ScannerError::CascadeEmpty {
                path: path.to_path_buf(),
            });
        }
        info!("Loaded cascade {}", path.display());

        Ok(Self {
            classifier,
            scale_factor,
            min_neighbors,
        })
    }
}

impl PlateDetector for CascadeDetector {
    fn detect(&mut self, gray: &Mat) -> Result<Vector<Rect>> {
        let mut plates = Vector::<Rect>::new();
        self.classifier.detect_multi_scale(
            gray,
            &mut plates,
            self.scale_factor,
            self.min_neighbors,
            0,
            Size::default(),
            Size::default(),
        )?;
        Ok(plates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_cascade_is_reported_by_path() {
        let path = Path::new("model/does_not_exist.xml");
        let err = CascadeDetector::from_file(path, 1.1, 4).err().unwrap();
        assert!(matches!(err, ScannerError::CascadeNotFound { .. }));
        assert_eq!(
            err.to_string(),
            "could not find cascade at: model/does_not_exist.xml"
        );
    }

    #[test]
    fn garbage_cascade_is_rejected() {
        let dir = std::env::temp_dir().join(format!("plate_scanner_cascade_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.xml");
        fs::write(&path, "<opencv_storage></opencv_storage>").unwrap();

        let err = CascadeDetector::from_file(&path, 1.1, 4).err().unwrap();
        assert!(matches!(
            err,
            ScannerError::CascadeEmpty { .. } | ScannerError::CascadeLoad { .. }
        ));
        fs::remove_dir_all(&dir).unwrap();
    }
}
