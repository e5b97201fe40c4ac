pub mod config;
pub mod error;
pub mod metrics;
pub mod plate_detection;
pub mod scanner;

use config::ScannerConfig;
use error::Result;
use plate_detection::object_detector::CascadeDetector;
use plate_detection::plate_store::{JpegWriter, PlateStore};
use plate_detection::preview::HighguiPreview;
use plate_detection::video_reader::WebcamReader;
use scanner::PlateScanner;

pub type WebcamScanner = PlateScanner<WebcamReader, CascadeDetector, HighguiPreview, JpegWriter>;

/// Loads the cascade, opens the camera, prepares the output directory and
/// the preview windows, in that order. Any failure here is fatal.
pub fn open(config: ScannerConfig) -> Result<WebcamScanner> {
    let detector = CascadeDetector::plate_detector(&config)?;
    let source = WebcamReader::open(&config)?;
    let store = PlateStore::create(&config.output_dir, JpegWriter::default())?;
    let preview = HighguiPreview::open()?;

    PlateScanner::new(config, source, detector, preview, store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScannerError;

    #[test]
    fn missing_cascade_fails_before_touching_camera_or_disk() {
        let output_dir = std::env::temp_dir().join(format!(
            "plate_scanner_open_{}",
            std::process::id()
        ));
        let config = ScannerConfig {
            cascade_path: "model/missing_cascade.xml".into(),
            output_dir: output_dir.clone(),
            camera_index: 99,
            ..ScannerConfig::default()
        };

        let err = open(config).err().unwrap();
        assert!(matches!(err, ScannerError::CascadeNotFound { .. }));
        assert!(err.to_string().starts_with("could not find cascade"));
        assert!(!output_dir.exists());
    }
}
