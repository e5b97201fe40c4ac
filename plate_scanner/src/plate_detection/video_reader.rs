use log::{info, warn};
use opencv::prelude::Mat;
use opencv::prelude::MatTraitConst;
use opencv::prelude::VideoCaptureTrait;
use opencv::prelude::VideoCaptureTraitConst;
use opencv::videoio::VideoCapture;
use opencv::videoio::CAP_ANY;
use opencv::videoio::CAP_PROP_FRAME_HEIGHT;
use opencv::videoio::CAP_PROP_FRAME_WIDTH;

use crate::config::ScannerConfig;
use crate::error::{Result, ScannerError};
use crate::plate_detection::FrameSource;

/// Live frames from a local camera.
pub struct WebcamReader {
    capture: VideoCapture,
    released: bool,
}

impl WebcamReader {
    pub fn open(config: &ScannerConfig) -> Result<Self> {
        let index = config.camera_index;
        let mut capture = VideoCapture::new(index, CAP_ANY)
            .map_err(|_| ScannerError::CameraUnavailable { index })?;
        if !capture.is_opened()? {
            return Err(ScannerError::CameraUnavailable { index });
        }

        // The driver is free to pick a different size.
        for (prop, value, name) in [
            (CAP_PROP_FRAME_WIDTH, config.frame_width, "width"),
            (CAP_PROP_FRAME_HEIGHT, config.frame_height, "height"),
        ] {
            if !capture.set(prop, value as f64)? {
                warn!("Camera {index} ignored requested frame {name} {value}");
            }
        }
        info!("Opened camera {index}");

        Ok(Self {
            capture,
            released: false,
        })
    }
}

impl FrameSource for WebcamReader {
    fn next_frame(&mut self) -> Result<Option<Mat>> {
        let mut image = Mat::default();
        let grabbed = self.capture.read(&mut image)?;

        if !grabbed || image.empty() {
            return Ok(None);
        }
        Ok(Some(image))
    }

    fn release(&mut self) -> Result<()> {
        if !self.released {
            self.released = true;
            self.capture.release()?;
        }
        Ok(())
    }
}

impl Drop for WebcamReader {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            warn!("Failed to release camera: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_camera_is_reported_as_unavailable() {
        let config = ScannerConfig {
            camera_index: 99,
            ..ScannerConfig::default()
        };

        let err = WebcamReader::open(&config).err().unwrap();
        assert!(matches!(err, ScannerError::CameraUnavailable { index: 99 }));
        assert!(err.to_string().starts_with("could not open webcam"));
    }
}
