pub mod bounding_box_render;
pub mod object_detector;
pub mod plate_store;
pub mod preview;
pub mod video_reader;

use std::path::Path;

use opencv::core::Rect;
use opencv::core::Vector;
use opencv::prelude::Mat;

use crate::error::Result;

/// Produces color frames on demand.
pub trait FrameSource {
    /// `Ok(None)` when the source has nothing more to give.
    fn next_frame(&mut self) -> Result<Option<Mat>>;
    fn release(&mut self) -> Result<()>;
}

/// Finds plate-like rectangles in a grayscale image.
pub trait PlateDetector {
    fn detect(&mut self, gray: &Mat) -> Result<Vector<Rect>>;
}

pub trait PreviewSurface {
    fn show(&mut self, window: &str, image: &Mat) -> Result<()>;
    /// Waits at most `delay_ms` for a key press and returns its low byte.
    fn poll_key(&mut self, delay_ms: i32) -> Result<Option<u8>>;
    fn close(&mut self) -> Result<()>;
}

/// Encodes an image to a file on disk.
pub trait PlateWriter {
    fn write(&mut self, path: &Path, image: &Mat) -> Result<()>;
}
