use log::warn;
use opencv::highgui;
use opencv::prelude::Mat;

use crate::config::{RESULT_WINDOW, ROI_WINDOW};
use crate::error::Result;
use crate::plate_detection::PreviewSurface;

/// On-screen preview backed by highgui windows.
pub struct HighguiPreview {
    closed: bool,
}

impl HighguiPreview {
    pub fn open() -> Result<Self> {
        highgui::named_window(RESULT_WINDOW, highgui::WINDOW_AUTOSIZE)?;
        highgui::named_window(ROI_WINDOW, highgui::WINDOW_AUTOSIZE)?;
        Ok(Self { closed: false })
    }
}

/// Maps a raw `wait_key` code to its low byte; negative codes mean no key.
pub fn key_from_code(code: i32) -> Option<u8> {
    if code < 0 {
        None
    } else {
        Some((code & 0xFF) as u8)
    }
}

impl PreviewSurface for HighguiPreview {
    fn show(&mut self, window: &str, image: &Mat) -> Result<()> {
        highgui::imshow(window, image)?;
        Ok(())
    }

    fn poll_key(&mut self, delay_ms: i32) -> Result<Option<u8>> {
        Ok(key_from_code(highgui::wait_key(delay_ms)?))
    }

    fn close(&mut self) -> Result<()> {
        if !self.closed {
            self.closed = true;
            highgui::destroy_all_windows()?;
        }
        Ok(())
    }
}

impl Drop for HighguiPreview {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            warn!("Failed to close preview windows: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_codes_keep_low_byte() {
        assert_eq!(key_from_code(-1), None);
        assert_eq!(key_from_code(b'q' as i32), Some(b'q'));
        // modifier bits some backends set above the first byte
        assert_eq!(key_from_code(0x10_0000 | b's' as i32), Some(b's'));
    }
}
