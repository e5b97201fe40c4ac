use std::path::PathBuf;
use std::time::Duration;

pub const CASCADE_PATH: &str = "model/haarcascade_russian_plate_number.xml";
pub const SAVE_DIR: &str = "plates";
pub const RESULT_WINDOW: &str = "Result";
pub const ROI_WINDOW: &str = "ROI";

/// Fixed parameters of a scanning session. Nothing here changes once the
/// scanner is running.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    pub cascade_path: PathBuf,
    pub output_dir: PathBuf,
    pub camera_index: i32,
    pub frame_width: i32,
    pub frame_height: i32,
    /// Detections covering fewer pixels than this are ignored.
    pub min_area: i32,
    pub scale_factor: f64,
    pub min_neighbors: i32,
    pub key_poll_delay: Duration,
    pub confirmation_hold: Duration,
    pub keys: KeyBindings,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            cascade_path: PathBuf::from(CASCADE_PATH),
            output_dir: PathBuf::from(SAVE_DIR),
            camera_index: 0,
            frame_width: 640,
            frame_height: 480,
            min_area: 500,
            scale_factor: 1.1,
            min_neighbors: 4,
            key_poll_delay: Duration::from_millis(1),
            confirmation_hold: Duration::from_millis(400),
            keys: KeyBindings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Save,
    Quit,
}

#[derive(Debug, Clone, Copy)]
pub struct KeyBindings {
    pub save: u8,
    pub quit: u8,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            save: b's',
            quit: b'q',
        }
    }
}

impl KeyBindings {
    /// Case sensitive: `S` with caps lock on does nothing.
    pub fn action(&self, key: u8) -> Option<KeyAction> {
        if key == self.quit {
            Some(KeyAction::Quit)
        } else if key == self.save {
            Some(KeyAction::Save)
        } else {
            None
        }
    }

    pub fn help(&self) -> String {
        format!(
            "Press {} to save a detected plate, {} to quit.",
            self.save.to_ascii_uppercase() as char,
            self.quit.to_ascii_uppercase() as char
        )
    }
}
