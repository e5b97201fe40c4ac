use std::fs;
use std::path::Path;
use std::path::PathBuf;

use opencv::core::Vector;
use opencv::imgcodecs::imwrite;
use opencv::prelude::Mat;

use crate::error::{Result, ScannerError};
use crate::plate_detection::PlateWriter;

/// Writes images with the JPEG encoder picked from the file extension.
#[derive(Default)]
pub struct JpegWriter {}

impl PlateWriter for JpegWriter {
    fn write(&mut self, path: &Path, image: &Mat) -> Result<()> {
        let written = imwrite(&path.to_string_lossy(), image, &Vector::<i32>::new())?;
        if !written {
            return Err(ScannerError::EncodeFailed {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }
}

/// Sequentially numbered plate crops in one directory.
pub struct PlateStore<W: PlateWriter> {
    dir: PathBuf,
    counter: u32,
    writer: W,
}

impl<W: PlateWriter> PlateStore<W> {
    pub fn create(dir: impl Into<PathBuf>, writer: W) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| ScannerError::OutputDir {
            path: dir.clone(),
            source,
        })?;
        Ok(Self {
            dir,
            counter: 0,
            writer,
        })
    }

    pub fn next_path(&self) -> PathBuf {
        self.dir.join(format!("scanned_{:03}.jpg", self.counter))
    }

    pub fn saved_count(&self) -> u32 {
        self.counter
    }

    /// The counter only moves once the writer reports success.
    pub fn save(&mut self, plate: &Mat) -> Result<PathBuf> {
        let path = self.next_path();
        self.writer.write(&path, plate)?;
        self.counter += 1;
        Ok(path)
    }
}
