use prometheus::{Encoder, IntCounter, Opts, Registry, TextEncoder};

use crate::error::Result;

/// Loop counters. Each scanner owns its own registry so that two scanners
/// (or two tests) never share counts.
pub struct ScannerMetrics {
    registry: Registry,
    pub frames: IntCounter,
    pub detections: IntCounter,
    pub detections_rejected: IntCounter,
    pub plates_saved: IntCounter,
    pub save_failures: IntCounter,
}

fn counter(registry: &Registry, name: &str, help: &str) -> Result<IntCounter> {
    let counter = IntCounter::with_opts(Opts::new(name, help))?;
    registry.register(Box::new(counter.clone()))?;
    Ok(counter)
}

impl ScannerMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        Ok(Self {
            frames: counter(&registry, "plate_scanner_frames_total", "Frames read")?,
            detections: counter(
                &registry,
                "plate_scanner_detections_total",
                "Detections that passed the area filter",
            )?,
            detections_rejected: counter(
                &registry,
                "plate_scanner_detections_rejected_total",
                "Detections dropped for being too small",
            )?,
            plates_saved: counter(&registry, "plate_scanner_plates_saved_total", "Plates saved")?,
            save_failures: counter(
                &registry,
                "plate_scanner_save_failures_total",
                "Plate saves the encoder or filesystem refused",
            )?,
            registry,
        })
    }

    /// Prometheus text exposition of every counter.
    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    pub fn summary(&self) -> String {
        format!(
            "{} frames, {} plates detected, {} too small, {} saved, {} failed saves",
            self.frames.get(),
            self.detections.get(),
            self.detections_rejected.get(),
            self.plates_saved.get(),
            self.save_failures.get()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_lists_every_counter() {
        let metrics = ScannerMetrics::new().unwrap();
        metrics.frames.inc_by(3);
        metrics.plates_saved.inc();

        let text = metrics.render().unwrap();
        assert!(text.contains("plate_scanner_frames_total 3"));
        assert!(text.contains("plate_scanner_plates_saved_total 1"));
        assert!(text.contains("plate_scanner_save_failures_total 0"));
    }

    #[test]
    fn registries_are_independent() {
        let first = ScannerMetrics::new().unwrap();
        let second = ScannerMetrics::new().unwrap();
        first.frames.inc();
        assert_eq!(second.frames.get(), 0);
        assert_eq!(
            first.summary(),
            "1 frames, 0 plates detected, 0 too small, 0 saved, 0 failed saves"
        );
    }
}
