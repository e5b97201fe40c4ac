use log::{debug, error, info, warn};
use opencv::core::Rect;
use opencv::imgproc::cvt_color;
use opencv::imgproc::COLOR_BGR2GRAY;
use opencv::prelude::Mat;
use opencv::prelude::MatTraitConst;

use crate::config::{KeyAction, ScannerConfig, RESULT_WINDOW, ROI_WINDOW};
use crate::error::Result;
use crate::metrics::ScannerMetrics;
use crate::plate_detection::bounding_box_render::{
    clip_to_frame, draw_plate, draw_saved_banner, passes_area_filter,
};
use crate::plate_detection::plate_store::PlateStore;
use crate::plate_detection::{FrameSource, PlateDetector, PlateWriter, PreviewSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Quit,
    StreamEnded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Quit,
    StreamEnded,
}

/// The capture, detect, display and save loop.
pub struct PlateScanner<S, D, P, W>
where
    S: FrameSource,
    D: PlateDetector,
    P: PreviewSurface,
    W: PlateWriter,
{
    config: ScannerConfig,
    source: S,
    detector: D,
    preview: P,
    store: PlateStore<W>,
    metrics: ScannerMetrics,
}

// wait_key(0) blocks until a key arrives.
fn delay_ms(delay: std::time::Duration) -> i32 {
    delay.as_millis().clamp(1, i32::MAX as u128) as i32
}

impl<S, D, P, W> PlateScanner<S, D, P, W>
where
    S: FrameSource,
    D: PlateDetector,
    P: PreviewSurface,
    W: PlateWriter,
{
    pub fn new(
        config: ScannerConfig,
        source: S,
        detector: D,
        preview: P,
        store: PlateStore<W>,
    ) -> Result<Self> {
        Ok(Self {
            config,
            source,
            detector,
            preview,
            store,
            metrics: ScannerMetrics::new()?,
        })
    }

    pub fn store(&self) -> &PlateStore<W> {
        &self.store
    }

    pub fn metrics(&self) -> &ScannerMetrics {
        &self.metrics
    }

    /// Runs until the operator quits, the source dries up or an OpenCV call
    /// fails. The camera and windows are released on every one of those paths.
    pub fn run(mut self) -> Result<ExitReason> {
        info!("{}", self.config.keys.help());

        let exit = loop {
            match self.step() {
                Ok(StepOutcome::Continue) => continue,
                Ok(StepOutcome::Quit) => break Ok(ExitReason::Quit),
                Ok(StepOutcome::StreamEnded) => break Ok(ExitReason::StreamEnded),
                Err(err) => break Err(err),
            }
        };

        self.shutdown();
        exit
    }

    /// One pass of the loop over a single frame.
    pub fn step(&mut self) -> Result<StepOutcome> {
        let mut frame = match self.source.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                error!("Failed to grab frame. Exiting.");
                return Ok(StepOutcome::StreamEnded);
            }
            Err(err) => {
                error!("Failed to grab frame ({err}). Exiting.");
                return Ok(StepOutcome::StreamEnded);
            }
        };
        self.metrics.frames.inc();

        let mut gray = Mat::default();
        cvt_color(&frame, &mut gray, COLOR_BGR2GRAY, 0)?;
        let plates = self.detector.detect(&gray)?;

        // Last qualifying detection wins, whatever its size.
        let mut roi: Option<Rect> = None;
        for plate in plates.iter() {
            if !passes_area_filter(&plate, self.config.min_area) {
                self.metrics.detections_rejected.inc();
                continue;
            }
            self.metrics.detections.inc();

            draw_plate(&mut frame, &plate)?;
            if let Some(region) = clip_to_frame(&plate, &frame) {
                roi = Some(region);
                let view = frame.apply_1(region)?;
                self.preview.show(ROI_WINDOW, &view)?;
            }
        }
        debug!(
            "{} detections, plate {}",
            plates.len(),
            if roi.is_some() { "found" } else { "missing" }
        );

        self.preview.show(RESULT_WINDOW, &frame)?;

        let key = self
            .preview
            .poll_key(delay_ms(self.config.key_poll_delay))?;
        match key.and_then(|key| self.config.keys.action(key)) {
            Some(KeyAction::Quit) => Ok(StepOutcome::Quit),
            Some(KeyAction::Save) => {
                if let Some(region) = roi {
                    self.save_plate(&mut frame, region)?;
                }
                Ok(StepOutcome::Continue)
            }
            None => Ok(StepOutcome::Continue),
        }
    }

    fn save_plate(&mut self, frame: &mut Mat, region: Rect) -> Result<()> {
        let plate = frame.apply_1(region)?.try_clone()?;
        let target = self.store.next_path();

        match self.store.save(&plate) {
            Ok(path) => {
                info!("Saved {}", path.display());
                self.metrics.plates_saved.inc();

                draw_saved_banner(frame)?;
                self.preview.show(RESULT_WINDOW, frame)?;
                self.preview
                    .poll_key(delay_ms(self.config.confirmation_hold))?;
            }
            Err(err) => {
                error!("Could not save plate to {}: {err}", target.display());
                self.metrics.save_failures.inc();
            }
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        if let Err(err) = self.source.release() {
            warn!("Failed to release capture source: {err}");
        }
        if let Err(err) = self.preview.close() {
            warn!("Failed to close preview: {err}");
        }

        info!("Scanner stopped: {}", self.metrics.summary());
        match self.metrics.render() {
            Ok(text) => debug!("{text}"),
            Err(err) => warn!("Cannot render metrics: {err}"),
        }
    }
}
