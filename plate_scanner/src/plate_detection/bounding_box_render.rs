use opencv::core::Point;
use opencv::core::Rect;
use opencv::core::Scalar;
use opencv::imgproc::put_text;
use opencv::imgproc::rectangle;
use opencv::imgproc::FILLED;
use opencv::imgproc::FONT_HERSHEY_COMPLEX_SMALL;
use opencv::imgproc::LINE_8;
use opencv::prelude::Mat;
use opencv::prelude::MatTraitConst;

use crate::error::Result;

pub const PLATE_LABEL: &str = "Number Plate";
pub const SAVED_LABEL: &str = "Plate Saved";

// BGR
fn green() -> Scalar {
    Scalar::new(0.0, 255.0, 0.0, 0.0)
}

fn magenta() -> Scalar {
    Scalar::new(255.0, 0.0, 255.0, 0.0)
}

fn red() -> Scalar {
    Scalar::new(0.0, 0.0, 255.0, 0.0)
}

pub fn passes_area_filter(rect: &Rect, min_area: i32) -> bool {
    i64::from(rect.width) * i64::from(rect.height) >= i64::from(min_area)
}

/// Intersection of `rect` with the image bounds, or `None` if they do not
/// overlap.
pub fn clip_to_frame(rect: &Rect, image: &Mat) -> Option<Rect> {
    let bounds = Rect::new(0, 0, image.cols(), image.rows());
    let clipped = *rect & bounds;
    if clipped.width <= 0 || clipped.height <= 0 {
        None
    } else {
        Some(clipped)
    }
}

/// Outline a candidate plate and label it just above its top edge.
pub fn draw_plate(image: &mut Mat, plate: &Rect) -> Result<()> {
    let thickness_px = 2;
    rectangle(image, *plate, green(), thickness_px, LINE_8, 0)?;
    put_text(
        image,
        PLATE_LABEL,
        Point::new(plate.x, plate.y - 5),
        FONT_HERSHEY_COMPLEX_SMALL,
        1.0,
        magenta(),
        thickness_px,
        LINE_8,
        false,
    )?;
    Ok(())
}

/// Filled band across the middle of a 640x480 preview with a red caption.
pub fn draw_saved_banner(image: &mut Mat) -> Result<()> {
    let banner = Rect::new(0, 200, 640, 100);
    rectangle(image, banner, green(), FILLED, LINE_8, 0)?;
    put_text(
        image,
        SAVED_LABEL,
        Point::new(140, 265),
        FONT_HERSHEY_COMPLEX_SMALL,
        2.0,
        red(),
        2,
        LINE_8,
        false,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::Vec3b;
    use opencv::core::CV_8UC3;

    fn black_frame() -> Mat {
        Mat::new_rows_cols_with_default(480, 640, CV_8UC3, Scalar::all(0.0)).unwrap()
    }

    fn pixel(image: &Mat, x: i32, y: i32) -> [u8; 3] {
        image.at_2d::<Vec3b>(y, x).unwrap().0
    }

    #[test]
    fn area_filter_threshold_is_inclusive() {
        assert!(passes_area_filter(&Rect::new(0, 0, 30, 30), 500));
        assert!(passes_area_filter(&Rect::new(0, 0, 25, 20), 500));
        assert!(!passes_area_filter(&Rect::new(0, 0, 10, 10), 500));
        assert!(!passes_area_filter(&Rect::new(0, 0, 0, 900), 500));
    }

    #[test]
    fn area_filter_does_not_overflow_on_huge_rects() {
        assert!(passes_area_filter(&Rect::new(0, 0, 65_536, 65_536), 500));
        assert!(passes_area_filter(&Rect::new(0, 0, i32::MAX, i32::MAX), 500));
    }

    #[test]
    fn clip_keeps_inside_rect_and_trims_overhang() {
        let frame = black_frame();
        let inside = Rect::new(10, 10, 30, 30);
        assert_eq!(clip_to_frame(&inside, &frame), Some(inside));
        assert_eq!(
            clip_to_frame(&Rect::new(620, 470, 40, 20), &frame),
            Some(Rect::new(620, 470, 20, 10))
        );
        assert_eq!(clip_to_frame(&Rect::new(700, 10, 30, 30), &frame), None);
    }

    #[test]
    fn plate_outline_is_green() {
        let mut frame = black_frame();
        draw_plate(&mut frame, &Rect::new(100, 100, 60, 20)).unwrap();
        assert_eq!(pixel(&frame, 100, 110), [0, 255, 0]);
        // interior stays untouched
        assert_eq!(pixel(&frame, 130, 110), [0, 0, 0]);
    }

    #[test]
    fn banner_fills_band() {
        let mut frame = black_frame();
        draw_saved_banner(&mut frame).unwrap();
        assert_eq!(pixel(&frame, 5, 205), [0, 255, 0]);
        assert_eq!(pixel(&frame, 5, 150), [0, 0, 0]);
        assert_eq!(pixel(&frame, 5, 350), [0, 0, 0]);
    }
}
