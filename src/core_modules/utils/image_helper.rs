// Boundary adapters between raster images and the voting engine. Nothing in here
// is part of the accumulation itself: points go in as plain coordinates, and the
// field comes out as a grayscale dump for inspection.

pub mod image_helper {
    use crate::core_modules::accumulator::AccumulatorField;
    use crate::core_modules::point::point::Point;
    use crate::error::Result;
    use image::{GrayImage, ImageEncoder, Luma};
    use log::debug;
    use std::path::Path;

    /// Brightness a pixel must have to count as edge evidence.
    pub const DEFAULT_LEVEL: u8 = 255;

    /// Every pixel whose brightness equals `level`, in row-major order.
    /// `x` is the column and `y` the row.
    pub fn bright_points(image: &GrayImage, level: u8) -> Vec<Point> {
        image
            .enumerate_pixels()
            .filter(|(_, _, pixel)| pixel[0] == level)
            .map(|(x, y, _)| Point::from((x, y)))
            .collect()
    }

    /// A raster reduced to its edge points plus the dimensions the grid needs.
    #[derive(Debug, Clone)]
    pub struct PointSet {
        pub points: Vec<Point>,
        pub height: u32,
        pub width: u32,
    }

    /// Opens an image, converts it to 8-bit grayscale and extracts its bright points.
    pub fn load_bright_points<P: AsRef<Path>>(path: P, level: u8) -> Result<PointSet> {
        let image = image::open(path.as_ref())?.to_luma8();
        let (width, height) = image.dimensions();
        let points = bright_points(&image, level);
        debug!(
            "{}: {}x{} raster, {} points at level {}",
            path.as_ref().display(),
            width,
            height,
            points.len(),
            level
        );
        Ok(PointSet {
            points,
            height,
            width,
        })
    }

    /// Scales the field to 0..=255 against its maximum. Rows are axis A.
    pub fn field_to_luma(field: &AccumulatorField) -> GrayImage {
        let (rows, cols) = field.shape();
        let max = field.max();
        let scale = if max > 0.0 { 255.0 / max } else { 0.0 };
        let mut out = GrayImage::new(cols as u32, rows as u32);
        for (i, &v) in field.as_slice().iter().enumerate() {
            let level = (v * scale).round().clamp(0.0, 255.0) as u8;
            out.put_pixel((i % cols) as u32, (i / cols) as u32, Luma([level]));
        }
        out
    }

    /// Writes the normalized field as a grayscale PNG.
    pub fn save_field<P: AsRef<Path>>(path: P, field: &AccumulatorField) -> Result<()> {
        let luma = field_to_luma(field);
        let output = std::fs::File::create(path)?;
        let encoder = image::codecs::png::PngEncoder::new(output);

        encoder.write_image(
            luma.as_raw(),
            luma.width(),
            luma.height(),
            image::ExtendedColorType::L8,
        )?;

        Ok(())
    }
}
