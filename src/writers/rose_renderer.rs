//! Raster wind-rose chart.
//!
//! Draws a stacked polar histogram straight into an RGBA canvas and encodes
//! it as PNG. North is up, bearings run clockwise, wedges are stacked from
//! the slowest speed bin outwards.

use crate::error::{ProcessingError, Result};
use crate::models::{CompassPoint, ObservationSet};
use crate::processors::WindRoseHistogram;
use crate::utils::constants::{
    CHART_FILE_NAME, DEFAULT_CHART_SIZE, DEFAULT_SPEED_BINS, DEFAULT_WEDGE_OPENING,
};
use crate::utils::settings::ChartSettings;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

const BACKGROUND: [u8; 4] = [255, 255, 255, 255];
const GRID: [u8; 4] = [200, 200, 200, 255];
const OUTLINE: [u8; 4] = [40, 40, 40, 255];

/// Viridis stops, slowest bin first.
const PALETTE: [[u8; 4]; 8] = [
    [68, 1, 84, 255],
    [70, 50, 126, 255],
    [54, 92, 141, 255],
    [39, 127, 142, 255],
    [31, 161, 135, 255],
    [74, 193, 109, 255],
    [160, 218, 57, 255],
    [253, 231, 37, 255],
];

/// Encoded chart ready to hand to the messaging gateway.
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    /// Speed range of each colour, slowest first.
    pub legend: Vec<String>,
}

/// Turns normalized observations into an image.
pub trait ChartRenderer: Send + Sync {
    fn render(&self, observations: &ObservationSet) -> Result<RenderedChart>;
}

pub struct RasterRoseRenderer {
    size: u32,
    opening: f64,
    speed_bins: usize,
}

impl RasterRoseRenderer {
    pub fn new() -> Self {
        Self {
            size: DEFAULT_CHART_SIZE,
            opening: DEFAULT_WEDGE_OPENING,
            speed_bins: DEFAULT_SPEED_BINS,
        }
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn with_opening(mut self, opening: f64) -> Self {
        self.opening = opening.clamp(0.05, 1.0);
        self
    }

    pub fn with_speed_bins(mut self, speed_bins: usize) -> Self {
        self.speed_bins = speed_bins.max(1);
        self
    }

    pub fn from_settings(settings: &ChartSettings) -> Self {
        Self::new()
            .with_size(settings.size)
            .with_opening(settings.opening)
            .with_speed_bins(settings.speed_bins)
    }

    /// Draw the histogram onto a fresh canvas.
    pub fn draw(&self, histogram: &WindRoseHistogram) -> Result<RgbaImage> {
        let max_total = histogram.max_sector_total();
        if max_total <= 0.0 {
            return Err(ProcessingError::Render(
                "no observations to plot".to_string(),
            ));
        }
        if self.size < 64 {
            return Err(ProcessingError::Render(format!(
                "canvas of {}px is too small",
                self.size
            )));
        }

        let mut canvas = RgbaImage::from_pixel(self.size, self.size, Rgba(BACKGROUND));
        let geometry = Geometry::new(self.size);
        let half_wedge = self.opening * CompassPoint::SECTOR_WIDTH / 2.0;
        let bins = histogram.bin_count();

        for (x, y, pixel) in canvas.enumerate_pixels_mut() {
            let dx = x as f64 + 0.5 - geometry.cx;
            let dy = y as f64 + 0.5 - geometry.cy;
            let distance = (dx * dx + dy * dy).sqrt();
            if distance > geometry.radius + 1.0 {
                continue;
            }

            // Bearing clockwise from north with y growing downwards
            let bearing = dx.atan2(-dy).to_degrees().rem_euclid(360.0);

            if distance <= geometry.radius {
                let point = CompassPoint::nearest(bearing);
                let offset = angular_distance(bearing, point.degrees());
                if offset <= half_wedge {
                    let level = distance / geometry.radius * max_total;
                    if let Some(bin) = stacked_bin(histogram, point, level) {
                        *pixel = Rgba(bin_color(bin, bins));
                        continue;
                    }
                }
            }

            if geometry.is_grid(distance, bearing) {
                *pixel = Rgba(GRID);
            }
        }

        self.draw_north_marker(&mut canvas, &geometry);
        self.draw_legend(&mut canvas, bins);
        Ok(canvas)
    }

    fn draw_north_marker(&self, canvas: &mut RgbaImage, geometry: &Geometry) {
        let radius = (self.size / 128).max(2) as i64;
        let cx = geometry.cx as i64;
        let cy = (geometry.cy - geometry.radius) as i64 - radius * 3;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    put(canvas, cx + dx, cy + dy, OUTLINE);
                }
            }
        }
    }

    fn draw_legend(&self, canvas: &mut RgbaImage, bins: usize) {
        let swatch = (self.size / 24).max(4) as i64;
        let gap = swatch / 2;
        let total_width = bins as i64 * swatch + (bins as i64 - 1) * gap;
        let left = (self.size as i64 - total_width) / 2;
        let top = self.size as i64 - swatch * 2;

        for bin in 0..bins {
            let x0 = left + bin as i64 * (swatch + gap);
            for y in top..top + swatch {
                for x in x0..x0 + swatch {
                    let border = y == top || y == top + swatch - 1 || x == x0 || x == x0 + swatch - 1;
                    let color = if border { OUTLINE } else { bin_color(bin, bins) };
                    put(canvas, x, y, color);
                }
            }
        }
    }
}

impl Default for RasterRoseRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartRenderer for RasterRoseRenderer {
    fn render(&self, observations: &ObservationSet) -> Result<RenderedChart> {
        let histogram = WindRoseHistogram::from_observations(observations, self.speed_bins);
        let canvas = self.draw(&histogram)?;
        let (width, height) = canvas.dimensions();

        let mut bytes = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(canvas).write_to(&mut bytes, ImageFormat::Png)?;

        Ok(RenderedChart {
            bytes: bytes.into_inner(),
            mime_type: "image/png",
            file_name: CHART_FILE_NAME.to_string(),
            width,
            height,
            legend: (0..histogram.bin_count())
                .map(|bin| histogram.bin_label(bin))
                .collect(),
        })
    }
}

struct Geometry {
    cx: f64,
    cy: f64,
    radius: f64,
}

impl Geometry {
    fn new(size: u32) -> Self {
        let size = size as f64;
        Self {
            cx: size / 2.0,
            cy: size * 0.45,
            radius: size * 0.38,
        }
    }

    /// Reference rings at quarter steps and spokes every 45 degrees.
    fn is_grid(&self, distance: f64, bearing: f64) -> bool {
        let on_ring = (1..=4).any(|i| {
            let ring = self.radius * i as f64 / 4.0;
            (distance - ring).abs() < 0.75
        });
        if on_ring {
            return true;
        }

        if distance > self.radius {
            return false;
        }
        (0..8).any(|i| {
            let offset = angular_distance(bearing, i as f64 * 45.0);
            offset < 90.0 && distance * offset.to_radians().sin() < 0.75
        })
    }
}

/// Smallest absolute difference between two bearings.
fn angular_distance(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(360.0);
    diff.min(360.0 - diff)
}

/// Speed bin whose stacked band covers `level` percent in the given sector.
fn stacked_bin(histogram: &WindRoseHistogram, point: CompassPoint, level: f64) -> Option<usize> {
    let mut cumulative = 0.0;
    for bin in 0..histogram.bin_count() {
        let frequency = histogram.frequency(point, bin);
        cumulative += frequency;
        if frequency > 0.0 && level <= cumulative {
            return Some(bin);
        }
    }
    None
}

fn bin_color(bin: usize, bins: usize) -> [u8; 4] {
    if bins <= 1 {
        return PALETTE[0];
    }
    PALETTE[bin * (PALETTE.len() - 1) / (bins - 1)]
}

fn put(canvas: &mut RgbaImage, x: i64, y: i64, color: [u8; 4]) {
    if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
        canvas.put_pixel(x as u32, y as u32, Rgba(color));
    }
}
