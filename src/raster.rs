//! Read-only raster access for the contour refiner.

use crate::geometry::tolerance::BORDER_SCORE;

/// Pixel color lookup by integer coordinates within image bounds. The
/// refiner is the only consumer; samples are never written.
pub trait RasterSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// RGB sample at `(x, y)`; callers stay within bounds.
    fn pixel(&self, x: u32, y: u32) -> [u8; 3];
}

/// Borrowed packed-RGB8 row-major buffer.
pub struct SliceRaster<'a> {
    width: u32,
    height: u32,
    data: &'a [u8],
}

impl<'a> SliceRaster<'a> {
    /// Wrap a packed RGB8 buffer; `data.len()` must be `width * height * 3`.
    pub fn new(width: u32, height: u32, data: &'a [u8]) -> Option<Self> {
        if data.len() != width as usize * height as usize * 3 {
            return None;
        }
        Some(SliceRaster { width, height, data })
    }
}

impl RasterSource for SliceRaster<'_> {
    fn width(&self) -> u32 {
        self.width
    }
    fn height(&self) -> u32 {
        self.height
    }
    fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = (y as usize * self.width as usize + x as usize) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}

// 3x3 gradient kernels, vertical and horizontal difference.
const KY: [[f64; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];
const KX: [[f64; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];

/// Local contrast at `(x, y)`: each kernel is applied per RGB channel over
/// the 3x3 neighborhood, the channel responses of a kernel are taken as a
/// vector whose Euclidean norm is that kernel's contribution, and the two
/// contributions are summed. Points on the image border are assigned the
/// maximum sentinel score instead of being sampled.
pub fn contrast_score(raster: &dyn RasterSource, x: i64, y: i64) -> f64 {
    let w = raster.width() as i64;
    let h = raster.height() as i64;
    if x < 1 || y < 1 || x + 1 >= w || y + 1 >= h {
        return BORDER_SCORE;
    }
    let mut gx = [0.0f64; 3];
    let mut gy = [0.0f64; 3];
    for dy in 0..3i64 {
        for dx in 0..3i64 {
            let px = raster.pixel((x + dx - 1) as u32, (y + dy - 1) as u32);
            let kx = KX[dy as usize][dx as usize];
            let ky = KY[dy as usize][dx as usize];
            for c in 0..3 {
                gx[c] += kx * px[c] as f64;
                gy[c] += ky * px[c] as f64;
            }
        }
    }
    let nx = (gx[0] * gx[0] + gx[1] * gx[1] + gx[2] * gx[2]).sqrt();
    let ny = (gy[0] * gy[0] + gy[1] * gy[1] + gy[2] * gy[2]).sqrt();
    nx + ny
}
