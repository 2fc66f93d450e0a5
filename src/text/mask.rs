use crate::foundation::core::Point;
use crate::foundation::error::{ConstellateError, ConstellateResult};

/// Single-channel coverage buffer, row-major, one byte per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlphaMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl AlphaMask {
    /// Fully transparent mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize)],
        }
    }

    pub fn from_parts(width: u32, height: u32, data: Vec<u8>) -> ConstellateResult<Self> {
        if data.len() != (width as usize) * (height as usize) {
            return Err(ConstellateError::render(format!(
                "alpha mask byte len {} does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Extract the alpha channel of a tightly packed RGBA8 buffer.
    pub fn from_rgba8_alpha(width: u32, height: u32, rgba: &[u8]) -> ConstellateResult<Self> {
        if rgba.len() != (width as usize) * (height as usize) * 4 {
            return Err(ConstellateError::render("rgba8 buffer size mismatch"));
        }
        let data = rgba.chunks_exact(4).map(|px| px[3]).collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    pub fn set_alpha(&mut self, x: u32, y: u32, a: u8) {
        if x < self.width && y < self.height {
            self.data[(y as usize) * (self.width as usize) + (x as usize)] = a;
        }
    }

    /// Scan the mask on a `step`-pixel grid starting at `(0, 0)` and return one point per
    /// visited pixel whose alpha is strictly above `threshold`, offset by `origin`.
    ///
    /// Points are emitted row by row, left to right.
    pub fn sample_points(&self, step: u32, threshold: u8, origin: Point) -> Vec<Point> {
        let step = step.max(1) as usize;
        let mut out = Vec::new();
        for y in (0..self.height).step_by(step) {
            for x in (0..self.width).step_by(step) {
                if self.alpha(x, y) > threshold {
                    out.push(Point::new(
                        origin.x + f64::from(x),
                        origin.y + f64::from(y),
                    ));
                }
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/mask.rs"]
mod tests;
