// Core types shared by the gesture controller, pointer pipeline and stroke engine.

use image::{ImageBuffer, Rgb, RgbImage};
use serde::{Deserialize, Serialize};

/// Integer pixel coordinate `(x, y)`, origin top-left.
pub type Point = (i32, i32);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A black frame of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Color::BLACK)
    }

    pub fn filled(width: usize, height: usize, color: Color) -> Self {
        Self { width, height, pixels: vec![color.to_u32(); width * height] }
    }

    /// Pixel at (x,y) as 0x00RRGGBB, `None` outside the frame.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Unpack into an RGB image (used for PNG export).
    pub fn to_rgb_image(&self) -> RgbImage {
        ImageBuffer::from_fn(self.width as u32, self.height as u32, |x, y| {
            let c = Color::from_u32(self.pixels[y as usize * self.width + x as usize]);
            Rgb([c.r, c.g, c.b])
        })
    }
}

/// Brush color as an RGB triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// 0x00RRGGBB
    #[inline]
    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    #[inline]
    pub const fn from_u32(px: u32) -> Self {
        Self {
            r: ((px >> 16) & 0xFF) as u8,
            g: ((px >> 8) & 0xFF) as u8,
            b: (px & 0xFF) as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_packs_as_minifb_pixel() {
        let c = Color::rgb(0x12, 0x34, 0x56);
        assert_eq!(c.to_u32(), 0x0012_3456);
        assert_eq!(Color::from_u32(0xFF12_3456), c);
    }

    #[test]
    fn pixel_lookup_is_bounds_checked() {
        let mut fb = FrameBuffer::new(4, 3);
        fb.pixels[2 * 4 + 1] = 0x00AB_CDEF;
        assert_eq!(fb.pixel(1, 2), Some(0x00AB_CDEF));
        assert_eq!(fb.pixel(-1, 0), None);
        assert_eq!(fb.pixel(4, 0), None);
        assert_eq!(fb.pixel(0, 3), None);
    }

    #[test]
    fn rgb_image_conversion_keeps_layout() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.pixels[5] = Color::rgb(1, 2, 3).to_u32();
        let img = fb.to_rgb_image();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 1).0, [1, 2, 3]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0]);
    }
}
