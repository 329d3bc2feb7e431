// Pixel packing and gamma-correct mixing for the paint layer.
// Layer pixels are 0xAARRGGBB (A = 0 means "nothing painted here");
// frames are 0x00RRGGBB like minifb expects.

use crate::types::Color;

/// sRGB <-> linear lookup tables so partially transparent paint (glow edges)
/// mixes with the camera image in linear light without per-pixel powf.
pub struct GammaLut {
    // sRGB(0..255) -> linear (0..1)
    to_linear: [f32; 256],
    // linear(0..1) quantized to 4096 steps -> sRGB(0..255)
    to_srgb: [u8; 4096],
}

impl GammaLut {
    pub fn new() -> Self {
        let mut to_linear = [0.0f32; 256];
        for (v, slot) in to_linear.iter_mut().enumerate() {
            let c = v as f32 / 255.0;
            *slot = if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) };
        }

        let mut to_srgb = [0u8; 4096];
        for (i, slot) in to_srgb.iter_mut().enumerate() {
            let l = i as f32 / 4095.0;
            let s = if l <= 0.003_130_8 { 12.92 * l } else { 1.055 * l.powf(1.0 / 2.4) - 0.055 };
            *slot = (s * 255.0).round().clamp(0.0, 255.0) as u8;
        }

        Self { to_linear, to_srgb }
    }

    #[inline]
    pub fn linear(&self, v: u8) -> f32 {
        self.to_linear[v as usize]
    }

    #[inline]
    pub fn srgb(&self, l: f32) -> u8 {
        self.to_srgb[(l.clamp(0.0, 1.0) * 4095.0).round() as usize]
    }

    /// Mix `fg` over `bg` with coverage `alpha` (0..=255), both 0x00RRGGBB.
    pub fn mix(&self, fg: u32, bg: u32, alpha: u8) -> u32 {
        match alpha {
            0 => bg & 0x00FF_FFFF,
            255 => fg & 0x00FF_FFFF,
            _ => {
                let a = alpha as f32 / 255.0;
                let (f, b) = (Color::from_u32(fg), Color::from_u32(bg));
                let ch = |fc: u8, bc: u8| self.srgb(a * self.linear(fc) + (1.0 - a) * self.linear(bc));
                Color::rgb(ch(f.r, b.r), ch(f.g, b.g), ch(f.b, b.b)).to_u32()
            }
        }
    }
}

impl Default for GammaLut {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
pub fn argb(alpha: u8, color: Color) -> u32 {
    ((alpha as u32) << 24) | color.to_u32()
}

#[inline]
pub fn alpha_of(px: u32) -> u8 {
    (px >> 24) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_endpoints_are_exact() {
        let lut = GammaLut::new();
        assert_eq!(lut.linear(0), 0.0);
        assert!((lut.linear(255) - 1.0).abs() < 1e-6);
        assert_eq!(lut.srgb(0.0), 0);
        assert_eq!(lut.srgb(1.0), 255);
        for v in [0u8, 17, 128, 200, 255] {
            assert_eq!(lut.srgb(lut.linear(v)), v);
        }
    }

    #[test]
    fn mix_extremes_pick_one_side() {
        let lut = GammaLut::new();
        assert_eq!(lut.mix(0x00FF_0000, 0x0000_00FF, 255), 0x00FF_0000);
        assert_eq!(lut.mix(0x00FF_0000, 0x0000_00FF, 0), 0x0000_00FF);
    }

    #[test]
    fn half_mix_is_brighter_than_srgb_average() {
        let lut = GammaLut::new();
        let out = Color::from_u32(lut.mix(0x00FF_FFFF, 0x0000_0000, 128));
        // linear-light 50% white is ~188 in sRGB, not 128
        assert!(out.r > 180 && out.r < 195, "got {}", out.r);
    }

    #[test]
    fn argb_packing() {
        let px = argb(0x40, Color::rgb(1, 2, 3));
        assert_eq!(px, 0x4001_0203);
        assert_eq!(alpha_of(px), 0x40);
        assert_eq!(Color::from_u32(px), Color::rgb(1, 2, 3));
    }
}
