// Paint layer rasterisation.
// Strokes are burned into an ARGB layer the size of the camera frame by
// stamping round brushes along Bresenham lines; `composite` lays the layer
// over the live frame every tick. Work is bounded by the layer size, whatever
// the brush size or endpoints: the same segments always produce the same pixels.

use std::ops::RangeInclusive;

use crate::blend::{alpha_of, argb, GammaLut};
use crate::types::{Color, FrameBuffer, Point};

/// Peak opacity of the glow pass (out of 255).
const GLOW_ALPHA: f32 = 72.0;

/// Precomputed square brush kernel dabbed at every line pixel.
/// Visual: a (2r+1)x(2r+1) grid of coverage weights, 1.0 in the middle.
pub(crate) struct Stamp {
    pub radius: i32,       // pixels from center to edge
    pub weights: Vec<f32>, // (2r+1)*(2r+1), centered, peak 1.0
}

impl Stamp {
    /// Hard-edged round brush: weight 1 inside the disc, 0 outside.
    pub fn disc(radius: i32) -> Self {
        let r = i64::from(radius.max(0));
        let limit = r * r + r; // rounder small discs than r*r
        Self::build(radius, |d2| if d2 <= limit { 1.0 } else { 0.0 })
    }

    /// Soft round brush with Gaussian falloff, normalized to peak 1.0 and
    /// cut to zero outside the radius.
    pub fn gaussian(radius: i32, sigma: f32) -> Self {
        let r = i64::from(radius.max(0));
        let s2 = 2.0 * sigma.max(0.5) * sigma.max(0.5);
        // center weight is exp(0) = 1, already the peak
        Self::build(radius, |d2| if d2 <= r * r { (-(d2 as f32) / s2).exp() } else { 0.0 })
    }

    /// Fill the grid row by row; `weight` maps squared distance from the
    /// center to coverage.
    fn build(radius: i32, weight: impl Fn(i64) -> f32) -> Self {
        let r = radius.max(0);
        let r64 = i64::from(r);
        let side = 2 * r as usize + 1;
        let mut weights = Vec::with_capacity(side * side);
        for y in -r64..=r64 {
            for x in -r64..=r64 {
                weights.push(weight(x * x + y * y));
            }
        }
        Self { radius: r, weights }
    }

    #[inline]
    fn side(&self) -> usize {
        2 * self.radius as usize + 1
    }
}

/// Visit every pixel of the line (x0,y0)-(x1,y1), endpoints included.
/// Error terms run in i64 so endpoints anywhere in i32 space are fine.
fn for_each_line_point(from: Point, to: Point, mut visit: impl FnMut(i32, i32)) {
    let (mut x0, mut y0) = (i64::from(from.0), i64::from(from.1));
    let (x1, y1) = (i64::from(to.0), i64::from(to.1));
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        // x0/y0 never leave the from..=to box, so they fit back in i32
        visit(x0 as i32, y0 as i32);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Cut a segment down to the part inside the box `lo..=hi` (Liang-Barsky).
/// `None` when it misses the box. A segment already inside comes back as is.
fn clip_segment(from: Point, to: Point, lo: (i64, i64), hi: (i64, i64)) -> Option<(Point, Point)> {
    let inside = |p: Point| {
        (lo.0..=hi.0).contains(&i64::from(p.0)) && (lo.1..=hi.1).contains(&i64::from(p.1))
    };
    if inside(from) && inside(to) {
        return Some((from, to));
    }

    let (x0, y0) = (f64::from(from.0), f64::from(from.1));
    let (dx, dy) = (f64::from(to.0) - x0, f64::from(to.1) - y0);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [
        (-dx, x0 - lo.0 as f64),
        (dx, hi.0 as f64 - x0),
        (-dy, y0 - lo.1 as f64),
        (dy, hi.1 as f64 - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None; // parallel and outside
            }
        } else {
            let t = q / p;
            if p < 0.0 {
                if t > t1 {
                    return None;
                }
                t0 = t0.max(t);
            } else {
                if t < t0 {
                    return None;
                }
                t1 = t1.min(t);
            }
        }
    }

    let at = |t: f64| -> Point {
        let x = (x0 + dx * t).round().clamp(lo.0 as f64, hi.0 as f64);
        let y = (y0 + dy * t).round().clamp(lo.1 as f64, hi.1 as f64);
        (x as i32, y as i32)
    };
    Some((at(t0), at(t1)))
}

/// Inclusive pixel range `center ± radius`, clipped to `0..len`.
/// Empty (start > end) when nothing of it lands inside.
#[inline]
fn span(center: i64, radius: i64, len: usize) -> RangeInclusive<i64> {
    (center - radius).max(0)..=(center + radius).min(len as i64 - 1)
}

/// Accumulated paint, congruent with the video frame.
/// Visual: a transparent sheet over the camera image; alpha 0 means the
/// live frame shows through untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaintLayer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>, // 0xAARRGGBB, alpha 0 = transparent
}

impl PaintLayer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0; width * height] }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|p| alpha_of(*p) == 0)
    }

    /// Raw ARGB value at (x,y), `None` outside the layer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Largest brush radius worth building: from anywhere on the layer a
    /// disc this big already reaches every corner.
    fn reach(&self) -> i32 {
        let diag = (self.width as f64).hypot(self.height as f64).ceil();
        diag.min(f64::from(i32::MAX / 4)) as i32
    }

    /// Apply `stamp` centered at (cx,cy); `paint` receives the old pixel and
    /// the kernel weight and returns the new pixel. Only the part of the
    /// kernel that overlaps the layer is visited.
    fn dab(&mut self, cx: i32, cy: i32, stamp: &Stamp, mut paint: impl FnMut(u32, f32) -> u32) {
        let r = i64::from(stamp.radius);
        let (cx, cy) = (i64::from(cx), i64::from(cy));
        let side = stamp.side();
        for y in span(cy, r, self.height) {
            let row = (y - cy + r) as usize * side;
            for x in span(cx, r, self.width) {
                let w = stamp.weights[row + (x - cx + r) as usize];
                if w <= 0.0 {
                    continue;
                }
                let idx = y as usize * self.width + x as usize;
                self.pixels[idx] = paint(self.pixels[idx], w);
            }
        }
    }

    /// Dab `stamp` along from-to. The line is first clipped to the layer grown
    /// by the stamp radius, so far off-screen endpoints cost nothing.
    fn stamp_line(&mut self, from: Point, to: Point, stamp: &Stamp, mut paint: impl FnMut(u32, f32) -> u32) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let r = i64::from(stamp.radius);
        let lo = (-r, -r);
        let hi = (self.width as i64 - 1 + r, self.height as i64 - 1 + r);
        let Some((a, b)) = clip_segment(from, to, lo, hi) else {
            return;
        };
        for_each_line_point(a, b, |x, y| self.dab(x, y, stamp, &mut paint));
    }

    /// Burn one stroke segment. With `glow`, a wider translucent halo goes
    /// under the line first; it only raises coverage, never lowers it, so it
    /// cannot dim paint that is already there.
    /// Visual: thickness 6 → solid disc of radius 3 dragged along the line,
    /// halo of radius 9 fading out around it.
    pub fn draw_segment(&mut self, from: Point, to: Point, color: Color, thickness: u32, glow: bool) {
        // Brushes wider than the layer diagonal look the same, so cap them there.
        let reach = self.reach();
        let radius = (thickness / 2).min(reach as u32) as i32;
        let margin = thickness.clamp(2, reach.max(2) as u32) as i32;

        if glow {
            let halo = Stamp::gaussian((radius + margin).min(reach), (radius + 1) as f32);
            self.stamp_line(from, to, &halo, |old, w| {
                let a = (w * GLOW_ALPHA).round() as u8;
                if a > alpha_of(old) { argb(a, color) } else { old }
            });
        }

        let brush = Stamp::disc(radius);
        let solid = argb(255, color);
        self.stamp_line(from, to, &brush, |_, _| solid);
    }

    /// Make a filled circle transparent again.
    /// Only the rows and columns the circle shares with the layer are walked.
    pub fn punch(&mut self, center: Point, radius: i32) {
        if radius <= 0 {
            return;
        }
        let r = i64::from(radius);
        let r2 = r * r;
        let (cx, cy) = (i64::from(center.0), i64::from(center.1));
        for y in span(cy, r, self.height) {
            let dy = y - cy;
            for x in span(cx, r, self.width) {
                let dx = x - cx;
                if dx * dx + dy * dy <= r2 {
                    self.pixels[y as usize * self.width + x as usize] = 0;
                }
            }
        }
    }

    /// `background` with the layer laid over it. Sizes must match.
    pub fn composite(&self, background: &FrameBuffer, lut: &GammaLut) -> FrameBuffer {
        let mut out = background.clone();
        for (dst, px) in out.pixels.iter_mut().zip(&self.pixels) {
            let a = alpha_of(*px);
            if a == 0 {
                continue;
            }
            *dst = lut.mix(*px, *dst, a);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLUE: Color = Color::rgb(0, 0, 255);

    #[test]
    fn disc_stamp_shape() {
        let s = Stamp::disc(0);
        assert_eq!(s.weights, vec![1.0]);

        let s = Stamp::disc(2);
        assert_eq!(s.weights.len(), 25);
        // corners are outside, edge midpoints inside
        assert_eq!(s.weights[0], 0.0);
        assert_eq!(s.weights[2], 1.0);
        assert_eq!(s.weights[12], 1.0);
    }

    #[test]
    fn gaussian_stamp_peaks_at_center() {
        let s = Stamp::gaussian(4, 2.0);
        let center = s.weights[s.weights.len() / 2];
        assert!((center - 1.0).abs() < 1e-6);
        assert!(s.weights.iter().all(|w| *w <= center));
    }

    #[test]
    fn line_visits_both_endpoints() {
        let mut pts = Vec::new();
        for_each_line_point((0, 0), (5, 2), |x, y| pts.push((x, y)));
        assert_eq!(pts.first(), Some(&(0, 0)));
        assert_eq!(pts.last(), Some(&(5, 2)));
        assert_eq!(pts.len(), 6);
    }

    #[test]
    fn segment_paints_opaque_core() {
        let mut layer = PaintLayer::new(40, 20);
        layer.draw_segment((5, 10), (30, 10), BLUE, 4, false);
        assert_eq!(layer.pixel(15, 10), Some(argb(255, BLUE)));
        assert_eq!(layer.pixel(15, 12), Some(argb(255, BLUE)));
        assert_eq!(layer.pixel(15, 16), Some(0));
    }

    #[test]
    fn glow_sits_beside_the_line_without_dimming_it() {
        let mut layer = PaintLayer::new(40, 30);
        layer.draw_segment((5, 15), (30, 15), BLUE, 4, true);
        assert_eq!(layer.pixel(15, 15), Some(argb(255, BLUE)));
        let halo = layer.pixel(15, 19).unwrap();
        assert!(alpha_of(halo) > 0 && alpha_of(halo) < 255);

        // the red halo reaches (17,15) but the blue core there stays solid
        layer.draw_segment((15, 5), (15, 25), Color::RED, 2, true);
        assert_eq!(layer.pixel(17, 15), Some(argb(255, BLUE)));
        assert_eq!(layer.pixel(15, 15), Some(argb(255, Color::RED)));
    }

    #[test]
    fn punch_clears_circle_only() {
        let mut layer = PaintLayer::new(50, 50);
        layer.draw_segment((0, 25), (49, 25), BLUE, 6, false);
        layer.punch((25, 25), 5);
        assert_eq!(layer.pixel(25, 25), Some(0));
        assert_eq!(layer.pixel(29, 25), Some(0));
        assert_eq!(layer.pixel(10, 25), Some(argb(255, BLUE)));
    }

    #[test]
    fn punch_outside_layer_is_harmless() {
        let mut layer = PaintLayer::new(10, 10);
        layer.punch((-50, -50), 8);
        layer.punch((5, 5), 0);
        layer.punch((5, 5), -3);
        assert!(layer.is_blank());
    }

    #[test]
    fn giant_punch_clears_the_layer_and_returns() {
        let mut layer = PaintLayer::new(64, 64);
        layer.draw_segment((0, 32), (63, 32), BLUE, 8, false);
        layer.punch((10, 10), 50_000);
        assert!(layer.is_blank());

        layer.draw_segment((0, 32), (63, 32), BLUE, 8, false);
        layer.punch((i32::MAX, i32::MIN), i32::MAX);
        assert_eq!(layer.pixel(30, 32), Some(argb(255, BLUE)));
    }

    #[test]
    fn giant_brush_is_capped_to_the_layer() {
        let mut layer = PaintLayer::new(64, 64);
        layer.draw_segment((1, 1), (2, 1), Color::RED, 100_000, false);
        assert!(layer.pixels.iter().all(|p| *p == argb(255, Color::RED)));

        let mut layer = PaintLayer::new(32, 24);
        layer.draw_segment((5, 5), (6, 5), BLUE, u32::MAX, true);
        assert!(layer.pixels.iter().all(|p| *p == argb(255, BLUE)));
    }

    #[test]
    fn far_off_endpoints_are_clipped() {
        let mut layer = PaintLayer::new(64, 64);
        layer.draw_segment((i32::MIN, 5), (i32::MAX, 5), BLUE, 1, false);
        assert_eq!(layer.pixel(0, 5), Some(argb(255, BLUE)));
        assert_eq!(layer.pixel(63, 5), Some(argb(255, BLUE)));
        assert_eq!(layer.pixel(30, 20), Some(0));

        // entirely outside: nothing to do
        layer.draw_segment((-500, -500), (-400, -900), Color::RED, 4, true);
        assert_eq!(layer.pixel(0, 0), Some(0));
    }

    #[test]
    fn clipping_keeps_inner_segments_exact() {
        let lo = (0, 0);
        let hi = (9, 9);
        assert_eq!(clip_segment((1, 2), (8, 7), lo, hi), Some(((1, 2), (8, 7))));
        assert_eq!(clip_segment((-10, 5), (20, 5), lo, hi), Some(((0, 5), (9, 5))));
        assert_eq!(clip_segment((-10, -1), (20, -1), lo, hi), None);
    }

    #[test]
    fn composite_keeps_background_where_unpainted() {
        let lut = GammaLut::new();
        let bg = FrameBuffer::filled(8, 8, Color::rgb(10, 20, 30));
        let mut layer = PaintLayer::new(8, 8);
        layer.draw_segment((2, 2), (2, 2), BLUE, 1, false);
        let out = layer.composite(&bg, &lut);
        assert_eq!(out.pixel(2, 2), Some(BLUE.to_u32()));
        assert_eq!(out.pixel(5, 5), Some(Color::rgb(10, 20, 30).to_u32()));
    }

    #[test]
    fn painting_black_is_still_visible() {
        let lut = GammaLut::new();
        let bg = FrameBuffer::filled(4, 4, Color::WHITE);
        let mut layer = PaintLayer::new(4, 4);
        layer.draw_segment((1, 1), (1, 1), Color::BLACK, 1, false);
        let out = layer.composite(&bg, &lut);
        assert_eq!(out.pixel(1, 1), Some(0));
        assert_eq!(layer.pixels.iter().filter(|p| alpha_of(**p) != 0).count(), 1);
    }
}
