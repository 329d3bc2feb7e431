// Pointer smoothing + path densification.
// Raw fingertip positions jitter by a few pixels every frame and jump by
// tens of pixels when the hand moves fast. `PointerSmoother` damps the
// jitter; `interpolate` fills the jumps so strokes stay continuous.

use std::collections::VecDeque;

use crate::gesture::distance;
use crate::types::Point;

/// Fixed-window, recency-weighted pointer filter.
///
/// The newest of the last `window` raw points gets weight `window`, the
/// oldest weight 1. The weighted mean is then pulled toward the newest raw
/// point by `mix` to cut lag. Output always lies inside the bounding box of
/// the queued points, and a stationary input is reproduced exactly once it
/// fills the window.
///
/// A frame without a raw point yields `None` and empties the window, so the
/// next detection starts fresh instead of being dragged toward where the
/// hand was before tracking dropped.
#[derive(Debug, Clone)]
pub struct PointerSmoother {
    window: usize,
    mix: f32,
    history: VecDeque<Point>,
    last: Option<Point>,
}

impl PointerSmoother {
    pub fn new(window: usize, mix: f32) -> Self {
        let window = window.max(1);
        Self {
            window,
            mix: mix.clamp(0.0, 1.0),
            history: VecDeque::with_capacity(window),
            last: None,
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Last emitted smoothed position.
    pub fn last(&self) -> Option<Point> {
        self.last
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.last = None;
    }

    pub fn smooth(&mut self, raw: Option<Point>) -> Option<Point> {
        let Some(raw) = raw else {
            self.reset();
            return None;
        };

        if self.history.len() == self.window {
            self.history.pop_front();
        }
        self.history.push_back(raw);

        let mut total = 0.0f64;
        let (mut sx, mut sy) = (0.0f64, 0.0f64);
        for (i, p) in self.history.iter().enumerate() {
            let w = (i + 1) as f64;
            sx += p.0 as f64 * w;
            sy += p.1 as f64 * w;
            total += w;
        }
        let (ax, ay) = (sx / total, sy / total);

        let mix = self.mix as f64;
        let x = ax + (raw.0 as f64 - ax) * mix;
        let y = ay + (raw.1 as f64 - ay) * mix;

        let out = (x.round() as i32, y.round() as i32);
        self.last = Some(out);
        Some(out)
    }
}

/// Points bridging `p1` to `p2`, excluding `p1` and ending exactly at `p2`.
///
/// When the gap is at most `step` this is just `[p2]`. Otherwise
/// `floor(d / step)` intermediate points plus `p2` are spread evenly over
/// the segment, so consecutive points are never more than `step` apart.
/// Points land on whole pixels, so a sub-pixel `step` yields at most one
/// point per pixel of distance; rounded points that repeat `p1` or their
/// predecessor are dropped. Either endpoint missing gives an empty path.
/// A non-positive `step` disables densification.
pub fn interpolate(p1: Option<Point>, p2: Option<Point>, step: f32) -> Vec<Point> {
    let (Some(a), Some(b)) = (p1, p2) else {
        return Vec::new();
    };
    let d = distance(a, b);
    if !(step > 0.0) || d <= step {
        return vec![b];
    }

    let parts = ((d / step).floor() as usize).saturating_add(1).min(d.ceil() as usize);
    let (dx, dy) = (b.0 as f32 - a.0 as f32, b.1 as f32 - a.1 as f32);
    let mut out: Vec<Point> = Vec::with_capacity(parts);
    for i in 1..parts {
        let t = i as f32 / parts as f32;
        let p = (
            (a.0 as f32 + dx * t).round() as i32,
            (a.1 as f32 + dy * t).round() as i32,
        );
        if p != a && out.last() != Some(&p) {
            out.push(p);
        }
    }
    if out.last() != Some(&b) {
        out.push(b);
    }
    out
}
