//! Stroke history and paint layer.
//!
//! The vector history is the source of truth for undo; the raster layer is
//! what gets composited every frame. Drawing updates both incrementally.
//! Undo removes a stroke from the history and rebuilds the layer from what
//! is left. `erase_at` edits only the layer, so a later undo rebuild
//! repaints anything it punched out.

use log::{debug, warn};

use crate::blend::GammaLut;
use crate::gesture::Mode;
use crate::raster::PaintLayer;
use crate::types::{Color, FrameBuffer, Point};

/// One recorded pointer position with the brush it was drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub position: Point,
    pub color: Color,
    pub thickness: u32,
}

/// A continuous line. Append-only while it is the current stroke.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stroke {
    samples: Vec<Sample>,
}

impl Stroke {
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Consecutive sample pairs, each drawn with the later sample's brush.
    pub fn segments(&self) -> impl Iterator<Item = (&Sample, &Sample)> {
        self.samples.windows(2).map(|w| (&w[0], &w[1]))
    }
}

pub struct StrokeEngine {
    /// Never empty; the last entry is the stroke new samples go to.
    strokes: Vec<Stroke>,
    layer: Option<PaintLayer>,
    color: Color,
    thickness: u32,
    glow: bool,
    lut: GammaLut,
}

impl StrokeEngine {
    pub fn new(color: Color, thickness: u32, glow: bool) -> Self {
        Self {
            strokes: vec![Stroke::default()],
            layer: None,
            color,
            thickness: thickness.max(1),
            glow,
            lut: GammaLut::new(),
        }
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Strokes that actually hold samples.
    pub fn drawn_strokes(&self) -> impl Iterator<Item = &Stroke> {
        self.strokes.iter().filter(|s| !s.is_empty())
    }

    pub fn layer(&self) -> Option<&PaintLayer> {
        self.layer.as_ref()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn thickness(&self) -> u32 {
        self.thickness
    }

    /// History is back at its initial single empty stroke.
    pub fn is_pristine(&self) -> bool {
        self.strokes.len() == 1 && self.strokes[0].is_empty()
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_thickness(&mut self, value: u32) {
        if value == 0 {
            warn!("ignoring brush thickness 0");
            return;
        }
        self.thickness = value;
    }

    /// Allocate (or reallocate and clear) the layer for a frame size.
    /// Returns true when the layer was (re)created.
    pub fn ensure_layer(&mut self, width: usize, height: usize) -> bool {
        match &self.layer {
            Some(l) if l.width == width && l.height == height => false,
            _ => {
                debug!("paint layer allocated at {width}x{height}");
                self.layer = Some(PaintLayer::new(width, height));
                true
            }
        }
    }

    /// Feed one frame's pointer and mode.
    pub fn update(&mut self, point: Option<Point>, mode: Mode) {
        match mode {
            Mode::Draw => {
                if let Some(p) = point {
                    self.append(p);
                }
            }
            Mode::Stop => self.close_current(),
            Mode::Erase => self.undo(),
        }
    }

    fn append(&mut self, position: Point) {
        let sample = Sample { position, color: self.color, thickness: self.thickness };
        let current = self.current_mut();
        let prev = current.samples.last().copied();
        current.samples.push(sample);

        if let (Some(prev), Some(layer)) = (prev, self.layer.as_mut()) {
            layer.draw_segment(prev.position, sample.position, sample.color, sample.thickness, self.glow);
        }
    }

    fn current_mut(&mut self) -> &mut Stroke {
        if self.strokes.is_empty() {
            self.strokes.push(Stroke::default());
        }
        let last = self.strokes.len() - 1;
        &mut self.strokes[last]
    }

    /// Close the current stroke so the next sample starts a new one.
    /// Idle frames over an empty slot do nothing.
    pub fn close_current(&mut self) {
        if !self.current_mut().is_empty() {
            debug!("stroke closed ({} samples)", self.current_mut().len());
            self.strokes.push(Stroke::default());
        }
    }

    /// Remove the most recent non-empty stroke and rebuild the layer.
    /// With nothing left to remove this is a no-op.
    pub fn undo(&mut self) {
        let Some(idx) = self.strokes.iter().rposition(|s| !s.is_empty()) else {
            return;
        };
        if self.strokes.len() > 1 {
            self.strokes.remove(idx);
        } else {
            self.strokes[0].samples.clear();
        }
        // a closed stroke must not become the append target again
        if self.strokes.last().is_none_or(|s| !s.is_empty()) {
            self.strokes.push(Stroke::default());
        }
        debug!("undo: {} strokes remain", self.drawn_strokes().count());
        self.rebuild();
    }

    /// Clear the layer and re-rasterise every stroke in history order.
    pub fn rebuild(&mut self) {
        let Some(layer) = self.layer.as_mut() else {
            return;
        };
        layer.clear();
        for stroke in &self.strokes {
            for (a, b) in stroke.segments() {
                layer.draw_segment(a.position, b.position, b.color, b.thickness, self.glow);
            }
        }
    }

    /// Punch a transparent hole into the layer. History is untouched.
    pub fn erase_at(&mut self, center: Point, radius: i32) {
        if radius <= 0 {
            warn!("ignoring erase radius {radius}");
            return;
        }
        if let Some(layer) = self.layer.as_mut() {
            layer.punch(center, radius);
        }
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
        self.strokes.push(Stroke::default());
        if let Some(layer) = self.layer.as_mut() {
            layer.clear();
        }
    }

    /// Composite the layer over `background`. This is where the layer is
    /// first allocated and where a frame size change reallocates (and
    /// clears) it.
    pub fn render(&mut self, background: &FrameBuffer) -> FrameBuffer {
        self.ensure_layer(background.width, background.height);
        match &self.layer {
            Some(layer) => layer.composite(background, &self.lut),
            None => background.clone(),
        }
    }
}
