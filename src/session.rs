//! Per-frame painting context.
//!
//! `PaintSession` owns everything that changes from frame to frame: the
//! mode controller, pointer smoother, stroke engine, the debounce timers
//! and the active tool. The application loop calls [`PaintSession::step`]
//! once per camera frame with that frame's hand observation, then
//! [`PaintSession::render`] to get the composited image.

use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::config::PainterConfig;
use crate::debounce::{HoldFilter, TriggerGate};
use crate::gesture::{is_victory, Finger, GestureSignal, HandObservation, Mode, ModeController};
use crate::pointer::{interpolate, PointerSmoother};
use crate::stroke::{Stroke, StrokeEngine};
use crate::types::{Color, FrameBuffer, Point};

/// What a pinch does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tool {
    /// Pinch paints strokes.
    #[default]
    Brush,
    /// Pinch punches holes in the paint layer along the pointer path.
    Eraser,
}

impl Tool {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brush => "BRUSH",
            Self::Eraser => "ERASER",
        }
    }
}

/// Outcome of one [`PaintSession::step`], for HUD feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub mode: Mode,
    /// Smoothed pointer, `None` when no fingertip was seen this frame.
    pub pointer: Option<Point>,
    pub undo_fired: bool,
    /// The eraser tool punched the layer this frame.
    pub erasing: bool,
    pub gestures_enabled: bool,
}

pub struct PaintSession {
    config: PainterConfig,
    controller: ModeController,
    smoother: PointerSmoother,
    engine: StrokeEngine,
    pinch_hold: HoldFilter,
    undo_gate: TriggerGate,
    toggle_gate: TriggerGate,
    tool: Tool,
    gestures_enabled: bool,
    /// Last pointer fed to the engine while drawing; interpolation starts here.
    path_tail: Option<Point>,
}

impl PaintSession {
    pub fn new(config: PainterConfig) -> Self {
        let ms = Duration::from_millis;
        Self {
            controller: ModeController::new(),
            smoother: PointerSmoother::new(config.smoothing_window, config.smoothing_mix),
            engine: StrokeEngine::new(config.default_color, config.default_thickness, config.glow),
            pinch_hold: HoldFilter::new(ms(config.pinch_hold_ms)),
            undo_gate: TriggerGate::new(ms(config.fist_hold_ms), ms(config.undo_cooldown_ms)),
            toggle_gate: TriggerGate::new(Duration::ZERO, ms(config.toggle_cooldown_ms)),
            tool: Tool::Brush,
            gestures_enabled: true,
            path_tail: None,
            config,
        }
    }

    /// Advance one frame. `obs` is `None` when no hand was detected.
    pub fn step(&mut self, obs: Option<&HandObservation>, now: Instant) -> FrameReport {
        let pointer = self.smoother.smooth(obs.and_then(|o| o.tip(Finger::Index)));

        let victory = obs.is_some_and(|o| is_victory(o.fingers_up));
        if self.toggle_gate.update(victory, now) {
            self.gestures_enabled = !self.gestures_enabled;
            info!("gesture input {}", if self.gestures_enabled { "enabled" } else { "disabled" });
        }

        let signal = match obs {
            Some(o) if self.gestures_enabled => {
                GestureSignal::from_observation(o, self.config.pinch_threshold)
            }
            _ => GestureSignal::IDLE,
        };
        // a pinch only counts once it has been held
        let pinch = self.pinch_hold.update(signal.pinch, now);
        let mode = self.controller.update(GestureSignal { pinch, ..signal });

        let mut erasing = false;
        match mode {
            Mode::Draw => {
                let path = match self.path_tail {
                    Some(_) => interpolate(self.path_tail, pointer, self.config.interp_step),
                    None => pointer.into_iter().collect(),
                };
                match self.tool {
                    Tool::Brush => {
                        for p in path {
                            self.engine.update(Some(p), Mode::Draw);
                        }
                    }
                    Tool::Eraser => {
                        self.engine.close_current();
                        erasing = !path.is_empty();
                        for p in path {
                            self.engine.erase_at(p, self.config.erase_radius);
                        }
                    }
                }
                self.path_tail = pointer;
            }
            Mode::Erase | Mode::Stop => {
                self.engine.update(None, Mode::Stop);
                self.path_tail = None;
            }
        }

        let undo_fired = self.undo_gate.update(mode == Mode::Erase, now);
        if undo_fired {
            debug!("fist held: undo");
            self.engine.update(None, Mode::Erase);
        }

        FrameReport {
            mode,
            pointer,
            undo_fired,
            erasing,
            gestures_enabled: self.gestures_enabled,
        }
    }

    /// Composite the paint layer over the camera frame.
    pub fn render(&mut self, background: &FrameBuffer) -> FrameBuffer {
        self.engine.render(background)
    }

    pub fn clear(&mut self) {
        info!("canvas cleared");
        self.engine.clear();
        self.path_tail = None;
    }

    /// Pick a palette color and switch back to the brush.
    pub fn select_palette(&mut self, index: usize) -> bool {
        let Some(color) = self.config.palette.get(index).copied() else {
            warn!("palette index {index} out of range");
            return false;
        };
        self.set_color(color);
        self.set_tool(Tool::Brush);
        true
    }

    pub fn set_color(&mut self, color: Color) {
        info!("brush color #{:06X}", color.to_u32());
        self.engine.set_color(color);
    }

    pub fn set_thickness(&mut self, value: u32) {
        self.engine.set_thickness(value);
    }

    /// Grow or shrink the brush, never below 1 pixel.
    pub fn adjust_thickness(&mut self, delta: i32) {
        let next = (self.engine.thickness() as i64 + delta as i64).clamp(1, u32::MAX as i64);
        self.engine.set_thickness(next as u32);
    }

    pub fn set_tool(&mut self, tool: Tool) {
        if tool != self.tool {
            info!("tool: {}", tool.as_str());
            self.tool = tool;
            self.engine.close_current();
            self.path_tail = None;
        }
    }

    pub fn toggle_tool(&mut self) {
        self.set_tool(match self.tool {
            Tool::Brush => Tool::Eraser,
            Tool::Eraser => Tool::Brush,
        });
    }

    pub fn mode(&self) -> Mode {
        self.controller.mode()
    }

    pub fn color(&self) -> Color {
        self.engine.color()
    }

    pub fn thickness(&self) -> u32 {
        self.engine.thickness()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn gestures_enabled(&self) -> bool {
        self.gestures_enabled
    }

    pub fn is_pristine(&self) -> bool {
        self.engine.is_pristine()
    }

    pub fn strokes(&self) -> &[Stroke] {
        self.engine.strokes()
    }

    pub fn config(&self) -> &PainterConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::FingersUp;

    fn pinch_at(p: Point) -> HandObservation {
        HandObservation::default()
            .with_tip(Finger::Index, p)
            .with_tip(Finger::Thumb, (p.0 + 10, p.1 + 10))
            .with_fingers(FingersUp([true, true, false, false, false]))
    }

    fn quick_config() -> PainterConfig {
        PainterConfig {
            smoothing_window: 1,
            pinch_hold_ms: 0,
            glow: false,
            ..PainterConfig::default()
        }
    }

    #[test]
    fn palette_selection() {
        let mut s = PaintSession::new(PainterConfig::default());
        s.set_tool(Tool::Eraser);
        assert!(s.select_palette(1));
        assert_eq!(s.color(), Color::rgb(0, 0, 255));
        assert_eq!(s.tool(), Tool::Brush);
        assert!(!s.select_palette(99));
        assert_eq!(s.color(), Color::rgb(0, 0, 255));
    }

    #[test]
    fn thickness_adjustment_floors_at_one() {
        let mut s = PaintSession::new(PainterConfig::default());
        s.adjust_thickness(2);
        assert_eq!(s.thickness(), 8);
        s.adjust_thickness(-100);
        assert_eq!(s.thickness(), 1);
    }

    #[test]
    fn fast_motion_is_densified() {
        let mut s = PaintSession::new(quick_config());
        s.render(&FrameBuffer::new(200, 100));
        let t0 = Instant::now();
        s.step(Some(&pinch_at((10, 50))), t0);
        s.step(Some(&pinch_at((110, 50))), t0 + Duration::from_millis(33));
        let stroke = &s.strokes()[0];
        // 100 px at step 4: 25 intermediate + endpoint, plus the first sample
        assert_eq!(stroke.len(), 27);
        assert_eq!(stroke.samples().last().unwrap().position, (110, 50));
    }

    #[test]
    fn switching_tool_closes_stroke() {
        let mut s = PaintSession::new(quick_config());
        let t0 = Instant::now();
        s.step(Some(&pinch_at((10, 10))), t0);
        s.step(Some(&pinch_at((20, 10))), t0 + Duration::from_millis(33));
        s.toggle_tool();
        assert_eq!(s.tool(), Tool::Eraser);
        assert_eq!(s.strokes().len(), 2);
        assert!(s.strokes()[1].is_empty());
    }
}
