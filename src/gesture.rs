//! Gesture mode controller.
//!
//! Turns one frame of hand predicates (pinch, palm/fist, per-finger up flags)
//! into a drawing [`Mode`]. Each frame is decided on its own; the controller
//! only remembers the last mode so the UI can read it back. Temporal
//! filtering (hold times, cooldowns) is the caller's job, see `debounce`.

use crate::types::{FrameBuffer, Point};

// ── Hand observation (detector output) ─────────────────────

/// Digits in landmark order, thumb first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Per-finger "extended" flags, indexed by [`Finger`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FingersUp(pub [bool; 5]);

impl FingersUp {
    pub const NONE: FingersUp = FingersUp([false; 5]);
    pub const ALL: FingersUp = FingersUp([true; 5]);

    pub fn is_up(&self, finger: Finger) -> bool {
        self.0[finger.index()]
    }

    pub fn count(&self) -> usize {
        self.0.iter().filter(|up| **up).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

/// One frame of hand-tracker output for a single hand.
/// A frame with no detected hand is represented by `None` at the call site.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandObservation {
    /// Fingertip pixel positions, indexed by [`Finger`].
    pub tips: [Option<Point>; 5],
    pub fingers_up: Option<FingersUp>,
    pub handedness: Option<Handedness>,
}

impl HandObservation {
    pub fn tip(&self, finger: Finger) -> Option<Point> {
        self.tips[finger.index()]
    }

    pub fn with_tip(mut self, finger: Finger, at: Point) -> Self {
        self.tips[finger.index()] = Some(at);
        self
    }

    pub fn with_fingers(mut self, fingers: FingersUp) -> Self {
        self.fingers_up = Some(fingers);
        self
    }
}

/// Where a hand detector plugs in: one observation per camera frame.
pub trait HandSource {
    fn observe(&mut self, frame: &FrameBuffer) -> Option<HandObservation>;
}

// ── Predicates ─────────────────────────────────────────────

/// Index and thumb tips closer than `threshold` pixels. Missing tips never pinch.
pub fn is_pinch(index: Option<Point>, thumb: Option<Point>, threshold: f32) -> bool {
    match (index, thumb) {
        (Some(a), Some(b)) => distance(a, b) < threshold,
        _ => false,
    }
}

/// At most `max_up` fingers extended.
pub fn is_fist(fingers: Option<FingersUp>, max_up: usize) -> bool {
    fingers.is_some_and(|f| f.count() <= max_up)
}

pub fn is_palm_open(fingers: Option<FingersUp>) -> bool {
    fingers.is_some_and(|f| f.count() >= 4)
}

/// Index and middle up, ring and pinky down (thumb ignored).
pub fn is_victory(fingers: Option<FingersUp>) -> bool {
    fingers.is_some_and(|f| {
        f.is_up(Finger::Index)
            && f.is_up(Finger::Middle)
            && !f.is_up(Finger::Ring)
            && !f.is_up(Finger::Pinky)
    })
}

pub(crate) fn distance(a: Point, b: Point) -> f32 {
    let dx = b.0 as f32 - a.0 as f32;
    let dy = b.1 as f32 - a.1 as f32;
    dx.hypot(dy)
}

// ── Mode decision ──────────────────────────────────────────

/// Discrete drawing state emitted once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    Draw,
    Erase,
    #[default]
    Stop,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draw => "DRAW",
            Self::Erase => "ERASE",
            Self::Stop => "STOP",
        }
    }
}

/// Controller input for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GestureSignal {
    pub pinch: bool,
    pub palm_or_fist: bool,
    pub fingers_up: FingersUp,
}

impl GestureSignal {
    /// The all-false signal used when no hand is visible.
    pub const IDLE: GestureSignal = GestureSignal {
        pinch: false,
        palm_or_fist: false,
        fingers_up: FingersUp::NONE,
    };

    /// Derive predicates from raw tracker output. Missing finger flags count
    /// as zero fingers up but never as a fist.
    pub fn from_observation(obs: &HandObservation, pinch_threshold: f32) -> Self {
        let fingers = obs.fingers_up;
        Self {
            pinch: is_pinch(obs.tip(Finger::Index), obs.tip(Finger::Thumb), pinch_threshold),
            palm_or_fist: is_palm_open(fingers) || is_fist(fingers, 0),
            fingers_up: fingers.unwrap_or(FingersUp::NONE),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModeController {
    mode: Mode,
}

impl ModeController {
    pub fn new() -> Self {
        Self { mode: Mode::Stop }
    }

    /// Last emitted mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Priority order: closed fist (zero fingers) erases, a pinch with at
    /// least one finger up draws, anything else stops. An open palm carries
    /// `palm_or_fist` too but never erases because its finger count is not zero.
    pub fn update_mode(&mut self, pinch: bool, palm_or_fist: bool, fingers_up: FingersUp) -> Mode {
        let up = fingers_up.count();
        self.mode = if palm_or_fist && up == 0 {
            Mode::Erase
        } else if pinch && up >= 1 {
            Mode::Draw
        } else {
            Mode::Stop
        };
        self.mode
    }

    /// Same decision, fed from a whole-frame signal.
    pub fn update(&mut self, signal: GestureSignal) -> Mode {
        self.update_mode(signal.pinch, signal.palm_or_fist, signal.fingers_up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fingers(bits: [u8; 5]) -> FingersUp {
        FingersUp(bits.map(|b| b != 0))
    }

    #[test]
    fn decision_table() {
        let mut c = ModeController::new();
        assert_eq!(c.mode(), Mode::Stop);

        assert_eq!(c.update_mode(false, true, fingers([0, 0, 0, 0, 0])), Mode::Erase);
        assert_eq!(c.update_mode(true, false, fingers([1, 1, 0, 0, 0])), Mode::Draw);
        assert_eq!(c.update_mode(false, false, fingers([1, 1, 1, 1, 1])), Mode::Stop);
        // fist outranks pinch
        assert_eq!(c.update_mode(true, true, fingers([0, 0, 0, 0, 0])), Mode::Erase);
    }

    #[test]
    fn open_palm_never_erases() {
        let mut c = ModeController::new();
        assert_eq!(c.update_mode(false, true, FingersUp::ALL), Mode::Stop);
    }

    #[test]
    fn pinch_without_fingers_up_stops() {
        let mut c = ModeController::new();
        assert_eq!(c.update_mode(true, false, FingersUp::NONE), Mode::Stop);
    }

    #[test]
    fn controller_remembers_last_mode() {
        let mut c = ModeController::new();
        c.update_mode(true, false, fingers([0, 1, 0, 0, 0]));
        assert_eq!(c.mode(), Mode::Draw);
        c.update(GestureSignal::IDLE);
        assert_eq!(c.mode(), Mode::Stop);
    }

    #[test]
    fn pinch_predicate() {
        assert!(is_pinch(Some((0, 0)), Some((30, 0)), 45.0));
        assert!(!is_pinch(Some((0, 0)), Some((45, 0)), 45.0));
        assert!(!is_pinch(None, Some((0, 0)), 45.0));
    }

    #[test]
    fn finger_predicates() {
        assert!(is_fist(Some(FingersUp::NONE), 0));
        assert!(!is_fist(None, 0));
        assert!(is_palm_open(Some(fingers([0, 1, 1, 1, 1]))));
        assert!(!is_palm_open(Some(fingers([0, 1, 1, 0, 0]))));
        assert!(is_victory(Some(fingers([1, 1, 1, 0, 0]))));
        assert!(!is_victory(Some(fingers([0, 1, 1, 1, 0]))));
    }

    #[test]
    fn signal_from_observation() {
        let pinching = HandObservation::default()
            .with_tip(Finger::Index, (100, 100))
            .with_tip(Finger::Thumb, (110, 105))
            .with_fingers(fingers([1, 1, 0, 0, 0]));
        let s = GestureSignal::from_observation(&pinching, 45.0);
        assert!(s.pinch);
        assert!(!s.palm_or_fist);
        assert_eq!(s.fingers_up.count(), 2);

        let fist = HandObservation::default().with_fingers(FingersUp::NONE);
        let s = GestureSignal::from_observation(&fist, 45.0);
        assert!(s.palm_or_fist);
        assert!(!s.pinch);

        let blind = HandObservation::default();
        assert_eq!(GestureSignal::from_observation(&blind, 45.0), GestureSignal::IDLE);
    }

    #[test]
    fn finger_order_is_thumb_first() {
        assert_eq!(Finger::Thumb.index(), 0);
        assert_eq!(Finger::Pinky.index(), 4);
    }
}
