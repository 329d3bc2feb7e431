//! Gesture-driven painting core.
//!
//! Per camera frame: a hand observation is smoothed into a pointer
//! ([`pointer`]), classified into a drawing [`Mode`] ([`gesture`]), and fed
//! to the [`StrokeEngine`] ([`stroke`]), which keeps an undoable stroke
//! history plus a raster paint layer composited over the live frame.
//! [`PaintSession`] ties these together with the gesture debouncing and
//! tool state the application loop needs.

pub mod blend;
pub mod config;
pub mod debounce;
pub mod error;
pub mod gesture;
pub mod pointer;
pub mod raster;
pub mod session;
pub mod stroke;
pub mod types;

pub use config::PainterConfig;
pub use error::Error;
pub use gesture::{Finger, FingersUp, GestureSignal, HandObservation, HandSource, Mode, ModeController};
pub use pointer::{interpolate, PointerSmoother};
pub use session::{FrameReport, PaintSession, Tool};
pub use stroke::{Sample, Stroke, StrokeEngine};
pub use types::{Color, FrameBuffer, Point};
