// Gesture Painter: paint on the live camera feed with hand gestures.
// What you SEE:
// • Live camera is always the base image; your strokes float on top.
// • Pinch (hold Left Mouse in the stand-in) draws; a held fist (Right Mouse) undoes
//   the last stroke; a victory sign (V) toggles gesture input.
// • E toggles brush/eraser, 1-8 pick a color, [ and ] change thickness,
//   C clears, S saves a PNG, ESC quits.

mod camera;
mod export;
mod window;

use std::path::Path;
use std::time::{Duration, Instant};

use camera::CameraCapture;
use gesture_painter::{
    Color, Error, FrameBuffer, FrameReport, HandSource, Mode, PaintSession, PainterConfig, Tool,
};
use log::{info, warn};
use minifb::Key;
use window::{draw_ring, draw_swatch, draw_text_5x7, Drawer};

const POINTER_RADIUS: i32 = 7;

/// Settings come from an optional JSON file given as the first argument.
/// Visual: no argument → red brush, 6 px, default gesture timings.
fn load_config() -> Result<PainterConfig, Error> {
    match std::env::args().nth(1) {
        Some(path) => {
            info!("loading config from {path}");
            PainterConfig::from_json_file(path)
        }
        None => Ok(PainterConfig::default()),
    }
}

/// HUD text color per mode.
/// Visual: green while drawing, red while a fist is held, grey when idle.
fn mode_color(mode: Mode) -> Color {
    match mode {
        Mode::Draw => Color::rgb(80, 255, 120),
        Mode::Erase => Color::rgb(255, 80, 80),
        Mode::Stop => Color::rgb(220, 220, 220),
    }
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;

    /* --- Camera + window setup --- */
    let mut cam = CameraCapture::new(config.camera_index, config.camera_width, config.camera_height)?;
    let (w, h) = cam.resolution();
    let mut drawer = Drawer::new("Gesture Painter", w as usize, h as usize)?;

    // The session owns the config from here on; read it back via `session.config()`.
    let mut session = PaintSession::new(config);

    /* --- HUD / FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    info!("running: pinch (LMB) draws, fist (RMB) undoes, V toggles gestures, ESC quits");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();

        // 1) Fresh live frame.
        let live = cam.next_frame()?;

        // 2) Keyboard commands.
        if drawer.pressed_once(Key::C) {
            session.clear();
        }
        if drawer.pressed_once(Key::E) {
            session.toggle_tool();
        }
        if drawer.pressed_once(Key::LeftBracket) {
            session.adjust_thickness(-1);
        }
        if drawer.pressed_once(Key::RightBracket) {
            session.adjust_thickness(1);
        }
        if let Some(slot) = drawer.palette_key() {
            session.select_palette(slot);
        }

        // 3) Hand -> pointer -> mode -> strokes.
        let hand = drawer.observe(&live);
        let report = session.step(hand.as_ref(), now);

        // 4) Paint layer over the live frame. Exports get the canvas without HUD.
        let mut screen = session.render(&live);
        if drawer.pressed_once(Key::S) {
            // A failed save is reported but never stops the painting loop.
            if let Err(e) = export::save_png(&screen, Path::new(&session.config().output_dir)) {
                warn!("{e}");
            }
        }

        // 5) Pointer ring + HUD.
        draw_overlay(&mut screen, &session, &report, &hud_fps_text);

        // 6) Present.
        drawer.present(&screen)?;

        // 7) FPS, once per second.
        frames_this_second += 1;
        let since = now.duration_since(last_fps_time);
        if since >= Duration::from_secs(1) {
            let fps = frames_this_second as f32 / since.as_secs_f32();
            info!("FPS: {fps:.1}");
            hud_fps_text = format!("FPS: {fps:.1}");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}

/// Pointer ring, color swatch and the one-line status HUD.
/// Visual: "DRAW | BRUSH T:6 | FPS: 29.8" in the top-left corner, plus a hint
/// until the first stroke is drawn.
fn draw_overlay(screen: &mut FrameBuffer, session: &PaintSession, report: &FrameReport, fps: &str) {
    let erase_radius = session.config().erase_radius;
    if let Some(p) = report.pointer {
        match session.tool() {
            Tool::Brush => draw_ring(screen, p, POINTER_RADIUS, 2, Color::WHITE),
            Tool::Eraser => draw_ring(screen, p, erase_radius, 2, Color::rgb(255, 60, 60)),
        }
    }

    let gestures = if report.gestures_enabled { "" } else { " | GESTURES OFF" };
    let undo = if report.undo_fired { " | UNDO" } else { "" };
    let hud = format!(
        "{} | {} T:{}{}{} | {}",
        report.mode.as_str(),
        session.tool().as_str(),
        session.thickness(),
        gestures,
        undo,
        fps
    );
    draw_swatch(screen, 8, 6, 11, session.color());
    draw_text_5x7(screen, 24, 8, &hud, mode_color(report.mode));
    if session.is_pristine() {
        draw_text_5x7(screen, 8, 24, "PINCH TO DRAW", Color::rgb(200, 200, 200));
    }
}
