// Window, keyboard, the mouse-driven hand stand-in, and HUD overlays.
//
// No landmark detector ships with this app, so the mouse plays the hand:
//   hold Left  -> pinch (thumb + index up)     => draw
//   hold Right -> closed fist (no fingers up)  => undo after a short hold
//   hold V     -> victory sign                 => toggle gesture input
//   otherwise  -> open palm                    => stop
// Moving the cursor out of the window reads as "no hand detected".

use gesture_painter::{
    Color, Error, Finger, FingersUp, FrameBuffer, HandObservation, HandSource, Point,
};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

/// Thumb offset from the index tip while pinching (well under the pinch threshold).
const PINCH_THUMB_OFFSET: Point = (8, 6);
/// Thumb offset with the hand open (well over the pinch threshold).
const OPEN_THUMB_OFFSET: Point = (70, 40);

const PALETTE_KEYS: [Key; 8] = [
    Key::Key1, Key::Key2, Key::Key3, Key::Key4,
    Key::Key5, Key::Key6, Key::Key7, Key::Key8,
];

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window sized to the camera feed.
    /// Visual: an empty window with the given title appears.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window })
    }

    /// Push this frame's pixels to the screen.
    /// Visual: the window shows the camera image with paint and HUD on top.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    /// False once the user closes the window, which ends the main loop.
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down.
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Key went down this frame (no auto-repeat).
    pub fn pressed_once(&self, key: Key) -> bool {
        self.window.is_key_pressed(key, KeyRepeat::No)
    }

    /// Palette slot for a number key pressed this frame (1 -> slot 0).
    pub fn palette_key(&self) -> Option<usize> {
        PALETTE_KEYS.iter().position(|k| self.pressed_once(*k))
    }

    /// Cursor position, `None` while it is outside the window.
    /// Visual: this is where the pointer ring is drawn and where paint lands.
    fn mouse_pos(&self) -> Option<Point> {
        self.window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| (x as i32, y as i32))
    }
}

impl HandSource for Drawer {
    /// Build a fake hand around the cursor from the buttons held right now.
    /// The thumb is placed close to the index tip for pinch/fist and far away
    /// otherwise, so the real pinch-distance test decides, not a shortcut.
    fn observe(&mut self, _frame: &FrameBuffer) -> Option<HandObservation> {
        let at = self.mouse_pos()?;
        let offset = |(dx, dy): Point| (at.0 + dx, at.1 + dy);

        let (thumb, fingers) = if self.window.get_mouse_down(MouseButton::Right) {
            (offset(PINCH_THUMB_OFFSET), FingersUp::NONE)
        } else if self.window.get_mouse_down(MouseButton::Left) {
            (offset(PINCH_THUMB_OFFSET), FingersUp([true, true, false, false, false]))
        } else if self.window.is_key_down(Key::V) {
            (offset(OPEN_THUMB_OFFSET), FingersUp([false, true, true, false, false]))
        } else {
            (offset(OPEN_THUMB_OFFSET), FingersUp::ALL)
        };

        Some(
            HandObservation::default()
                .with_tip(Finger::Index, at)
                .with_tip(Finger::Thumb, thumb)
                .with_fingers(fingers),
        )
    }
}

/* ---------- HUD drawing: pixels, rings, tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
/// Visual: exactly that one pixel changes color; off-screen writes vanish.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    fb.pixels[y * fb.width + x] = color;
}

/// Circle outline (midpoint algorithm), `width` pixels thick inward.
/// Visual: the pointer ring; its radius is the brush or eraser reach.
pub fn draw_ring(fb: &mut FrameBuffer, center: Point, radius: i32, width: i32, color: Color) {
    // A ring wider than the whole frame around an on-screen center never
    // touches a visible pixel.
    if radius > (fb.width + fb.height) as i32 {
        return;
    }
    let color = color.to_u32();
    for r in (radius - width + 1).max(1)..=radius {
        let (mut x, mut y, mut err) = (r, 0, 1 - r);
        while x >= y {
            for (px, py) in [(x, y), (y, x), (-y, x), (-x, y), (-x, -y), (-y, -x), (y, -x), (x, -y)] {
                put_pixel(fb, center.0 + px, center.1 + py, color);
            }
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }
}

/// Filled square swatch with a 1-pixel dark border.
/// Visual: a little tile in the HUD corner showing the current brush color.
pub fn draw_swatch(fb: &mut FrameBuffer, x: i32, y: i32, size: i32, color: Color) {
    for dy in 0..size {
        for dx in 0..size {
            let edge = dx == 0 || dy == 0 || dx == size - 1 || dy == size - 1;
            let c = if edge { 0x0014_1414 } else { color.to_u32() };
            put_pixel(fb, x + dx, y + dy, c);
        }
    }
}

/// 5x7 glyph rows; low 5 bits are pixels, bit 4 leftmost.
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    let rows = match ch.to_ascii_uppercase() {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        ' ' => [0; 7],
        '|' => [0b00100; 7],
        ':' => [0b00000, 0b00100, 0b00000, 0b00000, 0b00100, 0b00000, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b00000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        _ => return None,
    };
    Some(rows)
}

// Shadow and foreground both go through here, just with different offsets/colors.
fn draw_glyph(fb: &mut FrameBuffer, x: i32, y: i32, rows: &[u8; 7], color: u32) {
    for (ry, bits) in rows.iter().enumerate() {
        for rx in 0..5 {
            if bits & (1 << (4 - rx)) != 0 {
                put_pixel(fb, x + rx, y + ry as i32, color);
            }
        }
    }
}

/// Draw text with 5x7 glyphs and a 1-pixel black drop shadow.
/// Unknown characters advance without drawing.
/// Visual: small blocky HUD text that stays readable over bright video.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: Color) {
    for ch in text.chars() {
        if let Some(rows) = glyph5x7(ch) {
            draw_glyph(fb, x + 1, y + 1, &rows, 0x0000_0000);
            draw_glyph(fb, x, y, &rows, color.to_u32());
        }
        x += 6;
    }
}
