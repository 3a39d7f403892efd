// HUD: one line of text in the top-left corner.
// Shows the theme, the particle count (counting up after every repopulation)
// and the FPS, using a tiny 5x7 bitmap font.

use crate::theme::Theme;
use crate::types::FrameBuffer;
use std::time::Duration;

/* ---------- Stats counter ---------- */

/// Counts a displayed integer up from 0 to `target` in `Counter::TICKS`
/// equal steps, one step per `Counter::TICK`.
#[derive(Clone, Debug)]
pub struct Counter {
    target: u32,
    ticks: u32,
}

impl Counter {
    pub const TICK: Duration = Duration::from_millis(60);
    pub const TICKS: u32 = 60;

    pub fn new(target: u32) -> Self {
        Self { target, ticks: 0 }
    }

    /// One timer firing. Does nothing once the target is shown.
    pub fn tick(&mut self) {
        if !self.is_done() {
            self.ticks += 1;
        }
    }

    /// Floored linear progress towards the target.
    pub fn value(&self) -> u32 {
        (self.target as u64 * self.ticks as u64 / Self::TICKS as u64) as u32
    }

    pub fn is_done(&self) -> bool {
        self.ticks >= Self::TICKS
    }
}

/* ---------- HUD state ---------- */

pub struct Hud {
    count: Counter,
    since_tick: Duration,
    visible: bool,
    frames_this_second: u32,
    since_fps: Duration,
    fps_text: String,
}

impl Hud {
    pub fn new() -> Self {
        Self {
            count: Counter::new(0),
            since_tick: Duration::ZERO,
            visible: true,
            frames_this_second: 0,
            since_fps: Duration::ZERO,
            fps_text: String::from("FPS: 0.0"),
        }
    }

    /// Start counting up to a fresh particle total.
    pub fn restart_count(&mut self, target: usize) {
        self.count = Counter::new(target as u32);
        self.since_tick = Duration::ZERO;
    }

    pub fn toggle_visible(&mut self) {
        self.visible = !self.visible;
    }

    /// Account for one presented frame that took `dt`.
    pub fn frame(&mut self, dt: Duration) {
        self.since_tick += dt;
        while self.since_tick >= Counter::TICK && !self.count.is_done() {
            self.since_tick -= Counter::TICK;
            self.count.tick();
        }

        self.frames_this_second += 1;
        self.since_fps += dt;
        if self.since_fps >= Duration::from_secs(1) {
            let fps = self.frames_this_second as f32 / self.since_fps.as_secs_f32();
            log::debug!("FPS: {fps:.1}");
            self.fps_text = format!("FPS: {fps:.1}");
            self.frames_this_second = 0;
            self.since_fps = Duration::ZERO;
        }
    }

    pub fn text(&self, theme: Theme) -> String {
        format!("{} | N: {} | {}", theme.label(), self.count.value(), self.fps_text)
    }

    pub fn render(&self, fb: &mut FrameBuffer, theme: Theme) {
        if self.visible {
            draw_text_5x7(fb, 8, 8, &self.text(theme), theme.foreground());
        }
    }
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

/* ---------- 5x7 bitmap font (just what the HUD line needs) ---------- */

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

/// 5x7 glyph rows; the low 5 bits of each row are pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Theme labels, "N:" and "FPS:"
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),

        ' ' => g!(0,0,0,0,0,0,0),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),

        _ => None,
    }
}

fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    let Some(rows) = glyph5x7(ch) else { return };
    for (ry, rowbits) in rows.iter().enumerate() {
        for rx in 0..5 {
            if (rowbits & (1 << (4 - rx))) != 0 {
                put_pixel(fb, x + rx, y + ry as i32, color);
            }
        }
    }
}

/// Draw a string with 1 px spacing between glyphs. Unknown characters leave
/// a blank cell.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6;
    }
}
