// Window + software drawing.
// Visual effects provided here:
// 1) A resizable window that shows the particle field.
// 2) A `Painter` that rasterises discs and thin lines into the frame buffer,
//    compositing every pixel in linear light.

use crate::canvas::Canvas;
use crate::error::Error;
use crate::gamma::GammaLut;
use crate::types::{FrameBuffer, Rgba, Surface};
use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a resizable window; `fps` caps how often `present` returns.
    pub fn new(title: &str, width: usize, height: usize, fps: usize) -> Result<Self, Error> {
        let opts = WindowOptions { resize: true, ..WindowOptions::default() };
        let mut window = Window::new(title, width, height, opts)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(fps);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// The drawable area, or None while the window has no area (minimised).
    pub fn surface(&self) -> Option<Surface> {
        let (w, h) = self.window.get_size();
        let s = Surface::new(w, h);
        if s.is_empty() { None } else { Some(s) }
    }

    /// Pointer position in window pixels; None while the pointer is outside,
    /// so callers keep the last known position.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    // T flips the light/dark theme.
    pub fn t_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::T, KeyRepeat::No)
    }

    // R drops the backdrop image.
    pub fn r_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::R, KeyRepeat::No)
    }

    // H shows/hides the HUD line.
    pub fn h_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::H, KeyRepeat::No)
    }
}

/* ---------- Software raster behind the Canvas trait ---------- */

/// Owns the screen buffer and knows what "clear" means this frame.
pub struct Painter {
    fb: FrameBuffer,
    lut: GammaLut,
    background: u32,
    backdrop: Option<FrameBuffer>,
}

impl Painter {
    pub fn new(surface: Surface, background: u32) -> Self {
        Self {
            fb: FrameBuffer::filled(surface.width, surface.height, background),
            lut: GammaLut::new(),
            background,
            backdrop: None,
        }
    }

    /// Reallocate for a new surface; any backdrop is dropped since it was
    /// fitted to the old size.
    pub fn resize(&mut self, surface: Surface) {
        self.fb = FrameBuffer::filled(surface.width, surface.height, self.background);
        self.backdrop = None;
    }

    pub fn set_background(&mut self, color: u32) {
        self.background = color;
    }

    /// Use `image` instead of the flat background. Ignored if the size does
    /// not match the current surface.
    pub fn set_backdrop(&mut self, image: Option<FrameBuffer>) {
        self.backdrop = image.filter(|b| b.width == self.fb.width && b.height == self.fb.height);
    }

    #[cfg(test)]
    fn has_backdrop(&self) -> bool {
        self.backdrop.is_some()
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.fb
    }

    pub fn frame_mut(&mut self) -> &mut FrameBuffer {
        &mut self.fb
    }
}

impl Canvas for Painter {
    fn size(&self) -> (usize, usize) {
        (self.fb.width, self.fb.height)
    }

    fn clear(&mut self) {
        match &self.backdrop {
            Some(b) => self.fb.pixels.copy_from_slice(&b.pixels),
            None => self.fb.pixels.fill(self.background),
        }
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
        fill_circle(&mut self.fb, &self.lut, x, y, radius, color);
    }

    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba) {
        draw_line(&mut self.fb, &self.lut, x0, y0, x1, y1, color);
    }
}

/// Composite `color` at (x,y) if inside bounds.
#[inline]
fn blend_pixel(fb: &mut FrameBuffer, lut: &GammaLut, x: i32, y: i32, color: Rgba, coverage: f32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = lut.over(fb.pixels[idx], color, coverage);
}

/// Disc with a one-pixel soft edge: coverage ramps from 1 inside to 0 just
/// past the radius, measured from each pixel centre.
fn fill_circle(fb: &mut FrameBuffer, lut: &GammaLut, cx: f32, cy: f32, radius: f32, color: Rgba) {
    if !(cx.is_finite() && cy.is_finite() && radius > 0.0) {
        return;
    }
    let reach = radius + 0.5;
    let x_min = (cx - reach).floor().max(0.0) as i32;
    let y_min = (cy - reach).floor().max(0.0) as i32;
    let x_max = ((cx + reach).ceil() as i32).min(fb.width as i32 - 1);
    let y_max = ((cy + reach).ceil() as i32).min(fb.height as i32 - 1);

    for y in y_min..=y_max {
        for x in x_min..=x_max {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let d = (dx * dx + dy * dy).sqrt();
            let coverage = (reach - d).clamp(0.0, 1.0);
            if coverage > 0.0 {
                blend_pixel(fb, lut, x, y, color, coverage);
            }
        }
    }
}

/// Thin line between two points using Bresenham.
fn draw_line(fb: &mut FrameBuffer, lut: &GammaLut, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba) {
    if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) {
        return;
    }
    let (mut x0, mut y0) = (x0.round() as i32, y0.round() as i32);
    let (x1, y1) = (x1.round() as i32, y1.round() as i32);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        blend_pixel(fb, lut, x0, y0, color, 1.0);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: u32 = 0x0010_1010;

    fn painter(w: usize, h: usize) -> Painter {
        Painter::new(Surface::new(w, h), BG)
    }

    fn px(p: &Painter, x: usize, y: usize) -> u32 {
        p.frame().pixels[y * p.frame().width + x]
    }

    #[test]
    fn clear_uses_background_then_backdrop() {
        let mut p = painter(4, 3);
        p.frame_mut().pixels.fill(0x00FF_FFFF);
        p.clear();
        assert!(p.frame().pixels.iter().all(|&c| c == BG));

        p.set_backdrop(Some(FrameBuffer::filled(4, 3, 0x0000_00AA)));
        assert!(p.has_backdrop());
        p.clear();
        assert!(p.frame().pixels.iter().all(|&c| c == 0x0000_00AA));
    }

    #[test]
    fn mismatched_backdrop_is_ignored() {
        let mut p = painter(4, 3);
        p.set_backdrop(Some(FrameBuffer::filled(5, 3, 0)));
        assert!(!p.has_backdrop());
    }

    #[test]
    fn opaque_circle_covers_centre_only() {
        let mut p = painter(20, 20);
        p.fill_circle(10.0, 10.0, 2.0, Rgba::new(0, 210, 255, 1.0));
        assert_eq!(px(&p, 10, 10), 0x0000_D2FF);
        assert_eq!(px(&p, 0, 0), BG);
        assert_eq!(px(&p, 19, 19), BG);
    }

    #[test]
    fn circle_off_surface_is_harmless() {
        let mut p = painter(8, 8);
        p.fill_circle(-50.0, 3.0, 3.0, Rgba::new(255, 0, 0, 1.0));
        p.fill_circle(f32::NAN, 3.0, 3.0, Rgba::new(255, 0, 0, 1.0));
        assert!(p.frame().pixels.iter().all(|&c| c == BG));
    }

    #[test]
    fn line_hits_both_endpoints() {
        let mut p = painter(10, 10);
        let c = Rgba::new(255, 255, 255, 1.0);
        p.stroke_line(1.0, 1.0, 8.0, 6.0, c);
        assert_eq!(px(&p, 1, 1), 0x00FF_FFFF);
        assert_eq!(px(&p, 8, 6), 0x00FF_FFFF);
        assert_eq!(px(&p, 8, 1), BG);
    }

    #[test]
    fn faint_line_only_tints() {
        let mut p = painter(10, 1);
        p.stroke_line(0.0, 0.0, 9.0, 0.0, Rgba::new(0, 210, 255, 0.1));
        let c = px(&p, 5, 0);
        assert_ne!(c, BG);
        assert_ne!(c, 0x0000_D2FF);
    }

    #[test]
    fn resize_reallocates_and_drops_backdrop() {
        let mut p = painter(4, 4);
        p.set_backdrop(Some(FrameBuffer::filled(4, 4, 0)));
        p.resize(Surface::new(6, 2));
        assert_eq!(p.size(), (6, 2));
        assert_eq!(p.frame().pixels.len(), 12);
        assert!(!p.has_backdrop());
    }
}
