// Core types shared by the simulator, the raster and the HUD.

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the surface is on screen (pixels)
    pub height: usize,     // how tall the surface is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A buffer of the given size filled with one colour.
    pub fn filled(width: usize, height: usize, color: u32) -> Self {
        Self { width, height, pixels: vec![color; width * height] }
    }
}

/// Drawing target bounds. Zero-sized surfaces are legal but draw nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Surface {
    pub width: usize,
    pub height: usize,
}

impl Surface {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Straight (non-premultiplied) colour with a float alpha in [0,1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same hue, different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Pack to 0x00RRGGBB, dropping alpha.
    pub fn rgb_u32(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

#[inline]
pub fn unpack_rgb(px: u32) -> (u8, u8, u8) {
    (((px >> 16) & 0xFF) as u8, ((px >> 8) & 0xFF) as u8, (px & 0xFF) as u8)
}

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_agree() {
        let px = pack_rgb(0x12, 0xD2, 0xFF);
        assert_eq!(px, 0x0012_D2FF);
        assert_eq!(unpack_rgb(px), (0x12, 0xD2, 0xFF));
        assert_eq!(Rgba::new(0x12, 0xD2, 0xFF, 0.3).rgb_u32(), px);
    }

    #[test]
    fn empty_surface() {
        assert!(Surface::new(0, 10).is_empty());
        assert!(Surface::new(10, 0).is_empty());
        assert!(!Surface::new(1, 1).is_empty());
    }
}
