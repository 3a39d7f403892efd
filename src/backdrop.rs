// Optional image shown behind the particles, like the profile picture on the
// page: picked once, held in memory, dropped on request.

use crate::error::Error;
use crate::types::{pack_rgb, FrameBuffer, Surface};
use image::imageops::{self, FilterType};
use image::{ImageReader, RgbImage};
use std::path::Path;

/// Files above this size are rejected before decoding.
pub const MAX_BYTES: u64 = 5 * 1024 * 1024;

pub struct Backdrop {
    image: RgbImage,
}

impl Backdrop {
    /// Read and decode `path`. The format is sniffed from the file contents,
    /// falling back to the extension.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let bytes = std::fs::metadata(path)?.len();
        if bytes > MAX_BYTES {
            return Err(Error::ImageTooLarge { bytes });
        }

        let reader = ImageReader::open(path)?.with_guessed_format()?;
        let mime = reader
            .format()
            .map(|f| f.to_mime_type())
            .unwrap_or("application/octet-stream");
        check_mime(mime)?;

        let image = reader.decode()?.to_rgb8();
        log::info!("backdrop loaded: {} ({}x{})", path.display(), image.width(), image.height());
        Ok(Self { image })
    }

    /// Stretch to `surface` and convert to 0x00RRGGBB.
    pub fn fit(&self, surface: Surface) -> FrameBuffer {
        let scaled = imageops::resize(
            &self.image,
            surface.width as u32,
            surface.height as u32,
            FilterType::Triangle,
        );
        let pixels = scaled.pixels().map(|p| pack_rgb(p[0], p[1], p[2])).collect();
        FrameBuffer { width: surface.width, height: surface.height, pixels }
    }
}

fn check_mime(mime: &str) -> Result<(), Error> {
    if mime.starts_with("image/") {
        Ok(())
    } else {
        Err(Error::ImageType(mime.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use std::path::PathBuf;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("particle-field-{}-{name}", std::process::id()))
    }

    #[test]
    fn mime_prefix_rule() {
        assert!(check_mime("image/png").is_ok());
        assert!(matches!(check_mime("text/plain"), Err(Error::ImageType(_))));
    }

    #[test]
    fn rejects_oversized_file() {
        let path = scratch("big.png");
        std::fs::write(&path, vec![0u8; MAX_BYTES as usize + 1]).unwrap();
        let err = Backdrop::load(&path).err().unwrap();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, Error::ImageTooLarge { bytes } if bytes == MAX_BYTES + 1));
    }

    #[test]
    fn rejects_non_image() {
        let path = scratch("notes.txt");
        std::fs::write(&path, b"definitely not pixels").unwrap();
        let err = Backdrop::load(&path).err().unwrap();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, Error::ImageType(_)), "got {err}");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Backdrop::load(&scratch("absent.png")).err().unwrap();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn loads_png_and_fits_surface() {
        let path = scratch("tiny.png");
        RgbImage::from_pixel(4, 2, Rgb([0, 210, 255])).save(&path).unwrap();
        let backdrop = Backdrop::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let fb = backdrop.fit(Surface::new(8, 4));
        assert_eq!((fb.width, fb.height), (8, 4));
        assert_eq!(fb.pixels.len(), 32);
        for &p in &fb.pixels {
            let (r, g, b) = crate::types::unpack_rgb(p);
            assert!(r <= 1 && g.abs_diff(210) <= 1 && b >= 254, "{p:06x}");
        }
    }
}
