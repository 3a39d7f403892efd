// A small error type so we don't rely on anyhow/thiserror.
// Every variant states *where* things went wrong.
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    WindowInit(String),            // Creating the window failed
    WindowUpdate(String),          // Pushing the frame to the window failed
    ImageTooLarge { bytes: u64 },  // Backdrop file over the size limit
    ImageType(String),             // Backdrop file is not an image
    ImageDecode(image::ImageError),
    Io(std::io::Error),
    Config(String),                // Bad command line value
}

impl Display for Error {
    // This decides how the error is printed to your console.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::ImageTooLarge { bytes } => {
                write!(f, "Please select an image smaller than 5MB (got {bytes} bytes)")
            }
            Error::ImageType(s) => write!(f, "Please select a valid image file: {s}"),
            Error::ImageDecode(e) => write!(f, "Image decode error: {e}"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::Config(s) => write!(f, "Config error: {s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ImageDecode(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::ImageDecode(e)
    }
}
