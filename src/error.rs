//! Error types for microjpeg

use std::fmt;
use std::io;

/// Result type for microjpeg operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for microjpeg operations
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Invalid image dimensions
    InvalidDimensions {
        width: usize,
        height: usize,
        reason: &'static str,
    },
    /// Invalid quality value
    InvalidQuality {
        value: u8,
        min: u8,
        max: u8,
    },
    /// Pixel buffer length does not match the declared geometry
    InvalidPixelData {
        expected: usize,
        actual: usize,
    },
    /// Comment contains a byte that cannot appear in a COM segment
    InvalidComment {
        position: usize,
    },
    /// Huffman code length exceeds maximum (16 bits)
    HuffmanCodeLengthOverflow,
    /// The output sink reported a write failure
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDimensions { width, height, reason } => {
                write!(f, "Invalid dimensions {}x{}: {}", width, height, reason)
            }
            Error::InvalidQuality { value, min, max } => {
                write!(f, "Quality {} out of range [{}, {}]", value, min, max)
            }
            Error::InvalidPixelData { expected, actual } => {
                write!(f, "Expected {} bytes of pixel data, got {}", expected, actual)
            }
            Error::InvalidComment { position } => {
                write!(f, "Comment contains 0xFF at byte {}", position)
            }
            Error::HuffmanCodeLengthOverflow => {
                write!(f, "Huffman code length exceeds maximum (16 bits)")
            }
            Error::Io(e) => write!(f, "Output sink error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}
