//! # microjpeg - Baseline JPEG Encoder
//!
//! microjpeg is a small baseline sequential JFIF/JPEG encoder that
//! streams its output through any byte sink, so callers decide whether
//! the stream lands in memory, a file, or a socket.
//!
//! ## Key Features
//!
//! - **Baseline sequential DCT** (ITU-T T.81 / JFIF 1.1), grayscale or
//!   RGB input
//! - **Streaming output**: O(1) scratch memory in the image size, every
//!   byte delivered through `std::io::Write`
//! - **4:2:0 chroma subsampling** (optional) with border replication for
//!   images that are not a multiple of the MCU size
//! - **Deterministic**: the same input always produces the same bytes
//!
//! ## Usage
//!
//! ```rust
//! use microjpeg::{Encoder, Subsampling};
//!
//! # fn main() -> microjpeg::Result<()> {
//! let pixels = vec![128u8; 64 * 48 * 3]; // interleaved RGB, row-major
//!
//! let jpeg = Encoder::new()
//!     .quality(90)
//!     .subsampling(Subsampling::S420)
//!     .encode_rgb(&pixels, 64, 48)?;
//!
//! assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
//! # Ok(())
//! # }
//! ```
//!
//! Writer-based variants (`encode_rgb_to`, `encode_gray_to`) stream into
//! any `std::io::Write`; encoding stops at the first sink error.

// Core modules
mod consts;
mod error;
mod types;

// Encoding pipeline
mod bitstream;
mod color;
mod dct;
mod encode;
mod entropy;
mod huffman;
mod quant;

// Public API
pub use encode::Encoder;
pub use error::Error;
pub use types::{PixelFormat, Subsampling};

/// Result type for microjpeg operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_pixel_image() {
        let jpeg = Encoder::new().encode_gray(&[200], 1, 1).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
    }
}
