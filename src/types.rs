//! Core types for microjpeg

/// Pixel format specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    /// 8-bit RGB, 3 bytes per pixel, tightly packed R,G,B
    #[default]
    Rgb8,
    /// 8-bit grayscale, 1 byte per pixel
    Gray8,
}

impl PixelFormat {
    /// Bytes per pixel for this format
    #[must_use]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Gray8 => 1,
        }
    }

    /// Number of color components in the encoded stream
    #[must_use]
    pub const fn components(self) -> usize {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Gray8 => 1,
        }
    }
}

/// Chroma subsampling mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Subsampling {
    /// No subsampling (4:4:4) - highest quality
    #[default]
    S444,
    /// Both horizontal and vertical (4:2:0) - smallest files
    S420,
}

impl Subsampling {
    /// Horizontal sampling factor for the luma component
    #[must_use]
    pub const fn h_factor(self) -> u8 {
        match self {
            Subsampling::S444 => 1,
            Subsampling::S420 => 2,
        }
    }

    /// Vertical sampling factor for the luma component
    #[must_use]
    pub const fn v_factor(self) -> u8 {
        match self {
            Subsampling::S444 => 1,
            Subsampling::S420 => 2,
        }
    }

    /// MCU edge length in luma pixels
    #[must_use]
    pub const fn mcu_size(self) -> usize {
        match self {
            Subsampling::S444 => 8,
            Subsampling::S420 => 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_format_geometry() {
        assert_eq!(PixelFormat::Rgb8.bytes_per_pixel(), 3);
        assert_eq!(PixelFormat::Gray8.bytes_per_pixel(), 1);
        assert_eq!(PixelFormat::Rgb8.components(), 3);
        assert_eq!(PixelFormat::Gray8.components(), 1);
    }

    #[test]
    fn subsampling_factors() {
        assert_eq!(Subsampling::S444.h_factor(), 1);
        assert_eq!(Subsampling::S420.h_factor(), 2);
        assert_eq!(Subsampling::S444.mcu_size(), 8);
        assert_eq!(Subsampling::S420.mcu_size(), 16);
    }
}
