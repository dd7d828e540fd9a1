//! Color space conversion for JPEG encoding
//!
//! RGB to YCbCr with JFIF/BT.601 coefficients. The conversions return
//! floats ready for the DCT path: chroma is naturally centered on zero,
//! luma still needs the -128 level shift applied by the caller.

/// Luma from RGB, range [0, 255]
#[inline]
pub fn rgb_to_y(r: f32, g: f32, b: f32) -> f32 {
    0.299 * r + 0.587 * g + 0.114 * b
}

/// Blue-difference chroma from RGB, range [-128, 127], centered on zero
#[inline]
pub fn rgb_to_cb(r: f32, g: f32, b: f32) -> f32 {
    -0.16874 * r - 0.33126 * g + 0.5 * b
}

/// Red-difference chroma from RGB, range [-128, 127], centered on zero
#[inline]
pub fn rgb_to_cr(r: f32, g: f32, b: f32) -> f32 {
    0.5 * r - 0.41869 * g - 0.08131 * b
}
