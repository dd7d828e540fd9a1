//! Constants and tables for JPEG encoding
//!
//! Standard JPEG tables (ITU-T T.81 Annex K) plus the AAN post-scale
//! factors used to fold quantization into the DCT output.

/// DCT block dimension
pub const DCTSIZE: usize = 8;

/// DCT block size (8x8 = 64)
pub const DCTSIZE2: usize = 64;

/// Zigzag scan order: maps zigzag position to natural (row-major) position.
/// Use this when iterating in zigzag order to access coefficients.
/// Example: natural_pos = ZIGZAG[zigzag_pos]
pub const ZIGZAG: [usize; 64] = [
    0, 1, 8, 16, 9, 2, 3, 10, 17, 24, 32, 25, 18, 11, 4, 5, 12, 19, 26, 33, 40, 48, 41, 34, 27, 20,
    13, 6, 7, 14, 21, 28, 35, 42, 49, 56, 57, 50, 43, 36, 29, 22, 15, 23, 30, 37, 44, 51, 58, 59,
    52, 45, 38, 31, 39, 46, 53, 60, 61, 54, 47, 55, 62, 63,
];

/// Post-scale factors for the AAN fast DCT, one per row/column frequency.
/// The transform in `dct` is unscaled; dividing by
/// `AAN_SCALE_FACTORS[row] * AAN_SCALE_FACTORS[col] * 8` yields the true
/// DCT coefficient, and `quant` folds that division into its tables.
pub const AAN_SCALE_FACTORS: [f32; 8] = [
    1.0, 1.387039845, 1.306562965, 1.175875602, 1.0, 0.785694958, 0.541196100, 0.275899379,
];

/// Standard JPEG Annex K luminance quantization table (natural order)
pub const STD_LUMA_QUANT: [u16; 64] = [
    16, 11, 10, 16, 24, 40, 51, 61, 12, 12, 14, 19, 26, 58, 60, 55, 14, 13, 16, 24, 40, 57, 69, 56,
    14, 17, 22, 29, 51, 87, 80, 62, 18, 22, 37, 56, 68, 109, 103, 77, 24, 35, 55, 64, 81, 104, 113,
    92, 49, 64, 78, 87, 103, 121, 120, 101, 72, 92, 95, 98, 112, 100, 103, 99,
];

/// Standard JPEG Annex K chrominance quantization table (natural order)
pub const STD_CHROMA_QUANT: [u16; 64] = [
    17, 18, 24, 47, 99, 99, 99, 99, 18, 21, 26, 66, 99, 99, 99, 99, 24, 26, 56, 99, 99, 99, 99, 99,
    47, 66, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99,
];

/// JPEG markers
pub mod marker {
    pub const SOI: u8 = 0xD8; // Start of image
    pub const EOI: u8 = 0xD9; // End of image
    pub const SOF0: u8 = 0xC0; // Baseline DCT
    pub const DHT: u8 = 0xC4; // Define Huffman table
    pub const DQT: u8 = 0xDB; // Define quantization table
    pub const SOS: u8 = 0xDA; // Start of scan
    pub const APP0: u8 = 0xE0; // JFIF marker
    pub const COM: u8 = 0xFE; // Comment
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zigzag_is_a_permutation() {
        let mut seen = [false; 64];
        for &nat in &ZIGZAG {
            assert!(!seen[nat]);
            seen[nat] = true;
        }
    }

    #[test]
    fn zigzag_walks_antidiagonals() {
        // Positions on the same antidiagonal (row+col) are contiguous.
        let mut last_diag = 0usize;
        for &nat in &ZIGZAG {
            let diag = nat / 8 + nat % 8;
            assert!(diag == last_diag || diag == last_diag + 1);
            last_diag = diag;
        }
    }

    #[test]
    fn aan_factors_match_cosine_form() {
        // factor[k] = cos(k*PI/16) * sqrt(2) for k > 0, factor[0] = 1
        for k in 1..8 {
            let expected = (k as f64 * std::f64::consts::PI / 16.0).cos() * 2f64.sqrt();
            assert!((AAN_SCALE_FACTORS[k] as f64 - expected).abs() < 1e-6);
        }
        assert_eq!(AAN_SCALE_FACTORS[0], 1.0);
    }
}
