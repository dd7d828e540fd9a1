//! Quantization table handling for JPEG encoding
//!
//! Builds the wire-format quantization tables (zigzag order, one byte per
//! entry) from the Annex K defaults and a 1-100 quality setting, plus the
//! fused float tables that combine dequantization with the AAN DCT
//! post-scale so the block encoder pays one multiply per coefficient.

use crate::consts::{AAN_SCALE_FACTORS, DCTSIZE2, STD_CHROMA_QUANT, STD_LUMA_QUANT, ZIGZAG};

/// Map user quality (1-100) to the internal percentage scale factor.
///
/// This is the libjpeg formula: below 50 the tables are scaled up
/// hyperbolically, above 50 they shrink linearly toward zero.
pub fn quality_to_scale_factor(quality: u8) -> u32 {
    debug_assert!((1..=100).contains(&quality));
    if quality < 50 {
        5000 / u32::from(quality)
    } else {
        200 - 2 * u32::from(quality)
    }
}

/// A quantization table in zigzag (wire) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantTable {
    /// Quantization values as written to the DQT segment
    pub values: [u8; DCTSIZE2],
}

impl QuantTable {
    /// Luminance table for the given quality.
    pub fn luma(quality: u8) -> Self {
        Self::scaled(&STD_LUMA_QUANT, quality)
    }

    /// Chrominance table for the given quality.
    pub fn chroma(quality: u8) -> Self {
        Self::scaled(&STD_CHROMA_QUANT, quality)
    }

    /// Scale a default table (natural order) by quality, emitting zigzag
    /// order. Entries are clamped to [1, 255] after scaling.
    fn scaled(defaults: &[u16; DCTSIZE2], quality: u8) -> Self {
        let scale = quality_to_scale_factor(quality);
        let mut values = [0u8; DCTSIZE2];
        for i in 0..DCTSIZE2 {
            let q = (u32::from(defaults[ZIGZAG[i]]) * scale + 50) / 100;
            values[i] = q.clamp(1, 255) as u8;
        }
        Self { values }
    }

    /// Fused dequantization table in natural (row-major) order.
    ///
    /// `scaled[nat] = 1 / (aan[row] * aan[col] * 8 * Q)`, so multiplying a
    /// raw AAN coefficient by the matching entry both removes the DCT
    /// scaling and divides by the quantizer in one step.
    pub fn scaled_dequant(&self) -> [f32; DCTSIZE2] {
        let mut scaled = [0f32; DCTSIZE2];
        for i in 0..DCTSIZE2 {
            let nat = ZIGZAG[i];
            let row = nat / 8;
            let col = nat % 8;
            let factor = 1.0 / (AAN_SCALE_FACTORS[row] * AAN_SCALE_FACTORS[col] * 8.0);
            scaled[nat] = factor / f32::from(self.values[i]);
        }
        scaled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_factor_mapping() {
        assert_eq!(quality_to_scale_factor(1), 5000);
        assert_eq!(quality_to_scale_factor(25), 200);
        assert_eq!(quality_to_scale_factor(50), 100);
        assert_eq!(quality_to_scale_factor(75), 50);
        assert_eq!(quality_to_scale_factor(100), 0);
    }

    #[test]
    fn test_quality_50_is_annex_k_in_zigzag_order() {
        let table = QuantTable::luma(50);
        for i in 0..DCTSIZE2 {
            assert_eq!(u16::from(table.values[i]), STD_LUMA_QUANT[ZIGZAG[i]]);
        }
    }

    #[test]
    fn test_quality_100_clamps_to_one() {
        // Scale factor 0 drives every entry to the lower clamp
        let luma = QuantTable::luma(100);
        let chroma = QuantTable::chroma(100);
        assert!(luma.values.iter().all(|&v| v == 1));
        assert!(chroma.values.iter().all(|&v| v == 1));
    }

    #[test]
    fn test_quality_1_clamps_to_255() {
        let table = QuantTable::luma(1);
        // 50x scaling saturates everything but stays within a byte
        assert!(table.values.iter().all(|&v| v == 255 || v >= 1));
        assert_eq!(table.values[63], 255);
    }

    #[test]
    fn test_higher_quality_never_coarser() {
        let q60 = QuantTable::luma(60);
        let q90 = QuantTable::luma(90);
        for i in 0..DCTSIZE2 {
            assert!(q90.values[i] <= q60.values[i]);
        }
    }

    #[test]
    fn test_scaled_dequant_dc_entry() {
        let table = QuantTable::luma(50);
        let scaled = table.scaled_dequant();
        // DC: both AAN factors are 1, so the entry is 1 / (8 * Q)
        let expected = 1.0 / (8.0 * f32::from(table.values[0]));
        assert!((scaled[0] - expected).abs() < 1e-9);
        // Every entry is positive and finite
        assert!(scaled.iter().all(|v| v.is_finite() && *v > 0.0));
    }
}
