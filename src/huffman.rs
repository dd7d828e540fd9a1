//! Huffman coding for JPEG entropy encoding
//!
//! Carries the four baseline Huffman table definitions from the JPEG
//! standard (Annex K), derives canonical codes from them, and precomputes
//! the magnitude codewords used to emit signed DCT coefficients.

use crate::error::{Error, Result};

/// Standard DC luminance Huffman table (JPEG Annex K)
pub const STD_DC_LUMA_BITS: [u8; 16] = [0, 1, 5, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0];
pub const STD_DC_LUMA_VALUES: [u8; 12] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

/// Standard DC chrominance Huffman table (JPEG Annex K)
pub const STD_DC_CHROMA_BITS: [u8; 16] = [0, 3, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0];
pub const STD_DC_CHROMA_VALUES: [u8; 12] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

/// Standard AC luminance Huffman table (JPEG Annex K)
pub const STD_AC_LUMA_BITS: [u8; 16] = [0, 2, 1, 3, 3, 2, 4, 3, 5, 5, 4, 4, 0, 0, 1, 125];
pub const STD_AC_LUMA_VALUES: [u8; 162] = [
    0x01, 0x02, 0x03, 0x00, 0x04, 0x11, 0x05, 0x12, 0x21, 0x31, 0x41, 0x06, 0x13, 0x51, 0x61, 0x07,
    0x22, 0x71, 0x14, 0x32, 0x81, 0x91, 0xA1, 0x08, 0x23, 0x42, 0xB1, 0xC1, 0x15, 0x52, 0xD1, 0xF0,
    0x24, 0x33, 0x62, 0x72, 0x82, 0x09, 0x0A, 0x16, 0x17, 0x18, 0x19, 0x1A, 0x25, 0x26, 0x27, 0x28,
    0x29, 0x2A, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x3A, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48, 0x49,
    0x4A, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, 0x59, 0x5A, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, 0x69,
    0x6A, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7A, 0x83, 0x84, 0x85, 0x86, 0x87, 0x88, 0x89,
    0x8A, 0x92, 0x93, 0x94, 0x95, 0x96, 0x97, 0x98, 0x99, 0x9A, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6, 0xA7,
    0xA8, 0xA9, 0xAA, 0xB2, 0xB3, 0xB4, 0xB5, 0xB6, 0xB7, 0xB8, 0xB9, 0xBA, 0xC2, 0xC3, 0xC4, 0xC5,
    0xC6, 0xC7, 0xC8, 0xC9, 0xCA, 0xD2, 0xD3, 0xD4, 0xD5, 0xD6, 0xD7, 0xD8, 0xD9, 0xDA, 0xE1, 0xE2,
    0xE3, 0xE4, 0xE5, 0xE6, 0xE7, 0xE8, 0xE9, 0xEA, 0xF1, 0xF2, 0xF3, 0xF4, 0xF5, 0xF6, 0xF7, 0xF8,
    0xF9, 0xFA,
];

/// Standard AC chrominance Huffman table (JPEG Annex K)
pub const STD_AC_CHROMA_BITS: [u8; 16] = [0, 2, 1, 2, 4, 4, 3, 4, 7, 5, 4, 4, 0, 1, 2, 119];
pub const STD_AC_CHROMA_VALUES: [u8; 162] = [
    0x00, 0x01, 0x02, 0x03, 0x11, 0x04, 0x05, 0x21, 0x31, 0x06, 0x12, 0x41, 0x51, 0x07, 0x61, 0x71,
    0x13, 0x22, 0x32, 0x81, 0x08, 0x14, 0x42, 0x91, 0xA1, 0xB1, 0xC1, 0x09, 0x23, 0x33, 0x52, 0xF0,
    0x15, 0x62, 0x72, 0xD1, 0x0A, 0x16, 0x24, 0x34, 0xE1, 0x25, 0xF1, 0x17, 0x18, 0x19, 0x1A, 0x26,
    0x27, 0x28, 0x29, 0x2A, 0x35, 0x36, 0x37, 0x38, 0x39, 0x3A, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48,
    0x49, 0x4A, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, 0x59, 0x5A, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68,
    0x69, 0x6A, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7A, 0x82, 0x83, 0x84, 0x85, 0x86, 0x87,
    0x88, 0x89, 0x8A, 0x92, 0x93, 0x94, 0x95, 0x96, 0x97, 0x98, 0x99, 0x9A, 0xA2, 0xA3, 0xA4, 0xA5,
    0xA6, 0xA7, 0xA8, 0xA9, 0xAA, 0xB2, 0xB3, 0xB4, 0xB5, 0xB6, 0xB7, 0xB8, 0xB9, 0xBA, 0xC2, 0xC3,
    0xC4, 0xC5, 0xC6, 0xC7, 0xC8, 0xC9, 0xCA, 0xD2, 0xD3, 0xD4, 0xD5, 0xD6, 0xD7, 0xD8, 0xD9, 0xDA,
    0xE2, 0xE3, 0xE4, 0xE5, 0xE6, 0xE7, 0xE8, 0xE9, 0xEA, 0xF2, 0xF3, 0xF4, 0xF5, 0xF6, 0xF7, 0xF8,
    0xF9, 0xFA,
];

/// A single Huffman code: right-aligned bits plus their count.
///
/// The all-zero value is the "unassigned" sentinel; the encoder never
/// emits a code it did not derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BitCode {
    /// Code bits, right-aligned
    pub code: u16,
    /// Number of valid bits (1-16)
    pub bits: u8,
}

impl BitCode {
    pub const fn new(code: u16, bits: u8) -> Self {
        Self { code, bits }
    }
}

/// Huffman table for encoding: dense symbol -> code lookup.
#[derive(Clone)]
pub struct HuffmanTable {
    /// Derived code for each 8-bit symbol
    codes: [BitCode; 256],
}

impl HuffmanTable {
    /// Derive canonical codes from a `(codes per bit length, values)` pair.
    ///
    /// Walks bit lengths 1 through 16 with a running code that doubles at
    /// each length, exactly as T.81 Annex C prescribes. Rejects table
    /// definitions whose running code no longer fits its bit length.
    pub fn new(bits: &[u8; 16], values: &[u8]) -> Result<Self> {
        let mut codes = [BitCode::default(); 256];
        let mut code = 0u32;
        let mut vi = 0usize;

        for num_bits in 1..=16u8 {
            for _ in 0..bits[num_bits as usize - 1] {
                if code >= (1u32 << num_bits) {
                    return Err(Error::HuffmanCodeLengthOverflow);
                }
                codes[values[vi] as usize] = BitCode::new(code as u16, num_bits);
                vi += 1;
                code += 1;
            }
            code <<= 1;
        }

        Ok(Self { codes })
    }

    /// Get the code for a symbol.
    #[inline]
    pub fn encode(&self, symbol: u8) -> BitCode {
        let bc = self.codes[symbol as usize];
        debug_assert!(bc.bits > 0, "no Huffman code assigned to symbol {symbol:#04x}");
        bc
    }
}

/// Coefficient magnitudes stay below this bound in baseline encoding.
pub const CODEWORD_LIMIT: i16 = 2048;

/// Precomputed `(value bits, magnitude category)` pairs for every signed
/// coefficient with `|v| < CODEWORD_LIMIT`.
///
/// A positive value is its own code; a negative value is stored in
/// ones-complement form within its category width. Value 0 has no
/// codeword (it is run-length coded instead).
pub struct CodewordTable {
    codes: Box<[BitCode]>,
}

impl CodewordTable {
    pub fn build() -> Self {
        let mut codes = vec![BitCode::default(); 2 * CODEWORD_LIMIT as usize];
        let mut num_bits = 1u8;
        let mut mask = 1u16;

        for value in 1..CODEWORD_LIMIT as u16 {
            // mask is always 2^num_bits - 1
            if value > mask {
                num_bits += 1;
                mask = (mask << 1) | 1;
            }
            codes[(CODEWORD_LIMIT as u16 + value) as usize] = BitCode::new(value, num_bits);
            codes[(CODEWORD_LIMIT as u16 - value) as usize] = BitCode::new(mask - value, num_bits);
        }

        Self {
            codes: codes.into_boxed_slice(),
        }
    }

    /// Codeword for a nonzero quantized coefficient.
    #[inline]
    pub fn get(&self, value: i16) -> BitCode {
        debug_assert!(value != 0 && value.unsigned_abs() < CODEWORD_LIMIT as u16);
        self.codes[(i32::from(value) + i32::from(CODEWORD_LIMIT)) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// JPEG magnitude category: bits needed to represent |v|.
    fn category(v: i16) -> u8 {
        (16 - v.unsigned_abs().leading_zeros()) as u8
    }

    #[test]
    fn test_dc_luma_codes_are_canonical() {
        let table = HuffmanTable::new(&STD_DC_LUMA_BITS, &STD_DC_LUMA_VALUES).unwrap();
        // Annex K: symbol 0 gets the single 2-bit code 00
        assert_eq!(table.encode(0), BitCode::new(0b00, 2));
        // Symbols 1..=5 follow at 3 bits
        assert_eq!(table.encode(1), BitCode::new(0b010, 3));
        assert_eq!(table.encode(5), BitCode::new(0b110, 3));
        // Longest assigned code: symbol 11 at 9 bits, all ones
        assert_eq!(table.encode(11), BitCode::new(0x1FE, 9));
    }

    #[test]
    fn test_ac_tables_have_zrl_and_eob() {
        for (bits, values) in [
            (&STD_AC_LUMA_BITS, &STD_AC_LUMA_VALUES),
            (&STD_AC_CHROMA_BITS, &STD_AC_CHROMA_VALUES),
        ] {
            let table = HuffmanTable::new(bits, values).unwrap();
            assert!(table.encode(0x00).bits > 0, "EOB missing");
            assert!(table.encode(0xF0).bits > 0, "ZRL missing");
            // Run/size symbols for categories 1-10 at every run length
            for run in 0..=15u8 {
                for cat in 1..=10u8 {
                    let bc = table.encode((run << 4) | cat);
                    assert!(bc.bits >= 2 && bc.bits <= 16);
                }
            }
        }
    }

    #[test]
    fn test_code_counts_match_value_counts() {
        let pairs: [(&[u8; 16], &[u8]); 4] = [
            (&STD_DC_LUMA_BITS, &STD_DC_LUMA_VALUES),
            (&STD_DC_CHROMA_BITS, &STD_DC_CHROMA_VALUES),
            (&STD_AC_LUMA_BITS, &STD_AC_LUMA_VALUES),
            (&STD_AC_CHROMA_BITS, &STD_AC_CHROMA_VALUES),
        ];
        for (bits, values) in pairs {
            let total: usize = bits.iter().map(|&b| b as usize).sum();
            assert_eq!(total, values.len());
        }
    }

    #[test]
    fn test_overflowing_table_is_rejected() {
        // 3 codes of length 1 cannot exist
        let mut bits = [0u8; 16];
        bits[0] = 3;
        let values = [0u8, 1, 2];
        assert!(matches!(
            HuffmanTable::new(&bits, &values),
            Err(Error::HuffmanCodeLengthOverflow)
        ));
    }

    #[test]
    fn test_codeword_positive_values() {
        let table = CodewordTable::build();
        for v in [1i16, 2, 3, 4, 7, 8, 255, 1023, 2047] {
            let bc = table.get(v);
            assert_eq!(bc.code, v as u16);
            assert_eq!(bc.bits, category(v));
        }
    }

    #[test]
    fn test_codeword_negative_is_ones_complement() {
        let table = CodewordTable::build();
        for v in [1i16, 2, 3, 4, 7, 8, 255, 1023, 2047] {
            let pos = table.get(v);
            let neg = table.get(-v);
            assert_eq!(neg.bits, pos.bits);
            assert_eq!(neg.code, ((1u32 << pos.bits) - 1) as u16 - v as u16);
        }
        // Smallest cases spelled out
        assert_eq!(table.get(-1), BitCode::new(0, 1));
        assert_eq!(table.get(-2), BitCode::new(1, 2));
        assert_eq!(table.get(-3), BitCode::new(0, 2));
    }
}
