//! Entropy encoding for JPEG
//!
//! Turns an 8x8 sample block into Huffman-coded DCT coefficients: forward
//! DCT, fused scale/quantize, DC differential coding, and run-length
//! coding of the AC coefficients in zigzag order.

use std::io::{self, Write};

use crate::bitstream::BitWriter;
use crate::consts::{DCTSIZE2, ZIGZAG};
use crate::dct::forward_dct_8x8;
use crate::huffman::{CodewordTable, HuffmanTable, CODEWORD_LIMIT};

/// Encode one 8x8 block and return its DC coefficient for the caller's
/// per-channel prediction register.
///
/// `block` holds zero-centered samples and is consumed as scratch space.
/// `scaled` is the fused dequantization table from
/// [`QuantTable::scaled_dequant`](crate::quant::QuantTable::scaled_dequant)
/// matching this block's channel class, `last_dc` the DC of the previous
/// block of the same channel (0 before the first).
pub fn encode_block<W: Write>(
    writer: &mut BitWriter<W>,
    block: &mut [f32; DCTSIZE2],
    scaled: &[f32; DCTSIZE2],
    last_dc: i16,
    dc_table: &HuffmanTable,
    ac_table: &HuffmanTable,
    codewords: &CodewordTable,
) -> io::Result<i16> {
    forward_dct_8x8(block);

    // One multiply per coefficient removes AAN scaling and quantizes
    for i in 0..DCTSIZE2 {
        block[i] *= scaled[i];
    }

    let dc = block[0].round_ties_even() as i16;

    // Quantize the 63 AC coefficients in zigzag order, remembering the
    // last nonzero position (trailing zeros collapse into EOB)
    let mut quantized = [0i16; DCTSIZE2];
    let mut pos_non_zero = 0usize;
    for i in 1..DCTSIZE2 {
        let q = block[ZIGZAG[i]].round_ties_even() as i16;
        quantized[i] = q;
        if q != 0 {
            pos_non_zero = i;
        }
    }

    emit_block(
        writer,
        dc,
        last_dc,
        &quantized,
        pos_non_zero,
        dc_table,
        ac_table,
        codewords,
    )?;

    Ok(dc)
}

/// Huffman-emit an already-quantized block.
#[allow(clippy::too_many_arguments)]
fn emit_block<W: Write>(
    writer: &mut BitWriter<W>,
    dc: i16,
    last_dc: i16,
    quantized: &[i16; DCTSIZE2],
    pos_non_zero: usize,
    dc_table: &HuffmanTable,
    ac_table: &HuffmanTable,
    codewords: &CodewordTable,
) -> io::Result<()> {
    // DC: difference from the previous block of the same channel
    let diff = dc - last_dc;
    debug_assert!(diff.unsigned_abs() < CODEWORD_LIMIT as u16);
    if diff == 0 {
        writer.put_code(dc_table.encode(0x00))?;
    } else {
        let value = codewords.get(diff);
        writer.put_code(dc_table.encode(value.bits))?;
        writer.put_code(value)?;
    }

    // AC: (run, size) symbols with the zero-run length in the high nibble
    let mut run = 0u8;
    for i in 1..=pos_non_zero {
        let ac = quantized[i];
        if ac == 0 {
            run += 1;
        } else {
            // Runs longer than 15 are split off as ZRL symbols
            while run >= 16 {
                writer.put_code(ac_table.encode(0xF0))?;
                run -= 16;
            }
            debug_assert!(ac.unsigned_abs() < CODEWORD_LIMIT as u16);
            let value = codewords.get(ac);
            writer.put_code(ac_table.encode((run << 4) | value.bits))?;
            writer.put_code(value)?;
            run = 0;
        }
    }

    // EOB stands in for all trailing zeros; omitted when position 63 is
    // itself nonzero
    if pos_non_zero < DCTSIZE2 - 1 {
        writer.put_code(ac_table.encode(0x00))?;
    }

    Ok(())
}
