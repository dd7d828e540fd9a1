//! Main encoder implementation
//!
//! Provides the public `Encoder` API: a builder over quality, chroma
//! subsampling and an optional comment, with RGB and grayscale entry
//! points that stream a baseline JFIF JPEG into any byte sink.

use std::io::{self, Write};

use imgref::ImgRef;
use rgb::{ComponentBytes, RGB8};

use crate::bitstream::BitWriter;
use crate::color::{rgb_to_cb, rgb_to_cr, rgb_to_y};
use crate::consts::{marker, DCTSIZE2};
use crate::entropy::encode_block;
use crate::error::Error;
use crate::huffman::{
    CodewordTable, HuffmanTable, STD_AC_CHROMA_BITS, STD_AC_CHROMA_VALUES, STD_AC_LUMA_BITS,
    STD_AC_LUMA_VALUES, STD_DC_CHROMA_BITS, STD_DC_CHROMA_VALUES, STD_DC_LUMA_BITS,
    STD_DC_LUMA_VALUES,
};
use crate::quant::QuantTable;
use crate::types::{PixelFormat, Subsampling};
use crate::Result;

/// Per-table DHT payload: class/id byte, 16 length counts, symbol values.
const DHT_PAIR_LEN: u16 = (1 + 16 + 12) + (1 + 16 + 162);

/// JPEG encoder with configurable quality and chroma subsampling
#[derive(Clone)]
pub struct Encoder {
    quality: u8,
    subsampling: Subsampling,
    comment: Option<Vec<u8>>,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    /// Create a new encoder with default settings
    pub fn new() -> Self {
        Self {
            quality: 85,
            subsampling: Subsampling::S444,
            comment: None,
        }
    }

    /// Set the quality level (1-100, validated at encode time)
    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Set the chroma subsampling mode.
    ///
    /// Grayscale input has no chroma and always encodes as 4:4:4
    /// regardless of this setting.
    pub fn subsampling(mut self, subsampling: Subsampling) -> Self {
        self.subsampling = subsampling;
        self
    }

    /// Attach a comment to be stored in a COM segment.
    ///
    /// The comment must not contain the byte 0xFF; an empty comment is
    /// omitted from the stream.
    pub fn comment(mut self, comment: impl Into<Vec<u8>>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Encode interleaved RGB pixels to an in-memory JPEG
    pub fn encode_rgb(&self, pixels: &[u8], width: u16, height: u16) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(usize::from(width) * usize::from(height));
        self.encode_rgb_to(pixels, width, height, &mut out)?;
        Ok(out)
    }

    /// Encode interleaved RGB pixels, streaming the JPEG into `sink`
    pub fn encode_rgb_to<W: Write>(
        &self,
        pixels: &[u8],
        width: u16,
        height: u16,
        sink: W,
    ) -> Result<()> {
        self.encode_impl(pixels, width, height, PixelFormat::Rgb8, sink)
    }

    /// Encode grayscale pixels to an in-memory JPEG
    pub fn encode_gray(&self, pixels: &[u8], width: u16, height: u16) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(usize::from(width) * usize::from(height));
        self.encode_gray_to(pixels, width, height, &mut out)?;
        Ok(out)
    }

    /// Encode grayscale pixels, streaming the JPEG into `sink`
    pub fn encode_gray_to<W: Write>(
        &self,
        pixels: &[u8],
        width: u16,
        height: u16,
        sink: W,
    ) -> Result<()> {
        self.encode_impl(pixels, width, height, PixelFormat::Gray8, sink)
    }

    /// Encode a typed RGB pixel buffer (possibly with a row stride)
    pub fn encode_img(&self, img: ImgRef<'_, RGB8>) -> Result<Vec<u8>> {
        let too_large = || Error::InvalidDimensions {
            width: img.width(),
            height: img.height(),
            reason: "dimensions exceed JPEG maximum (65535)",
        };
        let width = u16::try_from(img.width()).map_err(|_| too_large())?;
        let height = u16::try_from(img.height()).map_err(|_| too_large())?;

        let mut interleaved = Vec::with_capacity(img.width() * img.height() * 3);
        for row in img.rows() {
            interleaved.extend_from_slice(row.as_bytes());
        }
        self.encode_rgb(&interleaved, width, height)
    }

    fn encode_impl<W: Write>(
        &self,
        pixels: &[u8],
        width: u16,
        height: u16,
        format: PixelFormat,
        sink: W,
    ) -> Result<()> {
        self.validate(pixels, width, height, format)?;

        // Grayscale has no chroma to subsample
        let subsampling = if format == PixelFormat::Rgb8 {
            self.subsampling
        } else {
            Subsampling::S444
        };

        let quant_luma = QuantTable::luma(self.quality);
        let quant_chroma = QuantTable::chroma(self.quality);

        let tables = ScanTables {
            scaled_luma: quant_luma.scaled_dequant(),
            scaled_chroma: quant_chroma.scaled_dequant(),
            dc_luma: HuffmanTable::new(&STD_DC_LUMA_BITS, &STD_DC_LUMA_VALUES)?,
            ac_luma: HuffmanTable::new(&STD_AC_LUMA_BITS, &STD_AC_LUMA_VALUES)?,
            dc_chroma: HuffmanTable::new(&STD_DC_CHROMA_BITS, &STD_DC_CHROMA_VALUES)?,
            ac_chroma: HuffmanTable::new(&STD_AC_CHROMA_BITS, &STD_AC_CHROMA_VALUES)?,
            codewords: CodewordTable::build(),
        };

        let mut writer = BitWriter::new(sink);
        self.write_headers(
            &mut writer,
            width,
            height,
            format,
            subsampling,
            &quant_luma,
            &quant_chroma,
        )?;

        encode_scan(
            &mut writer,
            pixels,
            usize::from(width),
            usize::from(height),
            format,
            subsampling,
            &tables,
        )?;

        writer.flush()?;
        writer.write_bytes(&[0xFF, marker::EOI])?;
        Ok(())
    }

    fn validate(&self, pixels: &[u8], width: u16, height: u16, format: PixelFormat) -> Result<()> {
        if !(1..=100).contains(&self.quality) {
            return Err(Error::InvalidQuality {
                value: self.quality,
                min: 1,
                max: 100,
            });
        }
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions {
                width: usize::from(width),
                height: usize::from(height),
                reason: "dimensions must be non-zero",
            });
        }
        let expected = usize::from(width) * usize::from(height) * format.bytes_per_pixel();
        if pixels.len() != expected {
            return Err(Error::InvalidPixelData {
                expected,
                actual: pixels.len(),
            });
        }
        if let Some(comment) = &self.comment {
            if let Some(position) = comment.iter().position(|&b| b == 0xFF) {
                return Err(Error::InvalidComment { position });
            }
        }
        Ok(())
    }

    /// Emit every segment up to and including SOS. The bit buffer is
    /// empty throughout, so all writes bypass it.
    #[allow(clippy::too_many_arguments)]
    fn write_headers<W: Write>(
        &self,
        w: &mut BitWriter<W>,
        width: u16,
        height: u16,
        format: PixelFormat,
        subsampling: Subsampling,
        quant_luma: &QuantTable,
        quant_chroma: &QuantTable,
    ) -> io::Result<()> {
        let num_components = format.components() as u8;
        let is_rgb = num_components > 1;

        // SOI
        w.write_bytes(&[0xFF, marker::SOI])?;

        // APP0: JFIF 1.1, aspect-ratio units, 1x1 density, no thumbnail
        w.marker(marker::APP0, 16)?;
        w.write_bytes(b"JFIF\0")?;
        w.write_bytes(&[1, 1, 0, 0, 1, 0, 1, 0, 0])?;

        // COM (optional)
        if let Some(comment) = self.comment.as_deref() {
            if !comment.is_empty() {
                let len = comment.len().min(65533);
                w.marker(marker::COM, 2 + len as u16)?;
                w.write_bytes(&comment[..len])?;
            }
        }

        // DQT: one segment, one or two 65-byte table entries
        let num_tables = u16::from(is_rgb) + 1;
        w.marker(marker::DQT, 2 + num_tables * 65)?;
        w.write_byte(0x00)?;
        w.write_bytes(&quant_luma.values)?;
        if is_rgb {
            w.write_byte(0x01)?;
            w.write_bytes(&quant_chroma.values)?;
        }

        // SOF0: baseline, 8-bit precision
        w.marker(marker::SOF0, 2 + 6 + 3 * u16::from(num_components))?;
        w.write_byte(8)?;
        w.write_bytes(&height.to_be_bytes())?;
        w.write_bytes(&width.to_be_bytes())?;
        w.write_byte(num_components)?;
        for id in 1..=num_components {
            // Sampling factors: high nibble horizontal, low nibble vertical.
            // Only luma subsamples; chroma is always 1x1.
            let sampling = if id == 1 {
                (subsampling.h_factor() << 4) | subsampling.v_factor()
            } else {
                0x11
            };
            let quant_id = u8::from(id != 1);
            w.write_bytes(&[id, sampling, quant_id])?;
        }

        // DHT: one segment holding the DC+AC pair per table class
        let dht_len = if is_rgb {
            2 + 2 * DHT_PAIR_LEN
        } else {
            2 + DHT_PAIR_LEN
        };
        w.marker(marker::DHT, dht_len)?;
        w.write_byte(0x00)?; // DC luma
        w.write_bytes(&STD_DC_LUMA_BITS)?;
        w.write_bytes(&STD_DC_LUMA_VALUES)?;
        w.write_byte(0x10)?; // AC luma
        w.write_bytes(&STD_AC_LUMA_BITS)?;
        w.write_bytes(&STD_AC_LUMA_VALUES)?;
        if is_rgb {
            w.write_byte(0x01)?; // DC chroma
            w.write_bytes(&STD_DC_CHROMA_BITS)?;
            w.write_bytes(&STD_DC_CHROMA_VALUES)?;
            w.write_byte(0x11)?; // AC chroma
            w.write_bytes(&STD_AC_CHROMA_BITS)?;
            w.write_bytes(&STD_AC_CHROMA_VALUES)?;
        }

        // SOS: single sequential scan covering the full spectrum
        w.marker(marker::SOS, 2 + 1 + 2 * u16::from(num_components) + 3)?;
        w.write_byte(num_components)?;
        for id in 1..=num_components {
            // High nibble DC table, low nibble AC table
            let table_ids = if id == 1 { 0x00 } else { 0x11 };
            w.write_bytes(&[id, table_ids])?;
        }
        w.write_bytes(&[0x00, 0x3F, 0x00])?;

        Ok(())
    }
}

/// Derived table set shared by every block of one scan.
struct ScanTables {
    scaled_luma: [f32; DCTSIZE2],
    scaled_chroma: [f32; DCTSIZE2],
    dc_luma: HuffmanTable,
    ac_luma: HuffmanTable,
    dc_chroma: HuffmanTable,
    ac_chroma: HuffmanTable,
    codewords: CodewordTable,
}

/// Walk the image MCU by MCU and entropy-code every block.
///
/// 4:4:4 (and grayscale) MCUs are single 8x8 blocks; 4:2:0 MCUs cover
/// 16x16 luma pixels as four Y blocks in raster order followed by one
/// averaged Cb and one averaged Cr block. Images whose size is not a
/// multiple of the MCU replicate their last row/column.
fn encode_scan<W: Write>(
    writer: &mut BitWriter<W>,
    pixels: &[u8],
    width: usize,
    height: usize,
    format: PixelFormat,
    subsampling: Subsampling,
    t: &ScanTables,
) -> io::Result<()> {
    let is_rgb = format == PixelFormat::Rgb8;
    let downsample = subsampling == Subsampling::S420;
    let max_x = width - 1;
    let max_y = height - 1;
    let mcu_size = subsampling.mcu_size();

    let mut last_y_dc = 0i16;
    let mut last_cb_dc = 0i16;
    let mut last_cr_dc = 0i16;

    let mut y_block = [0f32; DCTSIZE2];
    let mut cb_block = [0f32; DCTSIZE2];
    let mut cr_block = [0f32; DCTSIZE2];

    for mcu_y in (0..height).step_by(mcu_size) {
        for mcu_x in (0..width).step_by(mcu_size) {
            for block_y in (0..mcu_size).step_by(8) {
                for block_x in (0..mcu_size).step_by(8) {
                    for dy in 0..8 {
                        let row = (mcu_y + block_y + dy).min(max_y);
                        for dx in 0..8 {
                            let col = (mcu_x + block_x + dx).min(max_x);
                            let pos = row * width + col;
                            if is_rgb {
                                let r = f32::from(pixels[3 * pos]);
                                let g = f32::from(pixels[3 * pos + 1]);
                                let b = f32::from(pixels[3 * pos + 2]);
                                // JPEG centers luma on zero
                                y_block[dy * 8 + dx] = rgb_to_y(r, g, b) - 128.0;
                                if !downsample {
                                    cb_block[dy * 8 + dx] = rgb_to_cb(r, g, b);
                                    cr_block[dy * 8 + dx] = rgb_to_cr(r, g, b);
                                }
                            } else {
                                y_block[dy * 8 + dx] = f32::from(pixels[pos]) - 128.0;
                            }
                        }
                    }
                    last_y_dc = encode_block(
                        writer,
                        &mut y_block,
                        &t.scaled_luma,
                        last_y_dc,
                        &t.dc_luma,
                        &t.ac_luma,
                        &t.codewords,
                    )?;
                }
            }

            if !is_rgb {
                continue;
            }

            if downsample {
                // Each chroma sample averages a 2x2 luma-resolution area;
                // the conversion is linear, so converting the sums and
                // dividing by 4 afterwards is equivalent
                for dy in 0..8 {
                    let row = (mcu_y + 2 * dy).min(max_y);
                    let row1 = (row + 1).min(max_y);
                    for dx in 0..8 {
                        let col = (mcu_x + 2 * dx).min(max_x);
                        let col1 = (col + 1).min(max_x);

                        let mut r = 0u16;
                        let mut g = 0u16;
                        let mut b = 0u16;
                        for pos in [
                            row * width + col,
                            row * width + col1,
                            row1 * width + col,
                            row1 * width + col1,
                        ] {
                            r += u16::from(pixels[3 * pos]);
                            g += u16::from(pixels[3 * pos + 1]);
                            b += u16::from(pixels[3 * pos + 2]);
                        }

                        let (r, g, b) = (f32::from(r), f32::from(g), f32::from(b));
                        cb_block[dy * 8 + dx] = rgb_to_cb(r, g, b) / 4.0;
                        cr_block[dy * 8 + dx] = rgb_to_cr(r, g, b) / 4.0;
                    }
                }
            }

            last_cb_dc = encode_block(
                writer,
                &mut cb_block,
                &t.scaled_chroma,
                last_cb_dc,
                &t.dc_chroma,
                &t.ac_chroma,
                &t.codewords,
            )?;
            last_cr_dc = encode_block(
                writer,
                &mut cr_block,
                &t.scaled_chroma,
                last_cr_dc,
                &t.dc_chroma,
                &t.ac_chroma,
                &t.codewords,
            )?;
        }
    }

    Ok(())
}
