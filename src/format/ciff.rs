use crate::foundation::{
    error::{DecodeError, DecodeResult},
    reader::FieldReader,
};

/// Magic tag opening every CIFF record.
pub const CIFF_MAGIC: &str = "CIFF";

/// Bytes taken by the magic and the four `u64` size fields.
pub const CIFF_FIXED_HEADER_LEN: u64 = 4 + 8 * 4;

/// One RGB pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    /// Red component.
    pub red: u8,
    /// Green component.
    pub green: u8,
    /// Blue component.
    pub blue: u8,
}

/// Decoded CIFF header. The magic is implied by successful decoding.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CiffHeader {
    /// Total header length in bytes, magic included.
    pub header_size: u64,
    /// Pixel data length in bytes; always `width * height * 3`.
    pub content_size: u64,
    /// Image width in pixels.
    pub width: u64,
    /// Image height in pixels.
    pub height: u64,
    /// Single-line caption.
    pub caption: String,
    /// Tags in stream order.
    pub tags: Vec<String>,
}

/// A CIFF still image: header plus row-major pixel grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CiffImage {
    /// Parsed header fields.
    pub header: CiffHeader,
    /// `width * height` pixels, top-to-bottom, left-to-right.
    pub pixels: Vec<Pixel>,
}

impl CiffImage {
    /// Image width in pixels.
    pub fn width(&self) -> u64 {
        self.header.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u64 {
        self.header.height
    }

    /// Pixel at column `x`, row `y`.
    pub fn pixel(&self, x: u64, y: u64) -> Option<Pixel> {
        if x >= self.header.width || y >= self.header.height {
            return None;
        }
        let idx = usize::try_from(y * self.header.width + x).ok()?;
        self.pixels.get(idx).copied()
    }

    /// Pixels flattened to `r, g, b, r, g, b, ...`.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 3);
        for p in &self.pixels {
            out.extend_from_slice(&[p.red, p.green, p.blue]);
        }
        out
    }
}

/// Where a CIFF record sits, which decides how its end is checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CiffContext {
    /// The record is the whole input; the stream must be exhausted afterwards.
    Root,
    /// The record is embedded in a CAFF block ending at absolute offset `end`.
    Embedded {
        /// Absolute offset where the enclosing block ends.
        end: usize,
    },
}

/// Decoder for a single CIFF record.
pub struct CiffDecoder;

impl CiffDecoder {
    /// Decode one CIFF record at the reader's cursor.
    pub fn decode(reader: &mut FieldReader<'_>, context: CiffContext) -> DecodeResult<CiffImage> {
        let start = reader.position();

        let magic = reader.read_fixed_ascii(4)?;
        if magic != CIFF_MAGIC {
            return Err(DecodeError::MalformedMagic {
                expected: CIFF_MAGIC,
                found: magic,
            });
        }

        let header_size = reader.read_u64_le()?;
        let content_size = reader.read_u64_le()?;
        let width = reader.read_u64_le()?;
        let height = reader.read_u64_le()?;
        tracing::trace!(start, header_size, content_size, width, height, "ciff header");

        if header_size < CIFF_FIXED_HEADER_LEN {
            return Err(DecodeError::SizeMismatch {
                field: "header_size",
                declared: header_size,
                actual: CIFF_FIXED_HEADER_LEN,
            });
        }

        // Caption and tags may not spill past the declared header extent.
        let mut text = reader.sub_reader(header_size - CIFF_FIXED_HEADER_LEN)?;
        let caption = text.read_line_text()?;
        let tags = text.read_nul_delimited_strings_until(None)?;

        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(3));
        if expected != Some(content_size) {
            return Err(DecodeError::SizeMismatch {
                field: "content_size",
                declared: content_size,
                actual: expected.unwrap_or(u64::MAX),
            });
        }

        let raw = reader.read_bytes(content_size)?;
        let pixels = raw
            .chunks_exact(3)
            .map(|c| Pixel {
                red: c[0],
                green: c[1],
                blue: c[2],
            })
            .collect();

        match context {
            CiffContext::Root => reader.expect_end()?,
            CiffContext::Embedded { end } => reader.expect_position(end)?,
        }

        Ok(CiffImage {
            header: CiffHeader {
                header_size,
                content_size,
                width,
                height,
                caption,
                tags,
            },
            pixels,
        })
    }
}

/// Decode a complete buffer holding exactly one CIFF record.
#[tracing::instrument(skip_all, fields(len = bytes.len()))]
pub fn decode_ciff(bytes: &[u8]) -> DecodeResult<CiffImage> {
    let mut reader = FieldReader::new(bytes);
    let image = CiffDecoder::decode(&mut reader, CiffContext::Root)?;
    tracing::debug!(
        width = image.header.width,
        height = image.header.height,
        tags = image.header.tags.len(),
        "decoded ciff"
    );
    Ok(image)
}

#[cfg(test)]
#[path = "../../tests/unit/format/ciff.rs"]
mod tests;
