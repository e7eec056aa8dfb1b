use crate::foundation::error::{DecodeError, DecodeResult};

/// Bounds-checked little-endian cursor over an in-memory byte buffer.
///
/// Offsets reported by a reader (and by the errors it produces) are absolute
/// positions in the underlying buffer, including for child readers created with
/// [`FieldReader::sub_reader`].
#[derive(Clone, Debug)]
pub struct FieldReader<'a> {
    data: &'a [u8],
    pos: usize,
    end: usize,
}

impl<'a> FieldReader<'a> {
    /// Wrap the whole buffer.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            end: data.len(),
        }
    }

    /// Current absolute offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Absolute offset one past the last readable byte.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Bytes left before [`FieldReader::end`].
    pub fn remaining(&self) -> usize {
        self.end - self.pos
    }

    /// True once every byte up to the end has been consumed.
    pub fn at_end(&self) -> bool {
        self.pos == self.end
    }

    fn truncated(&self, needed: u64) -> DecodeError {
        DecodeError::Truncated {
            offset: self.pos,
            needed,
            available: self.remaining(),
        }
    }

    /// Take the next `n` bytes.
    pub fn read_bytes(&mut self, n: u64) -> DecodeResult<&'a [u8]> {
        let len = match usize::try_from(n) {
            Ok(len) if len <= self.remaining() => len,
            _ => return Err(self.truncated(n)),
        };
        let start = self.pos;
        self.pos += len;
        Ok(&self.data[start..self.pos])
    }

    fn read_array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let bytes = self.read_bytes(N as u64)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Read a little-endian `u16`.
    pub fn read_u16_le(&mut self) -> DecodeResult<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian `u32`.
    pub fn read_u32_le(&mut self) -> DecodeResult<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian `u64`.
    pub fn read_u64_le(&mut self) -> DecodeResult<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Read exactly `n` bytes as text (lossy UTF-8), e.g. a format magic.
    pub fn read_fixed_ascii(&mut self, n: u64) -> DecodeResult<String> {
        let bytes = self.read_bytes(n)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Read text up to a `\n`. The delimiter is consumed but not returned.
    ///
    /// Fails with `Truncated` when no delimiter exists before the end.
    pub fn read_line_text(&mut self) -> DecodeResult<String> {
        let window = &self.data[self.pos..self.end];
        let Some(len) = window.iter().position(|&b| b == b'\n') else {
            return Err(self.truncated(window.len() as u64 + 1));
        };
        let text = String::from_utf8_lossy(&window[..len]).into_owned();
        self.pos += len + 1;
        Ok(text)
    }

    /// Read `\0`-terminated strings until `limit` (absolute offset) or, when
    /// `None`, the end of this reader.
    ///
    /// Every string must carry its terminator before the limit; an
    /// unterminated tail fails with `Truncated`.
    pub fn read_nul_delimited_strings_until(
        &mut self,
        limit: Option<usize>,
    ) -> DecodeResult<Vec<String>> {
        let limit = match limit {
            Some(limit) if limit < self.pos => return Err(self.truncated(0)),
            Some(limit) if limit > self.end => {
                return Err(self.truncated((limit - self.pos) as u64));
            }
            Some(limit) => limit,
            None => self.end,
        };

        let mut out = Vec::new();
        while self.pos < limit {
            let window = &self.data[self.pos..limit];
            let Some(len) = window.iter().position(|&b| b == 0) else {
                return Err(DecodeError::Truncated {
                    offset: self.pos,
                    needed: window.len() as u64 + 1,
                    available: window.len(),
                });
            };
            out.push(String::from_utf8_lossy(&window[..len]).into_owned());
            self.pos += len + 1;
        }
        Ok(out)
    }

    /// Split off the next `len` bytes as a child reader and advance past them.
    ///
    /// The child cannot read beyond its own end even though it shares the buffer.
    pub fn sub_reader(&mut self, len: u64) -> DecodeResult<FieldReader<'a>> {
        let start = self.pos;
        self.read_bytes(len)?;
        Ok(FieldReader {
            data: self.data,
            pos: start,
            end: self.pos,
        })
    }

    /// Require that every byte has been consumed.
    pub fn expect_end(&self) -> DecodeResult<()> {
        self.expect_position(self.end)
    }

    /// Require the cursor to sit exactly at `target`.
    ///
    /// Stopping short reports the unread bytes as trailing data; overshooting
    /// (or a target past the end) reports truncation.
    pub fn expect_position(&self, target: usize) -> DecodeResult<()> {
        if target > self.end || self.pos > target {
            return Err(DecodeError::Truncated {
                offset: self.pos,
                needed: target.saturating_sub(self.pos) as u64,
                available: self.remaining(),
            });
        }
        if self.pos < target {
            return Err(DecodeError::UnexpectedTrailingData {
                offset: self.pos,
                remaining: target - self.pos,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/reader.rs"]
mod tests;
