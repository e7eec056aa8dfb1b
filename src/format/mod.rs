pub mod caff;
pub mod ciff;
pub mod config;
pub mod select;
pub mod validate;

use crate::foundation::error::DecodeResult;

use self::{caff::CaffFile, ciff::CiffImage, config::DecodeConfig};

/// Which grammar to decode the input with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// A bare still image.
    Ciff,
    /// An animation container.
    Caff,
}

impl Format {
    /// Guess the format from the leading bytes.
    ///
    /// CIFF starts with its magic; CAFF starts with a header block (tag `1`,
    /// 8-byte length) whose payload opens with `"CAFF"`.
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(ciff::CIFF_MAGIC.as_bytes()) {
            return Some(Format::Ciff);
        }
        if bytes.first() == Some(&caff::BlockTag::Header.as_u8())
            && bytes.get(9..13) == Some(caff::CAFF_MAGIC.as_bytes())
        {
            return Some(Format::Caff);
        }
        None
    }

    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Ciff => "ciff",
            Format::Caff => "caff",
        }
    }
}

/// Result of a successful decode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decoded {
    /// A bare CIFF image.
    Ciff(CiffImage),
    /// A CAFF container.
    Caff(CaffFile),
}

impl Decoded {
    /// Format the value was decoded from.
    pub fn format(&self) -> Format {
        match self {
            Decoded::Ciff(_) => Format::Ciff,
            Decoded::Caff(_) => Format::Caff,
        }
    }
}

/// Decode `bytes` as `format`.
pub fn decode(bytes: &[u8], format: Format, config: &DecodeConfig) -> DecodeResult<Decoded> {
    match format {
        Format::Ciff => ciff::decode_ciff(bytes).map(Decoded::Ciff),
        Format::Caff => caff::decode_caff(bytes, config).map(Decoded::Caff),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/format/mod.rs"]
mod tests;
