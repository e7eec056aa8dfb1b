//! Strict decoder for the CIFF still-image and CAFF animation formats.
//!
//! A CIFF record is a small header (magic, sizes, caption, tags) followed by a raw
//! row-major RGB grid. A CAFF file is a stream of tagged, length-prefixed blocks: a
//! leading header, credits, and animation blocks that each embed one CIFF frame.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: `&[u8] -> Decoded` via [`decode`], [`decode_ciff`] or [`decode_caff`]
//! 2. **Select**: `Decoded -> &CiffImage` via [`representative_image`]
//! 3. **Encode** (optional): write the pixel grid as JPEG/PNG through the `image` crate
//!
//! Decoding is a pure function of the input bytes. Any structural or range
//! violation aborts with a [`DecodeError`]; nothing partial is returned.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod encode;
mod format;
mod foundation;
mod report;

#[cfg(test)]
#[path = "../tests/support/mod.rs"]
mod fixtures;

pub use encode::raster::{
    EncodeConfig, OutputFormat, default_output_path, encode_image, ensure_parent_dir,
    frame_output_path, to_rgb_image,
};
pub use encode::sink::{FrameInfo, FrameSink, InMemorySink, RasterFileSink, export_frames};
pub use format::caff::{
    ANIMATION_RESERVED_LEN, BlockTag, CAFF_MAGIC, CaffAnimation, CaffBlock, CaffCredits,
    CaffDecoder, CaffFile, CaffHeader, CaffPayload, decode_caff,
};
pub use format::ciff::{
    CIFF_FIXED_HEADER_LEN, CIFF_MAGIC, CiffContext, CiffDecoder, CiffHeader, CiffImage, Pixel,
    decode_ciff,
};
pub use format::config::{CalendarCheck, DecodeConfig, FramePolicy};
pub use format::select::representative_image;
pub use format::validate::{
    RangeViolation, check_calendar_day, check_credits, check_duration, days_in_month,
    is_leap_year,
};
pub use format::{Decoded, Format, decode};
pub use foundation::error::{CaffError, CaffResult, DecodeError, DecodeResult};
pub use foundation::reader::FieldReader;
pub use report::summary::{
    ContainerSummary, CreditsSummary, FrameSummary, ImageSummary, Summary,
};
