use crate::{
    format::{
        ciff::{CiffContext, CiffDecoder, CiffImage},
        config::{CalendarCheck, DecodeConfig, FramePolicy},
        validate::{check_calendar_day, check_credits, check_duration},
    },
    foundation::{
        error::{DecodeError, DecodeResult},
        reader::FieldReader,
    },
};

/// Magic tag of the leading CAFF header block.
pub const CAFF_MAGIC: &str = "CAFF";

/// Length of the reserved run after an animation's duration.
pub const ANIMATION_RESERVED_LEN: u64 = 6;

/// Block type identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockTag {
    /// `0x1`
    Header,
    /// `0x2`
    Credits,
    /// `0x3`
    Animation,
}

impl BlockTag {
    /// Wire value of the tag.
    pub fn as_u8(self) -> u8 {
        match self {
            BlockTag::Header => 1,
            BlockTag::Credits => 2,
            BlockTag::Animation => 3,
        }
    }
}

impl TryFrom<u8> for BlockTag {
    type Error = DecodeError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            1 => Ok(BlockTag::Header),
            2 => Ok(BlockTag::Credits),
            3 => Ok(BlockTag::Animation),
            tag => Err(DecodeError::UnknownBlockTag { tag }),
        }
    }
}

/// Header-block payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CaffHeader {
    /// Declared header length.
    pub header_size: u64,
    /// Number of blocks following the leading header.
    pub num_anim: u64,
}

/// Credits-block payload.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CaffCredits {
    /// Creation year.
    pub year: u16,
    /// Month, `1..=12`.
    pub month: u8,
    /// Day, `1..=31`.
    pub day: u8,
    /// Hour, `0..=23`.
    pub hour: u8,
    /// Minute, `0..=59`.
    pub minute: u8,
    /// Declared creator length in bytes.
    pub creator_len: u64,
    /// Creator name.
    pub creator: String,
}

/// Animation-block payload: one frame and how long to show it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaffAnimation {
    /// Display time in milliseconds, at least 1.
    pub duration: u16,
    /// The embedded frame.
    pub image: CiffImage,
}

/// Block payload, selected by the block tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaffPayload {
    /// Header-shaped data appearing after the leading header.
    Header(CaffHeader),
    /// Creation date and creator.
    Credits(CaffCredits),
    /// One animation frame.
    Animation(CaffAnimation),
}

impl CaffPayload {
    /// Tag this payload is stored under.
    pub fn tag(&self) -> BlockTag {
        match self {
            CaffPayload::Header(_) => BlockTag::Header,
            CaffPayload::Credits(_) => BlockTag::Credits,
            CaffPayload::Animation(_) => BlockTag::Animation,
        }
    }
}

/// One decoded block after the leading header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaffBlock {
    /// Absolute offset of the block's tag byte.
    pub offset: usize,
    /// Declared payload length.
    pub length: u64,
    /// Decoded payload.
    pub payload: CaffPayload,
}

impl CaffBlock {
    /// Tag of this block.
    pub fn tag(&self) -> BlockTag {
        self.payload.tag()
    }
}

/// A decoded CAFF container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaffFile {
    /// The leading header block.
    pub header: CaffHeader,
    /// Blocks in stream order, as far as decoding went.
    pub blocks: Vec<CaffBlock>,
    /// Decoding ended at the first frame while more blocks were declared.
    pub stopped_early: bool,
}

impl CaffFile {
    /// Animation blocks in stream order.
    pub fn frames(&self) -> impl Iterator<Item = &CaffAnimation> {
        self.blocks.iter().filter_map(|b| match &b.payload {
            CaffPayload::Animation(a) => Some(a),
            _ => None,
        })
    }

    /// Credits blocks in stream order.
    pub fn credits(&self) -> impl Iterator<Item = &CaffCredits> {
        self.blocks.iter().filter_map(|b| match &b.payload {
            CaffPayload::Credits(c) => Some(c),
            _ => None,
        })
    }

    /// Sum of the decoded frame durations in milliseconds.
    pub fn total_duration_ms(&self) -> u64 {
        self.frames().map(|f| u64::from(f.duration)).sum()
    }
}

enum DecodeState<'a> {
    Init,
    ExpectHeader { payload: FieldReader<'a> },
    ReadingBlocks { header: CaffHeader, remaining: u64 },
    Done { header: CaffHeader },
}

/// Block-stream decoder for one CAFF buffer.
///
/// Runs `Init -> ExpectHeader -> ReadingBlocks(n) -> Done`; any error aborts
/// the run and drops the blocks decoded so far.
pub struct CaffDecoder<'a> {
    reader: FieldReader<'a>,
    config: DecodeConfig,
    blocks: Vec<CaffBlock>,
    stopped_early: bool,
}

impl<'a> CaffDecoder<'a> {
    /// Prepare a decoder over the whole input.
    pub fn new(bytes: &'a [u8], config: DecodeConfig) -> Self {
        Self {
            reader: FieldReader::new(bytes),
            config,
            blocks: Vec::new(),
            stopped_early: false,
        }
    }

    /// Drive the state machine to completion.
    pub fn run(mut self) -> DecodeResult<CaffFile> {
        let mut state = DecodeState::Init;
        loop {
            state = match state {
                DecodeState::Init => self.open_header_block()?,
                DecodeState::ExpectHeader { mut payload } => self.read_root_header(&mut payload)?,
                DecodeState::ReadingBlocks {
                    header,
                    remaining: 0,
                } => {
                    self.reader.expect_end()?;
                    DecodeState::Done { header }
                }
                DecodeState::ReadingBlocks { header, remaining } => {
                    self.read_block(header, remaining)?
                }
                DecodeState::Done { header } => {
                    return Ok(CaffFile {
                        header,
                        blocks: std::mem::take(&mut self.blocks),
                        stopped_early: self.stopped_early,
                    });
                }
            };
        }
    }

    fn read_block_prefix(&mut self) -> DecodeResult<(u8, u64)> {
        let tag = self.reader.read_u8()?;
        let length = self.reader.read_u64_le()?;
        Ok((tag, length))
    }

    fn open_header_block(&mut self) -> DecodeResult<DecodeState<'a>> {
        let (tag, length) = self.read_block_prefix()?;
        if tag != BlockTag::Header.as_u8() {
            return Err(DecodeError::UnknownBlockTag { tag });
        }
        let payload = self.reader.sub_reader(length)?;
        Ok(DecodeState::ExpectHeader { payload })
    }

    fn read_root_header(&mut self, payload: &mut FieldReader<'a>) -> DecodeResult<DecodeState<'a>> {
        let magic = payload.read_fixed_ascii(4)?;
        if magic != CAFF_MAGIC {
            return Err(DecodeError::MalformedMagic {
                expected: CAFF_MAGIC,
                found: magic,
            });
        }
        let header = read_header_fields(payload)?;
        payload.expect_end()?;
        tracing::debug!(
            header_size = header.header_size,
            num_anim = header.num_anim,
            "caff header"
        );
        Ok(DecodeState::ReadingBlocks {
            header,
            remaining: header.num_anim,
        })
    }

    fn read_block(&mut self, header: CaffHeader, remaining: u64) -> DecodeResult<DecodeState<'a>> {
        let offset = self.reader.position();
        let (tag, length) = self.read_block_prefix()?;
        let tag = BlockTag::try_from(tag)?;
        let mut payload = self.reader.sub_reader(length)?;

        let body = match tag {
            BlockTag::Header => CaffPayload::Header(read_header_fields(&mut payload)?),
            BlockTag::Credits => {
                CaffPayload::Credits(read_credits(&mut payload, self.config.calendar)?)
            }
            BlockTag::Animation => CaffPayload::Animation(read_animation(&mut payload)?),
        };
        payload.expect_end()?;

        tracing::debug!(
            index = self.blocks.len(),
            offset,
            length,
            ?tag,
            "caff block"
        );
        self.blocks.push(CaffBlock {
            offset,
            length,
            payload: body,
        });

        if tag == BlockTag::Animation
            && self.config.frame_policy == FramePolicy::FirstFrame
            && remaining > 1
        {
            tracing::debug!(skipped = remaining - 1, "first frame decoded, stopping");
            self.stopped_early = true;
            return Ok(DecodeState::Done { header });
        }

        Ok(DecodeState::ReadingBlocks {
            header,
            remaining: remaining - 1,
        })
    }
}

fn read_header_fields(r: &mut FieldReader<'_>) -> DecodeResult<CaffHeader> {
    let header_size = r.read_u64_le()?;
    let num_anim = r.read_u64_le()?;
    Ok(CaffHeader {
        header_size,
        num_anim,
    })
}

fn read_credits(r: &mut FieldReader<'_>, calendar: CalendarCheck) -> DecodeResult<CaffCredits> {
    let year = r.read_u16_le()?;
    let month = r.read_u8()?;
    let day = r.read_u8()?;
    let hour = r.read_u8()?;
    let minute = r.read_u8()?;
    tracing::trace!(year, month, day, hour, minute, "credits date");

    if let Some(v) = check_credits(month, day, hour, minute) {
        return Err(v.into());
    }
    if calendar == CalendarCheck::Strict
        && let Some(v) = check_calendar_day(year, month, day)
    {
        return Err(v.into());
    }

    let creator_len = r.read_u64_le()?;
    let creator = r.read_fixed_ascii(creator_len)?;
    Ok(CaffCredits {
        year,
        month,
        day,
        hour,
        minute,
        creator_len,
        creator,
    })
}

fn read_animation(r: &mut FieldReader<'_>) -> DecodeResult<CaffAnimation> {
    let duration = r.read_u16_le()?;
    if let Some(v) = check_duration(duration) {
        return Err(v.into());
    }
    r.read_bytes(ANIMATION_RESERVED_LEN)?;

    let end = r.end();
    let image = CiffDecoder::decode(r, CiffContext::Embedded { end })?;
    Ok(CaffAnimation { duration, image })
}

/// Decode a complete CAFF buffer.
#[tracing::instrument(skip_all, fields(len = bytes.len()))]
pub fn decode_caff(bytes: &[u8], config: &DecodeConfig) -> DecodeResult<CaffFile> {
    let file = CaffDecoder::new(bytes, *config).run()?;
    tracing::debug!(
        blocks = file.blocks.len(),
        stopped_early = file.stopped_early,
        "decoded caff"
    );
    Ok(file)
}

#[cfg(test)]
#[path = "../../tests/unit/format/caff.rs"]
mod tests;
