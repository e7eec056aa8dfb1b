use crate::format::{
    Decoded, Format,
    caff::{BlockTag, CaffCredits, CaffFile, CaffPayload},
    ciff::CiffImage,
};

/// Metadata view of a decode result, without pixel data.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Summary {
    /// Source format.
    pub format: Format,
    /// Present for bare CIFF input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageSummary>,
    /// Present for CAFF input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerSummary>,
}

/// Header fields of one CIFF image.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ImageSummary {
    /// Width in pixels.
    pub width: u64,
    /// Height in pixels.
    pub height: u64,
    /// Caption line.
    pub caption: String,
    /// Tags in stream order.
    pub tags: Vec<String>,
}

/// Block-level description of a CAFF file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ContainerSummary {
    /// Blocks declared by the leading header.
    pub declared_blocks: u64,
    /// Blocks actually decoded.
    pub decoded_blocks: usize,
    /// Decoding ended at the first frame.
    pub stopped_early: bool,
    /// Sum of frame durations in milliseconds.
    pub total_duration_ms: u64,
    /// Credits blocks.
    pub credits: Vec<CreditsSummary>,
    /// Animation frames.
    pub frames: Vec<FrameSummary>,
    /// Tags of every decoded block, in order.
    pub block_tags: Vec<BlockTag>,
}

/// Credits block with its date rendered as text.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CreditsSummary {
    /// `YYYY-MM-DD HH:MM`.
    pub created: String,
    /// Creator name.
    pub creator: String,
}

/// One animation frame.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FrameSummary {
    /// Absolute offset of the block.
    pub offset: usize,
    /// Display time in milliseconds.
    pub duration_ms: u16,
    /// The embedded image's header fields.
    pub image: ImageSummary,
}

impl From<&CiffImage> for ImageSummary {
    fn from(img: &CiffImage) -> Self {
        Self {
            width: img.header.width,
            height: img.header.height,
            caption: img.header.caption.clone(),
            tags: img.header.tags.clone(),
        }
    }
}

impl From<&CaffCredits> for CreditsSummary {
    fn from(c: &CaffCredits) -> Self {
        Self {
            created: format!(
                "{:04}-{:02}-{:02} {:02}:{:02}",
                c.year, c.month, c.day, c.hour, c.minute
            ),
            creator: c.creator.clone(),
        }
    }
}

impl From<&CaffFile> for ContainerSummary {
    fn from(file: &CaffFile) -> Self {
        let frames = file
            .blocks
            .iter()
            .filter_map(|b| match &b.payload {
                CaffPayload::Animation(a) => Some(FrameSummary {
                    offset: b.offset,
                    duration_ms: a.duration,
                    image: ImageSummary::from(&a.image),
                }),
                _ => None,
            })
            .collect();

        Self {
            declared_blocks: file.header.num_anim,
            decoded_blocks: file.blocks.len(),
            stopped_early: file.stopped_early,
            total_duration_ms: file.total_duration_ms(),
            credits: file.credits().map(CreditsSummary::from).collect(),
            frames,
            block_tags: file.blocks.iter().map(|b| b.tag()).collect(),
        }
    }
}

impl Summary {
    /// Describe a decode result.
    pub fn from_decoded(decoded: &Decoded) -> Self {
        match decoded {
            Decoded::Ciff(img) => Self {
                format: Format::Ciff,
                image: Some(ImageSummary::from(img)),
                container: None,
            },
            Decoded::Caff(file) => Self {
                format: Format::Caff,
                image: None,
                container: Some(ContainerSummary::from(file)),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/report/summary.rs"]
mod tests;
