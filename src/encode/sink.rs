use std::path::PathBuf;

use crate::{
    encode::raster::{EncodeConfig, encode_image, frame_output_path},
    format::{Decoded, ciff::CiffImage, select::representative_image},
    foundation::error::{CaffError, CaffResult, DecodeError},
};

/// Per-frame metadata passed alongside the pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameInfo {
    /// Zero-based position among the exported frames.
    pub index: usize,
    /// Display duration in milliseconds; `None` for a bare CIFF.
    pub duration_ms: Option<u16>,
}

/// Sink contract for consuming decoded frames in stream order.
///
/// `begin` is called once, then `push_frame` with strictly increasing
/// indices, then `end`.
pub trait FrameSink {
    /// Called once before any frames are pushed, with the number to expect.
    fn begin(&mut self, frame_count: usize) -> CaffResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, info: FrameInfo, frame: &CiffImage) -> CaffResult<()>;
    /// Called once after the last frame.
    fn end(&mut self) -> CaffResult<()>;
}

/// Writes each frame as a raster file.
///
/// Frame 0 goes to the configured path; later frames get a numbered sibling
/// path when more than one frame is expected.
#[derive(Debug)]
pub struct RasterFileSink {
    cfg: EncodeConfig,
    numbered: bool,
    written: Vec<PathBuf>,
}

impl RasterFileSink {
    /// Create a sink writing with `cfg`.
    pub fn new(cfg: EncodeConfig) -> Self {
        Self {
            cfg,
            numbered: false,
            written: Vec::new(),
        }
    }

    /// Files written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for RasterFileSink {
    fn begin(&mut self, frame_count: usize) -> CaffResult<()> {
        if frame_count == 0 {
            return Err(CaffError::encode("no frames to write"));
        }
        self.cfg.validate()?;
        self.numbered = frame_count > 1;
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, info: FrameInfo, frame: &CiffImage) -> CaffResult<()> {
        let path = if self.numbered && info.index > 0 {
            frame_output_path(&self.cfg.out_path, info.index)
        } else {
            self.cfg.out_path.clone()
        };
        let cfg = self.cfg.clone().with_out_path(&path);
        encode_image(frame, &cfg)?;
        tracing::info!(index = info.index, path = %path.display(), "wrote frame");
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> CaffResult<()> {
        Ok(())
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    expected: Option<usize>,
    ended: bool,
    /// Frames in push order.
    pub(crate) frames: Vec<(FrameInfo, CiffImage)>,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame count announced in `begin`, if called.
    pub fn expected(&self) -> Option<usize> {
        self.expected
    }

    /// Whether `end` has been called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameInfo, CiffImage)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, frame_count: usize) -> CaffResult<()> {
        self.expected = Some(frame_count);
        self.ended = false;
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, info: FrameInfo, frame: &CiffImage) -> CaffResult<()> {
        self.frames.push((info, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> CaffResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Feed frames from a decode result into `sink`.
///
/// With `all_frames` unset only the representative image is pushed.
pub fn export_frames(
    decoded: &Decoded,
    all_frames: bool,
    sink: &mut dyn FrameSink,
) -> CaffResult<usize> {
    let frames: Vec<(Option<u16>, &CiffImage)> = match decoded {
        Decoded::Caff(file) if all_frames => file
            .frames()
            .filter(|f| !f.image.pixels.is_empty())
            .map(|f| (Some(f.duration), &f.image))
            .collect(),
        Decoded::Caff(file) => {
            let image = representative_image(decoded)?;
            vec![(file.frames().next().map(|f| f.duration), image)]
        }
        Decoded::Ciff(_) => vec![(None, representative_image(decoded)?)],
    };
    if frames.is_empty() {
        return Err(DecodeError::NoImageAvailable.into());
    }

    sink.begin(frames.len())?;
    for (index, (duration_ms, image)) in frames.iter().enumerate() {
        sink.push_frame(
            FrameInfo {
                index,
                duration_ms: *duration_ms,
            },
            image,
        )?;
    }
    sink.end()?;
    Ok(frames.len())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
