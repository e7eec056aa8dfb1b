use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    foundation::error::{CaffError, CaffResult},
    format::ciff::CiffImage,
};

/// Raster container written for a decoded image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Baseline JPEG.
    #[default]
    Jpeg,
    /// Lossless PNG.
    Png,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }

    fn image_format(self) -> image::ImageFormat {
        match self {
            OutputFormat::Jpeg => image::ImageFormat::Jpeg,
            OutputFormat::Png => image::ImageFormat::Png,
        }
    }
}

/// Where and how to write a raster file.
#[derive(Clone, Debug)]
pub struct EncodeConfig {
    /// Destination file.
    pub out_path: PathBuf,
    /// Container format.
    pub format: OutputFormat,
    /// Replace an existing file at `out_path`.
    pub overwrite: bool,
}

impl EncodeConfig {
    /// Config that overwrites `out_path` with `format`.
    pub fn new(out_path: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            out_path: out_path.into(),
            format,
            overwrite: true,
        }
    }

    /// Reject configurations that cannot produce a file.
    pub fn validate(&self) -> CaffResult<()> {
        if self.out_path.as_os_str().is_empty() {
            return Err(CaffError::validation("output path must not be empty"));
        }
        if !self.overwrite && self.out_path.exists() {
            return Err(CaffError::validation(format!(
                "output file '{}' already exists",
                self.out_path.display()
            )));
        }
        Ok(())
    }

    /// Same settings, different destination.
    pub fn with_out_path(mut self, out_path: impl Into<PathBuf>) -> Self {
        self.out_path = out_path.into();
        self
    }
}

/// Output path derived from the input: `<input>.<ext>`.
pub fn default_output_path(input: &Path, format: OutputFormat) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(".");
    name.push(format.extension());
    PathBuf::from(name)
}

/// Path for frame `index` of a multi-frame export: `<stem>-<index>.<ext>` next
/// to `base`.
pub fn frame_output_path(base: &Path, index: usize) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = format!("{stem}-{index:04}");
    if let Some(ext) = base.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    base.with_file_name(name)
}

/// Convert the pixel grid into an `image` buffer, keeping red/green/blue order.
pub fn to_rgb_image(image: &CiffImage) -> CaffResult<image::RgbImage> {
    if image.pixels.is_empty() {
        return Err(CaffError::encode("image has no pixels"));
    }
    let width = u32::try_from(image.header.width)
        .map_err(|_| CaffError::encode(format!("width {} exceeds u32", image.header.width)))?;
    let height = u32::try_from(image.header.height)
        .map_err(|_| CaffError::encode(format!("height {} exceeds u32", image.header.height)))?;

    image::RgbImage::from_raw(width, height, image.to_rgb_bytes())
        .ok_or_else(|| CaffError::encode("pixel count does not match dimensions"))
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> CaffResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Write `image` to `cfg.out_path`.
#[tracing::instrument(skip_all, fields(out = %cfg.out_path.display()))]
pub fn encode_image(image: &CiffImage, cfg: &EncodeConfig) -> CaffResult<()> {
    cfg.validate()?;
    let rgb = to_rgb_image(image)?;
    ensure_parent_dir(&cfg.out_path)?;

    rgb.save_with_format(&cfg.out_path, cfg.format.image_format())
        .with_context(|| format!("write {:?} '{}'", cfg.format, cfg.out_path.display()))?;
    tracing::debug!(width = rgb.width(), height = rgb.height(), "wrote raster");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/raster.rs"]
mod tests;
