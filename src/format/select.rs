use crate::{
    format::{Decoded, ciff::CiffImage},
    foundation::error::{DecodeError, DecodeResult},
};

/// Pick the image handed to the raster encoder.
///
/// A bare CIFF yields itself; a CAFF yields its first animation frame. An image
/// without pixels counts as no image at all.
pub fn representative_image(decoded: &Decoded) -> DecodeResult<&CiffImage> {
    let image = match decoded {
        Decoded::Ciff(image) => Some(image),
        Decoded::Caff(file) => file.frames().next().map(|f| &f.image),
    };

    match image {
        Some(image) if !image.pixels.is_empty() => {
            tracing::debug!(
                width = image.header.width,
                height = image.header.height,
                "selected representative image"
            );
            Ok(image)
        }
        _ => Err(DecodeError::NoImageAvailable),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/format/select.rs"]
mod tests;
