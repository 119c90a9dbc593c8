use std::io::{BufRead, Cursor, Seek};
use std::path::Path;

use anyhow::Context;
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader};

use crate::foundation::core::Resolution;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::frame::FrameRgb;

/// A decoded photo, upright, as RGB8.
#[derive(Clone, Debug)]
pub struct DecodedPhoto {
    /// Pixels after applying the EXIF orientation.
    pub frame: FrameRgb,
    /// Dimensions as stored in the file, before orientation.
    pub stored: Resolution,
    /// EXIF orientation that was applied.
    pub orientation: Orientation,
}

/// Decode the image at `path`, guessing the format from its content.
pub fn load_photo(path: &Path) -> ReelResult<DecodedPhoto> {
    let reader = ImageReader::open(path)
        .with_context(|| format!("open image '{}'", path.display()))?;
    decode_reader(reader).map_err(|e| match e {
        ReelError::Other(err) => ReelError::Other(err.context(format!(
            "decode image '{}'",
            path.display()
        ))),
        other => other,
    })
}

/// Decode an in-memory encoded image.
pub fn decode_photo_bytes(bytes: &[u8]) -> ReelResult<DecodedPhoto> {
    decode_reader(ImageReader::new(Cursor::new(bytes)))
}

fn decode_reader<R: BufRead + Seek>(reader: ImageReader<R>) -> ReelResult<DecodedPhoto> {
    let mut decoder = reader
        .with_guessed_format()
        .context("sniff image format")?
        .into_decoder()
        .context("create image decoder")?;
    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
    let mut img = DynamicImage::from_decoder(decoder).context("decode image pixels")?;
    let stored = Resolution {
        width: img.width(),
        height: img.height(),
    };
    if stored.width == 0 || stored.height == 0 {
        return Err(ReelError::validation("image has zero width or height"));
    }
    img.apply_orientation(orientation);
    Ok(DecodedPhoto {
        frame: FrameRgb::from_image(img.to_rgb8()),
        stored,
        orientation,
    })
}

/// Write `frame` to `path`; the format follows the extension (`.png`, `.jpg`).
pub fn save_frame(frame: &FrameRgb, path: &Path) -> ReelResult<()> {
    crate::encode::ffmpeg::ensure_parent_dir(path)?;
    frame
        .to_image()
        .save(path)
        .with_context(|| format!("write image '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
