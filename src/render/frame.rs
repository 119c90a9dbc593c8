use image::imageops::FilterType;
use image::{ImageBuffer, Rgb, RgbImage};

use crate::foundation::core::Resolution;
use crate::foundation::error::{ReelError, ReelResult};

/// Resampling filter used for every scale operation in the pipeline.
pub const RESAMPLE_FILTER: FilterType = FilterType::Lanczos3;

/// A frame as RGB8 pixels, tightly packed, row-major, origin top-left.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgb {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGB8 bytes, `width * height * 3` long.
    pub data: Vec<u8>,
}

impl FrameRgb {
    /// Create a frame from raw RGB8 bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> ReelResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(3))
            .ok_or_else(|| ReelError::validation("frame size overflow"))?;
        if data.len() != expected {
            return Err(ReelError::validation(format!(
                "frame data length {} does not match {width}x{height}x3",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A black frame.
    pub fn black(width: u32, height: u32) -> Self {
        Self::solid(width, height, [0, 0, 0])
    }

    /// A frame filled with one color.
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 3);
        for _ in 0..(width as usize * height as usize) {
            data.extend_from_slice(&rgb);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Take ownership of an `image` RGB buffer.
    pub fn from_image(img: RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    /// Copy into an `image` RGB buffer (for codecs).
    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_raw(self.width, self.height, self.data.clone())
            .unwrap_or_else(|| RgbImage::new(self.width, self.height))
    }

    /// Dimensions as a [`Resolution`].
    pub fn resolution(&self) -> Resolution {
        Resolution {
            width: self.width,
            height: self.height,
        }
    }

    pub(crate) fn idx(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 3
    }

    /// Read one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = self.idx(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Write one pixel.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let i = self.idx(x, y);
        self.data[i..i + 3].copy_from_slice(&rgb);
    }

    /// Borrow one row of RGB bytes.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * 3;
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Mutably borrow one row of RGB bytes.
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.width as usize * 3;
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    /// Resample to `width x height` with [`RESAMPLE_FILTER`].
    pub fn resize(&self, width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        if width == self.width && height == self.height {
            return self.clone();
        }
        let view = ImageBuffer::<Rgb<u8>, &[u8]>::from_raw(
            self.width,
            self.height,
            self.data.as_slice(),
        );
        match view {
            Some(view) => Self::from_image(image::imageops::resize(
                &view,
                width,
                height,
                RESAMPLE_FILTER,
            )),
            None => Self::black(width, height),
        }
    }

    /// Copy the `width x height` window at `(left, top)`.
    ///
    /// The window is clamped to stay inside the frame. A window larger than the frame in
    /// either axis clamps to the whole frame in that axis and the result is resampled back up
    /// to the requested size, so the output always has the requested dimensions.
    pub fn crop_clamped(&self, left: i64, top: i64, width: u32, height: u32) -> Self {
        let cw = width.min(self.width);
        let ch = height.min(self.height);
        let max_left = i64::from(self.width - cw);
        let max_top = i64::from(self.height - ch);
        let x0 = left.clamp(0, max_left) as u32;
        let y0 = top.clamp(0, max_top) as u32;

        let mut out = Self::black(cw, ch);
        let src_stride = self.width as usize * 3;
        let dst_stride = cw as usize * 3;
        for y in 0..ch {
            let src_start = (y0 + y) as usize * src_stride + x0 as usize * 3;
            let dst_start = y as usize * dst_stride;
            out.data[dst_start..dst_start + dst_stride]
                .copy_from_slice(&self.data[src_start..src_start + dst_stride]);
        }

        if cw != width || ch != height {
            return out.resize(width, height);
        }
        out
    }

    /// Scale so the frame covers `target` (preserving aspect), returning the scaled frame.
    pub fn scale_to_cover(&self, target: Resolution) -> Self {
        let (w, h) = cover_size(self.resolution(), target);
        self.resize(w, h)
    }

    /// Cover-fit then center-crop to exactly `target`.
    pub fn fit_cover(&self, target: Resolution) -> Self {
        let scaled = self.scale_to_cover(target);
        let left = (i64::from(scaled.width) - i64::from(target.width)) / 2;
        let top = (i64::from(scaled.height) - i64::from(target.height)) / 2;
        scaled.crop_clamped(left, top, target.width, target.height)
    }

    /// Paste `src` with its top-left corner at `(left, top)`, clipping to this frame.
    pub fn paste(&mut self, src: &FrameRgb, left: i64, top: i64) {
        let x_start = left.max(0);
        let y_start = top.max(0);
        let x_end = (left + i64::from(src.width)).min(i64::from(self.width));
        let y_end = (top + i64::from(src.height)).min(i64::from(self.height));
        if x_start >= x_end || y_start >= y_end {
            return;
        }
        let len = (x_end - x_start) as usize * 3;
        for y in y_start..y_end {
            let sx = (x_start - left) as u32;
            let sy = (y - top) as u32;
            let s = src.idx(sx, sy);
            let d = self.idx(x_start as u32, y as u32);
            self.data[d..d + len].copy_from_slice(&src.data[s..s + len]);
        }
    }

    /// Mean over all channels of all pixels.
    pub fn mean(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        let sum: u64 = self.data.iter().map(|&v| u64::from(v)).sum();
        (sum as f64 / self.data.len() as f64) as f32
    }
}

/// Size of `src` scaled uniformly so it covers `target` in both axes.
pub fn cover_size(src: Resolution, target: Resolution) -> (u32, u32) {
    let sx = f64::from(target.width) / f64::from(src.width.max(1));
    let sy = f64::from(target.height) / f64::from(src.height.max(1));
    let scale = sx.max(sy);
    let w = ((f64::from(src.width) * scale) as u32).max(target.width);
    let h = ((f64::from(src.height) * scale) as u32).max(target.height);
    (w, h)
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
