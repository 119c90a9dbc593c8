use crate::foundation::core::Resolution;
use crate::foundation::error::ReelResult;
use crate::render::frame::{FrameRgb, cover_size};

/// Shortest clip an importance adjustment may produce, in seconds.
pub const MIN_ADAPTIVE_SECS: f64 = 2.0;
/// Longest clip an importance adjustment may produce, in seconds.
pub const MAX_ADAPTIVE_SECS: f64 = 6.0;
/// Importance of an image without faces.
pub const BASE_IMPORTANCE: f64 = 0.5;

/// Axis-aligned face rectangle in source-image pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FaceBox {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

impl FaceBox {
    /// Area in pixels.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Integer centre point.
    pub fn center(&self) -> (u32, u32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }
}

/// Face detection collaborator. Implementations are stateless per call.
pub trait FaceDetector: Send + Sync {
    /// Find faces in `frame`.
    fn detect(&self, frame: &FrameRgb) -> ReelResult<Vec<FaceBox>>;
}

/// Detector that never finds a face. Everything falls back to centred behaviour.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoFaceDetector;

impl FaceDetector for NoFaceDetector {
    fn detect(&self, _frame: &FrameRgb) -> ReelResult<Vec<FaceBox>> {
        Ok(Vec::new())
    }
}

/// Centre of the largest face, or the image centre when there are none.
pub fn focus_point(faces: &[FaceBox], image: Resolution) -> (u32, u32) {
    faces
        .iter()
        .max_by_key(|f| f.area())
        .map(FaceBox::center)
        .unwrap_or((image.width / 2, image.height / 2))
}

/// Cover-fit `source` to `target` and crop around `focus` (source pixels).
///
/// The window is centred on the scaled focus and clamped inside the scaled image.
pub fn smart_crop(source: &FrameRgb, focus: (u32, u32), target: Resolution) -> FrameRgb {
    let (new_w, new_h) = cover_size(source.resolution(), target);
    let scale = (f64::from(target.width) / f64::from(source.width.max(1)))
        .max(f64::from(target.height) / f64::from(source.height.max(1)));
    let fx = (f64::from(focus.0) * scale) as i64;
    let fy = (f64::from(focus.1) * scale) as i64;
    let left = fx - i64::from(target.width / 2);
    let top = fy - i64::from(target.height / 2);
    source
        .resize(new_w, new_h)
        .crop_clamped(left, top, target.width, target.height)
}

/// `0.6 * min(n / 3, 1) + 0.4 * min(area_ratio / 0.3, 1)`, clamped to `[0.5, 1]`.
pub fn importance(faces: &[FaceBox], image: Resolution) -> f64 {
    if faces.is_empty() || image.area() == 0 {
        return BASE_IMPORTANCE;
    }
    let face_area: u64 = faces.iter().map(FaceBox::area).sum();
    let ratio = face_area as f64 / image.area() as f64;
    let count_score = (faces.len() as f64 / 3.0).min(1.0);
    let ratio_score = (ratio / 0.3).min(1.0);
    (count_score * 0.6 + ratio_score * 0.4).clamp(BASE_IMPORTANCE, 1.0)
}

/// Stretch `base` by importance: `clamp(base + (importance - 0.5) * 2, 2, 6)`.
pub fn adjust_duration(base: f64, importance: f64) -> f64 {
    (base + (importance - BASE_IMPORTANCE) * 2.0).clamp(MIN_ADAPTIVE_SECS, MAX_ADAPTIVE_SECS)
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/faces.rs"]
mod tests;
