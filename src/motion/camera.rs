use std::borrow::Cow;
use std::f64::consts::PI;

use crate::foundation::core::Resolution;
use crate::motion::spec::{Corner, PanDirection, ResolvedMotion};
use crate::render::frame::FrameRgb;

/// Fixed scale of the circular path.
pub const CIRCULAR_SCALE: f64 = 1.2;
/// Radius of the circular path in pixels.
pub const CIRCULAR_RADIUS_PX: f64 = 50.0;
/// Fixed scale of the handheld shake.
pub const HANDHELD_SCALE: f64 = 1.05;
/// Maximum handheld offset per axis in pixels.
pub const HANDHELD_SHAKE_PX: i64 = 5;
/// Peak swing of the 3D rotation, in degrees.
pub const ROTATE3D_MAX_DEG: f64 = 15.0;
/// Share of the zoom slack used by the zoom+pan combo.
pub const COMBO_PAN_SHARE: f64 = 0.3;

/// Scale `source` by a uniform factor, truncating to whole pixels.
pub(crate) fn scale_by(source: &FrameRgb, zoom: f64) -> FrameRgb {
    let w = ((f64::from(source.width) * zoom) as u32).max(1);
    let h = ((f64::from(source.height) * zoom) as u32).max(1);
    source.resize(w, h)
}

/// Scale used for styles whose resampled image does not change over the clip.
pub(crate) fn fixed_scale(motion: &ResolvedMotion, intensity: f64) -> Option<f64> {
    match motion {
        ResolvedMotion::Pan(_) => Some(1.0 + intensity),
        ResolvedMotion::Circular => Some(CIRCULAR_SCALE),
        ResolvedMotion::Handheld => Some(HANDHELD_SCALE),
        _ => None,
    }
}

fn centred(scaled: &FrameRgb, target: Resolution) -> (i64, i64) {
    (
        (i64::from(scaled.width) - i64::from(target.width)) / 2,
        (i64::from(scaled.height) - i64::from(target.height)) / 2,
    )
}

fn slack(scaled: &FrameRgb, target: Resolution) -> (f64, f64) {
    (
        (f64::from(scaled.width) - f64::from(target.width)).max(0.0),
        (f64::from(scaled.height) - f64::from(target.height)).max(0.0),
    )
}

/// Inputs of one frame of camera motion.
pub(crate) struct CameraFrame<'a> {
    /// Source image at output resolution.
    pub source: &'a FrameRgb,
    /// Pre-scaled source for fixed-scale styles.
    pub prescaled: Option<&'a FrameRgb>,
    pub target: Resolution,
    pub intensity: f64,
    /// Eased progress.
    pub progress: f64,
    /// Handheld offset for this frame.
    pub jitter: (i64, i64),
}

fn prescaled<'a>(cam: &CameraFrame<'a>, zoom: f64) -> Cow<'a, FrameRgb> {
    match cam.prescaled {
        Some(f) => Cow::Borrowed(f),
        None => Cow::Owned(scale_by(cam.source, zoom)),
    }
}

/// Render one frame of `motion`. Output is always exactly `target`.
pub(crate) fn render(motion: &ResolvedMotion, cam: &CameraFrame<'_>) -> FrameRgb {
    let p = cam.progress;
    let i = cam.intensity;
    let target = cam.target;

    match *motion {
        ResolvedMotion::Zoom { zoom_in } => {
            let zoom = if zoom_in {
                1.0 + p * i
            } else {
                (1.0 + i) - p * i
            };
            let scaled = scale_by(cam.source, zoom);
            let (left, top) = centred(&scaled, target);
            scaled.crop_clamped(left, top, target.width, target.height)
        }
        ResolvedMotion::Pan(dir) => {
            let scaled = prescaled(cam, 1.0 + i);
            let amount_x = (f64::from(target.width) * i) as i64;
            let amount_y = (f64::from(target.height) * i) as i64;
            let (left, top) = match dir {
                PanDirection::Left => ((amount_x as f64 * (1.0 - p)) as i64, 0),
                PanDirection::Right => ((amount_x as f64 * p) as i64, 0),
                PanDirection::Up => (0, (amount_y as f64 * (1.0 - p)) as i64),
                PanDirection::Down => (0, (amount_y as f64 * p) as i64),
            };
            scaled.crop_clamped(left, top, target.width, target.height)
        }
        ResolvedMotion::Diagonal(corner) => {
            let scaled = scale_by(cam.source, 1.0 + p * i);
            let (sx, sy) = slack(&scaled, target);
            let (fx, fy) = match corner {
                Corner::TopLeft => (1.0 - p, 1.0 - p),
                Corner::TopRight => (p, 1.0 - p),
                Corner::BottomLeft => (1.0 - p, p),
                Corner::BottomRight => (p, p),
            };
            scaled.crop_clamped(
                (sx * fx) as i64,
                (sy * fy) as i64,
                target.width,
                target.height,
            )
        }
        ResolvedMotion::Circular => {
            let scaled = prescaled(cam, CIRCULAR_SCALE);
            let angle = 2.0 * PI * p;
            let (cx, cy) = centred(&scaled, target);
            let dx = (CIRCULAR_RADIUS_PX * angle.cos()) as i64;
            let dy = (CIRCULAR_RADIUS_PX * angle.sin()) as i64;
            scaled.crop_clamped(cx + dx, cy + dy, target.width, target.height)
        }
        ResolvedMotion::Handheld => {
            let scaled = prescaled(cam, HANDHELD_SCALE);
            let (cx, cy) = centred(&scaled, target);
            scaled.crop_clamped(
                cx + cam.jitter.0,
                cy + cam.jitter.1,
                target.width,
                target.height,
            )
        }
        ResolvedMotion::Rotate3d { direction } => {
            let angle = direction * ROTATE3D_MAX_DEG * (PI * p).sin();
            let squeeze = 1.0 - angle.abs() / 100.0;
            let new_w = ((f64::from(target.width) * squeeze) as u32).clamp(1, target.width);
            let base = if cam.source.resolution() == target {
                cam.source.clone()
            } else {
                cam.source.fit_cover(target)
            };
            if new_w == target.width {
                return base;
            }
            let squeezed = base.resize(new_w, target.height);
            let mut out = FrameRgb::black(target.width, target.height);
            out.paste(&squeezed, i64::from((target.width - new_w) / 2), 0);
            out
        }
        ResolvedMotion::ZoomPanCombo { pan, zoom_in } => {
            let zoom = if zoom_in {
                1.0 + p * i
            } else {
                (1.0 + i) - p * i
            };
            let scaled = scale_by(cam.source, zoom);
            let (sx, sy) = slack(&scaled, target);
            let amount = sx.min(sy) * COMBO_PAN_SHARE;
            let (cx, cy) = centred(&scaled, target);
            let (left, top) = match pan {
                PanDirection::Left => ((amount * (1.0 - p)) as i64, cy),
                PanDirection::Right => ((amount * p) as i64, cy),
                PanDirection::Up => (cx, (amount * (1.0 - p)) as i64),
                PanDirection::Down => (cx, (amount * p) as i64),
            };
            scaled.crop_clamped(left, top, target.width, target.height)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/camera.rs"]
mod tests;
