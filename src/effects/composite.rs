use rand::Rng;

use crate::effects::transitions::Direction;
use crate::foundation::math::clamp_u8;
use crate::foundation::rng::ReelRng;
use crate::render::frame::FrameRgb;

/// Rows affected by the glitch at full strength and remaining progress.
pub const GLITCH_ROW_BUDGET: f64 = 10.0;
/// Largest glitch row shift as a fraction of the width.
pub const GLITCH_MAX_SHIFT: f64 = 0.1;
/// Probability that a glitched row also gets a single-channel offset.
pub const GLITCH_CHANNEL_CHANCE: f64 = 0.3;
/// Largest single-channel glitch offset in pixels.
pub const GLITCH_CHANNEL_OFFSET_PX: i64 = 5;
/// Width of the page-curl shadow band in pixels.
pub const CURL_SHADOW_PX: u32 = 10;
/// Opacity of the page-curl shadow at the boundary.
pub const CURL_SHADOW_OPACITY: f32 = 0.3;

/// `round((1 - t) * a + t * b)` per channel. Exact at `t = 0` and `t = 1`.
pub fn crossfade(a: &FrameRgb, b: &FrameRgb, t: f64) -> FrameRgb {
    let t = t.clamp(0.0, 1.0) as f32;
    let it = 1.0 - t;
    let data = a
        .data
        .iter()
        .zip(b.data.iter())
        .map(|(&av, &bv)| clamp_u8(it * f32::from(av) + t * f32::from(bv)))
        .collect();
    FrameRgb {
        width: b.width,
        height: b.height,
        data,
    }
}

/// `b` slides in along `dir`, pushing `a` out the same way (black when `a` is absent).
pub fn slide(a: Option<&FrameRgb>, b: &FrameRgb, t: f64, dir: Direction) -> FrameRgb {
    let w = i64::from(b.width);
    let h = i64::from(b.height);
    let rem = 1.0 - t.clamp(0.0, 1.0);
    let (b_pos, a_pos) = match dir {
        Direction::Left => {
            let off = (w as f64 * rem) as i64;
            ((off, 0), (off - w, 0))
        }
        Direction::Right => {
            let off = (w as f64 * rem) as i64;
            ((-off, 0), (w - off, 0))
        }
        Direction::Up => {
            let off = (h as f64 * rem) as i64;
            ((0, off), (0, off - h))
        }
        Direction::Down => {
            let off = (h as f64 * rem) as i64;
            ((0, -off), (0, h - off))
        }
    };
    let mut out = FrameRgb::black(b.width, b.height);
    if let Some(a) = a {
        out.paste(a, a_pos.0, a_pos.1);
    }
    out.paste(b, b_pos.0, b_pos.1);
    out
}

/// `b` scaled to `0.5 + 0.5 t` of full size, centred over `a` (or black).
pub fn zoom_in(a: Option<&FrameRgb>, b: &FrameRgb, t: f64) -> FrameRgb {
    let zoom = 0.5 + 0.5 * t.clamp(0.0, 1.0);
    let nw = ((f64::from(b.width) * zoom) as u32).clamp(1, b.width);
    let nh = ((f64::from(b.height) * zoom) as u32).clamp(1, b.height);
    if nw == b.width && nh == b.height {
        return b.clone();
    }
    let mut out = match a {
        Some(a) => a.clone(),
        None => FrameRgb::black(b.width, b.height),
    };
    let scaled = b.resize(nw, nh);
    out.paste(
        &scaled,
        i64::from((b.width - nw) / 2),
        i64::from((b.height - nh) / 2),
    );
    out
}

fn shift_row(src: &[u8], dst: &mut [u8], shift: i64, channel: Option<usize>) {
    let w = (src.len() / 3) as i64;
    for x in 0..w {
        let sx = x - shift;
        if !(0..w).contains(&sx) {
            continue;
        }
        let (d, s) = (x as usize * 3, sx as usize * 3);
        match channel {
            Some(c) => dst[d + c] = src[s + c],
            None => dst[d..d + 3].copy_from_slice(&src[s..s + 3]),
        }
    }
}

/// Displace `floor(intensity * remaining * 10)` random rows of `frame`.
///
/// Each row shifts horizontally by up to 10% of the width and, with probability 0.3, one
/// channel of it is offset by up to 5px more. Rows are read from the undisturbed input.
pub fn glitch(frame: &FrameRgb, intensity: f64, remaining: f64, rng: &mut ReelRng) -> FrameRgb {
    let mut out = frame.clone();
    let count = (intensity * remaining.clamp(0.0, 1.0) * GLITCH_ROW_BUDGET).floor() as usize;
    if count == 0 || frame.height == 0 {
        return out;
    }
    let max_shift = (f64::from(frame.width) * GLITCH_MAX_SHIFT) as i64;
    for _ in 0..count {
        let y = rng.random_range(0..frame.height);
        let shift = rng.random_range(-max_shift..=max_shift);
        let src = frame.row(y);
        if shift != 0 {
            shift_row(src, out.row_mut(y), shift, None);
        }
        if rng.random::<f64>() < GLITCH_CHANNEL_CHANCE {
            let channel = rng.random_range(0..3usize);
            let offset = rng.random_range(-GLITCH_CHANNEL_OFFSET_PX..=GLITCH_CHANNEL_OFFSET_PX);
            if offset != 0 {
                shift_row(src, out.row_mut(y), offset, Some(channel));
            }
        }
    }
    out
}

/// Pixels within `t * half_diagonal` of `center` (default: frame centre) take `b`.
pub fn circular_wipe(
    a: &FrameRgb,
    b: &FrameRgb,
    t: f64,
    center: Option<(f64, f64)>,
) -> FrameRgb {
    let (w, h) = (f64::from(b.width), f64::from(b.height));
    let (cx, cy) = center.unwrap_or((f64::from(b.width / 2), f64::from(b.height / 2)));
    let max_radius = (w * w + h * h).sqrt() / 2.0;
    let radius = max_radius * t.clamp(0.0, 1.0);
    let r2 = radius * radius + 1e-9;

    let mut out = a.clone();
    for y in 0..b.height {
        let dy = f64::from(y) - cy;
        for x in 0..b.width {
            let dx = f64::from(x) - cx;
            if dx * dx + dy * dy <= r2 {
                let i = b.idx(x, y);
                out.data[i..i + 3].copy_from_slice(&b.data[i..i + 3]);
            }
        }
    }
    out
}

fn darken_column(frame: &mut FrameRgb, x: u32, alpha: f32) {
    for y in 0..frame.height {
        let i = frame.idx(x, y);
        for v in &mut frame.data[i..i + 3] {
            *v = clamp_u8(f32::from(*v) * (1.0 - alpha));
        }
    }
}

fn darken_row(frame: &mut FrameRgb, y: u32, alpha: f32) {
    for v in frame.row_mut(y) {
        *v = clamp_u8(f32::from(*v) * (1.0 - alpha));
    }
}

fn shadow_alpha(k: u32) -> f32 {
    (CURL_SHADOW_PX - k) as f32 / CURL_SHADOW_PX as f32 * CURL_SHADOW_OPACITY
}

/// A straight boundary sweeps along `dir`; the swept side shows `b`.
///
/// A shadow band darkens the `a` side next to the boundary while there is room for it.
pub fn page_curl(a: &FrameRgb, b: &FrameRgb, t: f64, dir: Direction) -> FrameRgb {
    let t = t.clamp(0.0, 1.0);
    let (w, h) = (b.width, b.height);
    let mut out = a.clone();
    match dir {
        Direction::Right => {
            let split = ((f64::from(w) * t) as u32).min(w);
            for y in 0..h {
                let i = out.idx(0, y);
                let n = split as usize * 3;
                out.data[i..i + n].copy_from_slice(&b.data[i..i + n]);
            }
            if split + CURL_SHADOW_PX < w {
                for k in 0..CURL_SHADOW_PX {
                    darken_column(&mut out, split + k, shadow_alpha(k));
                }
            }
        }
        Direction::Left => {
            let split = ((f64::from(w) * (1.0 - t)) as u32).min(w);
            for y in 0..h {
                let i = out.idx(split.min(w), y);
                let n = (w - split) as usize * 3;
                out.data[i..i + n].copy_from_slice(&b.data[i..i + n]);
            }
            if split > CURL_SHADOW_PX {
                for k in 0..CURL_SHADOW_PX {
                    darken_column(&mut out, split - k - 1, shadow_alpha(k));
                }
            }
        }
        Direction::Down => {
            let split = ((f64::from(h) * t) as u32).min(h);
            let n = split as usize * w as usize * 3;
            out.data[..n].copy_from_slice(&b.data[..n]);
            if split + CURL_SHADOW_PX < h {
                for k in 0..CURL_SHADOW_PX {
                    darken_row(&mut out, split + k, shadow_alpha(k));
                }
            }
        }
        Direction::Up => {
            let split = ((f64::from(h) * (1.0 - t)) as u32).min(h);
            let start = split as usize * w as usize * 3;
            out.data[start..].copy_from_slice(&b.data[start..]);
            if split > CURL_SHADOW_PX {
                for k in 0..CURL_SHADOW_PX {
                    darken_row(&mut out, split - k - 1, shadow_alpha(k));
                }
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
