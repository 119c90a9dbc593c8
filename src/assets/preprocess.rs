use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::analysis::faces::{self, FaceBox, FaceDetector};
use crate::assets::decode::load_photo;
use crate::foundation::core::Resolution;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::frame::FrameRgb;

/// Default worker count of the preprocessing pool.
pub const DEFAULT_WORKERS: usize = 4;

/// What preprocessing does to each photo.
#[derive(Clone, Copy, Debug)]
pub struct PreprocessOpts {
    /// Output frame size.
    pub target: Resolution,
    /// Crop around the largest face instead of the centre.
    pub smart_crop: bool,
    /// Run face detection for importance scoring.
    pub score_importance: bool,
}

/// One photo ready to become a clip.
#[derive(Clone, Debug)]
pub struct PreparedPhoto {
    /// Source file.
    pub path: PathBuf,
    /// Upright, cropped to the target size.
    pub frame: FrameRgb,
    /// Faces found in the upright photo (empty when detection is off).
    pub faces: Vec<FaceBox>,
    /// Importance score in `[0.5, 1]`.
    pub importance: f64,
}

/// Build the fixed-size preprocessing pool.
pub fn build_thread_pool(workers: usize) -> ReelResult<rayon::ThreadPool> {
    if workers == 0 {
        return Err(ReelError::validation("workers must be >= 1"));
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| ReelError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

/// Map `items` through `f` on `pool`; results come back in submission order.
pub fn run_ordered<T, R, F>(pool: &rayon::ThreadPool, items: &[T], f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    pool.install(|| items.par_iter().map(&f).collect())
}

/// Decode, orient and crop one photo.
pub fn prepare_photo(
    path: &Path,
    opts: &PreprocessOpts,
    detector: Option<&dyn FaceDetector>,
) -> ReelResult<PreparedPhoto> {
    let decoded = load_photo(path)?;
    let source = decoded.frame;

    let faces = match detector {
        Some(d) if opts.smart_crop || opts.score_importance => match d.detect(&source) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "face detection failed; using centre");
                Vec::new()
            }
        },
        _ => Vec::new(),
    };

    let frame = if opts.smart_crop && detector.is_some() {
        let focus = faces::focus_point(&faces, source.resolution());
        faces::smart_crop(&source, focus, opts.target)
    } else {
        source.fit_cover(opts.target)
    };
    let importance = faces::importance(&faces, source.resolution());

    tracing::debug!(
        path = %path.display(),
        faces = faces.len(),
        importance,
        "photo prepared"
    );
    Ok(PreparedPhoto {
        path: path.to_path_buf(),
        frame,
        faces,
        importance,
    })
}

/// Prepare every photo on a pool of `workers` threads, keeping input order.
///
/// Photos that fail are logged and skipped.
pub fn preprocess_photos(
    paths: &[PathBuf],
    opts: &PreprocessOpts,
    detector: Option<&dyn FaceDetector>,
    workers: usize,
) -> ReelResult<Vec<PreparedPhoto>> {
    let pool = build_thread_pool(workers)?;
    let results = run_ordered(&pool, paths, |p| prepare_photo(p, opts, detector));

    let mut prepared = Vec::with_capacity(results.len());
    for (path, res) in paths.iter().zip(results) {
        match res {
            Ok(photo) => prepared.push(photo),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping photo"),
        }
    }
    tracing::info!(
        prepared = prepared.len(),
        skipped = paths.len() - prepared.len(),
        "preprocessing finished"
    );
    Ok(prepared)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/preprocess.rs"]
mod tests;
