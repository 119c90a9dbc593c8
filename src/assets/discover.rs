use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::foundation::error::{ReelError, ReelResult};

/// File extensions picked up as photos (compared case-insensitively).
pub const PHOTO_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Default cap on photos per reel.
pub const DEFAULT_MAX_PHOTOS: usize = 50;

/// Whether `path` has a photo extension.
pub fn is_photo_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| PHOTO_EXTENSIONS.iter().any(|p| e.eq_ignore_ascii_case(p)))
}

/// Collect the photos directly inside `dir`.
///
/// Ordered by modification time when `sort_by_time`, by file name otherwise, then capped at
/// `max_photos`. An unreadable directory or one without photos is an input error.
pub fn discover_photos(
    dir: &Path,
    max_photos: usize,
    sort_by_time: bool,
) -> ReelResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        ReelError::input(format!("cannot read input directory '{}': {e}", dir.display()))
    })?;

    let mut photos: Vec<(Option<SystemTime>, PathBuf)> = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() || !is_photo_path(&path) {
            continue;
        }
        let mtime = entry.metadata().and_then(|m| m.modified()).ok();
        photos.push((mtime, path));
    }

    if sort_by_time {
        photos.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    } else {
        photos.sort_by(|a, b| a.1.cmp(&b.1));
    }
    photos.truncate(max_photos);

    if photos.is_empty() {
        return Err(ReelError::input(format!(
            "no images found in '{}'",
            dir.display()
        )));
    }
    tracing::info!(count = photos.len(), dir = %dir.display(), "photos discovered");
    Ok(photos.into_iter().map(|(_, p)| p).collect())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/discover.rs"]
mod tests;
