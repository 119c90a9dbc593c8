use std::time::Duration;

use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir =
        std::env::temp_dir().join(format!("reelcraft_preprocess_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_png(path: &Path, width: u32, height: u32, rgb: [u8; 3]) {
    image::RgbImage::from_pixel(width, height, image::Rgb(rgb))
        .save(path)
        .unwrap();
}

struct OneFace;

impl FaceDetector for OneFace {
    fn detect(&self, frame: &FrameRgb) -> ReelResult<Vec<FaceBox>> {
        Ok(vec![FaceBox {
            x: 0,
            y: 0,
            width: frame.width / 2,
            height: frame.height / 2,
        }])
    }
}

struct Broken;

impl FaceDetector for Broken {
    fn detect(&self, _frame: &FrameRgb) -> ReelResult<Vec<FaceBox>> {
        Err(ReelError::evaluation("detector offline"))
    }
}

fn opts() -> PreprocessOpts {
    PreprocessOpts {
        target: Resolution {
            width: 6,
            height: 10,
        },
        smart_crop: true,
        score_importance: true,
    }
}

#[test]
fn zero_workers_is_rejected() {
    assert!(build_thread_pool(0).is_err());
}

#[test]
fn run_ordered_preserves_submission_order() {
    let items: Vec<u64> = (0..16).collect();
    for workers in [1, 3, 8] {
        let pool = build_thread_pool(workers).unwrap();
        let out = run_ordered(&pool, &items, |&i| {
            // Early items take longest.
            std::thread::sleep(Duration::from_millis(16 - i));
            i * 10
        });
        assert_eq!(out, items.iter().map(|i| i * 10).collect::<Vec<_>>());
    }
}

#[test]
fn bad_photo_is_skipped_and_order_kept() {
    let dir = scratch("skip");
    let a = dir.join("a.png");
    let b = dir.join("b.png");
    let c = dir.join("c.png");
    write_png(&a, 12, 8, [255, 0, 0]);
    std::fs::write(&b, b"not a png").unwrap();
    write_png(&c, 8, 12, [0, 0, 255]);

    let out = preprocess_photos(&[a.clone(), b, c.clone()], &opts(), None, 2).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].path, a);
    assert_eq!(out[1].path, c);
    assert!(out.iter().all(|p| p.frame.resolution() == opts().target));
    assert_eq!(out[0].frame.pixel(0, 0), [255, 0, 0]);
    assert_eq!(out[0].importance, 0.5);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn detector_feeds_importance_and_failures_fall_back() {
    let dir = scratch("faces");
    let a = dir.join("a.png");
    write_png(&a, 20, 20, [10, 10, 10]);

    let with_face = prepare_photo(&a, &opts(), Some(&OneFace)).unwrap();
    assert_eq!(with_face.faces.len(), 1);
    assert!(with_face.importance > 0.5);
    assert_eq!(with_face.frame.resolution(), opts().target);

    let broken = prepare_photo(&a, &opts(), Some(&Broken)).unwrap();
    assert!(broken.faces.is_empty());
    assert_eq!(broken.importance, 0.5);
    let _ = std::fs::remove_dir_all(&dir);
}
