use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("reelcraft_discover_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn extension_match_is_case_insensitive() {
    assert!(is_photo_path(Path::new("a/B.JPG")));
    assert!(is_photo_path(Path::new("x.Jpeg")));
    assert!(is_photo_path(Path::new("x.png")));
    assert!(!is_photo_path(Path::new("x.gif")));
    assert!(!is_photo_path(Path::new("png")));
}

#[test]
fn sorts_by_name_and_caps() {
    let dir = scratch("names");
    for name in ["c.png", "a.JPG", "b.jpeg", "notes.txt"] {
        std::fs::write(dir.join(name), b"x").unwrap();
    }
    std::fs::create_dir_all(dir.join("sub.png")).unwrap();

    let all = discover_photos(&dir, 50, false).unwrap();
    let names: Vec<_> = all
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["a.JPG", "b.jpeg", "c.png"]);

    assert_eq!(discover_photos(&dir, 2, false).unwrap().len(), 2);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn empty_or_missing_directory_is_an_input_error() {
    let dir = scratch("empty");
    assert!(matches!(
        discover_photos(&dir, 50, false),
        Err(ReelError::Input(_))
    ));
    assert!(matches!(
        discover_photos(&dir.join("missing"), 50, true),
        Err(ReelError::Input(_))
    ));
    let _ = std::fs::remove_dir_all(&dir);
}
