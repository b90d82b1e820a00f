use super::*;

#[test]
fn wildcard_star_and_question_mark() {
    assert!(wildcard_match("*LeftEye*", "shot01.LeftEye.0000.png"));
    assert!(wildcard_match("*LeftEye*", "LeftEye"));
    assert!(!wildcard_match("*LeftEye*", "shot01.RightEye.0000.png"));
    assert!(wildcard_match("a?c", "abc"));
    assert!(!wildcard_match("a?c", "ac"));
    assert!(wildcard_match("*.png", "x.y.png"));
    assert!(!wildcard_match("*.png", "x.png.bak"));
    assert!(wildcard_match("*", ""));
    assert!(!wildcard_match("", "x"));
}

#[test]
fn wildcard_is_case_sensitive() {
    assert!(!wildcard_match("*lefteye*", "shot.LeftEye.0001.png"));
}

#[test]
fn std_file_system_lists_and_removes() {
    let dir = std::path::PathBuf::from("target").join("unit_std_file_system");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(dir.join("sub.LeftEye.dir")).unwrap();
    for name in ["a.LeftEye.0000.png", "a.LeftEye.0001.png", "a.RightEye.0000.png"] {
        std::fs::write(dir.join(name), b"x").unwrap();
    }

    let mut fs = StdFileSystem;
    let mut names = fs.list_files(&dir, "*LeftEye*").unwrap();
    names.sort();
    assert_eq!(names, vec!["a.LeftEye.0000.png", "a.LeftEye.0001.png"]);

    assert!(fs.is_file(&dir.join("a.RightEye.0000.png")));
    fs.remove_file(&dir.join("a.RightEye.0000.png")).unwrap();
    assert!(!fs.is_file(&dir.join("a.RightEye.0000.png")));
    assert!(fs.remove_file(&dir.join("missing.png")).is_err());
}

#[test]
fn listing_a_missing_directory_fails() {
    let fs = StdFileSystem;
    assert!(
        fs.list_files(std::path::Path::new("/definitely/not/here"), "*")
            .is_err()
    );
}
