use flowlens::shared::fs_atomic::atomic_write_file;
use std::fs;

#[test]
fn atomic_write_replaces_content_and_leaves_no_temp_files() {
    let temp = tempfile::tempdir().expect("tempdir");
    let target = temp.path().join("config.yaml");

    atomic_write_file(&target, b"first").expect("write first");
    assert_eq!(fs::read_to_string(&target).expect("read first"), "first");

    atomic_write_file(&target, b"second").expect("write second");
    assert_eq!(fs::read_to_string(&target).expect("read second"), "second");

    let entries: Vec<_> = fs::read_dir(temp.path())
        .expect("read dir")
        .map(|entry| entry.expect("entry").file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("config.yaml")]);
}

#[test]
fn atomic_write_fails_without_a_parent_directory() {
    let temp = tempfile::tempdir().expect("tempdir");
    let target = temp.path().join("missing/config.yaml");
    assert!(atomic_write_file(&target, b"data").is_err());
    assert!(!target.exists());
}
