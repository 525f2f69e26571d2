use super::{MimeTable, VideoSource, DEFAULT_VIDEO_MIME};
use crate::errors::ThumbnailerError;
use proptest::prelude::*;
use std::io::Write;

#[test]
fn test_default_table_known_extensions() {
    let table = MimeTable::default();
    assert_eq!(table.lookup(".mp4"), "video/mp4");
    assert_eq!(table.lookup(".webm"), "video/webm");
    assert_eq!(table.lookup(".ogg"), "video/ogg");
    assert_eq!(table.lookup(".mov"), "video/quicktime");
}

#[test]
fn test_lookup_is_case_insensitive_and_dot_optional() {
    let table = MimeTable::default();
    assert_eq!(table.lookup(".MOV"), "video/quicktime");
    assert_eq!(table.lookup("webm"), "video/webm");
}

#[test]
fn test_unknown_extension_falls_back_to_mp4() {
    let table = MimeTable::default();
    assert_eq!(table.lookup(".avi"), DEFAULT_VIDEO_MIME);
    assert_eq!(table.lookup(""), DEFAULT_VIDEO_MIME);
}

#[test]
fn test_custom_entries_and_fallback() {
    let mut table = MimeTable::empty("application/octet-stream");
    table.insert("MKV", "video/x-matroska");
    assert_eq!(table.lookup(".mkv"), "video/x-matroska");
    assert_eq!(table.lookup(".mp4"), "application/octet-stream");

    let table = MimeTable::default().with_fallback("video/webm");
    assert_eq!(table.lookup(".avi"), "video/webm");
    assert_eq!(table.fallback(), "video/webm");
}

#[test]
fn test_parse_entry() {
    assert_eq!(
        MimeTable::parse_entry("mkv=video/x-matroska"),
        Some((".mkv".to_string(), "video/x-matroska".to_string()))
    );
    assert_eq!(
        MimeTable::parse_entry(" .AVI = video/x-msvideo "),
        Some((".avi".to_string(), "video/x-msvideo".to_string()))
    );
    assert_eq!(MimeTable::parse_entry("mkv"), None);
    assert_eq!(MimeTable::parse_entry("=video/mp4"), None);
    assert_eq!(MimeTable::parse_entry("mkv="), None);
}

proptest! {
    #[test]
    fn prop_unlisted_extensions_use_fallback(ext in "[a-z0-9]{1,6}") {
        prop_assume!(!["mp4", "webm", "ogg", "mov"].contains(&ext.as_str()));
        let table = MimeTable::default();
        prop_assert_eq!(table.lookup(&ext), DEFAULT_VIDEO_MIME);
    }
}

#[test]
fn test_from_bytes_derives_extension_and_mime() {
    let table = MimeTable::default();
    let source = VideoSource::from_bytes("clips/Intro.WEBM", vec![1u8, 2, 3], &table);
    assert_eq!(source.extension(), ".webm");
    assert_eq!(source.mime_type(), "video/webm");
    assert_eq!(source.len(), 3);

    let source = VideoSource::from_bytes("noext", Vec::new(), &table);
    assert_eq!(source.extension(), "");
    assert_eq!(source.mime_type(), DEFAULT_VIDEO_MIME);
    assert!(source.is_empty());
}

#[tokio::test]
async fn test_load_reads_file() {
    let mut file = tempfile::Builder::new().suffix(".mov").tempfile().unwrap();
    file.write_all(b"not really a movie").unwrap();

    let source = VideoSource::load(file.path(), &MimeTable::default())
        .await
        .unwrap();
    assert_eq!(source.bytes().as_ref(), b"not really a movie");
    assert_eq!(source.mime_type(), "video/quicktime");
    assert_eq!(source.path(), file.path());
}

#[tokio::test]
async fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.mp4");

    match VideoSource::load(&missing, &MimeTable::default()).await {
        Err(ThumbnailerError::MissingInput(path)) => assert_eq!(path, missing),
        other => panic!("expected MissingInput, got {:?}", other),
    }
}

#[tokio::test]
async fn test_load_unreadable_parent_is_io_error() {
    let file = tempfile::NamedTempFile::new().unwrap();
    // A regular file used as a directory cannot be checked, it is not "missing".
    let below_file = file.path().join("clip.mp4");

    match VideoSource::load(&below_file, &MimeTable::default()).await {
        Err(ThumbnailerError::Other(_)) => {}
        other => panic!("expected I/O error, got {:?}", other),
    }
}
