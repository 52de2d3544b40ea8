//! Tests for manifest parsing.

use std::io::Write;

use super::{parse_manifest, parse_manifest_reader, ManifestEntry, ManifestError};

fn parse(text: &str) -> Result<Vec<ManifestEntry>, ManifestError> {
    parse_manifest_reader(text.as_bytes())
}

fn assert_format_error(text: &str, want_line: usize, want_fields: usize) {
    match parse(text) {
        Err(ManifestError::Format { line, fields, .. }) => {
            assert_eq!(line, want_line, "line number for {:?}", text);
            assert_eq!(fields, want_fields, "field count for {:?}", text);
        }
        other => panic!("expected Format error for {:?}, got {:?}", text, other),
    }
}

#[test]
fn parses_entries_in_order() {
    let entries = parse(
        "a.txt md5 d41d8cd98f00b204e9800998ecf8427e\n\
         b.bin sha1 da39a3ee5e6b4b0d3255bfef95601890afd80709\n\
         c.iso sha256 e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855\n",
    )
    .unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(
        entries[0],
        ManifestEntry {
            line: 1,
            file_name: "a.txt".to_string(),
            algorithm: "md5".to_string(),
            expected_digest: "d41d8cd98f00b204e9800998ecf8427e".to_string(),
        }
    );
    let names: Vec<&str> = entries.iter().map(|e| e.file_name.as_str()).collect();
    assert_eq!(names, ["a.txt", "b.bin", "c.iso"]);
}

#[test]
fn blank_lines_are_skipped() {
    let entries = parse("\na md5 x\n\n   \nb sha1 y\n\n").unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].line, 2);
    assert_eq!(entries[1].line, 5);
}

#[test]
fn repeated_spaces_collapse() {
    let entries = parse("   archive.tar.gz    sha256  abc123\r\n").unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].file_name, "archive.tar.gz");
    assert_eq!(entries[0].algorithm, "sha256");
    assert_eq!(entries[0].expected_digest, "abc123");
}

#[test]
fn quoted_file_name_may_contain_spaces() {
    let entries = parse("\"my file.txt\" md5 d41d8cd98f00b204e9800998ecf8427e\n").unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].file_name, "my file.txt");
    assert_eq!(entries[0].algorithm, "md5");
}

#[test]
fn empty_quoted_field_fails() {
    match parse("a.txt \"\" d41d8cd98f00b204e9800998ecf8427e\n") {
        Err(ManifestError::EmptyField { line, content }) => {
            assert_eq!(line, 1);
            assert_eq!(content, "a.txt \"\" d41d8cd98f00b204e9800998ecf8427e");
        }
        other => panic!("expected EmptyField error, got {:?}", other),
    }
    assert!(matches!(
        parse("ok.txt md5 abc\n\"\" md5 abc\n"),
        Err(ManifestError::EmptyField { line: 2, .. })
    ));
}

#[test]
fn trailing_space_is_an_empty_fourth_field() {
    assert_format_error("a.txt md5 abc \n", 1, 4);
}

#[test]
fn unterminated_quote_fails() {
    assert!(matches!(
        parse("\"a.txt md5 abc\n"),
        Err(ManifestError::UnterminatedQuote { line: 1, .. })
    ));
}

#[test]
fn empty_manifest_has_no_entries() {
    assert!(parse("").unwrap().is_empty());
    assert!(parse("\n\n").unwrap().is_empty());
}

#[test]
fn wrong_field_counts_fail() {
    assert_format_error("lonely.txt\n", 1, 1);
    assert_format_error("a.txt md5\n", 1, 2);
    assert_format_error("a.txt md5 abc extra\n", 1, 4);
}

#[test]
fn one_bad_line_fails_whole_manifest() {
    assert_format_error("good.txt md5 abc\n\nbad.txt sha1\ngood2.txt md5 def\n", 3, 2);
}

#[test]
fn algorithm_and_digest_are_not_validated() {
    let entries = parse("a.txt crc32 NOT-HEX\n").unwrap();
    assert_eq!(entries[0].algorithm, "crc32");
    assert_eq!(entries[0].expected_digest, "NOT-HEX");
}

#[test]
fn format_error_names_offending_line() {
    let err = parse("x y\n").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("line 1"), "{}", msg);
    assert!(msg.contains("`x y`"), "{}", msg);
}

#[test]
fn parse_manifest_reads_file() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(b"a.txt md5 d41d8cd98f00b204e9800998ecf8427e\n").unwrap();
    f.flush().unwrap();
    let entries = parse_manifest(f.path()).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].file_name, "a.txt");
}

#[test]
fn parse_manifest_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.manifest");
    match parse_manifest(&path) {
        Err(ManifestError::Io { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected Io error, got {:?}", other),
    }
}
