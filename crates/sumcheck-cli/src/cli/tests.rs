use super::*;
use std::fs;
use sumcheck_core::verify::{VerificationResult, VerifyStatus};

fn parse(args: &[&str]) -> Cli {
    parse_from(args.iter().copied()).unwrap()
}

fn parse_err(args: &[&str]) -> UsageError {
    match parse_from(args.iter().copied()) {
        Ok(cli) => panic!("expected usage error, parsed {:?}", cli),
        Err(e) => e,
    }
}

#[test]
fn cli_parse_two_positionals() {
    let cli = parse(&["sumcheck", "checksums.txt", "/srv/files"]);
    assert_eq!(cli.manifest, PathBuf::from("checksums.txt"));
    assert_eq!(cli.source_folder, PathBuf::from("/srv/files"));
}

#[test]
fn cli_parse_too_few_arguments() {
    match parse_err(&["sumcheck", "checksums.txt"]) {
        UsageError::ArgumentCount { given } => assert_eq!(given, 1),
        other => panic!("expected ArgumentCount, got {:?}", other),
    }
    match parse_err(&["sumcheck"]) {
        UsageError::ArgumentCount { given } => assert_eq!(given, 0),
        other => panic!("expected ArgumentCount, got {:?}", other),
    }
}

#[test]
fn cli_parse_too_many_arguments() {
    let err = parse_err(&["sumcheck", "a", "b", "c"]);
    assert_eq!(
        err.to_string(),
        "Unexpected count of input parameters: expected 2, got 3"
    );
}

#[test]
fn cli_parse_help_is_passed_through() {
    assert!(matches!(
        parse_err(&["sumcheck", "--help"]),
        UsageError::Clap(_)
    ));
}

#[test]
fn cli_parse_unknown_flag_is_passed_through() {
    match parse_err(&["sumcheck", "--verbose", "m"]) {
        UsageError::Clap(err) => assert_eq!(err.kind(), ErrorKind::UnknownArgument),
        other => panic!("expected clap error, got {:?}", other),
    }
    assert!(matches!(
        parse_err(&["sumcheck", "a", "b", "-x"]),
        UsageError::Clap(_)
    ));
}

#[test]
fn cli_parse_dash_counts_as_positional() {
    let cli = parse(&["sumcheck", "-", "dir"]);
    assert_eq!(cli.manifest, PathBuf::from("-"));
}

#[test]
fn usage_mentions_positionals() {
    let usage = Cli::usage();
    assert!(usage.contains("MANIFEST"), "{}", usage);
    assert!(usage.contains("SOURCE_FOLDER"), "{}", usage);
}

#[test]
fn run_verify_reports_entries() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("src");
    fs::create_dir(&source).unwrap();
    fs::write(source.join("a.txt"), b"").unwrap();
    let manifest = dir.path().join("checksums.txt");
    fs::write(
        &manifest,
        "a.txt md5 d41d8cd98f00b204e9800998ecf8427e\nb.txt md5 d41d8cd98f00b204e9800998ecf8427e\n",
    )
    .unwrap();

    let mut results: Vec<VerificationResult> = Vec::new();
    let summary = run_verify(&manifest, &source, &SumcheckConfig::default(), &mut results).unwrap();
    assert_eq!(summary.ok, 1);
    assert_eq!(summary.not_found, 1);
    results.sort_by_key(|r| r.line);
    assert_eq!(results[0].status, VerifyStatus::Ok);
    assert_eq!(results[1].status, VerifyStatus::NotFound);
}

#[test]
fn run_verify_bad_manifest_reports_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("checksums.txt");
    fs::write(&manifest, "a.txt md5\n").unwrap();

    let mut results: Vec<VerificationResult> = Vec::new();
    let err = run_verify(&manifest, dir.path(), &SumcheckConfig::default(), &mut results)
        .unwrap_err();
    assert!(format!("{:#}", err).contains("invalid manifest line 1"));
    assert!(results.is_empty());
}
