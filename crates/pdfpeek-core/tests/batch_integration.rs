//! Integration tests for [`run_batch`].
//!
//! Documents are written to a temp directory in the [`MockBackend`] format
//! so no real PDF parsing is involved.

use std::path::Path;

use pdfpeek_core::mock::MockBackend;
use pdfpeek_core::{BatchConfig, ERROR_PREFIX, ErrorKind, Outcome, run_batch};

fn write_doc(dir: &Path, name: &str, pages: &[&str]) {
    std::fs::write(dir.join(name), MockBackend::encode(pages)).unwrap();
}

fn six_names() -> Vec<String> {
    (1..=6).map(|i| format!("doc-{i}.pdf")).collect()
}

#[test]
fn missing_third_file_is_skipped_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let names = six_names();
    for (i, name) in names.iter().enumerate() {
        if i != 2 {
            write_doc(dir.path(), name, &[&format!("body of {name}")]);
        }
    }

    let config = BatchConfig {
        base_dir: dir.path().to_path_buf(),
        files: names.clone(),
        ..Default::default()
    };
    let backend = MockBackend::new();

    let mut seen = Vec::new();
    let summary = run_batch(&config, &backend, |report| {
        let tag = match &report.outcome {
            Outcome::Missing => "missing",
            Outcome::Extracted { .. } => "extracted",
            Outcome::Failed { .. } => "failed",
        };
        seen.push((report.file_name.clone(), tag));
    });

    let expected: Vec<_> = names
        .iter()
        .enumerate()
        .map(|(i, n)| (n.clone(), if i == 2 { "missing" } else { "extracted" }))
        .collect();
    assert_eq!(seen, expected);
    assert_eq!(summary.extracted, 5);
    assert_eq!(summary.missing, 1);
    assert_eq!(summary.failed, 0);
    // The extractor never ran for the missing file.
    assert_eq!(backend.open_count(), 5);
}

#[test]
fn corrupt_file_does_not_stop_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    write_doc(dir.path(), "one.pdf", &["page one", "page two"]);
    std::fs::write(dir.path().join("two.pdf"), b"%PDF-1.4 truncated").unwrap();
    write_doc(dir.path(), "three.pdf", &[]);

    let config = BatchConfig {
        base_dir: dir.path().to_path_buf(),
        files: vec!["one.pdf".into(), "two.pdf".into(), "three.pdf".into()],
        ..Default::default()
    };

    let mut reports = Vec::new();
    let summary = run_batch(&config, &MockBackend::new(), |report| {
        reports.push((
            report.file_name.clone(),
            report.display_text().map(|t| t.into_owned()),
            match &report.outcome {
                Outcome::Failed { error } => Some(error.kind()),
                _ => None,
            },
        ));
    });

    assert_eq!(summary.total(), 3);
    assert_eq!(summary.failed, 1);

    assert_eq!(reports[0].1.as_deref(), Some("page one\npage two\n"));
    assert_eq!(reports[1].2, Some(ErrorKind::Parse));
    assert!(reports[1].1.as_deref().unwrap().starts_with(ERROR_PREFIX));
    assert_eq!(reports[2].1.as_deref(), Some(""));
}

#[test]
fn missing_report_carries_exact_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = BatchConfig {
        base_dir: dir.path().to_path_buf(),
        files: vec!["ghost.pdf".into()],
        ..Default::default()
    };

    let mut paths = Vec::new();
    run_batch(&config, &MockBackend::new(), |report| {
        assert!(matches!(report.outcome, Outcome::Missing));
        assert!(report.display_text().is_none());
        paths.push(report.path.clone());
    });
    assert_eq!(paths, vec![dir.path().join("ghost.pdf")]);
}

#[test]
fn empty_file_list_reports_nothing() {
    let config = BatchConfig::default();
    let mut calls = 0;
    let summary = run_batch(&config, &MockBackend::new(), |_| calls += 1);
    assert_eq!(calls, 0);
    assert_eq!(summary.total(), 0);
}
