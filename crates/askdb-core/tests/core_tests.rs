use std::fs;
use tempfile::TempDir;

use askdb_core::corpus::{seed_records, JsonDirSource, StaticCorpus};
use askdb_core::traits::CorpusSource;

#[test]
fn json_dir_source_loads_batches_in_path_order() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(
        dir.join("b.json"),
        r#"[{"id": "2", "question": "second", "answer": "two", "tags": ""}]"#,
    )
    .unwrap();
    fs::write(
        dir.join("a.json"),
        r#"[{"id": "1", "question": "first", "answer": "one", "tags": "x"}]"#,
    )
    .unwrap();

    let source = JsonDirSource::new(dir);
    let records = source.fetch_all().expect("fetch");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "1", "a.json sorts before b.json");
    assert_eq!(records[1].id, "2");
}

#[test]
fn json_dir_source_empty_dir_yields_empty_snapshot() {
    let tmp = TempDir::new().unwrap();

    let source = JsonDirSource::new(tmp.path());
    let records = source.fetch_all().expect("fetch");

    assert!(records.is_empty());
}

#[test]
fn json_dir_source_missing_dir_yields_empty_snapshot() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nowhere");

    let source = JsonDirSource::new(missing);
    let records = source.fetch_all().expect("fetch");

    assert!(records.is_empty(), "a missing directory is an empty corpus, not an error");
}

#[test]
fn json_dir_source_rejects_malformed_batch() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("bad.json"), "{ not json ]").unwrap();

    let source = JsonDirSource::new(tmp.path());
    assert!(source.fetch_all().is_err());
}

#[test]
fn records_tolerate_missing_fields() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("sparse.json"), r#"[{"id": "7"}]"#).unwrap();

    let source = JsonDirSource::new(tmp.path());
    let records = source.fetch_all().expect("fetch");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "7");
    assert_eq!(records[0].question, "", "absent fields default to empty");
    assert_eq!(records[0].answer, "");
    assert_eq!(records[0].tags, "");
}

#[test]
fn static_corpus_returns_given_snapshot() {
    let source = StaticCorpus::new(seed_records());
    let records = source.fetch_all().expect("fetch");

    assert_eq!(records.len(), 10);
    assert_eq!(records[0].id, "1");
    assert_eq!(records[0].question, "¿Cuáles son los horarios de atención?");
    assert_eq!(records[0].answer, "Lun–Vie 8:00–17:00.");
    assert_eq!(records[0].tags, "soporte,horario");
}
