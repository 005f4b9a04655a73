//! CLI integration tests for slbc
//!
//! Tests the binary as a user would interact with it.

use assert_cmd::Command;
use predicates::prelude::*;

fn slbc() -> Command {
    Command::cargo_bin("slbc").expect("binary exists")
}

// ============================================================================
// Basic commands
// ============================================================================

#[test]
fn test_help() {
    slbc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sanskrit Linguistic Binary Codec"));
}

#[test]
fn test_version() {
    slbc()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("slbc"));
}

// ============================================================================
// Encode / decode round-trips
// ============================================================================

#[test]
fn test_encode_hex_starts_with_magic() {
    slbc()
        .args(["encode", "ka", "--hex"])
        .assert()
        .success()
        .stdout(predicate::str::contains("53 4C 42 43")); // "SLBC"
}

#[test]
fn test_encode_decode_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gita.slbc");

    slbc()
        .args(["encode", "dharmakṣetre kurukṣetre"])
        .arg("--output")
        .arg(&path)
        .assert()
        .success();

    slbc()
        .arg("decode")
        .arg("--input")
        .arg(&path)
        .args(["--to", "iast"])
        .assert()
        .success()
        .stdout("dharmakṣetre kurukṣetre\n");
}

#[test]
fn test_decode_to_devanagari() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ka.slbc");

    slbc()
        .args(["encode", "ka"])
        .arg("--output")
        .arg(&path)
        .assert()
        .success();

    slbc()
        .arg("decode")
        .arg("--input")
        .arg(&path)
        .args(["--to", "devanagari"])
        .assert()
        .success()
        .stdout("क\n");
}

#[test]
fn test_roundtrip_command() {
    slbc()
        .args(["roundtrip", "satyam eva jayate"])
        .assert()
        .success()
        .stderr(predicate::str::contains("round-trip ok"));
}

#[test]
fn test_encode_reads_stdin() {
    slbc()
        .args(["encode", "--hex"])
        .write_stdin("ka")
        .assert()
        .success()
        .stdout(predicate::str::contains("53 4C 42 43"));
}

// ============================================================================
// Inspect / transform
// ============================================================================

#[test]
fn test_inspect_byte() {
    slbc()
        .args(["inspect", "--byte", "0x1B"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dh"));
}

#[test]
fn test_inspect_hex_stream() {
    slbc()
        .args(["inspect", "--from-hex", "26 00 40 2E"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PADA_START"))
        .stdout(predicate::str::contains("PADA_END"));
}

#[test]
fn test_transform_guna() {
    slbc()
        .args(["transform", "--op", "guna", "0x44"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0x85"));
}

#[test]
fn test_transform_savarna_dirgha() {
    slbc()
        .args(["transform", "--op", "savarna-dirgha", "0x40", "0x80"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0x80"));
}

// ============================================================================
// Extraction
// ============================================================================

#[test]
fn test_extract_bhasha_only() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("num.slbc");
    let output = dir.path().join("num-bhasha.slbc");

    slbc()
        .args(["encode", "śatam 108"])
        .arg("--output")
        .arg(&input)
        .assert()
        .success();

    slbc()
        .arg("extract")
        .arg("--input")
        .arg(&input)
        .args(["--mode", "bhasha-only"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    // the bhāṣā-canonical file still carries the number
    slbc()
        .arg("decode")
        .arg("--input")
        .arg(&output)
        .args(["--to", "iast"])
        .assert()
        .success()
        .stdout(predicate::str::contains("108"));
}

// ============================================================================
// Registry tooling
// ============================================================================

#[test]
fn test_registry_stats_builtin() {
    slbc()
        .args(["registry", "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dhatu"))
        .stdout(predicate::str::contains("sandhi"));
}

#[test]
fn test_registry_lookup_builtin() {
    slbc()
        .args(["registry", "lookup", "dhatu", "bhū"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gaṇa 1"));
}

#[test]
fn test_registry_compile_and_inspect() {
    let dir = tempfile::tempdir().unwrap();
    let tsv = dir.path().join("extra.tsv");
    let out = dir.path().join("extra.sldr");
    std::fs::write(&tsv, "2001\tnand\t1\tP\tak\t0x00\tset\n").unwrap();

    slbc()
        .args(["registry", "compile", "dhatu"])
        .arg(&tsv)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    slbc()
        .args(["registry", "inspect"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("nand"));
}

// ============================================================================
// Annotation
// ============================================================================

#[test]
fn test_annotate_then_extract_vyakhya() {
    let dir = tempfile::tempdir().unwrap();
    let plain = dir.path().join("plain.slbc");
    let annotated = dir.path().join("annotated.slbc");

    slbc()
        .args(["encode", "gacchati"])
        .arg("--output")
        .arg(&plain)
        .assert()
        .success();

    let json = dir.path().join("vya.json");
    std::fs::write(&json, r#"[{"pada": 0, "registry": "dhatu", "id": 2}]"#).unwrap();

    slbc()
        .arg("annotate")
        .arg("--input")
        .arg(&plain)
        .args(["--add", "vya"])
        .arg("--from")
        .arg(&json)
        .arg("--output")
        .arg(&annotated)
        .assert()
        .success();

    // pāṭha extraction strips the envelope again; text survives
    let patha = dir.path().join("patha.slbc");
    slbc()
        .arg("extract")
        .arg("--input")
        .arg(&annotated)
        .args(["--mode", "patha"])
        .arg("--output")
        .arg(&patha)
        .assert()
        .success();

    slbc()
        .arg("decode")
        .arg("--input")
        .arg(&patha)
        .assert()
        .success()
        .stdout("gacchati\n");
}

#[test]
fn test_annotate_unresolvable_id_fails() {
    let dir = tempfile::tempdir().unwrap();
    let plain = dir.path().join("plain.slbc");
    slbc()
        .args(["encode", "gacchati"])
        .arg("--output")
        .arg(&plain)
        .assert()
        .success();

    let json = dir.path().join("vya.json");
    std::fs::write(&json, r#"[{"pada": 0, "registry": "dhatu", "id": 1999}]"#).unwrap();

    slbc()
        .arg("annotate")
        .arg("--input")
        .arg(&plain)
        .args(["--add", "vya"])
        .arg("--from")
        .arg(&json)
        .assert()
        .failure()
        .code(2);
}

// ============================================================================
// Exit codes
// ============================================================================

#[test]
fn test_unknown_iast_is_user_error() {
    slbc().args(["encode", "qa"]).assert().failure().code(1);
}

#[test]
fn test_bad_transform_op_is_user_error() {
    slbc()
        .args(["transform", "--op", "frobnicate", "0x44"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_transform_domain_error_is_user_error() {
    // jaśtva on a sibilant
    slbc()
        .args(["transform", "--op", "jastva", "0x29"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_bad_magic_is_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("not.slbc");
    std::fs::write(&path, b"not an slbc file at all").unwrap();

    slbc()
        .arg("decode")
        .arg("--input")
        .arg(&path)
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_missing_file_is_io_error() {
    slbc()
        .arg("decode")
        .arg("--input")
        .arg("/no/such/file.slbc")
        .assert()
        .failure()
        .code(3);
}

#[test]
fn test_missing_eof_is_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cut.slbc");

    let full = dir.path().join("full.slbc");
    slbc()
        .args(["encode", "ka"])
        .arg("--output")
        .arg(&full)
        .assert()
        .success();
    let data = std::fs::read(&full).unwrap();
    // chop off the EOF chunk
    std::fs::write(&path, &data[..data.len() - 2]).unwrap();

    slbc()
        .arg("decode")
        .arg("--input")
        .arg(&path)
        .assert()
        .failure()
        .code(2);
}
