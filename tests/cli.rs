//! End-to-end tests for the `motifscan` binary against local record files.

use assert_cmd::Command;
use predicates::prelude::*;

fn data(name: &str) -> String {
    format!("{}/tests/data/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn motifscan() -> Command {
    let mut cmd = Command::cargo_bin("motifscan").unwrap();
    cmd.env_remove("MOTIFSCAN_BASE_URL").env_remove("MOTIFSCAN_TIMEOUT_SECS").env_remove("RUST_LOG");
    cmd
}

#[test]
fn check_accepts_shape_a() {
    motifscan()
        .args(["check", "P12345"])
        .assert()
        .success()
        .stdout(predicate::str::contains("P12345: valid (shape A)"));
}

#[test]
fn check_rejects_numeric_input() {
    motifscan()
        .args(["check", "123456"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("invalid"));
}

#[test]
fn scan_flat_file_prints_listing_and_description() {
    motifscan()
        .args(["scan", "Q00001", "--flat-file", &data("entries.dat")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Sequence    Start   End\n"))
        .stdout(predicate::str::contains("KVLTYF         2       8\n"))
        .stdout(predicate::str::contains("RecName: Full=Motif test protein 1; AltName: Full=Short fixture;"));
}

#[test]
fn scan_by_secondary_accession() {
    motifscan()
        .args(["scan", "Q00003", "--flat-file", &data("entries.dat")])
        .assert()
        .success()
        .stdout(predicate::str::contains("KVLTYF"));
}

#[test]
fn repeated_motif_collapses_to_latest_position() {
    let out = motifscan()
        .args(["scan", "A0A022YWF9", "--flat-file", &data("entries.dat"), "--format", "csv"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().collect::<Vec<_>>(), vec!["sequence,start,end", "AALLFF,10,16", "ALLFFG,2,8"]);
}

#[test]
fn no_matches_prints_header_and_description_only() {
    motifscan()
        .args(["scan", "Q9Y6K9", "--flat-file", &data("entries.dat")])
        .assert()
        .success()
        .stdout("Sequence    Start   End\nRecName: Full=Proline rich fixture;\n");
}

#[test]
fn invalid_accession_is_rejected_before_any_lookup() {
    // The store path does not exist; a lookup attempt would fail with status 1.
    motifscan()
        .args(["scan", "123456", "--flat-file", "/no/such/records.dat"])
        .assert()
        .code(2)
        .stdout(predicate::str::starts_with("Not a valid protein number"));
}

#[test]
fn unknown_accession_is_a_lookup_failure() {
    motifscan()
        .args(["scan", "P99999", "--flat-file", &data("entries.dat")])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no record found for accession P99999"));
}

#[test]
fn scan_fasta_store_as_json() {
    let out = motifscan()
        .args(["scan", "Q00001", "--fasta", &data("entries.fasta"), "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["accession"], "Q00001");
    assert_eq!(v["description"], "Motif test protein 1 OS=Homo sapiens OX=9606");
    assert_eq!(v["matches"], serde_json::json!([{ "subsequence": "KVLTYF", "start": 2, "end": 8 }]));
}

#[test]
fn local_sources_are_mutually_exclusive() {
    motifscan()
        .args(["scan", "Q00001", "--flat-file", &data("entries.dat"), "--fasta", &data("entries.fasta")])
        .assert()
        .failure();
}

#[test]
fn raw_sequence_reports_overlapping_windows() {
    motifscan()
        .args(["sequence", "AAAAAAAALLFFA"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AALLFF         7      13"))
        .stdout(predicate::str::contains("ALLFFA         8      14"));
}

#[test]
fn interactive_recovers_from_bad_input_and_failed_lookups() {
    motifscan()
        .args(["interactive", "--flat-file", &data("entries.dat")])
        .write_stdin("123456\nP99999\nQ00001\nquit\nA0A022YWF9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not a valid protein number"))
        .stdout(predicate::str::contains("KVLTYF"))
        // Input after `quit` is never scanned.
        .stdout(predicate::str::contains("AALLFF").not())
        .stderr(predicate::str::contains("P99999"));
}

#[test]
fn motif_lists_six_positions() {
    motifscan()
        .arg("motif")
        .assert()
        .success()
        .stdout("1\t[^P]\n2\t[^PKRHW]\n3\t[VLSWFNQ]\n4\t[ILTYWFN]\n5\t[FIY]\n6\t[^PKRH]\n");
}

#[test]
fn malformed_timeout_in_environment_fails_lookups() {
    motifscan()
        .env("MOTIFSCAN_TIMEOUT_SECS", "soon")
        .args(["scan", "Q00001", "--flat-file", &data("entries.dat")])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("MOTIFSCAN_TIMEOUT_SECS"));
}

#[test]
fn timeout_flag_overrides_environment() {
    motifscan()
        .env("MOTIFSCAN_TIMEOUT_SECS", "7")
        .args(["--timeout", "0", "scan", "Q00001", "--flat-file", &data("entries.dat")])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid --timeout"));
}

#[test]
fn commands_without_lookups_ignore_the_environment() {
    motifscan()
        .env("MOTIFSCAN_TIMEOUT_SECS", "soon")
        .args(["check", "P12345"])
        .assert()
        .success();
}

#[test]
fn raw_sequence_json_has_no_accession() {
    let out = motifscan()
        .args(["sequence", "MKVLTYFIYKRP", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert!(v.get("accession").is_none());
    assert_eq!(v["matches"], serde_json::json!([{ "subsequence": "KVLTYF", "start": 2, "end": 8 }]));
}

#[test]
fn quiet_silences_rust_log() {
    motifscan()
        .env("RUST_LOG", "debug")
        .args(["--quiet", "scan", "Q00001", "--flat-file", &data("entries.dat")])
        .assert()
        .success()
        .stdout(predicate::str::contains("KVLTYF"))
        .stderr(predicate::str::is_empty());
}
