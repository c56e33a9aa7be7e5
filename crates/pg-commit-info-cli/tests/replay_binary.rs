//! Runs the built binary on small scripts.

use std::io::Write;
use std::process::{Command, Output, Stdio};

const SCRIPT: &str = r#"{"type":"begin","xid":100}
{"type":"change","xid":100,"relation":16384,"op":"insert"}
{"type":"change","xid":100,"relation":16384,"op":"insert"}
{"type":"change","xid":100,"relation":16384,"op":"delete"}
{"type":"commit","xid":100,"lsn":"1/40"}
{"type":"begin","xid":101}
{"type":"commit","xid":101,"lsn":"1/80"}
"#;

fn run(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_pg-commit-info"))
        .args(args)
        .env("RUST_LOG", "debug")
        .env_remove("PG_COMMIT_INFO_SERVER_VERSION")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn pg-commit-info");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_lines_on_stdout_logs_on_stderr() {
    let out = run(&["-o", "skip-empty-xacts=true"], SCRIPT);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(
        stdout,
        "xid 100: lsn:1/00000040 inserts:2 deletes:1 updates:0 truncates:0 relations truncated:0\n"
    );

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Transaction COMMIT"), "stderr: {stderr}");
    assert!(!stderr.contains("xid 100: lsn:"));
}

#[test]
fn test_old_server_omits_truncate_fields() {
    let out = run(&["--server-version", "100000"], SCRIPT);
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(
        stdout,
        "xid 100: lsn:1/00000040 inserts:2 deletes:1 updates:0\n\
         xid 101: lsn:1/00000080 inserts:0 deletes:0 updates:0\n"
    );
}

#[test]
fn test_unknown_option_fails() {
    let out = run(&["-o", "foo=bar"], SCRIPT);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("option \"foo\" = \"bar\" is unknown"));
}

#[test]
fn test_unterminated_transaction_fails() {
    let out = run(&[], "{\"type\":\"begin\",\"xid\":7}\n");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("stream ended inside the window of xid 7"));
}
