use std::process::{Command, Output};

fn rangeprobe(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rangeprobe"))
        .args(args)
        .output()
        .expect("Failed to execute rangeprobe")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[cfg(unix)]
#[test]
fn test_cli_finds_matching_code() {
    let output = rangeprobe(&[
        "--start", "0", "--end", "40", "-w", "4", "-j", "3", "-q", "--no-direct",
        "-m", "OKAY", "--",
        "sh", "-c", "if [ \"$1\" = 0017 ]; then echo OKAY; else echo FAILED; fi", "sh", "{code}",
    ]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let out = stdout(&output);
    assert!(out.contains("Match found: 0017"), "stdout: {}", out);
}

#[cfg(unix)]
#[test]
fn test_cli_exhausted_exits_zero() {
    let output = rangeprobe(&[
        "--end", "9", "-w", "1", "-j", "2", "-q", "--no-direct", "--", "sh", "-c", "exit 1",
    ]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("No matching candidate in range"), "stdout: {}", out);
    assert!(out.contains("Total attempts: 10"), "stdout: {}", out);
}

#[cfg(unix)]
#[test]
fn test_cli_direct_probe_success() {
    let output = rangeprobe(&[
        "--end", "99", "-w", "2", "-q", "-m", "unlocked", "--",
        "sh", "-c", "echo device unlocked", "sh",
    ]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Direct probe succeeded"));
}

#[test]
fn test_cli_rejects_inverted_range() {
    let output = rangeprobe(&["--start", "10", "--end", "5", "--", "true"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid search space"), "stderr: {}", stderr);
}

#[test]
fn test_cli_rejects_zero_workers() {
    let output = rangeprobe(&["--end", "5", "-j", "0", "-q", "--no-direct", "--", "true"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid worker count"), "stderr: {}", stderr);
}

#[cfg(unix)]
#[test]
fn test_cli_reports_workers_actually_started() {
    let output = rangeprobe(&[
        "--end", "2", "-w", "1", "-j", "8", "-q", "--no-direct", "--", "sh", "-c", "exit 1",
    ]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("(3 candidates) with 3 workers"), "stdout: {}", out);
    assert!(out.contains("Workers: 3"), "stdout: {}", out);
}
