// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn allot() -> Command {
    let mut cmd = Command::cargo_bin("allot").unwrap();
    cmd.env_remove("RUST_LOG").arg("--log-level").arg("warn");
    cmd
}

#[test]
fn test_reference_instance_report() {
    allot()
        .assert()
        .success()
        .stdout(predicate::str::contains("## CHOSEN OPTIONS"))
        .stdout(predicate::str::contains("R$ 2220000.00"))
        .stdout(predicate::str::contains("1101111010001"));
}

#[test]
fn test_parallel_run_prints_same_selection() {
    allot()
        .args(["--threads", "2", "--split-depth", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1101111010001"));
}

#[test]
fn test_infeasible_instance_file() {
    let path = std::env::temp_dir().join(format!("allot-infeasible-{}.allot", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "budget 10").unwrap();
    writeln!(file, "min high 1").unwrap();
    writeln!(file, "item 5 5 low Treasury bonds").unwrap();
    drop(file);

    allot()
        .arg("--input")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No feasible selection satisfies the constraints.",
        ));

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_missing_input_fails() {
    allot()
        .args(["--input", "/nonexistent/allot/instance.allot"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load instance"));
}
