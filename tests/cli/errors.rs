//! Usage, configuration and dispatch errors.

use crate::support::*;

#[test]
fn test_no_script_is_usage_error() {
    let t = Test::new();

    let output = t.launch(&[]);

    assert_failure(&output);
    assert_stderr_contains(&output, "no script given");
    assert_stderr_contains(&output, "usage: launcher <script>");
}

#[test]
fn test_missing_script_file() {
    let t = Test::new();

    let output = t.launch(&["scripts/nope.ts", "--network", "mainnet"]);

    assert_failure(&output);
    assert_stderr_contains(&output, "script not found: scripts/nope.ts");
}

#[test]
fn test_closed_stdin_is_not_a_wrong_password() {
    let t = Test::new();

    let output = t
        .cmd()
        .env("DEPLOYER_PRIVATE_KEY_ENCRYPTED", sealed_key())
        .args(["scripts/show_key.sh", "--network", "mainnet"])
        .write_stdin("")
        .output()
        .unwrap();

    assert_failure(&output);
    assert_stderr_contains(&output, "stdin is closed");
    assert!(!stderr(&output).contains("Wrong password"));
    assert_not_dispatched(&output);
}

#[test]
fn test_runtime_not_on_path() {
    let t = Test::with_config("[runtime]\nprogram = \"launcher-missing-runtime\"\n");

    let output = t.launch(&["scripts/show_key.sh"]);

    assert_failure(&output);
    assert_stderr_contains(&output, "runtime not found on PATH: launcher-missing-runtime");
}

#[test]
fn test_invalid_config() {
    let t = Test::with_config("[runtime\nprogram = ");

    let output = t.launch(&["scripts/show_key.sh"]);

    assert_failure(&output);
    assert_stderr_contains(&output, "invalid config");
    assert_not_dispatched(&output);
}

#[test]
fn test_credential_vars_must_differ() {
    let t = Test::with_config(
        "[credential]\nencrypted_var = \"SAME\"\nruntime_var = \"SAME\"\n",
    );

    let output = t.launch(&["scripts/show_key.sh"]);

    assert_failure(&output);
    assert_stderr_contains(&output, "must differ");
}

#[test]
fn test_explicit_config_must_exist() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["--config", "missing.toml", "scripts/show_key.sh"])
        .output()
        .unwrap();

    assert_failure(&output);
    assert_stderr_contains(&output, "config file not found");
}

#[test]
fn test_import_with_script_is_rejected() {
    let t = Test::new();

    let output = t.launch(&["--import", "scripts/show_key.sh"]);

    assert!(!output.status.success());
    assert_not_dispatched(&output);
}
