//! End-to-end runs against local and remote networks.

use crate::support::*;

#[test]
fn test_local_network_runs_without_key() {
    let t = Test::new();

    let output = t.launch(&["scripts/show_key.sh", "--network", "localhost"]);

    assert_success(&output);
    assert_stdout_contains(&output, "ran with --network localhost");
    assert_stdout_contains(&output, "key=none");
}

#[test]
fn test_local_network_never_reads_passphrase_even_with_key_configured() {
    let t = Test::new();

    // No stdin line is provided: a prompt would fail or hang.
    let output = t
        .cmd()
        .env("DEPLOYER_PRIVATE_KEY_ENCRYPTED", sealed_key())
        .args(["scripts/show_key.sh", "--network", "hardhat"])
        .write_stdin("")
        .output()
        .unwrap();

    assert_success(&output);
    assert_stdout_contains(&output, "key=none");
}

#[test]
fn test_default_network_is_local() {
    let t = Test::new();

    let output = t.launch(&["scripts/show_key.sh"]);

    assert_success(&output);
    assert_stdout_contains(&output, "key=none");
}

#[test]
fn test_stale_runtime_key_is_not_inherited() {
    let t = Test::new();

    let output = t
        .cmd()
        .env("__RUNTIME_DEPLOYER_PRIVATE_KEY", "leftover")
        .args(["scripts/show_key.sh", "--network", "localhost"])
        .output()
        .unwrap();

    assert_success(&output);
    assert_stdout_contains(&output, "key=none");
}

#[test]
fn test_exit_code_passthrough() {
    let t = Test::new();
    let script = t.script("fail.sh", "exit 42\n");

    let output = t.launch(&[script.as_str(), "--network", "localhost"]);

    assert_code(&output, 42);
}

#[test]
fn test_signal_maps_to_failure() {
    let t = Test::new();
    let script = t.script("killed.sh", "kill -TERM $$\n");

    let output = t.launch(&[script.as_str()]);

    assert_code(&output, 128 + 15);
}

#[test]
fn test_forwarded_args_keep_order() {
    let t = Test::new();

    let output = t.launch(&[
        "scripts/show_key.sh",
        "--tags",
        "voting",
        "--network=localhost",
        "-v",
    ]);

    assert_success(&output);
    assert_stdout_contains(&output, "ran with --tags voting --network=localhost -v");
}

#[test]
fn test_remote_without_key_fails_before_dispatch() {
    let t = Test::new();

    let output = t.launch(&["scripts/show_key.sh", "--network", "mainnet"]);

    assert_failure(&output);
    assert_stderr_contains(&output, "no deployer account configured");
    assert_stderr_contains(&output, "launcher --import");
    assert_not_dispatched(&output);
}

#[test]
fn test_remote_with_correct_passphrase_gets_key() {
    let t = Test::new();

    let output = t.launch_with_key(&["scripts/show_key.sh", "--network", "mainnet"], PASSPHRASE);

    assert_success(&output);
    assert_stdout_contains(&output, "ran with --network mainnet");
    assert_stdout_contains(&output, &format!("key={}", PRIVATE_KEY));
}

#[test]
fn test_remote_with_json_keystore_gets_key() {
    let t = Test::new();
    t.env_file(&format!("DEPLOYER_PRIVATE_KEY_ENCRYPTED='{}'\n", JSON_KEYSTORE));

    let output = t
        .cmd()
        .args(["scripts/show_key.sh", "--network", "sepolia"])
        .write_stdin(format!("{}\n", JSON_KEYSTORE_PASSWORD))
        .output()
        .unwrap();

    assert_success(&output);
    assert_stdout_contains(&output, &format!("key={}", JSON_KEYSTORE_KEY));
}

#[test]
fn test_remote_exit_code_passthrough() {
    let t = Test::new();
    let script = t.script("remote_fail.sh", "exit 3\n");

    let output = t.launch_with_key(&[script.as_str(), "--network", "sepolia"], PASSPHRASE);

    assert_code(&output, 3);
}

#[test]
fn test_remote_with_wrong_passphrase_fails_before_dispatch() {
    let t = Test::new();

    let output = t.launch_with_key(&["scripts/show_key.sh", "--network", "mainnet"], "wrong");

    assert_failure(&output);
    assert_stderr_contains(&output, "failed to decrypt private key");
    assert_not_dispatched(&output);
}

#[test]
fn test_same_passphrase_same_key_across_runs() {
    let t = Test::new();
    let sealed = sealed_key();

    let run = || {
        t.cmd()
            .env("DEPLOYER_PRIVATE_KEY_ENCRYPTED", &sealed)
            .args(["scripts/show_key.sh", "--network", "mainnet"])
            .write_stdin(format!("{}\n", PASSPHRASE))
            .output()
            .unwrap()
    };

    let first = run();
    let second = run();
    assert_success(&first);
    assert_success(&second);
    assert_eq!(stdout(&first), stdout(&second));
}

#[test]
fn test_key_from_env_file() {
    let t = Test::new();
    t.env_file(&format!(
        "# deployer\nDEPLOYER_PRIVATE_KEY_ENCRYPTED={}\n",
        sealed_key()
    ));

    let output = t
        .cmd()
        .args(["scripts/show_key.sh", "--network", "sepolia"])
        .write_stdin(format!("{}\n", PASSPHRASE))
        .output()
        .unwrap();

    assert_success(&output);
    assert_stdout_contains(&output, &format!("key={}", PRIVATE_KEY));
}

#[test]
fn test_configured_default_network_requires_key() {
    let t = Test::with_config(&format!("{}\n[network]\ndefault = \"sepolia\"\n", TEST_CONFIG));

    let output = t.launch(&["scripts/show_key.sh"]);

    assert_failure(&output);
    assert_stderr_contains(&output, "no deployer account configured");
}

#[test]
fn test_default_network_env_override() {
    let t = Test::new();

    let output = t
        .cmd()
        .env("LAUNCHER_DEFAULT_NETWORK", "optimism")
        .args(["scripts/show_key.sh"])
        .write_stdin("")
        .output()
        .unwrap();

    assert_failure(&output);
    assert_not_dispatched(&output);
}

#[test]
fn test_custom_local_networks() {
    let t = Test::with_config(&format!("{}\n[network]\nlocal = [\"anvil\"]\n", TEST_CONFIG));

    let anvil = t.launch(&["scripts/show_key.sh", "--network", "anvil"]);
    assert_success(&anvil);

    let localhost = t.launch(&["scripts/show_key.sh", "--network", "localhost"]);
    assert_failure(&localhost);
}

#[test]
fn test_custom_runtime_var() {
    let t = Test::with_config(&format!(
        "{}runtime_var = \"PK\"\n",
        TEST_CONFIG
    ));
    let script = t.script("pk.sh", "echo \"pk=${PK:-none}\"\n");

    let output = t.launch_with_key(&[script.as_str(), "--network", "mainnet"], PASSPHRASE);

    assert_success(&output);
    assert_stdout_contains(&output, &format!("pk={}", PRIVATE_KEY));
}
