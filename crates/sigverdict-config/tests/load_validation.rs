//! Policy load validation tests for sigverdict-config.
// crates/sigverdict-config/tests/load_validation.rs
// =============================================================================
// Module: Policy Load Validation Tests
// Description: Validate policy loading guards (path, size, encoding).
// Purpose: Ensure policy input handling is strict and fail-closed.
// =============================================================================

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use std::path::Path;

use common::TestResult;
use common::assert_invalid;
use common::write_policy;
use sigverdict_config::MAX_POLICY_FILE_SIZE;
use sigverdict_config::PolicyConfig;
use sigverdict_config::load_policy;
use sigverdict_core::DEFAULT_POLICY_NAME;

#[test]
fn load_rejects_path_too_long() -> TestResult {
    let long_path = "a".repeat(5_000);
    assert_invalid(PolicyConfig::load(Some(Path::new(&long_path))), "policy path exceeds max length")
}

#[test]
fn load_rejects_path_component_too_long() -> TestResult {
    let long_component = "a".repeat(300);
    assert_invalid(PolicyConfig::load(Some(Path::new(&long_component))), "policy path component too long")
}

#[test]
fn load_rejects_missing_file() -> TestResult {
    assert_invalid(PolicyConfig::load(Some(Path::new("does-not-exist/policy.toml"))), "policy io error")
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let file = write_policy(&vec![b'#'; MAX_POLICY_FILE_SIZE + 1])?;
    assert_invalid(PolicyConfig::load(Some(file.path())), "policy file exceeds size limit")
}

#[test]
fn load_rejects_non_utf8_file() -> TestResult {
    let file = write_policy(&[0xFF, 0xFE, 0xFF])?;
    assert_invalid(PolicyConfig::load(Some(file.path())), "policy file must be utf-8")
}

#[test]
fn load_rejects_malformed_toml() -> TestResult {
    let file = write_policy(b"[policy\nname = ")?;
    assert_invalid(PolicyConfig::load(Some(file.path())), "policy parse error")
}

#[test]
fn load_rejects_unknown_table() -> TestResult {
    let file = write_policy(b"[server]\nbind = \"127.0.0.1:80\"\n")?;
    assert_invalid(PolicyConfig::load(Some(file.path())), "policy parse error")
}

#[test]
fn load_accepts_empty_file_as_default_policy() -> TestResult {
    let file = write_policy(b"")?;
    let policy = load_policy(Some(file.path())).map_err(|err| err.to_string())?;
    if policy.name != DEFAULT_POLICY_NAME {
        return Err(format!("unexpected policy name {}", policy.name));
    }
    if !policy.constraints.is_empty() {
        return Err("empty file should carry no overrides".to_string());
    }
    Ok(())
}
