//! Policy content validation tests for sigverdict-config.
// crates/sigverdict-config/tests/policy_validation.rs
// =============================================================================
// Module: Policy Content Validation Tests
// Description: Eager validation of levels, expectations, and crypto tables.
// Purpose: Ensure every policy entry is checked before validation runs.
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

use common::TestResult;
use common::assert_invalid;
use common::policy_from_toml;
use sigverdict_config::policy_toml_example;
use sigverdict_core::CheckKey;
use sigverdict_core::CryptographicRules;
use sigverdict_core::EncryptionAlgorithm;
use sigverdict_core::Level;
use sigverdict_core::ValidationModel;
use sigverdict_core::ValidationPolicy;
use time::Duration;

// ============================================================================
// SECTION: Example
// ============================================================================

#[test]
fn example_reproduces_default_policy() -> TestResult {
    let policy = policy_from_toml(&policy_toml_example()).map_err(|err| err.to_string())?;
    let defaults = ValidationPolicy::default();
    for key in CheckKey::ALL {
        if policy.level(key) != defaults.level(key) {
            return Err(format!("level of {key} differs from the default"));
        }
        if policy.expected(key) != defaults.expected(key) {
            return Err(format!("expected values of {key} differ from the default"));
        }
    }
    if policy.cryptographic != CryptographicRules::default() {
        return Err("cryptographic tables differ from the default".to_string());
    }
    if policy.revocation != defaults.revocation || policy.name != defaults.name || policy.model != defaults.model {
        return Err("policy header differs from the default".to_string());
    }
    Ok(())
}

// ============================================================================
// SECTION: Levels
// ============================================================================

#[test]
fn levels_override_defaults() -> TestResult {
    let policy = policy_from_toml("[levels]\nrevocation_data_available = \"warn\"\n")
        .map_err(|err| err.to_string())?;
    if policy.level(CheckKey::RevocationDataAvailable) != Level::Warn {
        return Err("override not applied".to_string());
    }
    if policy.level(CheckKey::CertificateNotRevoked) != Level::Fail {
        return Err("unrelated check changed".to_string());
    }
    Ok(())
}

#[test]
fn unknown_check_name_is_rejected() -> TestResult {
    assert_invalid(policy_from_toml("[levels]\nrevocation_magic = \"warn\"\n"), "unknown check revocation_magic")
}

#[test]
fn unknown_level_is_rejected() -> TestResult {
    assert_invalid(policy_from_toml("[levels]\nsignature_intact = \"maybe\"\n"), "unknown level maybe")
}

// ============================================================================
// SECTION: Policy Header
// ============================================================================

#[test]
fn chain_model_is_accepted() -> TestResult {
    let policy = policy_from_toml("[policy]\nname = \"strict\"\nmodel = \"chain\"\n").map_err(|err| err.to_string())?;
    if policy.model != ValidationModel::Chain || policy.name != "strict" {
        return Err("policy header not applied".to_string());
    }
    Ok(())
}

#[test]
fn unknown_model_is_rejected() -> TestResult {
    assert_invalid(policy_from_toml("[policy]\nmodel = \"hybrid\"\n"), "unknown model hybrid")
}

#[test]
fn blank_policy_name_is_rejected() -> TestResult {
    assert_invalid(policy_from_toml("[policy]\nname = \"  \"\n"), "policy.name must be non-empty")
}

// ============================================================================
// SECTION: Expectations
// ============================================================================

#[test]
fn unknown_key_usage_is_rejected() -> TestResult {
    assert_invalid(
        policy_from_toml("[key_usage]\nsigning_certificate = [\"time_stamping_magic\"]\n"),
        "unknown key usage",
    )
}

#[test]
fn empty_accepted_policies_are_rejected() -> TestResult {
    assert_invalid(
        policy_from_toml("[signature_policy]\naccepted = []\n"),
        "signature_policy.accepted must be non-empty",
    )
}

#[test]
fn accepted_policies_keep_the_configured_level() -> TestResult {
    let policy = policy_from_toml(
        "[levels]\nsignature_policy_accepted = \"warn\"\n\n[signature_policy]\naccepted = [\"1.2.3.4\"]\n",
    )
    .map_err(|err| err.to_string())?;
    if policy.level(CheckKey::SignaturePolicyAccepted) != Level::Warn {
        return Err("level lost when expectations were set".to_string());
    }
    let expected = policy.expected(CheckKey::SignaturePolicyAccepted).unwrap_or_default();
    if !expected.contains("1.2.3.4") || expected.len() != 1 {
        return Err("accepted identifiers not applied".to_string());
    }
    Ok(())
}

// ============================================================================
// SECTION: Revocation and Cryptography
// ============================================================================

#[test]
fn freshness_window_is_converted() -> TestResult {
    let policy = policy_from_toml("[revocation]\nmax_freshness_seconds = 3600\n").map_err(|err| err.to_string())?;
    if policy.revocation.max_freshness != Some(Duration::hours(1)) {
        return Err("freshness window not applied".to_string());
    }
    Ok(())
}

#[test]
fn zero_freshness_window_is_rejected() -> TestResult {
    assert_invalid(policy_from_toml("[revocation]\nmax_freshness_seconds = 0\n"), "greater than zero")
}

#[test]
fn encryption_table_replaces_the_default() -> TestResult {
    let policy = policy_from_toml("[[cryptographic.encryption]]\nalgorithm = \"rsa\"\nkey_size = 4096\n")
        .map_err(|err| err.to_string())?;
    let rules = &policy.cryptographic.encryption;
    if rules.len() != 1 || rules.first().map(|rule| (rule.algorithm, rule.min_key_size)) != Some((EncryptionAlgorithm::Rsa, 4096)) {
        return Err("encryption table not replaced".to_string());
    }
    if policy.cryptographic.digest != CryptographicRules::default().digest {
        return Err("digest table should keep its default".to_string());
    }
    Ok(())
}

#[test]
fn non_positive_key_size_is_rejected() -> TestResult {
    assert_invalid(
        policy_from_toml("[[cryptographic.encryption]]\nalgorithm = \"RSA\"\nkey_size = 0\n"),
        "key_size for RSA must be between",
    )
}

#[test]
fn duplicate_encryption_row_is_rejected() -> TestResult {
    assert_invalid(
        policy_from_toml(
            "[[cryptographic.encryption]]\nalgorithm = \"RSA\"\nkey_size = 2048\n\n[[cryptographic.encryption]]\nalgorithm = \"rsa\"\nkey_size = 2048\n",
        ),
        "duplicate row for RSA 2048",
    )
}

#[test]
fn unknown_digest_algorithm_is_rejected() -> TestResult {
    assert_invalid(
        policy_from_toml("[[cryptographic.digest]]\nalgorithm = \"WHIRLPOOL\"\n"),
        "unknown algorithm WHIRLPOOL",
    )
}

#[test]
fn invalid_expiry_is_rejected() -> TestResult {
    assert_invalid(
        policy_from_toml("[[cryptographic.digest]]\nalgorithm = \"SHA256\"\nexpires = \"next year\"\n"),
        "invalid expires",
    )
}
