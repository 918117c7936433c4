// crates/sigverdict-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for policy validation tests.
// Purpose: Reduce duplication across integration tests for sigverdict-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::io::Write;

use sigverdict_config::ConfigError;
use sigverdict_config::PolicyConfig;
use sigverdict_core::ValidationPolicy;
use tempfile::NamedTempFile;

/// Result type shared by config tests.
pub type TestResult = Result<(), String>;

/// Parses and converts policy TOML.
pub fn policy_from_toml(content: &str) -> Result<ValidationPolicy, ConfigError> {
    PolicyConfig::from_toml_str(content)?.to_policy()
}

/// Writes `content` to a fresh temporary file.
pub fn write_policy(content: &[u8]) -> Result<NamedTempFile, String> {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(content).map_err(|err| err.to_string())?;
    Ok(file)
}

/// Succeeds when `result` is an error whose message contains `needle`.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid policy".to_string()),
    }
}
