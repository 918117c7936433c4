// crates/sigverdict-config/src/config.rs
// ============================================================================
// Module: SigVerdict Policy Configuration
// Description: Policy file loading and validation for SigVerdict.
// Purpose: Provide strict, fail-closed policy parsing with hard limits.
// Dependencies: sigverdict-core, serde, time, toml
// ============================================================================

//! ## Overview
//! A validation policy is loaded from a TOML file with strict size and path
//! limits. Every entry is checked eagerly: unknown check names, levels,
//! algorithms, or key usages reject the whole file rather than falling back
//! to a default. An empty file yields the built-in default policy.
//!
//! Security posture: policy files are untrusted input.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use sigverdict_core::CheckKey;
use sigverdict_core::Constraint;
use sigverdict_core::CryptographicRules;
use sigverdict_core::DEFAULT_POLICY_NAME;
use sigverdict_core::DigestAlgorithm;
use sigverdict_core::DigestRule;
use sigverdict_core::EncryptionAlgorithm;
use sigverdict_core::EncryptionRule;
use sigverdict_core::KeyUsage;
use sigverdict_core::Level;
use sigverdict_core::RevocationRules;
use sigverdict_core::SignaturePolicyRules;
use sigverdict_core::ValidationModel;
use sigverdict_core::ValidationPolicy;
use thiserror::Error;
use time::Duration;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default policy filename when no path is specified.
pub const DEFAULT_POLICY_FILE: &str = "sigverdict-policy.toml";
/// Environment variable used to override the policy path.
pub const POLICY_ENV_VAR: &str = "SIGVERDICT_POLICY";
/// Maximum policy file size in bytes.
pub const MAX_POLICY_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum policy name length.
pub(crate) const MAX_POLICY_NAME_LENGTH: usize = 256;
/// Maximum number of accepted values in one list.
pub(crate) const MAX_ACCEPTED_VALUES: usize = 128;
/// Maximum number of cryptographic rules per table.
pub(crate) const MAX_CRYPTO_RULES: usize = 256;
/// Largest accepted key size in bits.
pub(crate) const MAX_KEY_SIZE: u32 = 65_536;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// SigVerdict policy file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    /// Policy identity and validation model.
    #[serde(default)]
    pub policy: PolicySection,
    /// Check name to level overrides.
    #[serde(default)]
    pub levels: BTreeMap<String, String>,
    /// Key usage expectations.
    #[serde(default)]
    pub key_usage: KeyUsageSection,
    /// Signature policy acceptance.
    #[serde(default)]
    pub signature_policy: SignaturePolicySection,
    /// Signature format acceptance.
    #[serde(default)]
    pub signature_format: SignatureFormatSection,
    /// Revocation data handling.
    #[serde(default)]
    pub revocation: RevocationSection,
    /// Cryptographic acceptance tables.
    #[serde(default)]
    pub cryptographic: CryptographicSection,
}

/// `[policy]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicySection {
    /// Policy name echoed in reports.
    #[serde(default)]
    pub name: Option<String>,
    /// Validation model label (`shell` or `chain`).
    #[serde(default)]
    pub model: Option<String>,
}

/// `[key_usage]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyUsageSection {
    /// Key usages accepted on a signing certificate.
    #[serde(default)]
    pub signing_certificate: Option<Vec<String>>,
}

/// `[signature_policy]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignaturePolicySection {
    /// Accepted policy identifiers or markers.
    #[serde(default)]
    pub accepted: Option<Vec<String>>,
    /// Whether a signature must declare a policy.
    #[serde(default)]
    pub required: bool,
}

/// `[signature_format]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignatureFormatSection {
    /// Accepted format labels.
    #[serde(default)]
    pub accepted: Option<Vec<String>>,
}

/// `[revocation]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RevocationSection {
    /// Maximum accepted age of revocation data, in seconds.
    #[serde(default)]
    pub max_freshness_seconds: Option<i64>,
    /// Whether certificates flagged `ocsp_no_check` skip revocation checks.
    #[serde(default = "default_skip_ocsp_no_check")]
    pub skip_ocsp_no_check: bool,
}

impl Default for RevocationSection {
    fn default() -> Self {
        Self {
            max_freshness_seconds: None,
            skip_ocsp_no_check: default_skip_ocsp_no_check(),
        }
    }
}

/// `[cryptographic]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CryptographicSection {
    /// Digest rules; replaces the built-in table when present.
    #[serde(default)]
    pub digest: Option<Vec<DigestRuleConfig>>,
    /// Encryption rules; replaces the built-in table when present.
    #[serde(default)]
    pub encryption: Option<Vec<EncryptionRuleConfig>>,
}

/// `[[cryptographic.digest]]` row.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DigestRuleConfig {
    /// Algorithm name.
    pub algorithm: String,
    /// RFC 3339 expiration date.
    #[serde(default)]
    pub expires: Option<String>,
}

/// `[[cryptographic.encryption]]` row.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EncryptionRuleConfig {
    /// Algorithm name.
    pub algorithm: String,
    /// Minimum key size in bits.
    pub key_size: i64,
    /// RFC 3339 expiration date.
    #[serde(default)]
    pub expires: Option<String>,
}

/// Default for `skip_ocsp_no_check`.
const fn default_skip_ocsp_no_check() -> bool {
    true
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl PolicyConfig {
    /// Loads a policy file using the default resolution rules.
    ///
    /// The path is taken from `path`, then [`POLICY_ENV_VAR`], then
    /// `sigverdict-policy.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_POLICY_FILE_SIZE {
            return Err(ConfigError::Invalid("policy file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("policy file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates policy TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        if content.len() > MAX_POLICY_FILE_SIZE {
            return Err(ConfigError::Invalid("policy file exceeds size limit".to_string()));
        }
        let config: Self = toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the policy file for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when any entry is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.to_policy().map(|_| ())
    }

    /// Builds the validation policy described by this file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when any entry is invalid.
    pub fn to_policy(&self) -> Result<ValidationPolicy, ConfigError> {
        let mut constraints: BTreeMap<CheckKey, Constraint> = BTreeMap::new();
        for (name, label) in &self.levels {
            let key = CheckKey::parse(name)
                .ok_or_else(|| ConfigError::Invalid(format!("levels: unknown check {name}")))?;
            let level = Level::parse(label)
                .ok_or_else(|| ConfigError::Invalid(format!("levels.{name}: unknown level {label}")))?;
            constraints.insert(key, Constraint::level(level));
        }

        if let Some(usages) = &self.key_usage.signing_certificate {
            let expected = validate_key_usages(usages)?;
            set_expected(&mut constraints, CheckKey::SigningCertificateKeyUsage, expected);
        }
        if let Some(accepted) = &self.signature_policy.accepted {
            let expected = validate_accepted("signature_policy.accepted", accepted)?;
            set_expected(&mut constraints, CheckKey::SignaturePolicyAccepted, expected);
        }
        if let Some(accepted) = &self.signature_format.accepted {
            let expected = validate_accepted("signature_format.accepted", accepted)?;
            set_expected(&mut constraints, CheckKey::SignatureFormatAccepted, expected);
        }

        Ok(ValidationPolicy {
            name: self.policy.validated_name()?,
            model: self.policy.validated_model()?,
            constraints,
            cryptographic: self.cryptographic.to_rules()?,
            revocation: self.revocation.to_rules()?,
            signature_policy: SignaturePolicyRules {
                required: self.signature_policy.required,
            },
        })
    }
}

/// Loads and converts a policy file in one step.
///
/// # Errors
///
/// Returns [`ConfigError`] when loading or validation fails.
pub fn load_policy(path: Option<&Path>) -> Result<ValidationPolicy, ConfigError> {
    PolicyConfig::load(path)?.to_policy()
}

// ============================================================================
// SECTION: Section Validation
// ============================================================================

impl PolicySection {
    /// Returns the trimmed policy name, or the default name when absent.
    fn validated_name(&self) -> Result<String, ConfigError> {
        let Some(name) = &self.name else {
            return Ok(DEFAULT_POLICY_NAME.to_string());
        };
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::Invalid("policy.name must be non-empty".to_string()));
        }
        if trimmed.len() > MAX_POLICY_NAME_LENGTH {
            return Err(ConfigError::Invalid("policy.name exceeds max length".to_string()));
        }
        Ok(trimmed.to_string())
    }

    /// Returns the validation model, shell when absent.
    fn validated_model(&self) -> Result<ValidationModel, ConfigError> {
        self.model.as_deref().map_or(Ok(ValidationModel::Shell), |label| {
            ValidationModel::parse(label)
                .ok_or_else(|| ConfigError::Invalid(format!("policy.model: unknown model {label}")))
        })
    }
}

impl RevocationSection {
    /// Converts the revocation table.
    fn to_rules(&self) -> Result<RevocationRules, ConfigError> {
        let max_freshness = match self.max_freshness_seconds {
            Some(seconds) if seconds <= 0 => {
                return Err(ConfigError::Invalid(
                    "revocation.max_freshness_seconds must be greater than zero".to_string(),
                ));
            }
            Some(seconds) => Some(Duration::seconds(seconds)),
            None => None,
        };
        Ok(RevocationRules {
            max_freshness,
            skip_ocsp_no_check: self.skip_ocsp_no_check,
        })
    }
}

impl CryptographicSection {
    /// Converts the cryptographic tables, keeping built-in tables that are absent.
    fn to_rules(&self) -> Result<CryptographicRules, ConfigError> {
        let defaults = CryptographicRules::default();
        let digest = match &self.digest {
            Some(rows) => validate_digest_rules(rows)?,
            None => defaults.digest,
        };
        let encryption = match &self.encryption {
            Some(rows) => validate_encryption_rules(rows)?,
            None => defaults.encryption,
        };
        Ok(CryptographicRules {
            digest,
            encryption,
        })
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Policy loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading the policy file.
    #[error("policy io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("policy parse error: {0}")]
    Parse(String),
    /// Invalid policy data.
    #[error("invalid policy: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the policy path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(POLICY_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("policy path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_POLICY_FILE))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("policy path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("policy path component too long".to_string()));
        }
    }
    Ok(())
}

/// Sets the expected values of `key`, keeping any configured level.
fn set_expected(constraints: &mut BTreeMap<CheckKey, Constraint>, key: CheckKey, expected: BTreeSet<String>) {
    constraints
        .entry(key)
        .or_insert_with(|| Constraint::level(key.default_level()))
        .expected = Some(expected);
}

/// Validates a list of key usage labels.
fn validate_key_usages(usages: &[String]) -> Result<BTreeSet<String>, ConfigError> {
    if usages.is_empty() {
        return Err(ConfigError::Invalid("key_usage.signing_certificate must be non-empty".to_string()));
    }
    if usages.len() > MAX_ACCEPTED_VALUES {
        return Err(ConfigError::Invalid("key_usage.signing_certificate has too many entries".to_string()));
    }
    usages
        .iter()
        .map(|label| {
            KeyUsage::parse(label)
                .map(|usage| usage.as_str().to_string())
                .ok_or_else(|| ConfigError::Invalid(format!("key_usage: unknown key usage {label}")))
        })
        .collect()
}

/// Validates a list of accepted identifiers.
fn validate_accepted(field: &str, values: &[String]) -> Result<BTreeSet<String>, ConfigError> {
    if values.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if values.len() > MAX_ACCEPTED_VALUES {
        return Err(ConfigError::Invalid(format!("{field} has too many entries")));
    }
    values
        .iter()
        .map(|value| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Err(ConfigError::Invalid(format!("{field} entries must be non-empty")))
            } else {
                Ok(trimmed.to_string())
            }
        })
        .collect()
}

/// Validates the digest table.
fn validate_digest_rules(rows: &[DigestRuleConfig]) -> Result<Vec<DigestRule>, ConfigError> {
    if rows.len() > MAX_CRYPTO_RULES {
        return Err(ConfigError::Invalid("cryptographic.digest has too many rows".to_string()));
    }
    let mut seen = BTreeSet::new();
    let mut rules = Vec::with_capacity(rows.len());
    for row in rows {
        let algorithm = DigestAlgorithm::parse(&row.algorithm).ok_or_else(|| {
            ConfigError::Invalid(format!("cryptographic.digest: unknown algorithm {}", row.algorithm))
        })?;
        if !seen.insert(algorithm) {
            return Err(ConfigError::Invalid(format!(
                "cryptographic.digest: duplicate row for {}",
                algorithm.as_str()
            )));
        }
        rules.push(DigestRule {
            algorithm,
            expires: parse_expiry("cryptographic.digest", row.expires.as_deref())?,
        });
    }
    Ok(rules)
}

/// Validates the encryption table.
fn validate_encryption_rules(rows: &[EncryptionRuleConfig]) -> Result<Vec<EncryptionRule>, ConfigError> {
    if rows.len() > MAX_CRYPTO_RULES {
        return Err(ConfigError::Invalid("cryptographic.encryption has too many rows".to_string()));
    }
    let mut seen = BTreeSet::new();
    let mut rules = Vec::with_capacity(rows.len());
    for row in rows {
        let algorithm = EncryptionAlgorithm::parse(&row.algorithm).ok_or_else(|| {
            ConfigError::Invalid(format!("cryptographic.encryption: unknown algorithm {}", row.algorithm))
        })?;
        let min_key_size = u32::try_from(row.key_size)
            .ok()
            .filter(|size| (1..=MAX_KEY_SIZE).contains(size))
            .ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "cryptographic.encryption: key_size for {} must be between 1 and {MAX_KEY_SIZE}",
                    algorithm.as_str()
                ))
            })?;
        if !seen.insert((algorithm, min_key_size)) {
            return Err(ConfigError::Invalid(format!(
                "cryptographic.encryption: duplicate row for {} {min_key_size}",
                algorithm.as_str()
            )));
        }
        rules.push(EncryptionRule {
            algorithm,
            min_key_size,
            expires: parse_expiry("cryptographic.encryption", row.expires.as_deref())?,
        });
    }
    Ok(rules)
}

/// Parses an optional RFC 3339 expiration date.
fn parse_expiry(field: &str, value: Option<&str>) -> Result<Option<OffsetDateTime>, ConfigError> {
    value
        .map(|text| {
            OffsetDateTime::parse(text.trim(), &Rfc3339)
                .map_err(|err| ConfigError::Invalid(format!("{field}: invalid expires {text}: {err}")))
        })
        .transpose()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use super::*;

    #[test]
    fn validate_path_rejects_long_component() {
        let component = "a".repeat(MAX_PATH_COMPONENT_LENGTH + 1);
        let result = validate_path(Path::new(&component));
        assert!(result.is_err(), "overlong component should fail");
    }

    #[test]
    fn validate_path_accepts_relative_file() {
        assert!(validate_path(Path::new("./policies/strict.toml")).is_ok());
    }

    #[test]
    fn parse_expiry_accepts_rfc3339() {
        let parsed = parse_expiry("test", Some("2030-01-01T00:00:00Z")).unwrap();
        assert_eq!(parsed.map(OffsetDateTime::year), Some(2030));
    }

    #[test]
    fn parse_expiry_rejects_plain_date() {
        assert!(parse_expiry("test", Some("2030-01-01")).is_err());
    }

    #[test]
    fn set_expected_keeps_configured_level() {
        let mut constraints = BTreeMap::new();
        constraints.insert(CheckKey::SigningCertificateKeyUsage, Constraint::level(Level::Warn));
        set_expected(
            &mut constraints,
            CheckKey::SigningCertificateKeyUsage,
            BTreeSet::from(["digital_signature".to_string()]),
        );
        let constraint = &constraints[&CheckKey::SigningCertificateKeyUsage];
        assert_eq!(constraint.level, Level::Warn);
        assert!(constraint.expected.is_some());
    }

    #[test]
    fn validate_accepted_trims_entries() {
        let accepted = validate_accepted("field", &[" ANY_POLICY ".to_string()]).unwrap();
        assert!(accepted.contains("ANY_POLICY"));
    }
}
