// crates/sigverdict-config/src/examples.rs
// ============================================================================
// Module: Policy Examples
// Description: Canonical example policy file.
// Purpose: Deterministic example for docs and `sigverdict policy example`.
// Dependencies: std
// ============================================================================

//! ## Overview
//! The example spells out the built-in default policy, so loading it yields
//! the same levels and cryptographic tables as an empty file.

/// Returns the canonical example `sigverdict-policy.toml`.
#[must_use]
pub fn policy_toml_example() -> String {
    String::from(
        r#"[policy]
name = "sigverdict-default"
model = "shell"

[levels]
signing_certificate_reference_present = "warn"
signing_certificate_issuer_serial_match = "warn"
revocation_info_access_present = "warn"
structural_validation = "warn"
signing_time_present = "warn"
signature_format_accepted = "ignore"
timestamp_valid = "warn"
timestamp_order_coherent = "warn"
revocation_data_available = "fail"
certificate_not_revoked = "fail"

[key_usage]
signing_certificate = ["digital_signature", "non_repudiation"]

[signature_policy]
accepted = ["ANY_POLICY", "NO_POLICY"]
required = false

[revocation]
# max_freshness_seconds = 604800
skip_ocsp_no_check = true

[[cryptographic.digest]]
algorithm = "MD5"
expires = "2005-01-01T00:00:00Z"

[[cryptographic.digest]]
algorithm = "SHA1"
expires = "2012-08-01T00:00:00Z"

[[cryptographic.digest]]
algorithm = "SHA224"
expires = "2029-01-01T00:00:00Z"

[[cryptographic.digest]]
algorithm = "SHA256"

[[cryptographic.digest]]
algorithm = "SHA384"

[[cryptographic.digest]]
algorithm = "SHA512"

[[cryptographic.digest]]
algorithm = "SHA3-256"

[[cryptographic.digest]]
algorithm = "SHA3-384"

[[cryptographic.digest]]
algorithm = "SHA3-512"

[[cryptographic.encryption]]
algorithm = "RSA"
key_size = 1024
expires = "2013-01-01T00:00:00Z"

[[cryptographic.encryption]]
algorithm = "RSA"
key_size = 1536
expires = "2017-01-01T00:00:00Z"

[[cryptographic.encryption]]
algorithm = "RSA"
key_size = 2048
expires = "2031-01-01T00:00:00Z"

[[cryptographic.encryption]]
algorithm = "RSA"
key_size = 3072

[[cryptographic.encryption]]
algorithm = "DSA"
key_size = 2048
expires = "2029-01-01T00:00:00Z"

[[cryptographic.encryption]]
algorithm = "ECDSA"
key_size = 256

[[cryptographic.encryption]]
algorithm = "ED25519"
key_size = 256

[[cryptographic.encryption]]
algorithm = "ED448"
key_size = 448
"#,
    )
}
