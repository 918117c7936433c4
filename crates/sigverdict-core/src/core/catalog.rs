// crates/sigverdict-core/src/core/catalog.rs
// ============================================================================
// Module: SigVerdict Message Catalog
// Description: Check titles, failure messages, and block titles.
// Purpose: Keep human-readable report text out of the evaluation logic.
// Dependencies: Standard library collections
// ============================================================================

//! ## Overview
//! A [`MessageCatalog`] is handed to the engine explicitly; there is no
//! global instance. Keys follow `<check>.title`, `<check>.error`, and
//! `block.<name>`. Unknown keys render as the key itself.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

// ============================================================================
// SECTION: Catalog Entries
// ============================================================================

/// English catalog entries.
const CATALOG_ITEMS: &[(&str, &str)] = &[
    ("block.isc", "Identification of the signing certificate"),
    ("block.vci", "Validation context initialization"),
    ("block.xcv", "X.509 certificate validation"),
    ("block.sub_xcv", "Certificate {certificate}"),
    ("block.cv", "Cryptographic verification"),
    ("block.sav", "Signature acceptance validation"),
    ("block.bbb", "Basic building blocks"),
    ("block.basic", "Validation process for basic signatures"),
    ("block.psv", "Past signature validation"),
    ("block.archival", "Validation process for signatures with archival data"),
    ("block.malformed", "Malformed token"),
    ("signing_certificate_identified.title", "Is the signing certificate identified?"),
    ("signing_certificate_identified.error", "The signing certificate cannot be identified."),
    ("signing_certificate_reference_present.title", "Is the signing certificate reference present?"),
    ("signing_certificate_reference_present.error", "The signing certificate reference is absent."),
    ("signing_certificate_digest_match.title", "Does the signing certificate digest match?"),
    (
        "signing_certificate_digest_match.error",
        "The signing certificate reference digest does not match.",
    ),
    ("signing_certificate_issuer_serial_match.title", "Does the issuer and serial number match?"),
    (
        "signing_certificate_issuer_serial_match.error",
        "The signing certificate issuer or serial number does not match.",
    ),
    ("signature_policy_available.title", "Is the signature policy available?"),
    ("signature_policy_available.error", "The signature policy is not available."),
    ("signature_policy_accepted.title", "Is the signature policy accepted?"),
    ("signature_policy_accepted.error", "The signature policy is not accepted."),
    ("signature_policy_hash_valid.title", "Is the signature policy digest valid?"),
    ("signature_policy_hash_valid.error", "The signature policy digest does not match."),
    ("prospective_certificate_chain.title", "Can a certificate chain be built?"),
    ("prospective_certificate_chain.error", "No certificate chain to a trust anchor was found."),
    ("trust_anchor_valid.title", "Is the trust anchor accepted?"),
    ("trust_anchor_valid.error", "The trust anchor is not accepted at the validation time."),
    ("certificate_signature_intact.title", "Is the certificate signature intact?"),
    ("certificate_signature_intact.error", "The certificate signature is not intact."),
    ("certificate_validity_range.title", "Is the certificate within its validity range?"),
    ("certificate_validity_range.error", "The certificate is outside its validity range."),
    ("signing_certificate_key_usage.title", "Does the signing certificate have an expected key usage?"),
    ("signing_certificate_key_usage.error", "The signing certificate key usage is not accepted."),
    ("ca_certificate_basic_constraints.title", "Is the CA certificate allowed to sign certificates?"),
    ("ca_certificate_basic_constraints.error", "The CA certificate basic constraints are not met."),
    ("revocation_info_access_present.title", "Does the certificate point at revocation data?"),
    ("revocation_info_access_present.error", "The certificate has no revocation data pointer."),
    ("revocation_data_available.title", "Is revocation data available?"),
    ("revocation_data_available.error", "No acceptable revocation data was found."),
    ("certificate_not_revoked.title", "Is the certificate not revoked?"),
    ("certificate_not_revoked.error", "The certificate is revoked."),
    ("certificate_not_on_hold.title", "Is the certificate not on hold?"),
    ("certificate_not_on_hold.error", "The certificate is on hold."),
    ("revocation_fresh.title", "Is the revocation data fresh?"),
    ("revocation_fresh.error", "The revocation data is not fresh."),
    ("certificate_cryptographic.title", "Are the certificate algorithms acceptable?"),
    ("certificate_cryptographic.error", "The certificate algorithms are not acceptable."),
    ("reference_data_found.title", "Is the signed data found?"),
    ("reference_data_found.error", "The signed data was not found."),
    ("reference_data_intact.title", "Is the signed data intact?"),
    ("reference_data_intact.error", "The signed data digest does not match."),
    ("signature_intact.title", "Is the signature intact?"),
    ("signature_intact.error", "The signature value does not verify."),
    ("structural_validation.title", "Is the signature structure valid?"),
    ("structural_validation.error", "The signature structure is not valid."),
    ("signature_format_accepted.title", "Is the signature format accepted?"),
    ("signature_format_accepted.error", "The signature format is not accepted."),
    ("signing_time_present.title", "Is a signing time claimed?"),
    ("signing_time_present.error", "The signing time is absent."),
    ("signature_cryptographic.title", "Are the signature algorithms acceptable?"),
    ("signature_cryptographic.error", "The signature algorithms are not acceptable."),
    ("reference_digest_cryptographic.title", "Are the signed data digest algorithms acceptable?"),
    (
        "reference_digest_cryptographic.error",
        "A signed data digest algorithm is not acceptable.",
    ),
    (
        "content_timestamp_before_revocation.title",
        "Is no content timestamp after the signing certificate revocation?",
    ),
    (
        "content_timestamp_before_revocation.error",
        "A content timestamp was produced after the signing certificate revocation.",
    ),
    (
        "content_timestamp_before_expiration.title",
        "Is no content timestamp after the signing certificate expiration?",
    ),
    (
        "content_timestamp_before_expiration.error",
        "A content timestamp was produced after the signing certificate expiration.",
    ),
    ("basic_validation_conclusive.title", "Can the basic validation result be resolved?"),
    ("basic_validation_conclusive.error", "The basic validation result is conclusive and not passed."),
    ("timestamp_valid.title", "Is the timestamp valid?"),
    ("timestamp_valid.error", "The timestamp failed validation."),
    ("timestamp_order_coherent.title", "Are the timestamps in a coherent order?"),
    ("timestamp_order_coherent.error", "The timestamps are not in a coherent order."),
    (
        "best_signature_time_not_before_issuance.title",
        "Is the best signature time after the signing certificate issuance?",
    ),
    (
        "best_signature_time_not_before_issuance.error",
        "The best signature time is before the signing certificate issuance.",
    ),
    ("past_signature_validation.title", "Does a proof of existence precede the control time?"),
    (
        "past_signature_validation.error",
        "No proof of existence validates before the control time.",
    ),
    ("isc_passed.title", "Was the signing certificate identified?"),
    ("isc_passed.error", "Identification of the signing certificate failed."),
    ("vci_passed.title", "Was the validation context initialized?"),
    ("vci_passed.error", "Validation context initialization failed."),
    ("xcv_passed.title", "Was the certificate chain validated?"),
    ("xcv_passed.error", "X.509 certificate validation failed."),
    ("cv_passed.title", "Was the cryptographic verification successful?"),
    ("cv_passed.error", "Cryptographic verification failed."),
    ("sav_passed.title", "Was the signature accepted?"),
    ("sav_passed.error", "Signature acceptance validation failed."),
    ("certificate_passed.title", "Is the chain certificate valid?"),
    ("certificate_passed.error", "A certificate of the chain failed validation."),
    ("building_blocks_passed.title", "Did the basic building blocks pass?"),
    ("building_blocks_passed.error", "The basic building blocks did not pass."),
    ("time_sliding_passed.title", "Did past signature validation pass?"),
    ("time_sliding_passed.error", "Past signature validation did not pass."),
    ("token_well_formed.title", "Is the token well formed?"),
    ("token_well_formed.error", "The token is malformed."),
];

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Read-only message bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    /// Key -> template.
    entries: BTreeMap<String, String>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::english()
    }
}

impl MessageCatalog {
    /// Returns the built-in English catalog.
    #[must_use]
    pub fn english() -> Self {
        Self {
            entries: CATALOG_ITEMS
                .iter()
                .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
                .collect(),
        }
    }

    /// Returns a copy with one entry overridden.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.entries.insert(key.into(), message.into());
        self
    }

    /// Renders `key`, falling back to the key itself.
    #[must_use]
    pub fn render(&self, key: &str) -> String {
        self.entries.get(key).cloned().unwrap_or_else(|| key.to_string())
    }

    /// Renders `key` with `{name}` placeholders substituted in order.
    #[must_use]
    pub fn render_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut result = self.render(key);
        for (name, value) in args {
            result = result.replace(&format!("{{{name}}}"), value);
        }
        result
    }
}
