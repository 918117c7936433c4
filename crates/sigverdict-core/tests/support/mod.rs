// crates/sigverdict-core/tests/support/mod.rs
// ============================================================================
// Module: Test Support
// Description: Result helpers and fact model fixtures for core tests.
// ============================================================================
//! ## Overview
//! Shared helpers for Result-based assertions plus a small PKI: a trusted
//! root, a signer and a timestamping certificate it issued, a fresh CRL,
//! and a PAdES-like signature. Tests start from [`baseline`] and mutate it.

#![allow(
    dead_code,
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only helpers; not every test binary uses every fixture."
)]

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;

use sigverdict_core::BasicSignature;
use sigverdict_core::CertificateStatus;
use sigverdict_core::CertificateToken;
use sigverdict_core::DiagnosticData;
use sigverdict_core::DigestAlgorithm;
use sigverdict_core::DigestMatcher;
use sigverdict_core::EncryptionAlgorithm;
use sigverdict_core::KeyUsage;
use sigverdict_core::MessageCatalog;
use sigverdict_core::NoopAuditSink;
use sigverdict_core::RevocationEntry;
use sigverdict_core::RevocationKind;
use sigverdict_core::RevocationReason;
use sigverdict_core::RevocationToken;
use sigverdict_core::SignatureReport;
use sigverdict_core::SignatureToken;
use sigverdict_core::SignedData;
use sigverdict_core::SigningCertificateReference;
use sigverdict_core::TimestampKind;
use sigverdict_core::TimestampToken;
use sigverdict_core::TokenId;
use sigverdict_core::TokenKind;
use sigverdict_core::ValidationEngine;
use sigverdict_core::ValidationPolicy;
use sigverdict_core::ValidationReport;
use time::Duration;
use time::OffsetDateTime;
use time::macros::datetime;

// ========================================================================
// Test Result Helpers
// ========================================================================

/// Standard result type used across core integration tests.
pub type TestResult<T = ()> = Result<T, Box<dyn Error>>;

/// Lightweight error type for test assertions.
#[derive(Debug)]
struct TestError {
    /// Human-readable failure message.
    message: String,
}

impl fmt::Display for TestError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.message)
    }
}

impl Error for TestError {}

/// Returns an error when a test condition fails.
///
/// # Errors
/// Returns a `TestError` when the condition is false.
pub fn ensure(condition: bool, message: impl Into<String>) -> TestResult {
    if condition {
        Ok(())
    } else {
        Err(Box::new(TestError {
            message: message.into(),
        }))
    }
}

// ========================================================================
// Identities and Times
// ========================================================================

/// Trusted root identity.
pub const ROOT: &str = "C-root";
/// Signing certificate identity.
pub const SIGNER: &str = "C-signer";
/// Timestamping certificate identity.
pub const TSA: &str = "C-tsa";
/// Root CRL identity.
pub const CRL: &str = "R-root-crl";
/// Signature identity.
pub const SIGNATURE: &str = "S-document";

/// Returns a token identity.
pub fn id(value: &str) -> TokenId {
    TokenId::new(value)
}

/// Validation time used by every scenario.
pub const fn validation_time() -> OffsetDateTime {
    datetime!(2026-01-01 0:00 UTC)
}

/// Day the baseline signature claims to have been created.
pub const fn signing_day() -> OffsetDateTime {
    datetime!(2025-06-01 12:00 UTC)
}

// ========================================================================
// Building Blocks
// ========================================================================

/// Intact RSA signature with the given key size over SHA-256.
pub const fn rsa_signature(key_size: u32) -> BasicSignature {
    BasicSignature {
        digest_algorithm: Some(DigestAlgorithm::Sha256),
        encryption_algorithm: Some(EncryptionAlgorithm::Rsa),
        key_size: Some(key_size),
        intact: true,
    }
}

/// Found and intact SHA-256 digest.
pub fn digest(name: &str) -> DigestMatcher {
    DigestMatcher {
        name: name.to_string(),
        algorithm: Some(DigestAlgorithm::Sha256),
        data_found: true,
        data_intact: true,
    }
}

/// Signed data referencing `certificate`.
pub fn signed_by(certificate: &str, digest_matchers: Vec<DigestMatcher>) -> SignedData {
    SignedData {
        signing_certificate_reference: Some(SigningCertificateReference {
            certificate: id(certificate),
            digest_match: true,
            issuer_serial_match: true,
        }),
        candidate_certificates: vec![id(certificate)],
        basic_signature: rsa_signature(3072),
        digest_matchers,
    }
}

// ========================================================================
// Certificates
// ========================================================================

/// Self-signed trusted root.
pub fn root_certificate() -> CertificateToken {
    CertificateToken {
        id: id(ROOT),
        encoded: None,
        subject: "CN=Root CA".to_string(),
        issuer: "CN=Root CA".to_string(),
        serial_number: "01".to_string(),
        subject_key_id: Some("aa01".to_string()),
        authority_key_id: Some("aa01".to_string()),
        not_before: datetime!(2015-01-01 0:00 UTC),
        not_after: datetime!(2040-01-01 0:00 UTC),
        key_usages: BTreeSet::from([KeyUsage::KeyCertSign, KeyUsage::CrlSign]),
        ca: true,
        signature: rsa_signature(4096),
        self_signed: true,
        trusted: true,
        trust_sunset_date: None,
        crl_urls: Vec::new(),
        ocsp_urls: Vec::new(),
        ocsp_no_check: false,
    }
}

/// End-entity certificate issued by the root.
pub fn leaf_certificate(
    identity: &str,
    subject: &str,
    not_before: OffsetDateTime,
    not_after: OffsetDateTime,
    usage: KeyUsage,
) -> CertificateToken {
    CertificateToken {
        id: id(identity),
        encoded: None,
        subject: subject.to_string(),
        issuer: "CN=Root CA".to_string(),
        serial_number: format!("{identity}-serial"),
        subject_key_id: Some(format!("{identity}-ski")),
        authority_key_id: Some("aa01".to_string()),
        not_before,
        not_after,
        key_usages: BTreeSet::from([usage]),
        ca: false,
        signature: rsa_signature(4096),
        self_signed: false,
        trusted: false,
        trust_sunset_date: None,
        crl_urls: vec!["http://crl.example.test/root.crl".to_string()],
        ocsp_urls: Vec::new(),
        ocsp_no_check: false,
    }
}

/// Signing certificate valid 2024 to 2028.
pub fn signer_certificate() -> CertificateToken {
    leaf_certificate(
        SIGNER,
        "CN=Signer",
        datetime!(2024-01-01 0:00 UTC),
        datetime!(2028-01-01 0:00 UTC),
        KeyUsage::NonRepudiation,
    )
}

/// Timestamping certificate valid 2020 to 2035.
pub fn tsa_certificate() -> CertificateToken {
    leaf_certificate(
        TSA,
        "CN=Timestamping Unit",
        datetime!(2020-01-01 0:00 UTC),
        datetime!(2035-01-01 0:00 UTC),
        KeyUsage::DigitalSignature,
    )
}

// ========================================================================
// Revocation Data
// ========================================================================

/// Entry asserting `certificate` is good.
pub fn good(certificate: &str) -> RevocationEntry {
    RevocationEntry {
        certificate: id(certificate),
        status: CertificateStatus::Good,
        reason: None,
        revocation_date: None,
    }
}

/// Entry asserting `certificate` was revoked at `at`.
pub fn revoked(certificate: &str, at: OffsetDateTime, reason: RevocationReason) -> RevocationEntry {
    RevocationEntry {
        certificate: id(certificate),
        status: CertificateStatus::Revoked,
        reason: Some(reason),
        revocation_date: Some(at),
    }
}

/// Root CRL issued a day before the validation time, valid for a week.
pub fn root_crl(entries: Vec<RevocationEntry>) -> RevocationToken {
    let this_update = validation_time() - Duration::days(1);
    RevocationToken {
        id: id(CRL),
        encoded: None,
        kind: RevocationKind::Crl,
        issuer_certificate: Some(id(ROOT)),
        this_update,
        next_update: Some(this_update + Duration::days(7)),
        entries,
        signature: rsa_signature(4096),
    }
}

// ========================================================================
// Signatures and Timestamps
// ========================================================================

/// Intact signature by the signer over one document.
pub fn signature() -> SignatureToken {
    SignatureToken {
        id: id(SIGNATURE),
        encoded: None,
        claimed_signing_time: Some(signing_day()),
        signed_data: signed_by(SIGNER, vec![digest("document")]),
        policy: None,
        format: Some("PAdES-BASELINE-B".to_string()),
        structurally_valid: true,
    }
}

/// Baseline signature identified by the digest of `content`.
pub fn encoded_signature(content: &str) -> SignatureToken {
    let mut token = signature();
    token.id = TokenId::derive(TokenKind::Signature, content.as_bytes());
    token.encoded = Some(content.to_string());
    token
}

/// Timestamp of `kind` by the TSA over `covered`, produced at `at`.
pub fn timestamp(identity: &str, kind: TimestampKind, at: OffsetDateTime, covered: &[&str]) -> TimestampToken {
    TimestampToken {
        id: id(identity),
        encoded: None,
        kind,
        production_time: at,
        covered: covered.iter().copied().map(id).collect(),
        message_imprint: digest("message-imprint"),
        signed_data: signed_by(TSA, Vec::new()),
    }
}

/// Signature timestamp over the baseline signature.
pub fn signature_timestamp(at: OffsetDateTime) -> TimestampToken {
    timestamp("T-signature", TimestampKind::Signature, at, &[SIGNATURE])
}

// ========================================================================
// Fact Models
// ========================================================================

/// Valid signature with fresh revocation data for every certificate.
pub fn baseline() -> DiagnosticData {
    DiagnosticData {
        certificates: vec![root_certificate(), signer_certificate(), tsa_certificate()],
        revocations: vec![root_crl(vec![good(SIGNER), good(TSA)])],
        timestamps: Vec::new(),
        signatures: vec![signature()],
    }
}

/// Baseline with the signer revoked at `revoked_at` and a signature
/// timestamp produced at `timestamp_at`.
pub fn revoked_with_timestamp(revoked_at: OffsetDateTime, timestamp_at: OffsetDateTime) -> DiagnosticData {
    let mut data = baseline();
    data.revocations =
        vec![root_crl(vec![revoked(SIGNER, revoked_at, RevocationReason::KeyCompromise), good(TSA)])];
    data.timestamps = vec![signature_timestamp(timestamp_at)];
    data
}

// ========================================================================
// Validation
// ========================================================================

/// Validates `data` under `policy` at the fixed validation time.
pub fn validate_with(policy: ValidationPolicy, data: DiagnosticData) -> TestResult<ValidationReport> {
    let engine = ValidationEngine::new(policy, MessageCatalog::english());
    Ok(engine.validate_diagnostic(data, validation_time(), &NoopAuditSink)?)
}

/// Validates `data` under the default policy.
pub fn validate(data: DiagnosticData) -> TestResult<ValidationReport> {
    validate_with(ValidationPolicy::default(), data)
}

/// Returns the baseline signature's report.
pub fn signature_report(report: &ValidationReport) -> TestResult<&SignatureReport> {
    report.signature(&id(SIGNATURE)).ok_or_else(|| "missing signature report".into())
}
