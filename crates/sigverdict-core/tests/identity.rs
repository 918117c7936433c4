// crates/sigverdict-core/tests/identity.rs
// ============================================================================
// Module: Token Identity Tests
// Description: Content-derived identities and their verification at indexing.
// ============================================================================
//! ## Overview
//! Identities are the kind prefix plus the SHA-256 digest of the encoded
//! content. The arena rejects encoded tokens whose declared identity differs
//! from the derived one.

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

mod support;

use sigverdict_core::FactModelError;
use sigverdict_core::Indication;
use sigverdict_core::MessageCatalog;
use sigverdict_core::NoopAuditSink;
use sigverdict_core::TokenArena;
use sigverdict_core::TokenId;
use sigverdict_core::TokenKind;
use sigverdict_core::ValidationError;
use sigverdict_core::ValidationEngine;
use sigverdict_core::ValidationPolicy;
use support::TestResult;
use support::baseline;
use support::encoded_signature;
use support::ensure;
use support::validate;
use support::validation_time;

// ============================================================================
// SECTION: Derivation
// ============================================================================

#[test]
fn equal_content_derives_equal_identities() -> TestResult {
    let first = TokenId::derive(TokenKind::Certificate, b"MIIB-certificate");
    let second = TokenId::derive(TokenKind::Certificate, b"MIIB-certificate");
    ensure(first == second, "same content should derive the same identity")
}

#[test]
fn different_content_derives_different_identities() -> TestResult {
    let first = TokenId::derive(TokenKind::Certificate, b"MIIB-certificate-a");
    let second = TokenId::derive(TokenKind::Certificate, b"MIIB-certificate-b");
    ensure(first != second, "different content should derive different identities")
}

#[test]
fn derived_identity_carries_kind_prefix_and_digest() -> TestResult {
    let certificate = TokenId::derive(TokenKind::Certificate, b"content");
    let signature = TokenId::derive(TokenKind::Signature, b"content");
    ensure(certificate.as_str().starts_with("C-"), "certificate identities start with C-")?;
    ensure(signature.as_str().starts_with("S-"), "signature identities start with S-")?;
    ensure(certificate != signature, "kinds should not share identities")?;
    // Prefix, hyphen, and 64 uppercase hex digits.
    ensure(certificate.as_str().len() == 2 + 64, "digest should be 64 hex digits")?;
    ensure(
        certificate.as_str()[2..].chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()),
        "digest should be uppercase hex",
    )
}

// ============================================================================
// SECTION: Arena Verification
// ============================================================================

#[test]
fn encoded_token_with_derived_identity_validates() -> TestResult {
    let token = encoded_signature("signature-bytes");
    let token_id = token.id.clone();
    let mut data = baseline();
    data.signatures = vec![token];

    let report = validate(data)?;
    let signature = report.signature(&token_id).ok_or("missing signature report")?;
    ensure(
        signature.verdict.indication() == Indication::TotalPassed,
        format!("expected TOTAL_PASSED, got {}", signature.verdict),
    )
}

#[test]
fn encoded_token_with_foreign_identity_is_rejected() -> TestResult {
    let mut token = encoded_signature("signature-bytes");
    token.id = TokenId::new("S-document");
    let mut data = baseline();
    data.signatures = vec![token];

    let error = TokenArena::build(data).err().ok_or("arena should reject the identity")?;
    ensure(
        error
            == FactModelError::IdentityMismatch {
                id: TokenId::new("S-document"),
                kind: TokenKind::Signature,
                expected: TokenId::derive(TokenKind::Signature, b"signature-bytes"),
            },
        format!("unexpected error: {error}"),
    )
}

#[test]
fn identity_mismatch_fails_the_whole_run() -> TestResult {
    let mut token = encoded_signature("signature-bytes");
    token.encoded = Some("tampered-bytes".to_string());
    let mut data = baseline();
    data.signatures = vec![token];

    let engine = ValidationEngine::new(ValidationPolicy::default(), MessageCatalog::english());
    let result = engine.validate_diagnostic(data, validation_time(), &NoopAuditSink);
    ensure(
        matches!(result, Err(ValidationError::FactModel(FactModelError::IdentityMismatch { .. }))),
        "engine should refuse the fact model",
    )
}
