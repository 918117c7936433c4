// crates/sigverdict-core/src/core/mod.rs
// ============================================================================
// Module: SigVerdict Core Types
// Description: Fact model, policy, proof-of-existence, and report structures.
// Purpose: Provide stable, serializable types shared by every validation stage.
// Dependencies: verdict-chain, serde, time
// ============================================================================

//! ## Overview
//! Core types describe what the engine reads (the diagnostic fact model and
//! the validation policy) and what it writes (the validation report). They
//! carry no evaluation logic beyond small predicates over their own fields.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod arena;
pub mod catalog;
pub mod constraints;
pub mod hashing;
pub mod identifiers;
pub mod poe;
pub mod report;
pub mod time;
pub mod tokens;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use arena::DiagnosticData;
pub use arena::FactModelError;
pub use arena::TokenArena;
pub use catalog::MessageCatalog;
pub use constraints::ANY_POLICY;
pub use constraints::CheckKey;
pub use constraints::Constraint;
pub use constraints::CryptographicRules;
pub use constraints::DEFAULT_POLICY_NAME;
pub use constraints::DigestRule;
pub use constraints::EncryptionRule;
pub use constraints::IMPLICIT_POLICY;
pub use constraints::NO_POLICY;
pub use constraints::RevocationRules;
pub use constraints::SignaturePolicyRules;
pub use constraints::ValidationModel;
pub use constraints::ValidationPolicy;
pub use hashing::HashDigest;
pub use hashing::HashError;
pub use identifiers::TokenId;
pub use identifiers::TokenKind;
pub use poe::PoeProvenance;
pub use poe::PoeSet;
pub use poe::ProofOfExistence;
pub use report::AuditEntry;
pub use report::BasicBuildingBlocks;
pub use report::BlockContext;
pub use report::CertificateConclusion;
pub use report::ControlTimeReason;
pub use report::ControlTimeStep;
pub use report::SignatureReport;
pub use report::TimeSlidingConclusion;
pub use report::TokenReport;
pub use report::ValidationReport;
pub use report::XcvConclusion;
pub use tokens::BasicSignature;
pub use tokens::CertificateStatus;
pub use tokens::CertificateToken;
pub use tokens::DigestAlgorithm;
pub use tokens::DigestMatcher;
pub use tokens::EncryptionAlgorithm;
pub use tokens::KeyUsage;
pub use tokens::RevocationEntry;
pub use tokens::RevocationKind;
pub use tokens::RevocationReason;
pub use tokens::RevocationToken;
pub use tokens::SignaturePolicyDeclaration;
pub use tokens::SignatureToken;
pub use tokens::SignedData;
pub use tokens::SigningCertificateReference;
pub use tokens::TimestampKind;
pub use tokens::TimestampToken;
