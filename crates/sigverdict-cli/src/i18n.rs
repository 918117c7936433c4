// crates/sigverdict-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Message catalog and translation utilities for the CLI.
// Purpose: Keep every user-facing string in one catalog per locale.
// Dependencies: Standard library collections.
// ============================================================================

//! ## Overview
//! The `sigverdict` binary routes user-facing strings through a small
//! translation catalog. Reports themselves are never translated: indication
//! and sub-indication codes are stable identifiers, and report messages come
//! from the engine's own catalog.
//!
//! ## Invariants
//! - The locale is selected once per process and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Catalan.
    Ca,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ca => "ca",
        }
    }

    /// Parses a locale value, ignoring case and region tags.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.split(['-', '_']).next() {
            Some("en") => Some(Self::En),
            Some("ca") => Some(Self::Ca),
            _ => None,
        }
    }
}

/// Ordered list of supported CLI locales.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Ca];

/// A formatted message argument captured by the [`macro@crate::t`] macro.
#[derive(Clone)]
pub struct MessageArg {
    /// Placeholder name without braces.
    pub key: &'static str,
    /// Preformatted substitution value.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`].
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Global locale selection for CLI output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// English catalog entries.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "sigverdict {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("output.serialize_failed", "Failed to serialize validation report: {error}"),
    ("output.report.write_failed", "Failed to write validation report to {path}: {error}"),
    ("input.kind.diagnostic", "diagnostic data"),
    ("input.read_failed", "Failed to read {kind} at {path}: {error}"),
    (
        "input.read_too_large",
        "Refusing to read {kind} at {path} because it is {size} bytes (limit {limit}).",
    ),
    ("input.parse_failed", "Failed to parse {kind} at {path}: {error}"),
    ("policy.load_failed", "Failed to load policy: {error}"),
    ("policy.check.ok", "Policy valid: {name} ({model} model)."),
    ("validate.time_invalid", "Invalid validation time {value}: expected an RFC 3339 timestamp."),
    ("validate.failed", "Validation failed: {error}"),
    ("validate.audit.open_failed", "Failed to open audit log at {path}: {error}"),
    ("validate.audit.path_missing", "--audit file requires --audit-log."),
    ("validate.summary.header", "Validation report (policy {policy}, time {time}):"),
    ("validate.summary.signature", "- signature {id}: {verdict}"),
    ("validate.summary.timestamp", "- timestamp {id}: {verdict}"),
    ("validate.summary.revocation", "- revocation {id}: {verdict}"),
    ("validate.summary.none", "No signatures found."),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Note: non-English output is machine-translated and may be inaccurate.",
    ),
];

/// Catalan catalog entries.
const CATALOG_CA: &[(&str, &str)] = &[
    ("main.version", "sigverdict {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "sortida"),
    ("output.write_failed", "No s'ha pogut escriure a {stream}: {error}"),
    ("output.serialize_failed", "No s'ha pogut serialitzar l'informe de validació: {error}"),
    (
        "output.report.write_failed",
        "No s'ha pogut escriure l'informe de validació a {path}: {error}",
    ),
    ("input.kind.diagnostic", "dades de diagnòstic"),
    ("input.read_failed", "No s'ha pogut llegir {kind} a {path}: {error}"),
    (
        "input.read_too_large",
        "Es refusa llegir {kind} a {path} perquè ocupa {size} bytes (límit {limit}).",
    ),
    ("input.parse_failed", "No s'ha pogut analitzar {kind} a {path}: {error}"),
    ("policy.load_failed", "No s'ha pogut carregar la política: {error}"),
    ("policy.check.ok", "Política vàlida: {name} (model {model})."),
    (
        "validate.time_invalid",
        "Hora de validació no vàlida {value}: s'esperava una marca de temps RFC 3339.",
    ),
    ("validate.failed", "La validació ha fallat: {error}"),
    ("validate.audit.open_failed", "No s'ha pogut obrir el registre d'auditoria a {path}: {error}"),
    ("validate.audit.path_missing", "--audit file requereix --audit-log."),
    ("validate.summary.header", "Informe de validació (política {policy}, hora {time}):"),
    ("validate.summary.signature", "- signatura {id}: {verdict}"),
    ("validate.summary.timestamp", "- segell de temps {id}: {verdict}"),
    ("validate.summary.revocation", "- revocació {id}: {verdict}"),
    ("validate.summary.none", "No s'han trobat signatures."),
    ("i18n.lang.invalid_env", "Valor no vàlid per a {env}: {value}. S'esperava 'en' o 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Nota: la sortida que no és en anglès està traduïda automàticament i pot ser inexacta.",
    ),
];

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_CA_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => CATALOG_EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect()),
        Locale::Ca => CATALOG_CA_MAP.get_or_init(|| CATALOG_CA.iter().copied().collect()),
    }
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    translate_for(current_locale(), key, args)
}

/// Translates `key` for an explicit locale.
#[must_use]
pub fn translate_for(locale: Locale, key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

/// Returns catalog keys present in English but missing from `locale`.
#[must_use]
pub fn missing_keys(locale: Locale) -> Vec<&'static str> {
    let target = catalog_for(locale);
    let mut missing: Vec<&'static str> =
        CATALOG_EN.iter().map(|(key, _)| *key).filter(|key| !target.contains_key(key)).collect();
    missing.sort_unstable();
    missing
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// # Returns
///
/// A localized [`String`] with `{placeholder}` positions substituted.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
