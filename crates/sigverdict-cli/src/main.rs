// crates/sigverdict-cli/src/main.rs
// ============================================================================
// Module: SigVerdict CLI Entry Point
// Description: Command dispatcher for signature validation and policy tooling.
// Purpose: Validate diagnostic data files offline and inspect policies.
// Dependencies: clap, serde_jcs, serde_json, sigverdict-config, sigverdict-core, thiserror, time.
// ============================================================================

//! ## Overview
//! `sigverdict validate` reads a diagnostic data JSON document, applies the
//! selected policy at one validation time, and prints the report as
//! canonical JSON. The exit code is `0` when every signature reached
//! `TOTAL_PASSED`, `2` when at least one did not, and `1` on usage or input
//! errors. `sigverdict policy` checks or prints policy files.
//!
//! Inputs are untrusted: files are read with a hard size limit and parsed
//! with unknown fields rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use sigverdict_cli::audit::FileAuditSink;
use sigverdict_cli::audit::StderrAuditSink;
use sigverdict_cli::i18n::Locale;
use sigverdict_cli::i18n::set_locale;
use sigverdict_cli::t;
use sigverdict_config::DEFAULT_POLICY_FILE;
use sigverdict_config::POLICY_ENV_VAR;
use sigverdict_config::load_policy;
use sigverdict_config::policy_toml_example;
use sigverdict_core::DiagnosticData;
use sigverdict_core::MessageCatalog;
use sigverdict_core::NoopAuditSink;
use sigverdict_core::ValidationAuditSink;
use sigverdict_core::ValidationEngine;
use sigverdict_core::ValidationPolicy;
use sigverdict_core::ValidationReport;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a diagnostic data document.
const MAX_DIAGNOSTIC_BYTES: usize = 16 * 1024 * 1024;
/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "SIGVERDICT_LANG";
/// Exit code when validation completed but a signature did not pass.
const EXIT_NOT_PASSED: u8 = 2;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "sigverdict", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `SIGVERDICT_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate every signature in a diagnostic data document.
    Validate(ValidateCommand),
    /// Validation policy utilities.
    Policy {
        /// Selected policy subcommand.
        #[command(subcommand)]
        command: PolicyCommand,
    },
}

/// Arguments for the `validate` command.
#[derive(Args, Debug)]
struct ValidateCommand {
    /// Path to the diagnostic data JSON document.
    #[arg(long, value_name = "PATH")]
    diagnostic: PathBuf,
    /// Path to the policy TOML file (falls back to `SIGVERDICT_POLICY`, then
    /// `sigverdict-policy.toml`, then the built-in default policy).
    #[arg(long, value_name = "PATH")]
    policy: Option<PathBuf>,
    /// Validation time as an RFC 3339 timestamp (defaults to now).
    #[arg(long, value_name = "RFC3339")]
    validation_time: Option<String>,
    /// Report rendering.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
    /// Write the JSON report to a file instead of stdout.
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Audit event destination.
    #[arg(long, value_enum, default_value_t = AuditTarget::None)]
    audit: AuditTarget,
    /// Audit log path, required with `--audit file`.
    #[arg(long, value_name = "PATH", required_if_eq("audit", "file"))]
    audit_log: Option<PathBuf>,
}

/// Policy subcommands.
#[derive(Subcommand, Debug)]
enum PolicyCommand {
    /// Load and validate a policy file.
    Check(PolicyCheckCommand),
    /// Print a policy file reproducing the built-in defaults.
    Example,
}

/// Arguments for `policy check`.
#[derive(Args, Debug)]
struct PolicyCheckCommand {
    /// Path to the policy TOML file.
    #[arg(long, value_name = "PATH")]
    policy: Option<PathBuf>,
}

/// Report renderings.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Canonical JSON report.
    Json,
    /// One localized line per token.
    Summary,
}

/// Audit event destinations.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum AuditTarget {
    /// Discard audit events.
    None,
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to `--audit-log`.
    File,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

/// Errors raised while reading size-limited input.
#[derive(Debug)]
enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Validate(command) => command_validate(&command),
        Commands::Policy {
            command,
        } => command_policy(command),
    }
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    let help = Cli::command().render_help().to_string();
    write_stdout_line(help.trim_end()).map_err(|err| CliError::new(output_error("stdout", &err)))
}

// ============================================================================
// SECTION: Validate Command
// ============================================================================

/// Executes the `validate` command.
fn command_validate(command: &ValidateCommand) -> CliResult<ExitCode> {
    let validation_time = resolve_validation_time(command.validation_time.as_deref())?;
    let policy = resolve_policy(command.policy.as_deref())?;
    let data = read_diagnostic(&command.diagnostic)?;
    let sink = open_audit_sink(command.audit, command.audit_log.as_deref())?;

    let engine = ValidationEngine::new(policy, MessageCatalog::english());
    let report = engine
        .validate_diagnostic(data, validation_time, sink.as_ref())
        .map_err(|err| CliError::new(t!("validate.failed", error = err)))?;

    match command.format {
        OutputFormat::Json => write_report_json(&report, command.output.as_deref())?,
        OutputFormat::Summary => write_report_summary(&report)?,
    }

    if report.all_signatures_passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_NOT_PASSED))
    }
}

/// Parses the validation time, defaulting to the current UTC instant.
fn resolve_validation_time(value: Option<&str>) -> CliResult<OffsetDateTime> {
    let Some(value) = value else {
        return Ok(OffsetDateTime::now_utc());
    };
    OffsetDateTime::parse(value.trim(), &Rfc3339)
        .map_err(|_| CliError::new(t!("validate.time_invalid", value = value)))
}

/// Resolves the policy for `validate`.
///
/// An explicit path, the policy environment variable, or a policy file in
/// the working directory is loaded strictly. Without any of them the
/// built-in default policy applies.
fn resolve_policy(path: Option<&Path>) -> CliResult<ValidationPolicy> {
    let configured = path.is_some()
        || std::env::var_os(POLICY_ENV_VAR).is_some()
        || Path::new(DEFAULT_POLICY_FILE).is_file();
    if !configured {
        return Ok(ValidationPolicy::default());
    }
    load_policy(path).map_err(|err| CliError::new(t!("policy.load_failed", error = err)))
}

/// Reads and parses the diagnostic data document.
fn read_diagnostic(path: &Path) -> CliResult<DiagnosticData> {
    let kind = t!("input.kind.diagnostic");
    let bytes = read_bytes_with_limit(path, MAX_DIAGNOSTIC_BYTES).map_err(|err| match err {
        ReadLimitError::Io(err) => {
            CliError::new(t!("input.read_failed", kind = kind, path = path.display(), error = err))
        }
        ReadLimitError::TooLarge {
            size,
            limit,
        } => CliError::new(t!(
            "input.read_too_large",
            kind = kind,
            path = path.display(),
            size = size,
            limit = limit
        )),
    })?;
    serde_json::from_slice(&bytes).map_err(|err| {
        CliError::new(t!("input.parse_failed", kind = kind, path = path.display(), error = err))
    })
}

/// Opens the requested audit sink.
fn open_audit_sink(
    target: AuditTarget,
    path: Option<&Path>,
) -> CliResult<Box<dyn ValidationAuditSink>> {
    match (target, path) {
        (AuditTarget::None, _) => Ok(Box::new(NoopAuditSink)),
        (AuditTarget::Stderr, _) => Ok(Box::new(StderrAuditSink)),
        (AuditTarget::File, Some(path)) => FileAuditSink::new(path)
            .map(|sink| Box::new(sink) as Box<dyn ValidationAuditSink>)
            .map_err(|err| {
                CliError::new(t!("validate.audit.open_failed", path = path.display(), error = err))
            }),
        (AuditTarget::File, None) => Err(CliError::new(t!("validate.audit.path_missing"))),
    }
}

/// Writes the canonical JSON report to `output` or stdout.
fn write_report_json(report: &ValidationReport, output: Option<&Path>) -> CliResult<()> {
    let mut bytes = serde_jcs::to_vec(report)
        .map_err(|err| CliError::new(t!("output.serialize_failed", error = err)))?;
    bytes.push(b'\n');
    match output {
        Some(path) => fs::write(path, &bytes).map_err(|err| {
            CliError::new(t!("output.report.write_failed", path = path.display(), error = err))
        }),
        None => write_stdout_bytes(&bytes).map_err(|err| CliError::new(output_error("stdout", &err))),
    }
}

/// Writes one localized line per token.
fn write_report_summary(report: &ValidationReport) -> CliResult<()> {
    let time = report.validation_time.format(&Rfc3339).map_err(|err| {
        CliError::new(t!("output.serialize_failed", error = err))
    })?;
    let mut lines = vec![t!("validate.summary.header", policy = report.policy_name, time = time)];
    for (id, revocation) in &report.revocations {
        lines.push(t!("validate.summary.revocation", id = id, verdict = revocation.verdict));
    }
    for (id, timestamp) in &report.timestamps {
        lines.push(t!("validate.summary.timestamp", id = id, verdict = timestamp.verdict));
    }
    if report.signatures.is_empty() {
        lines.push(t!("validate.summary.none"));
    }
    for (id, signature) in &report.signatures {
        lines.push(t!("validate.summary.signature", id = id, verdict = signature.verdict));
    }
    for line in lines {
        write_stdout_line(&line).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(())
}

// ============================================================================
// SECTION: Policy Commands
// ============================================================================

/// Dispatches policy subcommands.
fn command_policy(command: PolicyCommand) -> CliResult<ExitCode> {
    match command {
        PolicyCommand::Check(command) => command_policy_check(&command),
        PolicyCommand::Example => command_policy_example(),
    }
}

/// Loads a policy file strictly and reports its name and model.
fn command_policy_check(command: &PolicyCheckCommand) -> CliResult<ExitCode> {
    let policy = load_policy(command.policy.as_deref())
        .map_err(|err| CliError::new(t!("policy.load_failed", error = err)))?;
    write_stdout_line(&t!("policy.check.ok", name = policy.name, model = policy.model.as_str()))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Prints the default policy as TOML.
fn command_policy_example() -> CliResult<ExitCode> {
    write_stdout_bytes(policy_toml_example().as_bytes())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Locale
// ============================================================================

/// Resolves the CLI locale from the flag, then the environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: I/O Helpers
// ============================================================================

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let size = file.metadata().map_err(ReadLimitError::Io)?.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let mut limited = file.take(limit.saturating_add(1));
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        return Err(ReadLimitError::TooLarge {
            size: u64::try_from(bytes.len()).unwrap_or(u64::MAX),
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
