//! JSONL run logs for the conformance harness.
//!
//! Every line is one [`LogEntry`]. Four keys are always present (`timestamp`,
//! `trace_id`, `level`, `event`); the rest describe the case or run the line
//! belongs to and are omitted when unset. Trace ids have the shape
//! `<run_id>::<campaign>::<seq>` with a zero-padded, 1-based sequence.
//!
//! [`ArtifactIndex`] ties a log to the fixture, report, and log files of the
//! same run by SHA-256 digest.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::execute::hex_lower;
use crate::verify::VerificationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
    Skip,
    Error,
}

impl Outcome {
    #[must_use]
    pub fn from_passed(passed: bool) -> Self {
        if passed { Self::Pass } else { Self::Fail }
    }
}

/// Which workflow produced the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Unit,
    Conformance,
    Perf,
}

/// One JSONL record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub trace_id: String,
    pub level: LogLevel,
    pub event: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<StreamKind>,
    /// Octet policy the run used (`decimal` or `strict`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Fixture family, e.g. `inet/normalize`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_family: Option<String>,
    /// Operation under test, e.g. `to_binary`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_ns: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_refs: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl LogEntry {
    /// An entry stamped with the current time. Leave `trace_id` empty to have
    /// [`LogEmitter::emit_entry`] assign the next one.
    #[must_use]
    pub fn new(trace_id: impl Into<String>, level: LogLevel, event: impl Into<String>) -> Self {
        Self {
            timestamp: now_utc(),
            trace_id: trace_id.into(),
            level,
            event: event.into(),
            stream: None,
            mode: None,
            api_family: None,
            symbol: None,
            outcome: None,
            latency_ns: None,
            duration_ms: None,
            artifact_refs: None,
            details: None,
        }
    }

    /// The `case_result` line for one verified fixture case. Failures are
    /// logged at error level with the expected and actual outputs attached.
    #[must_use]
    pub fn case_result(result: &VerificationResult, family: &str, mode: &str) -> Self {
        let level = if result.passed {
            LogLevel::Info
        } else {
            LogLevel::Error
        };
        let mut entry = Self::new("", level, "case_result")
            .with_stream(StreamKind::Conformance)
            .with_mode(mode)
            .with_api(family, result.function.as_str())
            .with_outcome(Outcome::from_passed(result.passed))
            .with_latency_ns(result.latency_ns);
        entry.details = Some(if result.passed {
            serde_json::json!({ "case": result.case_name })
        } else {
            serde_json::json!({
                "case": result.case_name,
                "reference": result.reference,
                "expected": result.expected,
                "actual": result.actual,
            })
        });
        entry
    }

    #[must_use]
    pub fn with_stream(mut self, stream: StreamKind) -> Self {
        self.stream = Some(stream);
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Sets `api_family` and `symbol` together.
    #[must_use]
    pub fn with_api(mut self, family: impl Into<String>, symbol: impl Into<String>) -> Self {
        self.api_family = Some(family.into());
        self.symbol = Some(symbol.into());
        self
    }

    #[must_use]
    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    #[must_use]
    pub fn with_latency_ns(mut self, ns: u64) -> Self {
        self.latency_ns = Some(ns);
        self
    }

    #[must_use]
    pub fn with_duration_ms(mut self, ms: u64) -> Self {
        self.duration_ms = Some(ms);
        self
    }

    #[must_use]
    pub fn with_artifacts(mut self, refs: Vec<String>) -> Self {
        self.artifact_refs = Some(refs);
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// One JSONL line without the trailing newline.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// ---------------------------------------------------------------------------
// Emitter
// ---------------------------------------------------------------------------

/// Sequences trace ids and writes entries as JSONL.
pub struct LogEmitter<W: Write = BufWriter<File>> {
    out: W,
    run_id: String,
    campaign: String,
    seq: u64,
}

impl LogEmitter {
    /// Creates (or truncates) `path` and logs to it.
    pub fn to_file(path: &Path, run_id: &str, campaign: &str) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?), run_id, campaign))
    }
}

impl LogEmitter<Vec<u8>> {
    /// Logs into memory; see [`LogEmitter::into_inner`].
    #[must_use]
    pub fn to_buffer(run_id: &str, campaign: &str) -> Self {
        Self::new(Vec::new(), run_id, campaign)
    }
}

impl<W: Write> LogEmitter<W> {
    pub fn new(out: W, run_id: &str, campaign: &str) -> Self {
        Self {
            out,
            run_id: run_id.to_owned(),
            campaign: campaign.to_owned(),
            seq: 0,
        }
    }

    fn next_trace_id(&mut self) -> String {
        self.seq += 1;
        format!("{}::{}::{:03}", self.run_id, self.campaign, self.seq)
    }

    /// Logs a bare event and returns the entry that was written.
    pub fn emit(&mut self, level: LogLevel, event: &str) -> io::Result<LogEntry> {
        let entry = LogEntry::new(self.next_trace_id(), level, event);
        self.write_line(&entry)?;
        Ok(entry)
    }

    /// Logs `entry`, assigning the next trace id if it has none.
    pub fn emit_entry(&mut self, mut entry: LogEntry) -> io::Result<()> {
        if entry.trace_id.is_empty() {
            entry.trace_id = self.next_trace_id();
        }
        self.write_line(&entry)
    }

    fn write_line(&mut self, entry: &LogEntry) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, entry).map_err(io::Error::other)?;
        self.out.write_all(b"\n")
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Flushes and hands back the underlying writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

// ---------------------------------------------------------------------------
// Artifact index
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactEntry {
    pub path: String,
    /// `fixture`, `log`, or `report`.
    pub kind: String,
    pub sha256: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
}

/// Digest manifest for the files of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactIndex {
    pub index_version: u32,
    pub run_id: String,
    pub generated_utc: String,
    pub artifacts: Vec<ArtifactEntry>,
}

impl ArtifactIndex {
    #[must_use]
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            index_version: 1,
            run_id: run_id.into(),
            generated_utc: now_utc(),
            artifacts: Vec::new(),
        }
    }

    /// Records an artifact whose digest is already known.
    pub fn add(
        &mut self,
        path: impl Into<String>,
        kind: impl Into<String>,
        sha256: impl Into<String>,
    ) -> &mut Self {
        self.artifacts.push(ArtifactEntry {
            path: path.into(),
            kind: kind.into(),
            sha256: sha256.into(),
            size_bytes: None,
        });
        self
    }

    /// Reads `path`, digests it, and records it with its size.
    pub fn add_file(&mut self, path: &Path, kind: impl Into<String>) -> io::Result<&mut Self> {
        let data = std::fs::read(path)?;
        self.artifacts.push(ArtifactEntry {
            path: path.display().to_string(),
            kind: kind.into(),
            sha256: sha256_hex(&data),
            size_bytes: u64::try_from(data.len()).ok(),
        });
        Ok(self)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    hex_lower(&Sha256::digest(data))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

const REQUIRED_FIELDS: [&str; 4] = ["timestamp", "trace_id", "level", "event"];

const ENUM_FIELDS: [(&str, &[&str]); 4] = [
    ("level", &["trace", "debug", "info", "warn", "error"]),
    ("stream", &["unit", "conformance", "perf"]),
    ("mode", &["decimal", "strict"]),
    ("outcome", &["pass", "fail", "skip", "error"]),
];

/// One problem found in a log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogValidationError {
    pub line_number: usize,
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for LogValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}: field '{}': {}",
            self.line_number, self.field, self.message
        )
    }
}

/// Accepts `<run_id>::<campaign>::<seq>` with a non-empty run and campaign
/// and a decimal sequence.
fn is_trace_id(s: &str) -> bool {
    let mut parts = s.rsplitn(3, "::");
    let (Some(seq), Some(campaign), Some(run)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    !run.is_empty()
        && !campaign.is_empty()
        && !seq.is_empty()
        && seq.bytes().all(|b| b.is_ascii_digit())
}

/// Checks one JSONL line and returns the decoded entry if it conforms.
pub fn validate_log_line(
    line: &str,
    line_number: usize,
) -> Result<LogEntry, Vec<LogValidationError>> {
    let violation = |field: &str, message: String| LogValidationError {
        line_number,
        field: field.to_owned(),
        message,
    };

    let value: serde_json::Value = serde_json::from_str(line)
        .map_err(|e| vec![violation("<json>", format!("invalid JSON: {e}"))])?;
    let Some(obj) = value.as_object() else {
        return Err(vec![violation("<root>", "expected JSON object".to_owned())]);
    };

    let mut errors: Vec<LogValidationError> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !obj.contains_key(**field))
        .map(|field| violation(field, "required field missing".to_owned()))
        .collect();

    for (field, allowed) in ENUM_FIELDS {
        if let Some(v) = obj.get(field).and_then(serde_json::Value::as_str)
            && !allowed.contains(&v)
        {
            errors.push(violation(field, format!("invalid {field}: '{v}'")));
        }
    }

    if let Some(trace_id) = obj.get("trace_id").and_then(serde_json::Value::as_str)
        && !is_trace_id(trace_id)
    {
        errors.push(violation(
            "trace_id",
            format!("expected <run_id>::<campaign>::<seq>, got '{trace_id}'"),
        ));
    }

    if !errors.is_empty() {
        return Err(errors);
    }
    serde_json::from_value(value)
        .map_err(|e| vec![violation("<entry>", format!("failed to deserialize: {e}"))])
}

/// Checks every non-blank line of a JSONL file. Returns the number of lines
/// checked and all problems found.
pub fn validate_log_file(path: &Path) -> io::Result<(usize, Vec<LogValidationError>)> {
    let content = std::fs::read_to_string(path)?;
    let mut checked = 0;
    let mut errors = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        checked += 1;
        if let Err(found) = validate_log_line(line, idx + 1) {
            errors.extend(found);
        }
    }
    Ok((checked, errors))
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

fn now_utc() -> String {
    let since_epoch = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    format_utc(since_epoch.as_secs(), since_epoch.subsec_millis())
}

/// Formats seconds since the epoch as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
fn format_utc(secs: u64, millis: u32) -> String {
    let days = secs / 86_400;
    let rem = secs % 86_400;
    let (year, month, day) = civil_from_days(days as i64);
    format!(
        "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}.{millis:03}Z",
        rem / 3600,
        (rem % 3600) / 60,
        rem % 60,
    )
}

// Proleptic Gregorian date from days since 1970-01-01.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(passed: bool) -> VerificationResult {
        VerificationResult {
            case_name: "normalize_lowercase [strict]".into(),
            reference: "RFC 5952 4.3".into(),
            function: "normalize".into(),
            passed,
            expected: "2001:db8::1".into(),
            actual: if passed { "2001:db8::1" } else { "2001:DB8::1" }.into(),
            diff: None,
            latency_ns: 900,
        }
    }

    #[test]
    fn bare_entry_has_only_required_keys() {
        let entry = LogEntry::new("run-1::smoke::001", LogLevel::Info, "run_start");
        let parsed: serde_json::Value = serde_json::from_str(&entry.to_jsonl().unwrap()).unwrap();
        let keys: Vec<&str> = parsed
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys.len(), 4, "{keys:?}");
        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["event"], "run_start");
    }

    #[test]
    fn case_result_entries() {
        let pass = LogEntry::case_result(&result(true), "inet/normalize", "strict");
        assert_eq!(pass.level, LogLevel::Info);
        assert_eq!(pass.outcome, Some(Outcome::Pass));
        assert_eq!(pass.symbol.as_deref(), Some("normalize"));
        assert_eq!(pass.latency_ns, Some(900));
        assert!(pass.details.as_ref().unwrap().get("actual").is_none());

        let fail = LogEntry::case_result(&result(false), "inet/normalize", "strict");
        assert_eq!(fail.level, LogLevel::Error);
        assert_eq!(fail.outcome, Some(Outcome::Fail));
        assert_eq!(fail.details.as_ref().unwrap()["actual"], "2001:DB8::1");
        assert_eq!(fail.stream, Some(StreamKind::Conformance));
    }

    #[test]
    fn buffered_emitter_sequences_and_validates() {
        let mut em = LogEmitter::to_buffer("run-42", "smoke");
        let first = em.emit(LogLevel::Info, "start").unwrap();
        em.emit_entry(LogEntry::case_result(&result(true), "inet/normalize", "decimal"))
            .unwrap();
        em.emit_entry(LogEntry::new("fixed::trace::900", LogLevel::Debug, "pinned"))
            .unwrap();
        assert_eq!(first.trace_id, "run-42::smoke::001");

        let bytes = em.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let traces: Vec<String> = text
            .lines()
            .enumerate()
            .map(|(i, l)| validate_log_line(l, i + 1).unwrap().trace_id)
            .collect();
        assert_eq!(
            traces,
            ["run-42::smoke::001", "run-42::smoke::002", "fixed::trace::900"]
        );
    }

    #[test]
    fn validator_collects_every_violation() {
        let line = r#"{"timestamp":"t","trace_id":"a::b::x","level":"critical","event":"e","mode":"lenient"}"#;
        let errors = validate_log_line(line, 7).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["level", "mode", "trace_id"]);
        assert!(errors.iter().all(|e| e.line_number == 7));
    }

    #[test]
    fn validator_rejects_non_objects() {
        let errors = validate_log_line("not json", 1).unwrap_err();
        assert_eq!(errors[0].field, "<json>");
        let errors = validate_log_line("[1,2]", 1).unwrap_err();
        assert_eq!(errors[0].field, "<root>");
    }

    #[test]
    fn trace_id_shape() {
        assert!(is_trace_id("run-1::verify::001"));
        assert!(is_trace_id("a::b::c::12"));
        assert!(!is_trace_id("flat"));
        assert!(!is_trace_id("run::seq"));
        assert!(!is_trace_id("::campaign::1"));
        assert!(!is_trace_id("run::campaign::"));
    }

    #[test]
    fn artifact_digests() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        let mut idx = ArtifactIndex::new("run-001");
        idx.add("log.jsonl", "log", sha256_hex(b"x"))
            .add("report.md", "report", sha256_hex(b"y"));
        let parsed: serde_json::Value = serde_json::from_str(&idx.to_json().unwrap()).unwrap();
        assert_eq!(parsed["run_id"], "run-001");
        assert_eq!(parsed["artifacts"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn utc_formatting() {
        assert_eq!(format_utc(0, 0), "1970-01-01T00:00:00.000Z");
        assert_eq!(format_utc(951_782_400, 5), "2000-02-29T00:00:00.005Z");
        assert_eq!(format_utc(1_792_368_000 + 3_661, 0), "2026-10-19T01:01:01.000Z");
    }
}
