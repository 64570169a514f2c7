//! CLI entrypoint for the ipcanon conformance harness.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};

use ipcanon_core::{AddrError, ParseOptions, normalize_with, to_binary_with};
use ipcanon_harness::config::{octet_policy, policy_for_mode};
use ipcanon_harness::execute::hex_lower;
use ipcanon_harness::fixtures::load_fixture_sets;
use ipcanon_harness::structured_log::{
    ArtifactIndex, LogEmitter, LogEntry, LogLevel, Outcome, StreamKind, validate_log_file,
};
use ipcanon_harness::{ConformanceReport, HarnessError, TestRunner};

/// Conformance tooling for ipcanon.
#[derive(Debug, Parser)]
#[command(name = "ipcanon-harness")]
#[command(about = "Conformance testing harness for ipcanon")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Verify the codecs against fixture files.
    Verify {
        /// Fixture JSON file, or a directory of them.
        #[arg(long)]
        fixture: PathBuf,
        /// Octet policy to run under (`decimal` or `strict`); defaults to
        /// IPCANON_OCTET_POLICY.
        #[arg(long)]
        mode: Option<String>,
        /// Output report path (markdown). If omitted, prints to stdout.
        #[arg(long)]
        report: Option<PathBuf>,
        /// Structured JSONL log output path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Artifact index output path (requires --log).
        #[arg(long, requires = "log")]
        artifact_index: Option<PathBuf>,
        /// Optional fixed timestamp string for deterministic report generation.
        #[arg(long)]
        timestamp: Option<String>,
    },
    /// Print the canonical text and binary form of one address as JSON.
    Probe {
        /// Address text.
        address: String,
        /// Octet policy (`decimal` or `strict`); defaults to IPCANON_OCTET_POLICY.
        #[arg(long)]
        mode: Option<String>,
    },
    /// Validate a structured JSONL log file.
    ValidateLog {
        /// Log path.
        log: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Verify {
            fixture,
            mode,
            report,
            log,
            artifact_index,
            timestamp,
        } => run_verify(VerifyArgs {
            fixture,
            mode,
            report,
            log,
            artifact_index,
            timestamp,
        }),
        Command::Probe { address, mode } => run_probe(&address, mode.as_deref()),
        Command::ValidateLog { log } => run_validate_log(&log),
    };
    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

struct VerifyArgs {
    fixture: PathBuf,
    mode: Option<String>,
    report: Option<PathBuf>,
    log: Option<PathBuf>,
    artifact_index: Option<PathBuf>,
    timestamp: Option<String>,
}

fn resolve_mode(mode: Option<&str>) -> String {
    mode.map_or_else(
        || octet_policy().as_str().to_string(),
        |m| policy_for_mode(m).as_str().to_string(),
    )
}

fn run_verify(args: VerifyArgs) -> Result<ExitCode, HarnessError> {
    let mode = resolve_mode(args.mode.as_deref());
    let run_id = format!("run-{}", std::process::id());
    let started = Instant::now();

    let mut emitter = match &args.log {
        Some(path) => Some(LogEmitter::to_file(path, &run_id, "verify")?),
        None => None,
    };
    if let Some(em) = emitter.as_mut() {
        em.emit_entry(
            LogEntry::new("", LogLevel::Info, "verify_start")
                .with_stream(StreamKind::Conformance)
                .with_mode(&mode)
                .with_details(serde_json::json!({ "fixture": args.fixture.display().to_string() })),
        )?;
    }

    let sets = load_fixture_sets(&args.fixture)?;
    let mut results = Vec::new();
    for (path, set) in &sets {
        let runner = TestRunner::new(set.family.clone(), mode.clone());
        let set_results = runner.run(set);
        if let Some(em) = emitter.as_mut() {
            for r in &set_results {
                em.emit_entry(
                    LogEntry::case_result(r, &set.family, &mode)
                        .with_artifacts(vec![path.display().to_string()]),
                )?;
            }
        }
        results.extend(set_results);
    }

    let timestamp = args
        .timestamp
        .unwrap_or_else(|| format!("unix:{}", unix_secs()));
    let report = ConformanceReport::new("ipcanon conformance", &mode, timestamp, results);
    let markdown = report.to_markdown();
    match &args.report {
        Some(path) => std::fs::write(path, &markdown)?,
        None => print!("{markdown}"),
    }

    if let Some(mut em) = emitter {
        em.emit_entry(
            LogEntry::new("", LogLevel::Info, "verify_end")
                .with_stream(StreamKind::Conformance)
                .with_mode(&mode)
                .with_outcome(Outcome::from_passed(report.all_passed()))
                .with_duration_ms(started.elapsed().as_millis() as u64)
                .with_details(serde_json::json!({
                    "total": report.total,
                    "passed": report.passed,
                    "failed": report.failed,
                })),
        )?;
        em.flush()?;
    }

    if let (Some(index_path), Some(log_path)) = (&args.artifact_index, &args.log) {
        let mut index = ArtifactIndex::new(&run_id);
        for (path, _) in &sets {
            index.add_file(path, "fixture")?;
        }
        index.add_file(log_path, "log")?;
        if let Some(report_path) = &args.report {
            index.add_file(report_path, "report")?;
        }
        std::fs::write(index_path, index.to_json()?)?;
    }

    Ok(if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_probe(address: &str, mode: Option<&str>) -> Result<ExitCode, HarnessError> {
    let mode = resolve_mode(mode);
    let opts = ParseOptions::default().with_octets(policy_for_mode(&mode));
    let describe = |r: Result<String, AddrError>| match r {
        Ok(v) => serde_json::json!({ "ok": v }),
        Err(e) => serde_json::json!({ "error": e.code(), "message": e.to_string() }),
    };
    let normalized = normalize_with(address, &opts);
    let ok = normalized.is_ok();
    let out = serde_json::json!({
        "input": address,
        "mode": mode,
        "normalize": describe(normalized),
        "to_binary": describe(to_binary_with(address, &opts).map(|b| hex_lower(&b))),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn run_validate_log(path: &std::path::Path) -> Result<ExitCode, HarnessError> {
    let (lines, errors) = validate_log_file(path)?;
    for err in &errors {
        eprintln!("{err}");
    }
    println!("{lines} line(s), {} error(s)", errors.len());
    Ok(if errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn unix_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
