//! Output formatting for bigocheck results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};

use crate::analysis::{detect_language, Analysis};
use crate::classify::BigO;

/// Outcome of analyzing one file.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub file: String,
    /// The analysis, or the reason the file could not be read.
    pub outcome: Result<Analysis, String>,
}

impl FileOutcome {
    pub fn is_error(&self) -> bool {
        self.outcome.is_err()
    }
}

// =============================================================================
// JSON Format
// =============================================================================

/// Top-level JSON report.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    pub files_analyzed: usize,
    pub results: Vec<JsonResult>,
}

/// One file's entry in the JSON report.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonResult {
    pub file: String,
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_rule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_rule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Build the JSON report structure.
pub fn build_json_report(path: &str, outcomes: &[FileOutcome]) -> JsonReport {
    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: path.to_string(),
        files_analyzed: outcomes.iter().filter(|o| !o.is_error()).count(),
        results: outcomes.iter().map(outcome_to_json).collect(),
    }
}

/// Write results in JSON format.
pub fn write_json(path: &str, outcomes: &[FileOutcome]) -> anyhow::Result<()> {
    let report = build_json_report(path, outcomes);
    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

fn outcome_to_json(o: &FileOutcome) -> JsonResult {
    match &o.outcome {
        Ok(a) => JsonResult {
            file: o.file.clone(),
            language: a.language.to_string(),
            time: Some(a.result.time.to_string()),
            space: Some(a.result.space.to_string()),
            time_rule: Some(a.time_rule.as_str().to_string()),
            space_rule: Some(a.space_rule.as_str().to_string()),
            error: None,
        },
        Err(e) => JsonResult {
            file: o.file.clone(),
            language: detect_language(&o.file).to_string(),
            time: None,
            space: None,
            time_rule: None,
            space_rule: None,
            error: Some(e.clone()),
        },
    }
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in colored terminal format.
pub fn write_pretty(
    path: &str,
    config_path: Option<&str>,
    outcomes: &[FileOutcome],
    explain: bool,
) {
    // Header
    println!();
    print!("  ");
    print!("{}", "bigocheck".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Analyzing: ".dimmed());
    println!("{}", path);
    print!("  {}", "Config:    ".dimmed());
    println!("{}", config_path.unwrap_or("(defaults)"));
    println!();

    let width = outcomes
        .iter()
        .map(|o| o.file.len())
        .max()
        .unwrap_or(0)
        .max(4);

    println!(
        "  {:<width$}  {:<8}  {:<12}  {}",
        "File".bold(),
        "Lang".bold(),
        "Time".bold(),
        "Space".bold(),
        width = width
    );

    for o in outcomes {
        match &o.outcome {
            Ok(a) => {
                println!(
                    "  {:<width$}  {:<8}  {}  {}",
                    o.file.blue(),
                    a.language.as_str(),
                    colored_big_o(a.result.time, 12),
                    colored_big_o(a.result.space, 0),
                    width = width
                );
                if explain {
                    write_explanation(a);
                }
            }
            Err(e) => {
                println!(
                    "  {:<width$}  {}",
                    o.file.blue(),
                    format!("error: {}", e).red(),
                    width = width
                );
            }
        }
    }

    println!();
    write_summary(outcomes);
    println!();
}

fn write_explanation(a: &Analysis) {
    let scope = &a.signals.scope;
    println!(
        "      {} {}   {} {}",
        "time:".dimmed(),
        a.time_rule.as_str(),
        "space:".dimmed(),
        a.space_rule.as_str()
    );
    println!(
        "      {} depth={} loops={} constant_only={} char={} bucket={} amortized={}",
        "scope:".dimmed(),
        scope.max_effective_depth,
        scope.loops_seen,
        scope.has_only_constant_loops,
        scope.has_char_iteration,
        scope.has_bucket_traversal,
        scope.has_amortized_linear
    );
    if a.signals.recursion.detected {
        println!(
            "      {} {} (max {} self-calls)",
            "recursion:".dimmed(),
            a.signals.recursion.recursive_functions.join(", "),
            a.signals.recursion.max_self_calls
        );
    }
}

/// Pad before coloring so escape codes do not upset alignment.
fn colored_big_o(big_o: BigO, width: usize) -> ColoredString {
    let text = format!("{:<width$}", big_o.to_string(), width = width);
    match big_o {
        BigO::Constant | BigO::Logarithmic => text.green(),
        BigO::Linear | BigO::Linearithmic | BigO::LinearLogK => text.green().bold(),
        BigO::LinearTimesK | BigO::LinearTimesM | BigO::Polynomial(2) => text.yellow(),
        BigO::Polynomial(_) => text.yellow().bold(),
        BigO::Exponential => text.red(),
    }
}

fn write_summary(outcomes: &[FileOutcome]) {
    let errors = outcomes.iter().filter(|o| o.is_error()).count();
    let analyzed = outcomes.len() - errors;

    print!("  {} analyzed", analyzed.to_string().bold());
    if errors > 0 {
        print!(", {}", format!("{} failed", errors).red());
    }
    println!();
}
