//! Command-line interface for bigocheck.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::analysis::{analyze_with, EngineConfig};
use crate::config::{self, Config};
use crate::report::{self, FileOutcome};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Default configuration written by `init`.
const DEFAULT_TEMPLATE: &str = include_str!("templates/default.yaml");

/// Estimate Big-O time and space complexity of practice solutions.
///
/// bigocheck scans Python, C and C++ snippets structurally (loop nesting,
/// recursion, library calls) and labels them with approximate complexity.
/// It never executes the code.
#[derive(Parser)]
#[command(name = "bigocheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (overridden by BIGOCHECK_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Estimate complexity of a file or a directory of solutions
    #[command(visible_alias = "check")]
    Analyze(AnalyzeArgs),
    /// Write a default bigocheck.yaml
    Init(InitArgs),
}

/// Arguments for the analyze command.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to analyze (file or directory)
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Show the decision rules and signals behind each label
    #[arg(short, long)]
    pub explain: bool,
}

/// Arguments for the init command.
#[derive(Args)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "bigocheck.yaml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Collect solution files under `root`.
///
/// Each directory contributes at most one file: the first name from
/// `solution_files` that exists in it.
pub fn collect_solutions(root: &Path, config: &Config) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            if !e.file_type().is_dir() || e.depth() == 0 {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            if name.starts_with('.') || name == "node_modules" || name == "target" {
                return false;
            }
            !config.is_path_excluded(e.path())
        })
    {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let dir = entry.path();
        let found = config
            .solution_files
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file() && !config.is_path_excluded(candidate));

        if let Some(path) = found {
            debug!(path = %path.display(), "found solution");
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Analyze every file in parallel. Output order follows `files`.
pub fn analyze_files(files: &[PathBuf], root: &Path, engine: &EngineConfig) -> Vec<FileOutcome> {
    files
        .par_iter()
        .map(|path| {
            let display = path
                .strip_prefix(root)
                .ok()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(path.as_path())
                .to_string_lossy()
                .to_string();

            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();

            let outcome = std::fs::read_to_string(path)
                .map(|code| analyze_with(&code, &filename, engine))
                .map_err(|e| {
                    warn!(path = %path.display(), error = %e, "cannot read file");
                    e.to_string()
                });

            FileOutcome {
                file: display,
                outcome,
            }
        })
        .collect()
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    // Validate format
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let (config, config_path) = match config::load(args.config.as_deref(), &cwd) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: invalid config: {:#}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let metadata = match std::fs::metadata(&args.path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    let (files, root) = if metadata.is_dir() {
        (collect_solutions(&args.path, &config)?, args.path.clone())
    } else {
        let parent = args.path.parent().map(Path::to_path_buf).unwrap_or_default();
        (vec![args.path.clone()], parent)
    };

    if files.is_empty() {
        eprintln!("Warning: no solution files found");
        return Ok(EXIT_SUCCESS);
    }
    debug!(count = files.len(), "analyzing files");

    let outcomes = analyze_files(&files, &root, &config.engine);

    let path_str = args.path.to_string_lossy().to_string();
    match args.format.as_str() {
        "json" => report::write_json(&path_str, &outcomes)?,
        _ => {
            let config_str = config_path.map(|p| p.to_string_lossy().to_string());
            report::write_pretty(&path_str, config_str.as_deref(), &outcomes, args.explain);
        }
    }

    if outcomes.iter().any(FileOutcome::is_error) {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    // Check if output already exists
    if args.output.exists() && !args.force {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Use --force to overwrite or --output to choose a different path");
        return Ok(EXIT_ERROR);
    }

    // Create output directory if needed
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, DEFAULT_TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to tune the engine", args.output.display());
    println!(
        "  2. Run: bigocheck analyze . --config {}",
        args.output.display()
    );

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_collect_solutions_prefers_configured_order() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a/main.py", "x = 1\n");
        write(tmp.path(), "a/main.cpp", "int x = 1;\n");
        write(tmp.path(), "b/main.cpp", "int x = 1;\n");
        write(tmp.path(), "c/notes.txt", "nothing\n");

        let files = collect_solutions(tmp.path(), &Config::default()).unwrap();
        let rel: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(tmp.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            rel,
            vec![PathBuf::from("a/main.py"), PathBuf::from("b/main.cpp")]
        );
    }

    #[test]
    fn test_collect_solutions_skips_hidden_and_excluded() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), ".cache/main.py", "x = 1\n");
        write(tmp.path(), "node_modules/pkg/main.c", "int x;\n");
        write(tmp.path(), "drafts/p1/main.py", "x = 1\n");
        write(tmp.path(), "done/p2/main.py", "x = 1\n");

        let config = Config {
            excluded_paths: vec!["**/drafts/**".to_string(), "**/drafts".to_string()],
            ..Config::default()
        };
        let files = collect_solutions(tmp.path(), &config).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("done/p2/main.py"));
    }

    #[test]
    fn test_analyze_files_reports_unreadable_file() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "ok/main.py", "for x in xs:\n    pass\n");
        let files = vec![tmp.path().join("ok/main.py"), tmp.path().join("gone/main.py")];

        let outcomes = analyze_files(&files, tmp.path(), &EngineConfig::default());
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].file, "ok/main.py");
        assert!(!outcomes[0].is_error());
        assert!(outcomes[1].is_error());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("bigocheck.yaml");

        let args = InitArgs {
            output: output.clone(),
            force: false,
        };
        assert_eq!(run_init(&args).unwrap(), EXIT_SUCCESS);
        assert_eq!(fs::read_to_string(&output).unwrap(), DEFAULT_TEMPLATE);

        assert_eq!(run_init(&args).unwrap(), EXIT_ERROR);

        let forced = InitArgs {
            output,
            force: true,
        };
        assert_eq!(run_init(&forced).unwrap(), EXIT_SUCCESS);
    }

    #[test]
    fn test_cli_parses_alias_and_global_flag() {
        let cli = Cli::parse_from(["bigocheck", "check", "src", "--format", "json", "-v"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.path, PathBuf::from("src"));
                assert_eq!(args.format, "json");
                assert!(!args.explain);
            }
            Commands::Init(_) => panic!("expected analyze"),
        }
    }
}
