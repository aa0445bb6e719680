//! Implementation of the `loctext check` command.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use loctext::parser::parse_config;
use loctext::{Language, Store};
use miette::{IntoDiagnostic, Report, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::debug;

use crate::output::LocDiagnostic;

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Locale directories to check (e.g. lang/en)
    #[arg(required = true)]
    pub dirs: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat lint warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// JSON output for one checked directory.
#[derive(Debug, Default, Serialize)]
struct CheckReport {
    dir: String,
    keys: usize,
    errors: Vec<String>,
    warnings: Vec<String>,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<i32> {
    let mut reports = Vec::with_capacity(args.dirs.len());
    for dir in &args.dirs {
        reports.push(check_dir(dir, args.json)?);
    }

    let errors: usize = reports.iter().map(|r| r.errors.len()).sum();
    let warnings: usize = reports.iter().map(|r| r.warnings.len()).sum();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports).into_diagnostic()?);
    } else {
        for report in &reports {
            for warning in &report.warnings {
                println!("{}: {} {}", report.dir, "warning:".yellow(), warning);
            }
        }
        let summary = format!(
            "checked {} director{}: {} key(s), {} error(s), {} warning(s)",
            reports.len(),
            if reports.len() == 1 { "y" } else { "ies" },
            reports.iter().map(|r| r.keys).sum::<usize>(),
            errors,
            warnings
        );
        if errors == 0 {
            println!("{}", summary.green());
        } else {
            println!("{}", summary.red());
        }
    }

    if errors > 0 || (args.strict && warnings > 0) {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

/// Check one locale directory: parse each resource file for precise
/// diagnostics, then load the whole directory and lint it.
fn check_dir(dir: &Path, json: bool) -> Result<CheckReport> {
    let mut report = CheckReport {
        dir: dir.display().to_string(),
        ..CheckReport::default()
    };

    for path in Store::resource_files(dir).into_diagnostic()? {
        debug!(path = %path.display(), "checking resource file");
        let bytes = fs::read(&path).into_diagnostic()?;
        let parsed = parse_config(&bytes).and_then(|tree| tree.flatten().map(|_| ()));
        if let Err(err) = parsed {
            let content = String::from_utf8_lossy(&bytes);
            let diagnostic = LocDiagnostic::from_parse_error(&path, &content, &err);
            if !json {
                eprintln!("{:?}", Report::new(diagnostic));
            }
            report.errors.push(format!("{}: {err}", path.display()));
        }
    }
    if !report.errors.is_empty() {
        return Ok(report);
    }

    let language = dir
        .file_name()
        .map(|name| Language::from_code(&name.to_string_lossy()))
        .unwrap_or_default();
    let mut store = Store::new();
    store.language_flag().set(language);

    match store.init(dir) {
        Ok(keys) => {
            report.keys = keys;
            report.warnings = store.lint().iter().map(ToString::to_string).collect();
        }
        Err(err) => {
            if !json {
                eprintln!("{:?}", Report::msg(err.to_string()));
            }
            report.errors.push(err.to_string());
        }
    }
    Ok(report)
}

