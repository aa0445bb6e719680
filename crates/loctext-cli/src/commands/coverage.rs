//! `loctext coverage`: which source keys each locale defines.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use clap::Args;
use loctext::Store;
use loctext::interpreter::DEFAULT_RESOURCE_ROOT;
use miette::{IntoDiagnostic, Result, miette};
use owo_colors::OwoColorize;

use crate::output::table::{LanguageCoverage, format_coverage_table};

#[derive(Debug, Args)]
pub struct CoverageArgs {
    /// Directory holding one subdirectory per locale.
    #[arg(long, default_value = DEFAULT_RESOURCE_ROOT)]
    pub root: PathBuf,

    /// Locale the others are measured against.
    #[arg(long, default_value = "en")]
    pub source: String,

    /// Locales to measure (comma-separated).
    #[arg(long, value_delimiter = ',', required = true)]
    pub lang: Vec<String>,

    /// Fail when any locale lacks a source key.
    #[arg(long)]
    pub strict: bool,

    /// Print the comparison as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Keys defined by `root/<language>`. A missing directory defines nothing.
fn locale_keys(root: &Path, language: &str) -> Result<BTreeSet<String>> {
    if !root.join(language).is_dir() {
        return Ok(BTreeSet::new());
    }
    let mut store = Store::builder().resource_root(root).build();
    store
        .load(language)
        .map_err(|e| miette!("failed to load locale '{language}': {e}"))?;
    Ok(store.keys().map(str::to_owned).collect())
}

pub fn run_coverage(args: CoverageArgs) -> Result<i32> {
    if !args.root.join(&args.source).is_dir() {
        return Err(miette!(
            "source locale '{}' not found under {}",
            args.source,
            args.root.display()
        ));
    }
    let source = locale_keys(&args.root, &args.source)?;
    let report = args
        .lang
        .iter()
        .map(|lang| {
            let keys = locale_keys(&args.root, lang)?;
            Ok(LanguageCoverage::compare(lang, &source, &keys))
        })
        .collect::<Result<Vec<_>>>()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
    } else {
        println!("{}", format_coverage_table(&report));
        for entry in report.iter().filter(|entry| !entry.is_complete()) {
            println!("\n{} {}:", "missing in".yellow(), entry.language.bold());
            for key in &entry.missing {
                println!("  {key}");
            }
        }
    }

    let complete = report.iter().all(LanguageCoverage::is_complete);
    Ok(if args.strict && !complete { exitcode::DATAERR } else { exitcode::OK })
}
