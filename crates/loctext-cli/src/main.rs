//! `loctext`: inspect and render locale directories from the shell.

mod commands;
mod output;

use std::io;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{CheckArgs, CoverageArgs, EvalArgs, run_check, run_coverage, run_eval};
use miette::MietteHandlerOpts;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "loctext", version, about = "Check, measure and render loctext locales")]
struct Cli {
    /// Colorize output: auto, always or never
    #[arg(long, value_enum, default_value_t = Coloring::Auto, global = true)]
    color: Coloring,

    /// Log load and render decisions at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Coloring {
    Auto,
    Always,
    Never,
}

impl Coloring {
    /// Forced setting, or `None` to let owo-colors inspect the terminal.
    fn forced(self) -> Option<bool> {
        match self {
            Self::Auto => None,
            Self::Always => Some(true),
            Self::Never => Some(false),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse every resource file and flag unknown function names
    Check(CheckArgs),
    /// Compare locales' keys with a source locale
    Coverage(CoverageArgs),
    /// Render a single key
    Eval(EvalArgs),
}

/// Logs go to stderr so rendered text on stdout stays clean.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    if let Some(force) = cli.color.forced() {
        owo_colors::set_override(force);
    }
    init_tracing(cli.verbose);
    miette::set_hook(Box::new(|_| {
        Box::new(MietteHandlerOpts::new().unicode(true).context_lines(2).build())
    }))?;

    let outcome = match cli.command {
        Command::Check(args) => run_check(args),
        Command::Coverage(args) => run_coverage(args),
        Command::Eval(args) => run_eval(args),
    };
    let code = outcome.unwrap_or_else(|report| {
        eprintln!("{report:?}");
        exitcode::SOFTWARE
    });
    exit(code)
}
