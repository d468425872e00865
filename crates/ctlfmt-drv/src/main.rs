//! ctlfmt CLI - formats and lints CTL control scripts.
//!
//! Single-file mode formats one `.ctl` file (in place, or to `-o`) and can
//! dump the AST with `-a`. Directory mode recursively rewrites every
//! `.ctl` file in place; `-o`/`-a` are rejected there. Per-file lex/parse
//! failures are appended to `lint_errors.txt` and the run ends with a
//! totals summary.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ctlfmt_drv::{clear_error_log, process_directory, process_file, LintStats};

/// Formatter and linter for CTL control scripts.
#[derive(Parser, Debug)]
#[command(name = "ctlfmt")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Formatter and linter for .ctl control scripts", long_about = None)]
struct Cli {
    /// Path to the input file or folder
    input_path: PathBuf,

    /// Path to the output formatted file (single-file mode only)
    #[arg(short = 'o', long = "output-file")]
    output_file: Option<PathBuf>,

    /// Path to the output AST file (single-file mode only)
    #[arg(short = 'a', long = "ast-file")]
    ast_file: Option<PathBuf>,

    /// Enable verbose diagnostics
    #[arg(short, long, env = "CTLFMT_VERBOSE")]
    verbose: bool,
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    clear_error_log()?;

    let mut stats = LintStats::new();

    if cli.input_path.is_file() {
        process_file(
            &cli.input_path,
            cli.output_file.as_deref(),
            cli.ast_file.as_deref(),
            &mut stats,
        )?;
    } else if cli.input_path.is_dir() {
        if cli.output_file.is_some() || cli.ast_file.is_some() {
            anyhow::bail!("-o and -a are not allowed when processing a folder");
        }
        println!(
            "Processing all .ctl files in directory: {}",
            cli.input_path.display()
        );
        process_directory(&cli.input_path, &mut stats)?;
    } else {
        anyhow::bail!(
            "{} is not a valid file or directory",
            cli.input_path.display()
        );
    }

    stats.print_summary();
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
