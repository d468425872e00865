//! ctlfmt-drv - File and directory driver around the core pipeline.
//!
//! The core never touches the file system; this crate does. It reads
//! `.ctl` files, runs `source -> tokens -> AST -> formatted text`, writes
//! the results back, keeps per-run statistics, and appends every per-file
//! failure to the error log. Lex/parse failures are recorded and the run
//! continues with the next file; only I/O errors abort.

pub mod extract;

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use tracing::debug;
use walkdir::WalkDir;

use ctlfmt_fmt::{parse_source, Formatter};
use ctlfmt_util::CtlError;

/// Per-file failures are appended here; the file is cleared at startup.
pub const ERROR_LOG_FILE: &str = "lint_errors.txt";

/// Counters for one linting run.
#[derive(Debug, Default, Clone, Copy)]
pub struct LintStats {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

impl LintStats {
    pub fn new() -> Self {
        Self::default()
    }

    fn record_success(&mut self) {
        self.total += 1;
        self.successful += 1;
    }

    fn record_failure(&mut self) {
        self.total += 1;
        self.failed += 1;
    }

    /// Prints the end-of-run totals and success/error rates.
    pub fn print_summary(&self) {
        if self.total == 0 {
            println!("No files were processed.");
            return;
        }

        let success_rate = (self.successful as f64 / self.total as f64) * 100.0;
        let error_rate = (self.failed as f64 / self.total as f64) * 100.0;

        println!("\n--- Linting Results ---");
        println!("Total files processed: {}", self.total);
        println!("Files successful: {}", self.successful);
        println!("Files with errors: {}", self.failed);
        println!("Success rate: {success_rate:.2}%");
        println!("Error rate: {error_rate:.2}%");
    }
}

/// Removes a stale error log from a previous run.
pub fn clear_error_log() -> anyhow::Result<()> {
    if Path::new(ERROR_LOG_FILE).exists() {
        fs::remove_file(ERROR_LOG_FILE)
            .with_context(|| format!("failed to clear {ERROR_LOG_FILE}"))?;
    }
    Ok(())
}

/// Appends one `file -> error` record to the error log.
fn log_error(path: &Path, error: &CtlError) -> anyhow::Result<()> {
    let mut log = OpenOptions::new()
        .create(true)
        .append(true)
        .open(ERROR_LOG_FILE)
        .with_context(|| format!("failed to open {ERROR_LOG_FILE}"))?;
    writeln!(log, "File: {}\nError: {}\n", path.display(), error)?;
    Ok(())
}

/// Processes a single file: lex, parse, format, write.
///
/// Without `output` the file is rewritten in place. With `ast_file` a tree
/// rendering of the parsed program is written alongside. Core failures are
/// logged and counted; only I/O errors propagate.
pub fn process_file(
    input: &Path,
    output: Option<&Path>,
    ast_file: Option<&Path>,
    stats: &mut LintStats,
) -> anyhow::Result<()> {
    let source = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    debug!(file = %input.display(), bytes = source.len(), "processing");

    match parse_source(&source) {
        Ok(program) => {
            let formatted = Formatter::new(&program).format();

            if let Some(ast_path) = ast_file {
                fs::write(ast_path, program.tree())
                    .with_context(|| format!("failed to write {}", ast_path.display()))?;
                println!("AST saved to {}", ast_path.display());
            }

            let target = output.unwrap_or(input);
            fs::write(target, formatted)
                .with_context(|| format!("failed to write {}", target.display()))?;
            println!("Formatted code saved to {}", target.display());

            stats.record_success();
        }
        Err(error) => {
            println!("Error in {}: {error}", input.display());
            log_error(input, &error)?;
            stats.record_failure();
        }
    }

    Ok(())
}

/// Recursively processes every `.ctl` file under a directory, in place.
pub fn process_directory(dir: &Path, stats: &mut LintStats) -> anyhow::Result<()> {
    for entry in WalkDir::new(dir) {
        let entry = entry.with_context(|| format!("failed to walk {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("ctl") {
            println!("Processing file: {}", path.display());
            process_file(path, None, None, stats)?;
        }
    }
    Ok(())
}
