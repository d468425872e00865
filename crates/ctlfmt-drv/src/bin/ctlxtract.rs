//! ctlxtract CLI - pulls CTL scripts out of panel XML files.
//!
//! Mirrors a directory of panel definitions into a directory of `.ctl`
//! files, one per panel, holding the text of the panel's `<script>`
//! elements. The destination tree is recreated on every run.

use std::path::PathBuf;

use clap::Parser;

use ctlfmt_drv::extract::extract_tree;

/// Extracts `<script>` content from panel XML files into `.ctl` files.
#[derive(Parser, Debug)]
#[command(name = "ctlxtract")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract CTL scripts from panel XML files", long_about = None)]
struct Cli {
    /// Directory containing panel XML files
    #[arg(default_value = "panels")]
    source: PathBuf,

    /// Destination directory for the extracted scripts
    #[arg(default_value = "panels_scripts")]
    dest: PathBuf,
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    println!("Processing XML files...");
    extract_tree(&cli.source, &cli.dest)?;
    println!(
        "Script processing complete. Output saved to: {}",
        cli.dest.display()
    );
    Ok(())
}
