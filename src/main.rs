use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::exit;

use clap::Parser;
use dmxcheck::checks::checker::report_into;
use dmxcheck::io::optima_reader::DEFAULT_OPTIMA_PATH;
use tracing::error;

#[derive(Parser)]
pub struct Arguments {
    /// Solution files to verify against the recorded optima
    #[arg(required = true)]
    pub solutions: Vec<PathBuf>,

    /// Suppress log output on stderr
    #[arg(short, long)]
    pub quiet: bool,
}

fn check(args: &Arguments) -> std::io::Result<bool> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let mut all_checked = true;
    for path in &args.solutions {
        writeln!(out, "{}:", path.display())?;
        all_checked &= report_into(&mut out, path, Path::new(DEFAULT_OPTIMA_PATH))?;
    }

    Ok(all_checked)
}

fn main() {
    let args = Arguments::parse();

    if !args.quiet {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::INFO)
            .without_time()
            .init();
    }

    match check(&args) {
        Ok(true) => {}
        Ok(false) => exit(1),
        Err(e) => {
            error!("{e}");
            exit(1)
        }
    }
}
