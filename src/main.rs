//! Image printer (default binary).
//!
//! Prints each image given on the command line as 256-color ANSI art, pausing
//! between images. Settings come from `ANSIPIX_*` environment variables; see
//! [`PrintConfig`](ansipix::load::PrintConfig).

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ansipix::load::{load_and_resize, PrintConfig};
use ansipix::term::ImagePrinter;

fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with the image on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        bail!("usage: ansipix <image>...");
    }

    let config = PrintConfig::from_env();
    info!(?config, images = paths.len(), "starting");

    let mut printer = ImagePrinter::stdout(config.renderer());
    let result = run(&mut printer, &paths, &config);
    if result.is_err() {
        // Always try to restore terminal colors.
        let _ = printer.finish();
    }
    result
}

fn run(printer: &mut ImagePrinter, paths: &[PathBuf], config: &PrintConfig) -> Result<()> {
    for (i, path) in paths.iter().enumerate() {
        if i > 0 && config.delay_ms > 0 {
            thread::sleep(Duration::from_millis(config.delay_ms));
        }
        let image = load_and_resize(path, config)?;
        printer
            .print_image(&image)
            .with_context(|| format!("failed to print {}", path.display()))?;
    }
    Ok(())
}
