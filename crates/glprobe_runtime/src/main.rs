//! glprobe
//!
//! Lists the display adapters, bootstraps an OpenGL context and reports the
//! driver's identity, limits and extensions.

mod cli;
mod driver;
mod human;
mod report;
mod settings;

use std::io;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::cli::Invocation;
use crate::driver::{OutputFormat, Run};
use crate::settings::Settings;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    tracing::debug!("glprobe v{}", glprobe_core::VERSION);

    let cli = match cli::parse_from(std::env::args_os()) {
        Invocation::Probe(cli) => cli,
        Invocation::Info(text) => {
            print!("{text}");
            return Ok(());
        }
        Invocation::Usage => {
            print!("{}", cli::USAGE);
            return Ok(());
        }
    };

    let settings = Settings::resolve(&cli)?;
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human {
            verbose_extensions: settings.verbose_extensions,
        }
    };

    let run = Run::prepare(&settings, cli.acceleration, format, io::stdout().lock(), io::stderr())?;

    #[cfg(target_os = "windows")]
    run.probe(glprobe_render::NativePlatform::new())?;

    #[cfg(not(target_os = "windows"))]
    run.without_context()?;

    Ok(())
}
