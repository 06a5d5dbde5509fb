//! Command line

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;
use glprobe_env::Acceleration;

pub const USAGE: &str = "\
Usage :
\tglprobe on|off [--compact] [--json] [--config <PATH>]

Arguments:
  on|off            Request the discrete GPU on hybrid systems

Options:
  --compact         List extensions without grouping them by vendor
  --json            Print the report as JSON
  --config <PATH>   Settings file (JSON)
  -h, --help        Print this help
";

#[derive(Parser, Debug)]
#[command(
    name = "glprobe",
    about = "Report the OpenGL adapter, its limits and its extensions",
    version
)]
pub struct Cli {
    /// Discrete GPU preference (`on` or `off`)
    #[arg(value_name = "on|off")]
    pub acceleration: Acceleration,

    /// List extensions without grouping them by vendor
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub compact: bool,

    /// Print the report as JSON
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub json: bool,

    /// Settings file (JSON)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// What the process should do after looking at its arguments.
#[derive(Debug)]
pub enum Invocation {
    Probe(Cli),
    /// Help or version was requested; carries the text to print.
    Info(String),
    /// Arguments were missing or wrong.
    Usage,
}

pub fn parse_from<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Invocation::Probe(cli),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp => Invocation::Info(USAGE.to_owned()),
            ErrorKind::DisplayVersion => Invocation::Info(err.to_string()),
            _ => {
                tracing::debug!(error = %err, "rejected command line");
                Invocation::Usage
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe(args: &[&str]) -> Cli {
        match parse_from(args) {
            Invocation::Probe(cli) => cli,
            other => panic!("expected a probe invocation, got {other:?}"),
        }
    }

    #[test]
    fn accepts_on_and_off() {
        assert_eq!(probe(&["glprobe", "on"]).acceleration, Acceleration::On);
        assert_eq!(probe(&["glprobe", "off"]).acceleration, Acceleration::Off);
    }

    #[test]
    fn flags_default_off() {
        let cli = probe(&["glprobe", "on"]);
        assert!(!cli.compact);
        assert!(!cli.json);
        assert!(cli.config.is_none());
    }

    #[test]
    fn reads_flags() {
        let cli = probe(&["glprobe", "off", "--compact", "--json", "--config", "probe.json"]);
        assert!(cli.compact);
        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("probe.json")));
    }

    #[test]
    fn missing_argument_is_usage() {
        assert!(matches!(parse_from(["glprobe"]), Invocation::Usage));
    }

    #[test]
    fn invalid_argument_is_usage() {
        assert!(matches!(parse_from(["glprobe", "maybe"]), Invocation::Usage));
        assert!(matches!(parse_from(["glprobe", "On"]), Invocation::Usage));
        assert!(matches!(parse_from(["glprobe", "on", "off"]), Invocation::Usage));
        assert!(matches!(parse_from(["glprobe", "on", "--verbose"]), Invocation::Usage));
    }

    #[test]
    fn help_prints_usage() {
        match parse_from(["glprobe", "--help"]) {
            Invocation::Info(text) => assert_eq!(text, USAGE),
            other => panic!("expected help text, got {other:?}"),
        }
    }
}
