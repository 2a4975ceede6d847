//! Konstraint CLI binary entry point.
//! Resolves configuration, runs generation and prints the report.

use clap::Parser;
use konstraint::cli::{Cli, Commands};
use konstraint::config::{self, ReportMode};
use konstraint::utils::{error_prefix, note_prefix};
use konstraint::{create, output};
use std::error::Error;

fn init_logging(verbose: bool) {
    let level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Print an error with its full cause chain to stderr.
fn report_error(err: &dyn Error) {
    eprintln!("{} {}", error_prefix(), err);
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Create {
            path,
            output: output_dir,
            dryrun,
            report,
        } => {
            // CLI flags override the config file; defaults fill the rest.
            // `-d` only ever turns dryrun on.
            let eff = match config::resolve_effective(
                path.as_deref(),
                output_dir.as_deref(),
                if dryrun { Some(true) } else { None },
                report.as_deref(),
            ) {
                Ok(eff) => eff,
                Err(e) => {
                    report_error(&e);
                    std::process::exit(2);
                }
            };
            // JSON reports own stdout; keep the note off them entirely
            if let Some(cfg) = eff.config_path.as_ref() {
                if eff.report != ReportMode::Json {
                    eprintln!("{} using config {}", note_prefix(), cfg.display());
                }
            }
            // Planning fails before any write; a write error stops at that file.
            match create::run_create(&eff.root, &eff.generate_config()) {
                Ok(generated) => output::print_report(&generated, eff.report),
                Err(e) => {
                    report_error(&e);
                    std::process::exit(2);
                }
            }
        }
    }
}
