//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "konstraint",
    version,
    about = "Generate Gatekeeper resources from Rego policies",
    long_about = "Konstraint — turn a tree of Rego policies into Gatekeeper ConstraintTemplates and Constraints.\n\nConfiguration precedence: CLI > konstraint.toml > defaults.",
    after_help = "Examples:\n  konstraint create examples\n  konstraint create examples --output generated-constraints\n  konstraint create examples --dryrun",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[arg(short, long, global = true, action = clap::ArgAction::SetTrue, help = "Log progress (info level)")]
    pub verbose: bool,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current konstraint version.")]
    Version,
    /// Create Gatekeeper constraints from Rego policies
    #[command(
        about = "Create Gatekeeper constraints from Rego policies",
        long_about = "Generate a ConstraintTemplate and a Constraint for every Rego file declaring a `violation` rule. Without --output, files are written next to each policy.",
        after_help = "Examples:\n  konstraint create examples\n  konstraint create examples -o generated-constraints\n  konstraint create examples --dryrun --report json"
    )]
    Create {
        #[arg(help = "Policy root (default: current dir)")]
        path: Option<String>,
        #[arg(short, long, help = "Specify an output directory for the Gatekeeper resources")]
        output: Option<String>,
        #[arg(short, long, action = clap::ArgAction::SetTrue, help = "Sets the enforcement action of the constraints to dryrun")]
        dryrun: bool,
        #[arg(long, help = "Report mode: human|json (default: human)")]
        report: Option<String>,
    },
}
