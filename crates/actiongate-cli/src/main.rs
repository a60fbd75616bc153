mod cmd;
mod output;
mod root;
mod terminal;

use clap::{Parser, Subcommand};
use cmd::record::RecordSubcommand;
use cmd::run::RunArgs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "actiongate",
    about = "Status-gated workflow actions for conversion requests, demo requests and demo sites",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .actiongate/)
    #[arg(long, global = true, env = "ACTIONGATE_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize actiongate in the current project
    Init,

    /// Create, show and list records
    Record {
        #[command(subcommand)]
        subcommand: RecordSubcommand,
    },

    /// List the actions a record currently permits
    Actions { kind: String, name: String },

    /// Show the status indicator for a record, if it has one
    Indicator { kind: String, name: String },

    /// Run one of a record's available actions
    Run {
        kind: String,
        name: String,
        action: String,
        /// Answer confirmations with yes; unset prompt fields stay empty
        #[arg(long, short = 'y')]
        yes: bool,
        /// Prompt field value as key=value (repeatable)
        #[arg(long = "input")]
        inputs: Vec<String>,
        /// Print link targets instead of launching a browser
        #[arg(long)]
        no_open: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Record { subcommand } => cmd::record::run(&root, subcommand, cli.json),
        Commands::Actions { kind, name } => cmd::actions::run(&root, &kind, &name, cli.json),
        Commands::Indicator { kind, name } => cmd::indicator::run(&root, &kind, &name, cli.json),
        Commands::Run {
            kind,
            name,
            action,
            yes,
            inputs,
            no_open,
        } => cmd::run::run(
            &root,
            RunArgs {
                kind,
                name,
                action,
                yes,
                inputs,
                no_open,
            },
            cli.json,
        ),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
