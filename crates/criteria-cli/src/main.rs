mod cmd;
mod input;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    config::ConfigSubcommand, issue::IssueSubcommand, knowledge::KnowledgeSubcommand,
    suggest::SuggestArgs,
};
use criteria_core::types::Dialect;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "criteria",
    about = "Acceptance-criteria workbench: parse, analyze, improve and sync Gherkin scenarios",
    version,
    propagate_version = true
)]
struct Cli {
    /// Workspace root (default: auto-detect from .criteria/ or .git/)
    #[arg(long, global = true, env = "CRITERIA_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Log tracker and gateway calls
    #[arg(long, global = true, short = 'v')]
    verbose: bool,

    /// Keyword vocabulary for rendered scenarios: spanish or english
    /// (default: the config file's `dialect`)
    #[arg(long, global = true)]
    dialect: Option<Dialect>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .criteria/config.yaml and knowledge.yaml
    Init,

    /// Parse scenario text into structured scenarios
    Parse {
        /// Text file (default: stdin)
        file: Option<PathBuf>,
    },

    /// Render a JSON scenario list as canonical Gherkin text
    Format {
        /// JSON file (default: stdin)
        file: Option<PathBuf>,
    },

    /// Report structural problems in scenario text
    Analyze {
        /// Text file (default: stdin)
        file: Option<PathBuf>,
    },

    /// Suggest improvements for a local user story
    Suggest(SuggestArgs),

    /// Work with tracker issues
    Issue {
        #[command(subcommand)]
        subcommand: IssueSubcommand,
    },

    /// Manage the knowledge base
    Knowledge {
        #[command(subcommand)]
        subcommand: KnowledgeSubcommand,
    },

    /// Show or validate the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    let dialect = cli.dialect;

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Parse { file } => cmd::parse::run(file.as_deref(), cli.json),
        Commands::Format { file } => cmd::format::run(&root, file.as_deref(), dialect, cli.json),
        Commands::Analyze { file } => cmd::analyze::run(file.as_deref(), cli.json),
        Commands::Suggest(args) => cmd::suggest::run(&root, args, cli.json),
        Commands::Issue { subcommand } => cmd::issue::run(&root, subcommand, dialect, cli.json),
        Commands::Knowledge { subcommand } => cmd::knowledge::run(&root, subcommand, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
