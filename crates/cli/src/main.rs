mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use ferry_core::{FerryConfig, FerryError};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Migrate a Struts web application to a React front end and an Express back end.
#[derive(Parser)]
#[command(
    name = "ferry",
    version,
    about = "Migrate a Struts web application to a React front end and an Express back end"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Log filter: a level (error, warn, info, debug, trace) or a tracing directive
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Path to a ferry.toml configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a legacy application and write struts_analysis.json and migration_intent.json
    Analyze {
        /// Root of the legacy web application
        root: PathBuf,
        /// Directory for the two JSON artifacts
        #[arg(long, default_value = "analysis")]
        out: PathBuf,
        /// Scan view and logic files in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// Generate the front-end and back-end trees from a migration intent
    Generate {
        /// Path to migration_intent.json
        intent: PathBuf,
        /// Front-end output directory
        #[arg(long, default_value = "generated/frontend")]
        frontend: PathBuf,
        /// Back-end output directory
        #[arg(long, default_value = "generated/backend")]
        backend: PathBuf,
    },

    /// Analyze and generate in one run
    Migrate {
        /// Root of the legacy web application
        root: PathBuf,
        /// Receives analysis/, frontend/ and backend/
        #[arg(long, default_value = "migration")]
        out: PathBuf,
        /// Scan view and logic files in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// Validate a migration intent against the JSON Schema
    Validate {
        /// Path to migration_intent.json
        intent: PathBuf,
    },

    /// Summarize a migration intent
    Show {
        /// Path to migration_intent.json
        intent: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let output = cli.output;
    let quiet = cli.quiet;
    let config = match FerryConfig::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => fail(&e, output, quiet),
    };

    match cli.command {
        Commands::Analyze {
            root,
            out,
            parallel,
        } => {
            commands::analyze::cmd_analyze(&root, &out, with_parallel(config, parallel), output, quiet);
        }
        Commands::Generate {
            intent,
            frontend,
            backend,
        } => {
            commands::generate::cmd_generate(&intent, &frontend, &backend, config, output, quiet);
        }
        Commands::Migrate {
            root,
            out,
            parallel,
        } => {
            commands::migrate::cmd_migrate(&root, &out, with_parallel(config, parallel), output, quiet);
        }
        Commands::Validate { intent } => {
            commands::validate::cmd_validate(&intent, output, quiet);
        }
        Commands::Show { intent } => {
            commands::show::cmd_show(&intent, output, quiet);
        }
    }
}

/// `--parallel` switches parallel scanning on over whatever the file says.
fn with_parallel(mut config: FerryConfig, parallel: bool) -> FerryConfig {
    if parallel {
        config.extraction.parallel = true;
    }
    config
}

/// Logs go to stderr; stdout carries command output only.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|e| {
        eprintln!("invalid --log-level '{}': {}; using 'warn'", level, e);
        EnvFilter::new("warn")
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => eprintln!("{}", serde_json::json!({ "error": msg })),
    }
}

/// Report a fatal error and exit 1. JSON output carries the error kind.
pub(crate) fn fail(err: &FerryError, output: OutputFormat, quiet: bool) -> ! {
    match output {
        OutputFormat::Text => {
            if !quiet {
                eprintln!("error: {}", err);
            }
        }
        OutputFormat::Json => {
            eprintln!(
                "{}",
                serde_json::json!({ "error": err.to_string(), "kind": err.kind() })
            );
        }
    }
    process::exit(1);
}

/// Pretty JSON on stdout.
pub(crate) fn print_json(value: &impl Serialize) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("error: could not render JSON output: {}", e);
            process::exit(1);
        }
    }
}
