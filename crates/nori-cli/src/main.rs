//! NORI CLI
//!
//! Command-line interface for the NORI clinical document intake suite

mod commands; // Contains current commands: ingest, show
mod output;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use nori_core::{Result, init_tracing};
use std::io;
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "nori")]
#[command(about = "NORI: Clinical document intake for CCDA-style XML exports")]
#[command(version = nori_core::VERSION)]
#[command(
    long_about = "NORI ingests CCDA-style clinical XML documents and extracts normalized\n\
patient, hospitalization, diagnosis, and medication records.\n\
\n\
Examples:\n  \
nori ingest                          # Process data/incoming with defaults\n  \
nori ingest -i inbox -o records      # Override the directory layout\n  \
nori ingest --processed-dir done     # Move finished documents aside\n  \
nori show export.xml --format json   # Extract one document to stdout"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, global = true, help = "Path to configuration file (nori.toml)")]
    config: Option<PathBuf>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Number of threads to use for parallel processing
    #[arg(
        short = 'j',
        long,
        global = true,
        help = "Number of threads (default: number of CPU cores)"
    )]
    threads: Option<usize>,

    /// Generate shell completion script
    #[arg(
        long,
        value_enum,
        help = "Generate completion script for specified shell"
    )]
    generate_completion: Option<Shell>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a directory of clinical XML documents into record files
    Ingest {
        /// Directory scanned for incoming documents
        #[arg(short, long, help = "Input directory (default: from config, else data/incoming)")]
        input: Option<PathBuf>,

        /// Directory receiving the per-entity record files
        #[arg(short, long, help = "Output directory (default: from config, else data/records)")]
        output: Option<PathBuf>,

        /// Move successfully processed documents to this directory
        #[arg(long, help = "Move processed documents aside after persisting their records")]
        processed_dir: Option<PathBuf>,

        /// Output format for the ingest summary
        #[arg(short, long, default_value = "human", help = "Summary output format")]
        format: OutputFormat,
    },

    /// Extract a single document and print its records without persisting
    Show {
        /// Document to extract
        #[arg(help = "Path to a clinical XML document")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "human", help = "Record output format")]
        format: OutputFormat,
    },

    /// Show version information
    #[command(alias = "ver")]
    Version {
        /// Show detailed version information
        #[arg(long, help = "Show detailed version and build information")]
        detailed: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON format for programmatic consumption
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle shell completion generation
    if let Some(shell) = cli.generate_completion {
        generate_completion_script(shell);
        return Ok(());
    }

    // Initialize colored output
    use std::io::IsTerminal;
    if !cli.no_color && std::env::var("NO_COLOR").is_err() && std::io::stdout().is_terminal() {
        colored::control::set_override(true);
    } else {
        colored::control::set_override(false);
    }

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "nori=error", // Only errors by default
        1 => "nori=warn",  // Warnings on first -v
        2 => "nori=info",  // Info on -vv
        3 => "nori=debug", // Debug on -vvv
        _ => "nori=trace", // Trace on -vvvv+
    };
    unsafe {
        std::env::set_var("RUST_LOG", log_level);
    }
    init_tracing();

    // Set thread pool size if specified
    if let Some(threads) = cli.threads
        && let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
    {
        error!("Failed to set thread pool size: {}", e);
        std::process::exit(1);
    }

    match run_command(cli) {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("NORI failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn generate_completion_script(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn run_command(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Ingest {
            input,
            output,
            processed_dir,
            format,
        }) => commands::ingest::ingest_command(input, output, processed_dir, cli.config, format),

        Some(Commands::Show { file, format }) => commands::show::show_command(file, format),

        Some(Commands::Version { detailed }) => {
            if detailed {
                println!("nori {}", nori_core::VERSION);
                println!("Build information:");
                println!("  Target: {}", std::env::consts::ARCH);
                println!("  OS: {}", std::env::consts::OS);
                if let Ok(profile) = std::env::var("PROFILE") {
                    println!("  Profile: {profile}");
                }
            } else {
                println!("{}", nori_core::VERSION);
            }
            Ok(())
        }

        None => {
            // No subcommand provided, show help
            let mut cmd = Cli::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}
