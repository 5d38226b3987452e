//! Retrofit CLI - convert React components to other frameworks.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use retrofit_targets::Target;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "retrofit")]
#[command(about = "Convert React components to vanilla DOM and Angular code")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to retrofit.toml config file
    #[arg(short, long, default_value = "retrofit.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one component
    Convert {
        /// Component source (.jsx or .tsx)
        file: PathBuf,

        /// Output kind
        #[arg(short, long, value_enum)]
        target: TargetArg,

        /// Props as a JSON object
        #[arg(short, long)]
        props: Option<String>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert every component under a directory
    Batch {
        /// Directory to scan
        dir: PathBuf,

        /// Output kind
        #[arg(short, long, value_enum)]
        target: TargetArg,

        /// Directory for converted files
        #[arg(short, long, default_value = "retrofit-out")]
        out_dir: PathBuf,
    },

    /// Print the analysis of a component as JSON
    Inspect {
        /// Component source (.jsx or .tsx)
        file: PathBuf,
    },
}

/// Output kinds accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TargetArg {
    React,
    VanillaHtml,
    Vanilla,
    AngularHtml,
    Angular,
}

impl From<TargetArg> for Target {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::React => Target::React,
            TargetArg::VanillaHtml => Target::VanillaHtml,
            TargetArg::Vanilla => Target::VanillaCode,
            TargetArg::AngularHtml => Target::AngularHtml,
            TargetArg::Angular => Target::AngularCode,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Convert {
            file,
            target,
            props,
            output,
        } => {
            commands::convert::run(&cli.config, &file, target.into(), props.as_deref(), output)?;
        }
        Commands::Batch {
            dir,
            target,
            out_dir,
        } => {
            commands::batch::run(&cli.config, &dir, target.into(), &out_dir)?;
        }
        Commands::Inspect { file } => {
            commands::inspect::run(&cli.config, &file)?;
        }
    }

    Ok(())
}
