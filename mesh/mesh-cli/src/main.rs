//! meshkit: mesh conversion and diagnostics.
//!
//! # Commands
//!
//! - `meshkit convert <in> <out>` - Convert OBJ or STL into ASCII/binary STL
//! - `meshkit diagnose <in>` - Print violation percentages for every rule
//! - `meshkit info <in>` - Print triangle count, encoding and bounds
//!
//! Logging goes to stderr. `RUST_LOG` is honoured; `-v` raises the default
//! level to `info` and `-vv` to `debug`.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

/// Convert and check triangle meshes
#[derive(Parser)]
#[command(name = "meshkit")]
#[command(about = "Convert and diagnose STL/OBJ meshes", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an OBJ or STL file into STL
    Convert {
        /// Input mesh (.stl or .obj)
        input: PathBuf,

        /// Output STL file
        output: PathBuf,

        /// Solid name for the output (defaults to the input's name)
        #[arg(long)]
        name: Option<String>,

        /// Write binary STL instead of ASCII
        #[arg(long)]
        binary: bool,
    },

    /// Check a mesh against the positive-octant, orientation, shared-edge
    /// and ascending rules
    Diagnose {
        /// Input mesh (.stl or .obj)
        input: PathBuf,

        /// Use strict tolerances
        #[arg(long)]
        strict: bool,

        /// Evaluate rules on the current thread only
        #[arg(long)]
        serial: bool,

        /// Exit with an error if any rule is violated
        #[arg(long)]
        deny: bool,
    },

    /// Print basic information about a mesh
    Info {
        /// Input mesh (.stl or .obj)
        input: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Convert {
            input,
            output,
            name,
            binary,
        } => commands::convert(&input, &output, name.as_deref(), binary),
        Commands::Diagnose {
            input,
            strict,
            serial,
            deny,
        } => commands::diagnose(&input, strict, serial, deny),
        Commands::Info { input } => commands::info(&input),
    }
}
