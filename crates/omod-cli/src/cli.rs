//! CLI argument definitions for omod.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use omod_core::coordinate::FileType;

#[derive(Parser, Debug)]
#[command(
    name = "omod",
    version,
    about = "Resolve OpenMRS modules and their required modules",
    long_about = "omod downloads an OpenMRS module from Maven repositories, reads the \
                  required modules declared in its config.xml, and resolves them \
                  transitively, keeping the highest version requested for each module."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a module and everything it requires, then print the result
    Resolve {
        #[command(flatten)]
        module: ModuleArgs,
        #[command(flatten)]
        source: SourceArgs,
        /// Exit with an error if any module is left unresolved
        #[arg(long)]
        strict: bool,
    },

    /// Download a single module artifact
    Fetch {
        #[command(flatten)]
        module: ModuleArgs,
        #[command(flatten)]
        source: SourceArgs,
        /// Artifact type: jar or omod
        #[arg(short = 't', long = "type", default_value = "jar")]
        file_type: FileType,
        /// Directory to write the artifact to
        #[arg(short, long)]
        dest: Option<PathBuf>,
    },
}

/// The coordinate of the module to work on.
#[derive(Args, Debug)]
pub struct ModuleArgs {
    /// Group id (e.g. org.openmrs.module)
    pub group: String,
    /// Artifact id; `-omod` is appended when missing (e.g. coreapps)
    pub artifact: String,
    /// Version (e.g. 2.1.0)
    pub version: String,
}

/// Where configuration and artifacts come from.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Path to a configuration file (default: ./omod.toml when present)
    #[arg(short, long, env = "OMOD_CONFIG")]
    pub config: Option<PathBuf>,
    /// Maven repository URL; repeat to try several in order. Replaces the configured list.
    #[arg(long = "repo", value_name = "URL")]
    pub repos: Vec<String>,
}

pub fn parse() -> Cli {
    Cli::parse()
}
