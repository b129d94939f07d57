//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Decompose composite type definitions into node trees and generate lenses
#[derive(Parser, Debug)]
#[command(name = "typetree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the decomposed type as a tree
    Tree {
        /// Schema file (TOML)
        #[arg(value_hint = ValueHint::FilePath)]
        schema: PathBuf,
        /// Root type (default: schema's `root`)
        #[arg(short, long)]
        root: Option<String>,
    },

    /// Generate lens declarations for every field
    Lenses {
        /// Schema file (TOML)
        #[arg(value_hint = ValueHint::FilePath)]
        schema: PathBuf,
        /// Root type (default: schema's `root`)
        #[arg(short, long)]
        root: Option<String>,
    },

    /// List the types declared by a schema
    Types {
        /// Schema file (TOML)
        #[arg(value_hint = ValueHint::FilePath)]
        schema: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Show the global config file location
    Path,
}
