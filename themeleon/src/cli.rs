use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Themeleon - render layered themes into a destination directory
#[derive(Parser, Debug)]
#[command(name = "themeleon")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a theme into a destination directory
    Render {
        /// Theme directory; repeat to layer overrides on top of a base
        #[arg(long = "theme", value_name = "DIR", required = true)]
        theme: Vec<PathBuf>,

        /// Destination directory (default: THEMELEON_DEST)
        #[arg(long, value_name = "DIR")]
        dest: Option<PathBuf>,

        /// Context file (.json, .yaml or .yml) passed to every step
        #[arg(long, value_name = "FILE")]
        ctx: Option<PathBuf>,

        /// Extension to register, as NAME or NAME=ARG[,ARG...]
        #[arg(long = "use", value_name = "EXT")]
        uses: Vec<String>,

        /// Theme-relative path to copy (default: the whole theme)
        #[arg(long, value_name = "REL")]
        copy: Vec<String>,

        /// Also write the context as JSON into the destination
        #[arg(long, default_value = "false")]
        dump_context: bool,
    },

    /// List the built-in extensions and their operations
    Extensions,
}
