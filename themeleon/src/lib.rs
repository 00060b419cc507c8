//! Themeleon CLI library. The `themeleon` binary is a thin wrapper over it.
//!
//! Re-exports the engine so embedders can depend on a single crate.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

pub use themeleon_engine as engine;
pub use themeleon_engine::{factory, Builder, Context, Extension, Mixin, Themeleon, ThemeFunction};

/// Run the CLI: load `.env`, parse args and dispatch to command handlers.
pub fn run_cli() -> Result<()> {
    themeleon_core::config::load_dotenv();
    let cli = Cli::parse();
    themeleon_core::observability::init_tracing();

    match cli.command {
        Commands::Render {
            theme,
            dest,
            ctx,
            uses,
            copy,
            dump_context,
        } => {
            let opts = commands::render::RenderOptions {
                theme,
                dest,
                ctx,
                uses,
                copy,
                dump_context,
            };
            let summary = commands::render::run(opts)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Extensions => {
            println!("{}", serde_json::to_string_pretty(&commands::extensions::list())?);
        }
    }
    Ok(())
}
