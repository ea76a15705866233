//! qmk-langmap - national keyboard layouts for QMK keycodes
//!
//! Looks up the keycap text of a key in a national layout and renders
//! QMK keycode expressions the way they appear on that layout.

mod cli;

use clap::{Parser, Subcommand};
use cli::{CliError, ConfigArgs, ExitCode, KeycapArgs, LayoutsArgs, RenderArgs};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// qmk-langmap - national keyboard layouts for QMK keycodes
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the built-in layouts
    Layouts(LayoutsArgs),
    /// Show keycap text for a key
    Keycap(KeycapArgs),
    /// Render keycode expressions for a layout
    Render(RenderArgs),
    /// Show or change configuration
    Config(ConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so JSON on stdout stays parseable
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    debug!(command = ?cli.command, "running command");

    let result: Result<(), CliError> = match &cli.command {
        Command::Layouts(args) => args.execute(),
        Command::Keycap(args) => args.execute(),
        Command::Render(args) => args.execute(),
        Command::Config(args) => args.execute(),
    };

    let code = match result {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("Error: {e}");
            e.code
        }
    };

    std::process::exit(code as i32);
}
