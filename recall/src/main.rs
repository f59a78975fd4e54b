mod cli;
mod cli_modes;
mod render;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use cli_modes::{
    delete_mode, edit_mode, link_mode, list_mode, review_mode, show_mode, study_mode, use_color,
    write_mode,
};
use recall_core::{Config, Recall};
use render::{RenderOptions, Renderer};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("recall: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    init_tracing(&config.log_level);
    let mut recall = Recall::with_config(config)?;
    debug!(command = ?cli.command, "running command");

    let renderer = Renderer::new(RenderOptions {
        date_format: recall.config.date_format.clone(),
        use_color: use_color(cli.color),
        short_mode: matches!(cli.command, Command::List { short: true, .. }),
        preview_length: recall.config.preview_length,
    });

    match &cli.command {
        Command::List { topic, overdue, .. } => {
            list_mode(&recall, &renderer, topic.as_deref(), *overdue)
        }
        Command::Show { id } => show_mode(&recall, &renderer, id),
        Command::Add { related, text } => write_mode(&mut recall, &renderer, text, related),
        Command::Edit { id } => edit_mode(&mut recall, &renderer, id),
        Command::Review { id, interval } => review_mode(&mut recall, &renderer, id, interval),
        Command::Study { id } => {
            let stdin = std::io::stdin();
            study_mode(&mut recall, &renderer, id, &mut stdin.lock()).map(|_| ())
        }
        Command::Link { id, add, remove } => link_mode(&mut recall, &renderer, id, add, remove),
        Command::Delete { id } => delete_mode(&mut recall, &renderer, id),
        Command::Path => {
            renderer.print_info(&recall.config.store_path.display().to_string());
            Ok(())
        }
    }
}

/// Logs go to stderr. `RUST_LOG` overrides the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
