use clap::{Parser, Subcommand};

use crate::render::ColorMode;

/// Review what you have learned, on a schedule
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, global = true, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List entries, overdue reviews first.
    List {
        /// Only entries whose topic contains this text (case-insensitive).
        #[arg(long, short)]
        topic: Option<String>,
        /// One line per entry: status, topic and id.
        #[arg(long, short, env = "RECALL_SHORT")]
        short: bool,
        /// Only entries whose review is overdue.
        #[arg(long)]
        overdue: bool,
    },
    /// Print one entry with its related entries.
    Show { id: String },
    /// Record a new entry (e.g., `recall add Ownership: moves invalidate the source`).
    /// Without text, opens your $EDITOR.
    Add {
        /// Link the new entry to an existing one. Repeatable.
        #[arg(long, short)]
        related: Vec<String>,
        text: Vec<String>,
    },
    /// Opens your $EDITOR with the entry's topic and content.
    Edit { id: String },
    /// Schedule the next review: immediate, 1day, 5days, 20days, unlimited or a configured synonym.
    Review { id: String, interval: String },
    /// Step through an entry's questions, reveal each answer, then schedule the next review.
    Study { id: String },
    /// Change an entry's related entries. Without options, lists the entries it can link to.
    Link {
        id: String,
        /// Link to this entry. Repeatable.
        #[arg(long, short)]
        add: Vec<String>,
        /// Remove the link to this entry. Repeatable.
        #[arg(long, short)]
        remove: Vec<String>,
    },
    /// Remove an entry.
    Delete { id: String },
    /// Prints the store file path.
    Path,
}
