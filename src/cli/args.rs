// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::constants::{PASSWORD_ENV_VAR, SERVER_ENV_VAR};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Service root URL (overrides the config file)
    #[arg(short, long, value_name = "URL", global = true, env = SERVER_ENV_VAR)]
    pub server: Option<String>,

    /// Path to config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create an account
    Register {
        #[arg(value_name = "USERNAME")]
        username: String,

        #[arg(value_name = "EMAIL")]
        email: String,

        #[arg(long, env = PASSWORD_ENV_VAR, hide_env_values = true)]
        password: String,
    },

    /// Log in and keep the session for following commands
    Login {
        #[arg(value_name = "EMAIL")]
        email: String,

        #[arg(long, env = PASSWORD_ENV_VAR, hide_env_values = true)]
        password: String,
    },

    /// Forget the current session
    Logout,

    /// List notes, optionally filtered
    List {
        /// Case-insensitive text matched against title, content and tags
        #[arg(value_name = "SEARCH")]
        search: Option<String>,

        /// Only notes carrying exactly this tag ("all" for no restriction)
        #[arg(short, long, value_name = "TAG")]
        tag: Option<String>,

        /// Output notes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one note
    Show {
        #[arg(value_name = "NOTE_ID")]
        id: String,

        /// Output note as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every tag in use
    Tags,

    /// Create a note
    Create {
        #[arg(value_name = "TITLE")]
        title: String,

        #[arg(short = 'b', long, value_name = "TEXT", default_value = "")]
        content: String,

        /// Comma-separated tags, e.g. "rust, cli"
        #[arg(short, long, value_name = "TAGS", default_value = "")]
        tags: String,
    },

    /// Change a note's title, content or tags
    Edit {
        #[arg(value_name = "NOTE_ID")]
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(short = 'b', long, value_name = "TEXT")]
        content: Option<String>,

        /// Comma-separated tags replacing the current ones
        #[arg(short, long, value_name = "TAGS")]
        tags: Option<String>,
    },

    /// Delete a note
    Delete {
        #[arg(value_name = "NOTE_ID")]
        id: String,
    },

    /// Summarise text, a file, or a stored note
    Summarize {
        #[arg(value_name = "TEXT", conflicts_with_all = ["file", "note"])]
        text: Option<String>,

        #[arg(short, long, value_name = "FILE", conflicts_with = "note")]
        file: Option<PathBuf>,

        /// Summarise the content of this note
        #[arg(short, long, value_name = "NOTE_ID")]
        note: Option<String>,
    },

    /// Generate flashcards from text or a file
    Flashcards {
        #[arg(value_name = "TEXT", conflicts_with = "file")]
        text: Option<String>,

        #[arg(short, long, value_name = "FILE")]
        file: Option<PathBuf>,

        /// Step through the cards interactively
        #[arg(long)]
        study: bool,

        /// Output the set as JSON
        #[arg(long, conflicts_with = "study")]
        json: bool,
    },
}
