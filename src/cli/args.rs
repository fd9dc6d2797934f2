// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::notation::{BlockSpec, EditOp};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to the notes database (optional)
    #[arg(short, long, value_name = "DATABASE", global = true)]
    pub database: Option<PathBuf>,

    /// Path to the config file (optional)
    #[arg(long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create a note from blocks given in order
    New {
        /// Note title
        #[arg(value_name = "TITLE")]
        title: String,

        /// Blocks: txt:<text>, img:<path> or audio:<path>
        #[arg(value_name = "BLOCK")]
        blocks: Vec<BlockSpec>,
    },

    /// Edit a note with a sequence of operations
    Edit {
        /// Note ID to edit
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// set:<i>:<text>, insert:<i>:<img|audio block>, append:<block>, backspace:<i>
        #[arg(long = "op", value_name = "OP")]
        ops: Vec<EditOp>,
    },

    /// Show a note
    View {
        /// Note ID to view
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,

        /// Output note as JSON
        #[arg(long, conflicts_with = "html")]
        json: bool,

        /// Open the note as HTML in the browser
        #[arg(long)]
        html: bool,
    },

    /// List notes, newest first
    List {
        /// Output notes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a note
    Delete {
        /// Note ID to delete
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,
    },

    /// Play an audio block of a note with the system player
    Play {
        /// Note ID holding the recording
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,

        /// Which recording to play, counting from 1
        #[arg(short, long, default_value_t = 1)]
        nth: usize,
    },

    /// Write a config file with default settings
    InitConfig {
        /// Replace an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Store a copy of a note
    Duplicate {
        /// Note ID to copy
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,
    },
}
