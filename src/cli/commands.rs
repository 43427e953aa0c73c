use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::client::UiColor;

#[derive(Parser, Debug)]
#[command(name = "stickyboard")]
#[command(version, about = "A sticky-note canvas board and its note service")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a YAML config file (default: ./stickyboard.yaml if present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Base URL of the notes server, for client commands
    #[arg(long, global = true, value_name = "URL")]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the notes HTTP server
    Serve {
        /// Address to listen on, e.g. 127.0.0.1:5001
        #[arg(long)]
        bind: Option<String>,
    },

    /// List notes, back to front
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a new note
    Add(AddArgs),

    /// Get a single note by id
    Get {
        /// Note id
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change fields of a note; omitted fields are left alone
    Edit(EditArgs),

    /// Delete a note
    Rm {
        /// Note id
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Note text
    #[arg(long, default_value = "")]
    pub text: String,

    /// Color (yellow, pink, blue, green)
    #[arg(long, default_value = "yellow")]
    pub color: UiColor,

    #[arg(long, default_value_t = 24.0, allow_negative_numbers = true)]
    pub x: f64,

    #[arg(long, default_value_t = 24.0, allow_negative_numbers = true)]
    pub y: f64,

    #[arg(long, default_value_t = 220.0)]
    pub w: f64,

    #[arg(long, default_value_t = 180.0)]
    pub h: f64,

    /// Stacking order; higher is in front
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub z: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Note id
    pub id: String,

    /// New text
    #[arg(long, conflicts_with = "clear_text")]
    pub text: Option<String>,

    /// Clear the note's text
    #[arg(long)]
    pub clear_text: bool,

    /// New color (yellow, pink, blue, green)
    #[arg(long)]
    pub color: Option<UiColor>,

    #[arg(long, allow_negative_numbers = true)]
    pub x: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub y: Option<f64>,

    #[arg(long)]
    pub w: Option<f64>,

    #[arg(long)]
    pub h: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub z: Option<i64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
