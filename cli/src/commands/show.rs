//! SHOW command - Print a single echo by id.

use anyhow::{Result, bail};
use chrono::Utc;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use echo_core::{Note, NoteId};
use echo_client::error::GENERIC_FAILURE;
use echo_client::{HttpNotesApi, NotesApi};

use super::{HumanReadable, format_timestamp, output};
use crate::views;

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Note ID to show
    pub id: NoteId,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ShowOutput(Note);

impl HumanReadable for ShowOutput {
    fn print_human(&self) {
        print!("{}", views::render_note(&self.0, Utc::now()));
        println!();
        println!("  {} {}", "ID:".cyan(), self.0.id);
        println!("  {} {}", "Created:".cyan(), format_timestamp(&self.0.created_at));
    }
}

/// Execute the show command.
pub async fn execute(base_url: &str, human: bool, args: ShowArgs) -> Result<()> {
    let api = HttpNotesApi::new(base_url);

    match api.get_note(&args.id).await {
        Ok(note) => output(&ShowOutput(note), human),
        Err(err) => bail!(err.message_or(GENERIC_FAILURE).to_string()),
    }
}
