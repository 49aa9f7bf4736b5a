//! POST command - Publish a new echo.

use anyhow::{Result, bail};
use chrono::Utc;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use echo_core::{DEFAULT_PAGE_SIZE, Note};
use echo_client::error::GENERIC_FAILURE;
use echo_client::toast::NOTE_CREATED;
use echo_client::{Board, HttpNotesApi, SubmitOutcome};

use super::{HumanReadable, format_timestamp, output};
use crate::views;

/// Arguments for the post command.
#[derive(Args)]
pub struct PostArgs {
    /// Message to publish (up to 1000 characters)
    pub message: String,

    /// Sign the echo with a name (up to 100 characters)
    #[arg(short, long)]
    pub author: Option<String>,
}

/// The created note as printed.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct PostOutput(Note);

impl HumanReadable for PostOutput {
    fn print_human(&self) {
        println!("{}", NOTE_CREATED.green().bold());
        println!();
        print!("{}", views::render_note(&self.0, Utc::now()));
        println!();
        println!("  {} {}", "ID:".cyan(), self.0.id);
        println!("  {} {}", "Created:".cyan(), format_timestamp(&self.0.created_at));
    }
}

/// Execute the post command.
pub async fn execute(base_url: &str, human: bool, args: PostArgs) -> Result<()> {
    let board = Board::new(HttpNotesApi::new(base_url), DEFAULT_PAGE_SIZE);

    board.compose.set_message(args.message);
    board.compose.set_author(args.author.unwrap_or_default());

    match board.submit().await {
        SubmitOutcome::Created(note) => output(&PostOutput(note), human),
        SubmitOutcome::Invalid(errors) => {
            if human {
                eprint!("{}", views::render_compose(&board.compose.snapshot()));
            }
            bail!(errors.to_string())
        }
        SubmitOutcome::Failed(err) => bail!(err.message_or(GENERIC_FAILURE).to_string()),
        SubmitOutcome::Busy => bail!("a submission is already in flight"),
    }
}
