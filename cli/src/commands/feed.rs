//! FEED command - Print the newest echoes, optionally several pages deep.

use anyhow::{Result, bail};
use chrono::{Local, Utc};
use clap::Args;
use serde::Serialize;

use echo_client::toast::LOAD_FAILED;
use echo_client::{Board, FeedState, HttpNotesApi, LoadOutcome};

use super::{HumanReadable, output};
use crate::views;

/// Arguments for the feed command.
#[derive(Args)]
pub struct FeedArgs {
    /// Number of pages to load (the first page plus N-1 "load more")
    #[arg(long, default_value_t = 1)]
    pub pages: u32,

    /// Notes per page (1-100)
    #[arg(long)]
    pub size: Option<u32>,
}

/// Feed snapshot as printed.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct FeedOutput(FeedState);

impl HumanReadable for FeedOutput {
    fn print_human(&self) {
        println!("{}", views::render_header(Local::now().naive_local()));
        print!("{}", views::render_feed(&self.0, Utc::now()));
    }
}

/// Execute the feed command.
pub async fn execute(base_url: &str, page_size: u32, human: bool, args: FeedArgs) -> Result<()> {
    let board = Board::new(HttpNotesApi::new(base_url), args.size.unwrap_or(page_size));

    if let LoadOutcome::Failed(err) = board.feed.load_initial().await {
        bail!(err.message_or(LOAD_FAILED).to_string());
    }

    for _ in 1..args.pages {
        match board.feed.load_more().await {
            LoadOutcome::Loaded { .. } => {}
            LoadOutcome::Skipped => break,
            LoadOutcome::Failed(err) => bail!(err.message_or(LOAD_FAILED).to_string()),
        }
    }

    output(&FeedOutput(board.feed.snapshot()), human)
}
