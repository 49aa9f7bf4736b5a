//! BOARD command - Interactive session over stdin.
//!
//! Loads the first page, then reads one instruction per line. Toasts are
//! printed by a task subscribed to the board's toast slot, so they show up
//! whichever action raised them.

use std::io::Write;

use anyhow::Result;
use chrono::{Local, Utc};
use clap::Args;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use echo_client::{Board, HttpNotesApi, LoadOutcome, SubmitOutcome};

use crate::views;

/// Arguments for the board command.
#[derive(Args)]
pub struct BoardArgs {
    /// Notes per page (1-100)
    #[arg(long)]
    pub size: Option<u32>,
}

/// One parsed line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    LoadMore,
    Refresh,
    Post(String),
    Sign(String),
    Draft,
    Dismiss,
    Redraw,
    Help,
    Quit,
}

/// Parse a line typed at the prompt.
pub fn parse_input(line: &str) -> Result<Input, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_lowercase().as_str() {
        "" => Ok(Input::Redraw),
        "more" | "m" => Ok(Input::LoadMore),
        "refresh" | "r" => Ok(Input::Refresh),
        "post" | "p" => Ok(Input::Post(rest.to_string())),
        "sign" | "s" => Ok(Input::Sign(rest.to_string())),
        "draft" | "d" => Ok(Input::Draft),
        "dismiss" | "x" => Ok(Input::Dismiss),
        "help" | "h" | "?" => Ok(Input::Help),
        "quit" | "exit" | "q" => Ok(Input::Quit),
        other => Err(format!("unknown command `{other}` (type `help`)")),
    }
}

const HELP: &str = "\
  more            load the next page
  refresh         reload from the first page
  post <text>     publish an echo
  sign <name>     sign the next echo (blank for Anonymous)
  draft           show the compose form
  dismiss         dismiss the current notification
  quit            leave";

/// Execute the board command.
pub async fn execute(base_url: &str, page_size: u32, args: BoardArgs) -> Result<()> {
    let board = Board::new(HttpNotesApi::new(base_url), args.size.unwrap_or(page_size));

    let mut toasts = board.toasts.subscribe();
    let printer = tokio::spawn(async move {
        while let Some(toast) = toasts.changed().await {
            if let Some(toast) = toast {
                println!("{}", views::render_toast(&toast));
            }
        }
    });

    println!("{}", views::render_header(Local::now().naive_local()));
    board.feed.load_initial().await;
    print!("{}", views::render_feed(&board.feed.snapshot(), Utc::now()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(&mut std::io::stdout())?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let input = match parse_input(&line) {
            Ok(input) => input,
            Err(message) => {
                println!("{}", message.yellow());
                continue;
            }
        };

        match input {
            Input::LoadMore => match board.feed.load_more().await {
                LoadOutcome::Loaded { .. } => {
                    print!("{}", views::render_feed(&board.feed.snapshot(), Utc::now()));
                }
                LoadOutcome::Skipped => println!("{}", "No more echoes.".dimmed()),
                LoadOutcome::Failed(_) => {}
            },
            Input::Refresh => {
                if let LoadOutcome::Loaded { .. } = board.feed.refresh().await {
                    print!("{}", views::render_feed(&board.feed.snapshot(), Utc::now()));
                }
            }
            Input::Post(text) => {
                board.compose.set_message(text);
                match board.submit().await {
                    SubmitOutcome::Created(note) => {
                        print!("{}", views::render_note(&note, Utc::now()));
                    }
                    SubmitOutcome::Invalid(_) => {
                        print!("{}", views::render_compose(&board.compose.snapshot()));
                    }
                    SubmitOutcome::Failed(_) | SubmitOutcome::Busy => {}
                }
            }
            Input::Sign(name) => {
                board.compose.set_author(name);
                print!("{}", views::render_compose(&board.compose.snapshot()));
            }
            Input::Draft => print!("{}", views::render_compose(&board.compose.snapshot())),
            Input::Dismiss => board.toasts.dismiss(),
            Input::Redraw => print!("{}", views::render_feed(&board.feed.snapshot(), Utc::now())),
            Input::Help => println!("{HELP}"),
            Input::Quit => break,
        }
    }

    drop(board);
    printer.abort();
    tracing::debug!("board session closed");
    Ok(())
}

/// Write the input prompt and flush it so it shows before the read blocks.
fn prompt<W: Write>(out: &mut W) -> std::io::Result<()> {
    write!(out, "{} ", ">".purple())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_and_aliases() {
        assert_eq!(parse_input("more"), Ok(Input::LoadMore));
        assert_eq!(parse_input("  M "), Ok(Input::LoadMore));
        assert_eq!(parse_input("refresh"), Ok(Input::Refresh));
        assert_eq!(parse_input("quit"), Ok(Input::Quit));
        assert_eq!(parse_input(""), Ok(Input::Redraw));
    }

    #[test]
    fn post_keeps_message_text() {
        assert_eq!(
            parse_input("post the sea at   night"),
            Ok(Input::Post("the sea at   night".to_string()))
        );
        assert_eq!(parse_input("post"), Ok(Input::Post(String::new())));
    }

    #[test]
    fn sign_without_name_goes_anonymous() {
        assert_eq!(parse_input("sign mira"), Ok(Input::Sign("mira".to_string())));
        assert_eq!(parse_input("sign"), Ok(Input::Sign(String::new())));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn prompt_is_written_and_flushed() {
        let mut out = Vec::new();
        prompt(&mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains('>'));
    }

    #[test]
    fn prompt_reports_flush_failure() {
        let err = prompt(&mut BrokenPipe).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(parse_input("delete everything").is_err());
    }
}
