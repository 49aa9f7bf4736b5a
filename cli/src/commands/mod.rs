//! Subcommands of the `echoes` CLI.

pub mod board;
pub mod feed;
pub mod post;
pub mod show;

use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use serde::Serialize;

/// Output that can also be printed for humans.
pub trait HumanReadable {
    fn print_human(&self);
}

/// Print `value` as pretty JSON, or as formatted text with `--human`.
pub fn output<T: Serialize + HumanReadable>(value: &T, human: bool) -> Result<()> {
    if human {
        value.print_human();
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

/// Timestamp in local time for detail views.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
