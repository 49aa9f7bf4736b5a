//! Terminal views: pure functions from board state to text.
//!
//! Nothing here talks to the network or mutates state. Callers pass the
//! current time in so the output is reproducible.

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use colored::Colorize;

use echo_core::{ANONYMOUS, Field, MAX_MESSAGE_LENGTH, Note};
use echo_client::{ComposeState, FeedState, Toast, ToastKind};

/// Width of dividers and rules.
const WIDTH: usize = 64;

/// Greeting, title lead and time-of-day word for an hour of the day.
pub fn greeting(hour: u32) -> (&'static str, &'static str, &'static str) {
    if hour < 12 {
        ("Good Morning", "The Stillness of", "Morning")
    } else if hour < 18 {
        ("Good Afternoon", "The Hush of", "Afternoon")
    } else {
        ("Good Evening", "The Silence of", "Midnight")
    }
}

/// Page header for local time `now`.
pub fn render_header(now: NaiveDateTime) -> String {
    let (salute, lead, time_of_day) = greeting(now.hour());
    let date = now.format("%A, %b %-d, %Y").to_string().to_uppercase();

    let mut out = String::new();
    out.push_str(&format!("{}  {}\n\n", date.dimmed(), "● live".purple()));
    out.push_str(&format!("{}\n", format!("{salute}, Dreamer").to_uppercase().purple()));
    out.push_str(&format!("{} {}\n", lead.bold(), time_of_day.italic()));
    out.push_str(&format!(
        "{}\n",
        "Thoughts drift here like stars fading at dawn. Leave an echo, read the whispers of strangers."
            .dimmed()
    ));
    out
}

/// "just now", "5m ago", "3h ago", "2d ago", or a short date past a week.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "just now".to_string()
    } else if hours < 1 {
        format!("{minutes}m ago")
    } else if days < 1 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        then.format("%b %-d, %Y").to_string()
    }
}

/// One note as a card.
pub fn render_note(note: &Note, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    out.push_str(&format!("  {}\n", "\"".purple().dimmed()));
    for line in note.message.lines() {
        out.push_str(&format!("  {}\n", line));
    }
    out.push_str(&format!(
        "  {} {}  {}\n",
        format!("[{}]", note.initial()).purple(),
        note.display_author().bold(),
        relative_time(note.created_at, now).dimmed()
    ));
    out
}

/// The feed: divider with count, cards, and the load-more hint.
pub fn render_feed(state: &FeedState, now: DateTime<Utc>) -> String {
    let mut out = String::new();

    let label = if state.total_items > 0 {
        format!("ECHOES ({})", state.total_items)
    } else {
        "ECHOES".to_string()
    };
    let side = "─".repeat(WIDTH.saturating_sub(label.len() + 2) / 2);
    out.push_str(&format!("{side} {} {side}\n\n", label.dimmed()));

    if state.loading && state.notes.is_empty() {
        out.push_str(&format!("  {}\n", "Loading echoes...".dimmed()));
        return out;
    }

    if state.notes.is_empty() {
        out.push_str(&format!(
            "  {}\n",
            "Nothing here yet. Be the first to leave an echo.".dimmed()
        ));
        return out;
    }

    for note in &state.notes {
        out.push_str(&render_note(note, now));
        out.push('\n');
    }

    if state.has_more() {
        let hint = if state.loading {
            "Loading".to_string()
        } else {
            "↓ Load more echoes (type `more`)".to_string()
        };
        out.push_str(&format!("  {}\n", hint.cyan()));
    }

    out
}

/// The compose form: draft, live count, inline violations, submit state.
pub fn render_compose(state: &ComposeState) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "\" NEW ECHO".purple()));

    if state.message.trim().is_empty() {
        out.push_str(&format!("  {}\n", "What's on your mind tonight?".dimmed()));
    } else {
        for line in state.message.lines() {
            out.push_str(&format!("  {}\n", line));
        }
    }

    let count = format!("{} / {}", state.char_count(), MAX_MESSAGE_LENGTH);
    let count = if state.is_over_limit() {
        count.red().to_string()
    } else {
        count.dimmed().to_string()
    };
    match state.errors.for_field(Field::Message) {
        Some(violation) => out.push_str(&format!("  {}  {}\n", violation.message().red(), count)),
        None => out.push_str(&format!("  {}\n", count)),
    }

    let author = state.author.trim();
    let signed = if author.is_empty() { ANONYMOUS } else { author };
    out.push_str(&format!("  {} {}\n", "Sign as:".cyan(), signed));
    if let Some(violation) = state.errors.for_field(Field::Author) {
        out.push_str(&format!("  {}\n", violation.message().red()));
    }

    let button = if state.submitting {
        "[Sending]".dimmed().to_string()
    } else if state.can_submit() {
        "[Publish Note]".green().bold().to_string()
    } else {
        "[Publish Note]".dimmed().to_string()
    };
    out.push_str(&format!("  {}\n", button));
    out
}

/// A toast line.
pub fn render_toast(toast: &Toast) -> String {
    match toast.kind {
        ToastKind::Success => format!("{} {}", "● Success:".green().bold(), toast.message),
        ToastKind::Error => format!("{} {}", "● Error:".red().bold(), toast.message),
    }
}
