use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};
use ratatui::{
  style::{Color, Modifier, Style},
  text::Span,
};

use crate::api::Platform;

pub const COMMIT_HASH_LENGTH: usize = 7;

/// en-GB long date with a 24-hour time, e.g. `5 March 2024 at 14:07:09`.
const TIMESTAMP_FORMAT: &str = "%-d %B %Y at %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
  Outline,
  Secondary,
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
  format_timestamp_in(timestamp, &Local)
}

pub fn format_timestamp_in<Tz>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
  Tz: TimeZone,
  Tz::Offset: Display,
{
  timestamp.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string()
}

/// First seven characters of a commit hash. Shorter hashes are returned whole.
pub fn short_commit_hash(hash: &str) -> &str {
  match hash.char_indices().nth(COMMIT_HASH_LENGTH) {
    Some((end, _)) => &hash[..end],
    None => hash,
  }
}

pub fn platform_icon(platform: &Platform) -> Option<&'static str> {
  match platform {
    Platform::Ios => Some("🍎"),
    Platform::Android => Some("🤖"),
    Platform::Other(_) => None,
  }
}

pub fn badge(text: impl Display, variant: BadgeVariant) -> Span<'static> {
  let style = match variant {
    BadgeVariant::Outline => Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
    BadgeVariant::Secondary => Style::default().fg(Color::White).bg(Color::DarkGray),
  };
  Span::styled(format!(" {text} "), style)
}

pub fn pluralize(count: u64, noun: &str) -> String {
  if count == 1 { format!("{count} {noun}") } else { format!("{count} {noun}s") }
}
