// src/util/text.rs
use chrono::{Local, TimeZone};
use lazy_static::lazy_static;
use regex::Regex;

use crate::constants::PREVIEW_LENGTH;
use crate::domain::{content, Block};

lazy_static! {
    static ref WHITESPACE_RUN: Regex =
        Regex::new(r"\s+").expect("Failed to compile whitespace regex");
}

/// One-line summary of a note's serialized content for list output.
///
/// Uses the first non-blank text block, whitespace collapsed and cut to
/// [`PREVIEW_LENGTH`] characters. Notes without text show their first media
/// block instead.
///
/// # Examples
///
/// ```
/// use blocknotes::util::text::preview;
///
/// let content = "TXT:  milk\n\neggs \n---PART_SEPARATOR---\nIMG:AAAA";
/// assert_eq!(preview(content), "milk eggs");
/// ```
pub fn preview(serialized: &str) -> String {
    let blocks = content::deserialize(serialized);

    if let Some(text) = blocks
        .iter()
        .filter_map(Block::as_text)
        .find(|t| !t.trim().is_empty())
    {
        return truncate(&collapse_whitespace(text), PREVIEW_LENGTH);
    }

    match blocks.iter().find(|b| b.is_media()) {
        Some(Block::Image { .. }) => "[image]".to_string(),
        Some(Block::Audio { title, .. }) => format!("[audio: {title}]"),
        _ => String::new(),
    }
}

pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

/// Format epoch milliseconds as a local date and time.
pub fn format_timestamp(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => millis.to_string(),
    }
}
