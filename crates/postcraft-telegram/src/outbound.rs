// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reply conversion: inline keyboards and message splitting.

use postcraft_router::{Button, Reply};
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use tracing::warn;

/// Telegram's per-message text limit, in UTF-16 code units.
pub const MAX_MESSAGE_LEN: usize = 4096;

/// Inline keyboard for a reply, or `None` when it has no buttons.
pub fn to_markup(reply: &Reply) -> Option<InlineKeyboardMarkup> {
    let rows: Vec<Vec<InlineKeyboardButton>> = reply
        .buttons
        .iter()
        .map(|row| row.iter().filter_map(to_button).collect::<Vec<_>>())
        .filter(|row| !row.is_empty())
        .collect();
    (!rows.is_empty()).then(|| InlineKeyboardMarkup::new(rows))
}

fn to_button(button: &Button) -> Option<InlineKeyboardButton> {
    match button {
        Button::Action { label, action } => Some(InlineKeyboardButton::callback(
            label.clone(),
            action.callback_data(),
        )),
        Button::Link { label, url } => match url::Url::parse(url) {
            Ok(url) => Some(InlineKeyboardButton::url(label.clone(), url)),
            Err(e) => {
                warn!(url = %url, error = %e, "dropping button with invalid URL");
                None
            }
        },
    }
}

fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Splits text into chunks of at most `max` UTF-16 code units, preferring
/// line breaks as split points. Characters are never split.
pub fn split_text(text: &str, max: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_inclusive('\n') {
        let line_len = utf16_len(line);
        if current_len + line_len > max && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if line_len > max {
            // A single line longer than the limit is cut hard.
            let mut piece = String::new();
            let mut piece_len = 0;
            for c in line.chars() {
                if piece_len + c.len_utf16() > max && !piece.is_empty() {
                    chunks.push(std::mem::take(&mut piece));
                    piece_len = 0;
                }
                piece.push(c);
                piece_len += c.len_utf16();
            }
            if !piece.is_empty() {
                chunks.push(piece);
            }
            continue;
        }
        current.push_str(line);
        current_len += line_len;
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use postcraft_router::Action;

    #[test]
    fn buttons_become_one_per_row() {
        let reply = Reply::text("menu")
            .button(Button::action("Help", Action::Help))
            .button(Button::link("Connect", "https://example.com/auth?x=1"))
            .button(Button::link("Broken", "not a url"));
        let markup = to_markup(&reply).unwrap();
        assert_eq!(markup.inline_keyboard.len(), 2);
        assert_eq!(markup.inline_keyboard[0][0].text, "Help");
    }

    #[test]
    fn no_buttons_no_markup() {
        assert!(to_markup(&Reply::text("plain")).is_none());
    }

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(split_text("hello\nworld", 4096), vec!["hello\nworld"]);
    }

    #[test]
    fn long_text_splits_on_lines() {
        let text = format!("{}\n{}\n", "a".repeat(6), "b".repeat(6));
        let chunks = split_text(&text, 8);
        assert_eq!(chunks, vec!["aaaaaa\n".to_string(), "bbbbbb\n".to_string()]);
    }

    #[test]
    fn oversized_line_is_cut() {
        let chunks = split_text(&"x".repeat(10), 4);
        assert_eq!(chunks, vec!["xxxx", "xxxx", "xx"]);
        assert!(chunks.iter().all(|c| c.chars().count() <= 4));
    }

    #[test]
    fn emoji_count_as_two_units() {
        // Each rocket is one char but a surrogate pair in UTF-16.
        let text = format!("{}\n{}\n", "🚀".repeat(3), "🚀".repeat(3));
        let chunks = split_text(&text, 8);
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| utf16_len(c) <= 8));

        let chunks = split_text(&"🚀".repeat(5), 4);
        assert_eq!(chunks, vec!["🚀🚀", "🚀🚀", "🚀"]);
    }

    #[test]
    fn cut_never_splits_a_surrogate_pair() {
        let chunks = split_text(&format!("a{}", "🚀".repeat(2)), 2);
        assert_eq!(chunks, vec!["a", "🚀", "🚀"]);
    }
}
