// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-time greeting sent after a user connects their account.

/// Salutation for a local hour of the day (0-23).
pub fn salutation(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good morning",
        12..=16 => "Good afternoon",
        17..=21 => "Good evening",
        _ => "Hello",
    }
}

pub fn connect_greeting(first_name: &str, hour: u32) -> String {
    format!(
        "{}, {first_name}! You're connected to LinkedIn. Tell me what you need and I'll craft a LinkedIn-ready post for you.\n\n\
         Examples:\n\
         • 'Create a post about yesterday's AI meetup'\n\
         • 'Turn this into a post: launched our new feature today'\n\
         • 'Make a short post with a friendly tone'\n\n\
         Reply 'regenerate' anytime to get another version.",
        salutation(hour)
    )
}
