// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Menu and wizard screens. Pure functions from state to [`Reply`].

use postcraft_config::model::LinkedInConfig;
use postcraft_core::types::{Length, PlatformConnection, Post, Tone, UserId};
use postcraft_engine::ContentTemplates;
use strum::IntoEnumIterator;
use url::Url;

use crate::action::Action;
use crate::reply::{Button, Reply};
use crate::session::PendingRequest;

/// Drafts listed in the drafts view.
pub const DRAFTS_SHOWN: usize = 3;
/// Characters of each draft shown in the drafts view.
pub const DRAFT_PREVIEW_CHARS: usize = 100;

const AUTHORIZE_URL: &str = "https://www.linkedin.com/oauth/v2/authorization";

fn back_to_main() -> Button {
    Button::action("⬅️ Back to Main Menu", Action::MainMenu)
}

/// Capitalizes the first letter of each word.
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn main_menu(first_name: &str, connected: bool) -> Reply {
    let text = format!(
        "🎉 Welcome to Postcraft - Your AI LinkedIn Growth Companion!\n\n\
         Hi {first_name}! I'm here to help you:\n\
         • 🤖 Generate AI-powered LinkedIn content\n\
         • 📈 Grow your professional network\n\
         • 📊 Optimize your LinkedIn presence\n\
         • 🎯 Create engaging posts automatically\n\n\
         What would you like to do today?"
    );
    let mut reply = Reply::text(text);
    if !connected {
        reply = reply.button(Button::action("🔗 Connect LinkedIn", Action::ConnectAccount));
    }
    reply
        .button(Button::action("📊 Check Status", Action::CheckStatus))
        .button(Button::action("🤖 AI Content Creator", Action::StartWizard))
        .button(Button::action("📋 View Drafts", Action::ViewDrafts))
        .button(Button::action("❓ Help", Action::Help))
}

pub fn help() -> Reply {
    Reply::text(
        "📚 Postcraft Help Center\n\n\
         🤖 AI Content Creator\n\
         - Pick an industry, tone, and length, then generate a post\n\
         - Or just send a message describing what you want to post about\n\
         - Send a photo with a caption to turn it into a post\n\n\
         ✏️ Follow-ups\n\
         - \"regenerate\" gives you another version of the last request\n\
         - \"shorter\", \"longer\", \"more casual\", \"more professional\" rewrite the last draft\n\n\
         🔗 LinkedIn Integration\n\
         - Connect your LinkedIn account\n\
         - Check connection status\n\n\
         📋 Drafts\n\
         - Every generated post is saved as a draft",
    )
    .button(Button::action("🤖 AI Content Creator", Action::StartWizard))
    .button(back_to_main())
}

/// Authorization URL for the account connection flow, or `None` when no
/// client id is configured.
pub fn authorization_url(config: &LinkedInConfig, user_id: UserId) -> Option<String> {
    let client_id = config.client_id.as_deref()?;
    let state = format!("user_{user_id}");
    Url::parse_with_params(
        AUTHORIZE_URL,
        &[
            ("response_type", "code"),
            ("client_id", client_id),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("state", state.as_str()),
            ("scope", config.scope.as_str()),
        ],
    )
    .ok()
    .map(String::from)
}

fn profile_name(connection: Option<&PlatformConnection>) -> String {
    connection
        .and_then(|c| c.profile.display_name())
        .unwrap_or_else(|| "N/A".to_string())
}

pub fn connect(
    auth_url: Option<String>,
    connection: Option<&PlatformConnection>,
    connected: bool,
) -> Reply {
    if connected {
        let mut reply = Reply::text(format!(
            "✅ Already Connected as {}!\n\nYou can view status, or reconnect if you want to re-authorize.",
            profile_name(connection)
        ))
        .button(Button::action("📊 Check Status", Action::CheckStatus));
        if let Some(url) = auth_url {
            reply = reply.button(Button::link("🔄 Reconnect", url));
        }
        return reply.button(back_to_main());
    }

    match auth_url {
        Some(url) => Reply::text(
            "🔗 LinkedIn Authentication\n\nClick the button below to connect your LinkedIn account:",
        )
        .button(Button::link("🔗 Connect LinkedIn", url))
        .button(back_to_main()),
        None => Reply::text(
            "🔗 LinkedIn Authentication\n\nAccount connection is not configured for this bot yet.",
        )
        .button(back_to_main()),
    }
}

pub fn status(connection: Option<&PlatformConnection>, connected: bool) -> Reply {
    if !connected {
        return Reply::text(
            "❌ LinkedIn Not Connected\n\nTo use all features, please connect your LinkedIn account.",
        )
        .button(Button::action("🔗 Connect LinkedIn", Action::ConnectAccount))
        .button(back_to_main());
    }

    let field = |value: Option<&String>| value.cloned().unwrap_or_else(|| "N/A".to_string());
    let profile = connection.map(|c| &c.profile);
    Reply::text(format!(
        "✅ LinkedIn Connected!\n\n\
         👤 Profile: {}\n\
         🏢 Company: {}\n\
         📧 Email: {}\n\n\
         You're all set to create AI-powered content!",
        profile_name(connection),
        field(profile.and_then(|p| p.company.as_ref())),
        field(profile.and_then(|p| p.email.as_ref())),
    ))
    .button(back_to_main())
}

fn preview(content: &str) -> String {
    if content.chars().count() > DRAFT_PREVIEW_CHARS {
        let cut: String = content.chars().take(DRAFT_PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        content.to_string()
    }
}

/// Drafts view. `drafts` are the newest drafts, newest first; `total` is
/// how many drafts the user has altogether.
pub fn drafts(drafts: &[Post], total: usize) -> Reply {
    if drafts.is_empty() {
        return Reply::text(
            "📋 No Drafts Found\n\nYou don't have any draft posts yet.\n\nCreate your first post!",
        )
        .button(Button::action("🤖 AI Content Creator", Action::StartWizard))
        .button(back_to_main());
    }

    let mut text = String::from("📋 Your Draft Posts\n\n");
    for (i, draft) in drafts.iter().take(DRAFTS_SHOWN).enumerate() {
        text.push_str(&format!("{}. {}\n\n", i + 1, preview(&draft.content)));
    }
    let shown = drafts.len().min(DRAFTS_SHOWN);
    if total > shown {
        text.push_str(&format!("... and {} more drafts", total - shown));
    }
    Reply::text(text.trim_end()).button(back_to_main())
}

pub fn wizard_industries() -> Reply {
    let mut reply = Reply::text(
        "🤖 AI Content Creator\n\nLet's create amazing LinkedIn content together!\n\n\
         Step 1: Choose your industry\n\nWhat industry do you work in?",
    );
    for (industry, _) in ContentTemplates::industries() {
        reply = reply.button(Button::action(
            format!("🏢 {}", title_case(industry)),
            Action::SelectIndustry((*industry).to_string()),
        ));
    }
    reply.button(back_to_main())
}

pub fn wizard_tones(industry: &str) -> Reply {
    let mut reply = Reply::text(format!(
        "🤖 AI Content Creator\n\nStep 2: Choose your tone\n\nIndustry: {}\n\nWhat tone would you like for your content?",
        title_case(industry)
    ));
    for (tone, _) in ContentTemplates::tones() {
        reply = reply.button(Button::action(
            format!("🎭 {}", title_case(&tone.to_string())),
            Action::SelectTone(*tone),
        ));
    }
    reply.button(Button::action("⬅️ Back to Industries", Action::StartWizard))
}

pub fn wizard_lengths(industry: &str, tone: Tone) -> Reply {
    let mut reply = Reply::text(format!(
        "🤖 AI Content Creator\n\nStep 3: Choose content length\n\nIndustry: {}\nTone: {}\n\nHow long would you like your content to be?",
        title_case(industry),
        title_case(&tone.to_string())
    ));
    for length in Length::iter() {
        let (min, max) = length.word_range();
        let icon = match length {
            Length::Short => "📝",
            Length::Medium => "📄",
            Length::Long => "📚",
        };
        reply = reply.button(Button::action(
            format!("{icon} {} ({min}-{max} words)", title_case(&length.to_string())),
            Action::SelectLength(length),
        ));
    }
    reply.button(Button::action("⬅️ Start Over", Action::StartWizard))
}

pub fn wizard_ready(pending: &PendingRequest, defaults: (&str, Tone, Length)) -> Reply {
    let (industry, tone, length) = defaults;
    let industry = pending.industry.as_deref().unwrap_or(industry);
    let tone = pending.tone.unwrap_or(tone);
    let length = pending.length.unwrap_or(length);
    Reply::text(format!(
        "🤖 AI Content Creator\n\nStep 4: Ready to Generate\n\n\
         Industry: {}\nTone: {}\nLength: {}\n\n\
         Click 'Generate Content' to create your AI-powered LinkedIn post!",
        title_case(industry),
        title_case(&tone.to_string()),
        title_case(&length.to_string())
    ))
    .button(Button::action("🎯 Generate Content", Action::Generate))
    .button(Button::action("💡 Topic Ideas", Action::SuggestTopics))
    .button(Button::action("⬅️ Start Over", Action::StartWizard))
}

pub fn topic_ideas(industry: &str, topics: &[String]) -> Reply {
    let mut text = format!("💡 Topic ideas for {}\n\n", title_case(industry));
    for (i, topic) in topics.iter().enumerate() {
        text.push_str(&format!("{}. {topic}\n", i + 1));
    }
    text.push_str("\nSend any of these as a message and I'll draft the post.");
    Reply::text(text)
}

pub fn session_expired() -> Reply {
    Reply::text("❌ Session expired. Please start over.")
        .button(Button::action("🤖 AI Content Creator", Action::StartWizard))
}

#[cfg(test)]
mod tests {
    use super::*;
    use postcraft_core::types::{ConnectionProfile, PostStatus};

    fn linkedin(client_id: Option<&str>) -> LinkedInConfig {
        LinkedInConfig {
            client_id: client_id.map(str::to_string),
            ..LinkedInConfig::default()
        }
    }

    fn post(content: &str, status: PostStatus) -> Post {
        Post {
            id: "id".into(),
            user_id: UserId(1),
            content: content.into(),
            post_type: "post".into(),
            status,
            ai_generated: true,
            topic: "t".into(),
            industry: "general".into(),
            tone: "professional".into(),
            hashtags: vec![],
            engagement_tips: vec![],
            linkedin_tips: vec![],
            suggested_time: String::new(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn connect_button_hidden_when_connected() {
        assert!(main_menu("Ada", false).has_action(&Action::ConnectAccount));
        let connected = main_menu("Ada", true);
        assert!(!connected.has_action(&Action::ConnectAccount));
        assert!(connected.has_action(&Action::StartWizard));
        assert!(connected.text.contains("Hi Ada!"));
    }

    #[test]
    fn authorization_url_carries_flow_parameters() {
        assert!(authorization_url(&linkedin(None), UserId(42)).is_none());

        let url = authorization_url(&linkedin(Some("abc")), UserId(42)).unwrap();
        let parsed = Url::parse(&url).unwrap();
        let params: Vec<(String, String)> = parsed
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(params.contains(&("response_type".into(), "code".into())));
        assert!(params.contains(&("client_id".into(), "abc".into())));
        assert!(params.contains(&("state".into(), "user_42".into())));
        assert!(params.contains(&(
            "redirect_uri".into(),
            "http://localhost:8000/linkedin/callback".into()
        )));
        assert!(params.contains(&("scope".into(), "openid profile email".into())));
    }

    #[test]
    fn status_builds_name_and_defaults() {
        let connection = PlatformConnection {
            user_id: UserId(1),
            profile: ConnectionProfile {
                given_name: Some("Ada".into()),
                family_name: Some("Lovelace".into()),
                email: Some("ada@example.com".into()),
                ..ConnectionProfile::default()
            },
            connected_at: String::new(),
            expires_at: None,
        };
        let reply = status(Some(&connection), true);
        assert!(reply.text.contains("Profile: Ada Lovelace"));
        assert!(reply.text.contains("Email: ada@example.com"));
        assert!(reply.text.contains("Company: N/A"));

        let reply = status(None, false);
        assert!(reply.text.contains("Not Connected"));
        assert!(reply.has_action(&Action::ConnectAccount));
    }

    #[test]
    fn drafts_view_previews_first_three() {
        let long = "x".repeat(150);
        let posts = vec![
            post(&long, PostStatus::Draft),
            post("second", PostStatus::Draft),
            post("third", PostStatus::Draft),
        ];
        let reply = drafts(&posts, 5);
        assert!(reply.text.contains(&format!("1. {}...", "x".repeat(100))));
        assert!(reply.text.contains("3. third"));
        assert!(reply.text.ends_with("... and 2 more drafts"));

        let reply = drafts(&posts, 3);
        assert!(!reply.text.contains("more drafts"));
    }

    #[test]
    fn empty_drafts_view() {
        assert!(drafts(&[], 0).text.contains("No Drafts Found"));
    }

    #[test]
    fn wizard_screens_offer_catalog_choices() {
        let industries = wizard_industries();
        assert!(industries.has_action(&Action::SelectIndustry("technology".into())));
        assert!(industries.has_action(&Action::SelectIndustry("general".into())));

        let tones = wizard_tones("finance");
        assert!(tones.text.contains("Industry: Finance"));
        assert!(tones.has_action(&Action::SelectTone(Tone::Thoughtful)));

        let lengths = wizard_lengths("finance", Tone::Casual);
        assert!(
            lengths
                .all_buttons()
                .any(|b| b.label() == "📝 Short (100-200 words)")
        );
        assert!(lengths.has_action(&Action::SelectLength(Length::Long)));
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("technology"), "Technology");
        assert_eq!(title_case("real estate"), "Real Estate");
    }
}
