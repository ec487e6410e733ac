// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `postcraft shell` command implementation.
//!
//! A readline REPL that talks to the same conversation router as the
//! Telegram bot. Free text is classified exactly as a chat message would be;
//! slash commands stand in for the inline buttons.

use std::str::FromStr;

use colored::Colorize;
use postcraft_config::PostcraftConfig;
use postcraft_core::types::{Length, Tone, UserId, UserProfile};
use postcraft_core::{PostcraftError, StorageAdapter};
use postcraft_router::{Action, Button, Inbound, Reply};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::serve::open_router;

/// User id for local sessions. Telegram ids are always positive.
pub const LOCAL_USER_ID: i64 = 0;

const SHELL_HELP: &str = "\
/start             show the main menu
/wizard            choose industry, tone and length step by step
/industry <name>   pick an industry
/tone <name>       pick a tone
/length <name>     pick a length
/generate          draft with the wizard's choices
/topics            topic ideas for the chosen industry
/drafts            list saved drafts
/press <data>      press a button by its callback data
/quit              leave the shell
Anything else is sent as a chat message.";

/// One parsed line of shell input.
#[derive(Debug, PartialEq)]
enum ShellInput {
    Quit,
    Help,
    Send(Inbound),
}

fn callback(action: Action) -> ShellInput {
    ShellInput::Send(Inbound::Callback(action.callback_data()))
}

/// Maps a line of input to a router event.
fn parse_line(line: &str) -> Result<ShellInput, String> {
    let line = line.trim();
    if !line.starts_with('/') {
        return Ok(ShellInput::Send(Inbound::Text(line.to_string())));
    }

    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (line, ""),
    };
    let input = match command {
        "/quit" | "/exit" => ShellInput::Quit,
        "/help" => ShellInput::Help,
        "/start" => ShellInput::Send(Inbound::Start),
        "/menu" => callback(Action::MainMenu),
        "/wizard" | "/create" => callback(Action::StartWizard),
        "/generate" => callback(Action::Generate),
        "/topics" => callback(Action::SuggestTopics),
        "/drafts" => callback(Action::ViewDrafts),
        "/status" => callback(Action::CheckStatus),
        "/industry" if !arg.is_empty() => callback(Action::SelectIndustry(arg.to_lowercase())),
        "/tone" => {
            let tone = Tone::from_str(arg).map_err(|_| {
                "usage: /tone professional|casual|enthusiastic|thoughtful".to_string()
            })?;
            callback(Action::SelectTone(tone))
        }
        "/length" => {
            let length = Length::from_str(arg)
                .map_err(|_| "usage: /length short|medium|long".to_string())?;
            callback(Action::SelectLength(length))
        }
        "/press" if !arg.is_empty() => ShellInput::Send(Inbound::Callback(arg.to_string())),
        "/industry" | "/press" => return Err(format!("usage: {command} <value>")),
        other => return Err(format!("unknown command {other}, try /help")),
    };
    Ok(input)
}

fn local_profile() -> UserProfile {
    let first_name = std::env::var("USER")
        .ok()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "there".to_string());
    UserProfile {
        user_id: UserId(LOCAL_USER_ID),
        username: None,
        first_name,
        last_name: None,
    }
}

/// Renders a reply for the terminal. Buttons are listed under the text with
/// the command that presses them.
fn render_reply(reply: &Reply) -> String {
    let mut out = reply.text.clone();
    for button in reply.all_buttons() {
        let line = match button {
            Button::Action { label, action } => {
                format!("\n  [{label}] /press {}", action.callback_data())
            }
            Button::Link { label, url } => format!("\n  [{label}] {url}"),
        };
        out.push_str(&line);
    }
    out
}

/// Runs the `postcraft shell` interactive REPL.
pub async fn run_shell(config: PostcraftConfig) -> Result<(), PostcraftError> {
    let (storage, router) = open_router(&config).await?;
    let profile = local_profile();

    let mut rl = DefaultEditor::new()
        .map_err(|e| PostcraftError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "postcraft shell".bold().green());
    println!("Type {} for commands, {} to exit.\n", "/help".yellow(), "/quit".yellow());

    let prompt = format!("{}> ", "postcraft".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                let inbound = match parse_line(&line) {
                    Ok(ShellInput::Quit) => break,
                    Ok(ShellInput::Help) => {
                        println!("{}", SHELL_HELP.dimmed());
                        continue;
                    }
                    Ok(ShellInput::Send(inbound)) => inbound,
                    Err(message) => {
                        eprintln!("{}", message.yellow());
                        continue;
                    }
                };

                debug!(?inbound, "shell input");
                for reply in router.handle(&profile, inbound).await {
                    println!("{}\n", render_reply(&reply));
                }
            }
            // Ctrl+C, Ctrl+D
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    storage.close().await?;
    println!("{}", "goodbye".dimmed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sent(line: &str) -> Inbound {
        match parse_line(line) {
            Ok(ShellInput::Send(inbound)) => inbound,
            other => panic!("expected an event for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn plain_text_is_a_message() {
        assert_eq!(
            sent("  make it shorter "),
            Inbound::Text("make it shorter".into())
        );
    }

    #[test]
    fn slash_commands_press_buttons() {
        assert_eq!(sent("/start"), Inbound::Start);
        assert_eq!(sent("/wizard"), Inbound::Callback("wizard_start".into()));
        assert_eq!(
            sent("/industry Finance"),
            Inbound::Callback("wizard_industry:finance".into())
        );
        assert_eq!(sent("/tone casual"), Inbound::Callback("wizard_tone:casual".into()));
        assert_eq!(sent("/length long"), Inbound::Callback("wizard_length:long".into()));
        assert_eq!(sent("/generate"), Inbound::Callback("wizard_generate".into()));
        assert_eq!(sent("/press help"), Inbound::Callback("help".into()));
    }

    #[test]
    fn bad_arguments_are_reported() {
        assert!(parse_line("/tone sarcastic").is_err());
        assert!(parse_line("/length").is_err());
        assert!(parse_line("/industry").is_err());
        assert!(parse_line("/bogus").is_err());
    }

    #[test]
    fn quit_and_help() {
        assert_eq!(parse_line("/quit"), Ok(ShellInput::Quit));
        assert_eq!(parse_line("/exit"), Ok(ShellInput::Quit));
        assert_eq!(parse_line("/help"), Ok(ShellInput::Help));
    }

    #[test]
    fn buttons_render_as_commands() {
        let reply = Reply::text("Pick one")
            .button(Button::action("Help", Action::Help))
            .button(Button::link("Connect", "https://example.com"));
        let rendered = render_reply(&reply);
        assert!(rendered.starts_with("Pick one"));
        assert!(rendered.contains("[Help] /press help"));
        assert!(rendered.contains("[Connect] https://example.com"));
    }
}
