// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Postcraft - a LinkedIn post writing assistant.
//!
//! This is the binary entry point: the Telegram bot, a local shell that
//! drives the same conversation router, and one-shot generation commands.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod generate;
mod serve;
mod shell;

use clap::{Parser, Subcommand};
use colored::Colorize;
use postcraft_config::loader::apply_credential_fallbacks;

/// Postcraft - a LinkedIn post writing assistant.
#[derive(Parser, Debug)]
#[command(name = "postcraft", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the Telegram bot.
    Serve,
    /// Chat with the bot locally in an interactive REPL.
    Shell,
    /// Draft one post and print it.
    Generate {
        /// What the post is about.
        #[arg(long)]
        topic: String,
        #[arg(long, default_value = "general")]
        industry: String,
        /// professional, casual, enthusiastic or thoughtful.
        #[arg(long, default_value = "professional")]
        tone: String,
        /// short, medium or long.
        #[arg(long, default_value = "medium")]
        length: String,
        /// User id the draft is saved under.
        #[arg(long, default_value_t = shell::LOCAL_USER_ID)]
        user: i64,
    },
    /// List saved drafts.
    Drafts {
        #[arg(long, default_value_t = shell::LOCAL_USER_ID)]
        user: i64,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match postcraft_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            postcraft_config::render_errors(&errors);
            std::process::exit(1);
        }
    };
    apply_credential_fallbacks(&mut config, |name| std::env::var(name).ok());

    init_tracing(&config.agent.log_level);

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Shell) => shell::run_shell(config).await,
        Some(Commands::Generate {
            topic,
            industry,
            tone,
            length,
            user,
        }) => {
            let args = generate::GenerateArgs {
                topic,
                industry,
                tone,
                length,
                user,
            };
            generate::run_generate(config, args).await
        }
        Some(Commands::Drafts { user }) => generate::run_drafts(config, user).await,
        None => {
            println!("postcraft: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("postcraft={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
