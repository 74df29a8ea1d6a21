//! # Triviacraft CLI
//!
//! Terminal front end for the trivia generator.
//!
//! Usage:
//!   triviacraft                      interactive rounds (same as `play`)
//!   triviacraft ask <topic>...       one question and its answer
//!   triviacraft prompt [topic]...    print the prompt, no network call
//!
//! Examples:
//!   GEMINI_API_KEY=... triviacraft
//!   triviacraft ask video games --json
//!   triviacraft --auth-mode header --model gemini-2.5-pro ask rivers

use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use triviacraft_gen::{trivia_prompt, AuthMode, GeminiProvider, Settings, TriviaRequester};
use triviacraft_view::{Outcome, Phase, Region, ViewController, ViewState, FAILURE_NOTICE};

#[derive(Parser)]
#[command(name = "triviacraft")]
#[command(author, version, about = "Triviacraft - trivia questions from a language model")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (defaults to ./triviacraft.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Model identifier, overrides config and environment
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// How the API key is sent
    #[arg(long, global = true, value_enum)]
    auth_mode: Option<AuthModeArg>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactive rounds: topic, question, reveal, reset
    Play,
    /// Generate a single question and print it with its answer
    Ask {
        /// Topic words; empty lets the model choose
        topic: Vec<String>,

        /// Print the trivia item as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the prompt that would be sent
    Prompt {
        topic: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum AuthModeArg {
    Query,
    Header,
}

impl From<AuthModeArg> for AuthMode {
    fn from(arg: AuthModeArg) -> Self {
        match arg {
            AuthModeArg::Query => AuthMode::QueryParam,
            AuthModeArg::Header => AuthMode::Header,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(cli: &Cli) -> Settings {
    let mut settings = match Settings::load(cli.config.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(model) = &cli.model {
        settings.model = model.clone();
    }
    if let Some(mode) = cli.auth_mode {
        settings.auth_mode = mode.into();
    }

    if settings.missing_api_key() {
        tracing::warn!("no API key configured, generation requests will be rejected");
        eprintln!(
            "Warning: no API key configured. Set GEMINI_API_KEY or api_key in triviacraft.toml.\n"
        );
    }

    tracing::debug!(settings = ?settings, "settings loaded");
    settings
}

fn build_requester(settings: &Settings) -> TriviaRequester<GeminiProvider> {
    match GeminiProvider::new(settings.provider_config()) {
        Ok(provider) => TriviaRequester::new(provider),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn ask(requester: &TriviaRequester<GeminiProvider>, topic: &str, json: bool) {
    match requester.generate_trivia(topic.trim()).await {
        Ok(item) if json => {
            println!("{}", serde_json::to_string_pretty(&item).unwrap_or_default());
        }
        Ok(item) => {
            println!("Question:\n{}\n", item.question);
            println!("Answer:\n{}", item.answer);
        }
        Err(e) => {
            tracing::error!(kind = %e.kind(), error = %e, "trivia generation failed");
            eprintln!("{}", FAILURE_NOTICE);
            std::process::exit(1);
        }
    }
}

fn input_prompt(state: &ViewState) -> &'static str {
    match state.phase() {
        Phase::Setup => "topic> ",
        Phase::QuestionShown => "[r]eveal  [n]ew  [q]uit> ",
        Phase::AnswerRevealed => "[n]ew  [q]uit> ",
    }
}

/// Print the regions a transition just made visible.
fn render(state: &ViewState, outcome: Outcome) {
    match outcome {
        Outcome::Applied => {}
        Outcome::Failed(_) => {
            if let Some(notice) = state.notice() {
                eprintln!("{}\n", notice);
            }
            return;
        }
        Outcome::Ignored | Outcome::Discarded => return,
    }

    match state.phase() {
        Phase::Setup => println!(),
        Phase::QuestionShown if state.is_visible(Region::QuestionDisplay) => {
            println!("\n{}\n", state.question_text());
        }
        Phase::AnswerRevealed if state.is_visible(Region::AnswerDisplay) => {
            println!("\nAnswer: {}\n", state.answer_text());
        }
        _ => {}
    }
}

async fn play(requester: TriviaRequester<GeminiProvider>) {
    let mut controller = ViewController::new(requester);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Triviacraft - type a topic and press Enter (empty for any topic, q to quit)\n");

    loop {
        print!("{}", input_prompt(controller.state()));
        let _ = std::io::stdout().flush();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
        };
        let input = line.trim();
        if input.eq_ignore_ascii_case("q") {
            break;
        }

        let outcome = match controller.state().phase() {
            Phase::Setup => {
                controller.set_topic(input);
                let Some(ticket) = controller.begin_generate() else {
                    continue;
                };
                if controller.state().is_visible(Region::BusyIndicator) {
                    println!("Generating trivia...");
                }
                let result = controller.requester().generate_trivia(ticket.topic()).await;
                controller.finish_generate(ticket, result)
            }
            Phase::QuestionShown => match input {
                "r" | "R" => controller.reveal(),
                "n" | "N" => controller.reset(),
                _ => Outcome::Ignored,
            },
            Phase::AnswerRevealed => match input {
                "n" | "N" => controller.reset(),
                _ => Outcome::Ignored,
            },
        };

        render(controller.state(), outcome);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Some(Commands::Prompt { topic }) => {
            println!("{}", trivia_prompt(&topic.join(" ")));
        }
        Some(Commands::Ask { topic, json }) => {
            let settings = load_settings(&cli);
            let requester = build_requester(&settings);
            ask(&requester, &topic.join(" "), *json).await;
        }
        Some(Commands::Play) | None => {
            let settings = load_settings(&cli);
            play(build_requester(&settings)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_collects_topic_words_and_flags() {
        let cli = Cli::try_parse_from([
            "triviacraft",
            "ask",
            "video",
            "games",
            "--json",
            "--auth-mode",
            "header",
        ])
        .expect("parse");

        match cli.command {
            Some(Commands::Ask { topic, json }) => {
                assert_eq!(topic.join(" "), "video games");
                assert!(json);
            }
            _ => panic!("expected ask"),
        }
        assert!(matches!(cli.auth_mode.map(AuthMode::from), Some(AuthMode::Header)));
    }

    #[test]
    fn test_no_subcommand_means_play() {
        let cli = Cli::try_parse_from(["triviacraft", "-v"]).expect("parse");
        assert!(cli.command.is_none());
        assert!(cli.verbose);
    }

    #[test]
    fn test_input_prompt_follows_phase() {
        assert_eq!(input_prompt(&ViewState::default()), "topic> ");
    }
}
