use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use slide_insight::config::Config;
use slide_insight::models::TurnOptions;
use slide_insight::service::{ChatService, TurnReply};
use slide_insight::session::SessionState;
use slide_insight::{ImageResult, intent};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::load();
    let service = ChatService::new(&config)?;
    let mut session = SessionState::new();
    let mut opts = TurnOptions {
        model: config.chat.default_model.clone(),
        num_slides: config.quiz.default_num_slides,
        num_questions: config.quiz.default_num_questions,
    };

    println!("SlideInsight chatbot for the Bio-Image Data Science lecture.");
    println!(
        "Quiz triggers: {}. Slide triggers: {}.",
        intent::quiz_triggers().join(", "),
        intent::slide_triggers().join(", ")
    );
    println!("Commands: :model <name>, :slides <n>, :questions <n>, :reset, :quit");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if let Some(command) = input.strip_prefix(':') {
            match handle_command(command, &config, &service, &mut session, &mut opts) {
                CommandOutcome::Continue => continue,
                CommandOutcome::Quit => break,
            }
        }

        let TurnReply { text, images } = service.handle_turn(&mut session, input, &opts).await;
        println!("{text}");
        if !images.is_empty() {
            match save_slides(&images) {
                Ok(paths) => {
                    for path in paths {
                        println!("  slide: {}", path.display());
                    }
                }
                Err(e) => tracing::warn!("Failed to save slide images: {}", e),
            }
        }
    }

    Ok(())
}

enum CommandOutcome {
    Continue,
    Quit,
}

fn handle_command(
    command: &str,
    config: &Config,
    service: &ChatService,
    session: &mut SessionState,
    opts: &mut TurnOptions,
) -> CommandOutcome {
    let mut words = command.split_whitespace();
    match (words.next(), words.next()) {
        (Some("quit"), _) | (Some("exit"), _) => return CommandOutcome::Quit,
        (Some("reset"), _) => {
            service.reset_session(session);
            println!("Chat reset.");
        }
        (Some("model"), Some(name)) => {
            if config.chat.available_models.iter().any(|m| m == name) {
                opts.model = name.to_string();
                println!("Model set to {name}.");
            } else {
                println!(
                    "Unknown model. Available: {}",
                    config.chat.available_models.join(", ")
                );
            }
        }
        (Some("slides"), Some(n)) => match n.parse::<usize>() {
            Ok(n) => {
                opts.num_slides = n;
                println!("Fetching {n} slides per topic.");
            }
            Err(_) => println!("Expected a number."),
        },
        (Some("questions"), Some(n)) => match n.parse::<usize>() {
            Ok(n) => {
                opts.num_questions = n;
                println!("Generating {n} questions per topic.");
            }
            Err(_) => println!("Expected a number."),
        },
        _ => println!("Commands: :model <name>, :slides <n>, :questions <n>, :reset, :quit"),
    }
    CommandOutcome::Continue
}

/// Write the turn's slide images to disk; the terminal equivalent of the
/// inline image display.
fn save_slides(images: &[ImageResult]) -> Result<Vec<PathBuf>> {
    let dir = std::env::temp_dir().join("slide-insight");
    std::fs::create_dir_all(&dir)?;
    let mut paths = Vec::with_capacity(images.len());
    for (i, image) in images.iter().enumerate() {
        let path = dir.join(format!("slide_{:02}.png", i + 1));
        image.bitmap().save(&path)?;
        paths.push(path);
    }
    Ok(paths)
}
