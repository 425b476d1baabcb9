//! Application entry point — English tutor CLI.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Parse the command line.
//! 3. Load [`AppConfig`] from disk (writes the defaults on first run).
//! 4. Read the API key (fatal when missing or blank).
//! 5. Build the [`ApiClient`] and the [`Tutor`] session.
//! 6. Run the requested command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use english_tutor::{
    config::{ApiKey, AppConfig},
    llm::ApiClient,
    quiz::{CardView, FlashcardDeck},
    tutor::Tutor,
};

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Debug, Parser)]
#[command(name = "english-tutor", version, about = "Practice English with an AI tutor")]
struct Cli {
    /// Settings file (defaults to the platform config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for the conversation log, feedback, quiz and audio files.
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Do not synthesize replies to audio.
    #[arg(long, global = true)]
    mute: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive chat; type `/feedback`, `/quiz`, `/reset` or `/quit`.
    Chat,
    /// Send a single message.
    Say { text: Vec<String> },
    /// Transcribe a recorded utterance and send it.
    Voice {
        /// Audio file (defaults to `user_audio.mp3` in the output directory).
        file: Option<PathBuf>,
    },
    /// Analyze the conversation and store feedback.
    Feedback,
    /// Show the stored feedback.
    Report,
    /// Generate a quiz from the stored feedback.
    Quiz,
    /// Step through the stored quiz.
    Flashcards,
    /// Delete the chat history.
    Reset,
    /// Synthesize text to the system audio file.
    Speak { text: Vec<String> },
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 2. Command line
    let cli = Cli::parse();

    // 3. Configuration
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => AppConfig::load_or_init().unwrap_or_else(|e| {
            log::warn!("Failed to load config ({e}); using defaults");
            AppConfig::default()
        }),
    };
    if let Some(dir) = cli.output_dir {
        config.storage.output_dir = Some(dir);
    }
    if cli.mute {
        config.speech.enabled = false;
    }
    let paths = config.paths();

    // 4. Credential — nothing works without it
    let api_key = ApiKey::load(&paths.credential_file)
        .context("an OpenAI API key is required; put it on a single line in this file")?;

    // 5. Session
    let client = Arc::new(ApiClient::from_config(&config.llm, &config.speech, api_key));
    let mut tutor = Tutor::new(client, config, paths);
    log::info!("English tutor ready (output: {})", tutor.paths().output_dir.display());

    // 6. Command
    match cli.command {
        Command::Chat => run_chat(&mut tutor).await,
        Command::Say { text } => {
            let reply = tutor.send_message(&text.join(" ")).await?;
            print_reply(&tutor, &reply).await;
            Ok(())
        }
        Command::Voice { file } => {
            let file = file.unwrap_or_else(|| tutor.paths().user_audio_file.clone());
            let (transcript, reply) = tutor.voice_turn(&file).await?;
            println!("You: {transcript}");
            print_reply(&tutor, &reply).await;
            Ok(())
        }
        Command::Feedback => {
            let record = tutor.generate_feedback().await?;
            print!("{}", record.render());
            Ok(())
        }
        Command::Report => {
            let record = tutor.feedback()?;
            if record.is_empty() {
                println!("No feedback found. Chat a little, then run `feedback`.");
            } else {
                print!("{}", record.render());
            }
            Ok(())
        }
        Command::Quiz => {
            let items = tutor.generate_quiz().await?;
            println!("Generated {} question(s).", items.len());
            Ok(())
        }
        Command::Flashcards => run_flashcards(&tutor).await,
        Command::Reset => Ok(tutor.reset()?),
        Command::Speak { text } => {
            let path = tutor.speak(&text.join(" ")).await?;
            println!("Audio saved to {}", path.display());
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Interactive loops
// ---------------------------------------------------------------------------

type StdinLines = Lines<BufReader<Stdin>>;

fn stdin_lines() -> StdinLines {
    BufReader::new(tokio::io::stdin()).lines()
}

/// Print the reply and, when enabled, voice it.  The reply is already
/// recorded, so a speech failure is only logged.
async fn print_reply(tutor: &Tutor, reply: &str) {
    println!("System: {reply}");
    if tutor.speech_enabled() {
        match tutor.speak(reply).await {
            Ok(path) => log::debug!("reply audio at {}", path.display()),
            Err(e) => log::warn!("could not voice reply: {e}"),
        }
    }
}

async fn run_chat(tutor: &mut Tutor) -> Result<()> {
    println!("Type a message and press Enter. Commands: /feedback /quiz /reset /quit");
    let mut lines = stdin_lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        // Command failures are reported and the session keeps going.
        let outcome = match line {
            "" => continue,
            "/quit" | "/exit" => break,
            "/reset" => tutor.reset().map(|_| println!("History deleted.")),
            "/feedback" => tutor
                .generate_feedback()
                .await
                .map(|record| print!("{}", record.render())),
            "/quiz" => tutor
                .generate_quiz()
                .await
                .map(|items| println!("Generated {} question(s).", items.len())),
            text => match tutor.send_message(text).await {
                Ok(reply) => {
                    print_reply(tutor, &reply).await;
                    Ok(())
                }
                Err(e) => Err(e),
            },
        };
        if let Err(e) = outcome {
            eprintln!("error: {e}");
        }
    }
    Ok(())
}

async fn run_flashcards(tutor: &Tutor) -> Result<()> {
    let Some(mut deck) = FlashcardDeck::start(tutor.quiz()?) else {
        println!("No quiz content found.");
        return Ok(());
    };

    println!("Enter: next / reveal, p: previous, q: quit");
    let mut lines = stdin_lines();
    loop {
        match deck.view() {
            CardView::Question {
                number,
                total,
                question,
            } => println!("\n[{number}/{total}] Question:\n{question}"),
            CardView::Answer { answer, .. } => println!("Answer:\n{answer}"),
            CardView::Finished => {
                println!("\nEnd of Quiz!");
            }
        }

        let Some(input) = lines.next_line().await? else {
            break;
        };
        match input.trim() {
            "q" => break,
            "p" if deck.can_go_back() || !deck.cursor().showing_question => deck.prev(),
            "p" => println!("(already at the first card)"),
            _ if deck.is_finished() => break,
            _ => deck.next(),
        }
    }
    Ok(())
}
