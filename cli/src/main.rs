use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tagquiz_core::{LoadError, TagQuizEngine, TagToken};

mod play;
mod provider;

use provider::FileProvider;

const DEFAULT_ANSWERS: &str = "assets/tagging-answers.json";

#[derive(Parser)]
#[command(name = "tagquiz", version, about = "Terminal front end for tag classification quizzes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Sets {
        #[command(subcommand)]
        command: SetsCommand,
    },
    Quiz {
        #[command(subcommand)]
        command: QuizCommand,
    },
}

#[derive(Subcommand)]
enum SetsCommand {
    List {
        #[arg(long, env = "TAGQUIZ_ANSWERS", default_value = DEFAULT_ANSWERS)]
        answers: PathBuf,
    },
}

#[derive(Subcommand)]
enum QuizCommand {
    Check {
        #[arg(long, env = "TAGQUIZ_ANSWERS", default_value = DEFAULT_ANSWERS)]
        answers: PathBuf,
        #[arg(long, default_value = "default")]
        set: String,
        #[arg(long, value_delimiter = ',', required = true)]
        select: Vec<String>,
    },
    Play {
        #[arg(long, env = "TAGQUIZ_ANSWERS", default_value = DEFAULT_ANSWERS)]
        answers: PathBuf,
        #[arg(long, default_value = "default")]
        set: String,
        #[arg(long)]
        seed: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Sets { command } => match command {
            SetsCommand::List { answers } => {
                let provider = FileProvider::open(&answers)?;
                for id in provider.set_ids() {
                    let count = provider.option_count(id).unwrap_or(0);
                    println!("{id} ({count} tags)");
                }
            }
        },
        Commands::Quiz { command } => match command {
            QuizCommand::Check {
                answers,
                set,
                select,
            } => {
                let provider = FileProvider::open(&answers)?;
                let mut engine = TagQuizEngine::new();
                load_or_list(&mut engine, &provider, &set)?;

                for raw in &select {
                    let token = TagToken::parse(raw)?;
                    engine.move_to_selected(&token)?;
                    if !engine.selected().contains(&token) {
                        eprintln!("unknown tag: {raw}");
                    }
                }

                let result = engine.submit()?.clone();
                for (token, correct) in &result.per_token {
                    let verdict = if *correct { "correct  " } else { "incorrect" };
                    match result.feedback.get(token) {
                        Some(feedback) if !feedback.is_empty() => {
                            println!("{verdict} [{token}] {feedback}");
                        }
                        _ => println!("{verdict} [{token}]"),
                    }
                }
                for token in &result.missing {
                    eprintln!("warning: no answer entry for [{token}]");
                }
                let correct_count = result.per_token.values().filter(|c| **c).count();
                if result.all_correct {
                    println!("all correct!");
                } else {
                    println!("{correct_count}/{} correct", result.per_token.len());
                    std::process::exit(1);
                }
            }
            QuizCommand::Play { answers, set, seed } => {
                let provider = FileProvider::open(&answers)?;
                let rng = match seed.as_deref() {
                    Some(raw) => StdRng::seed_from_u64(parse_seed_arg(raw)?),
                    None => StdRng::from_os_rng(),
                };
                let mut engine = TagQuizEngine::with_rng(rng);
                load_or_list(&mut engine, &provider, &set)?;
                play::run(&mut engine)?;
            }
        },
    }

    Ok(())
}

fn load_or_list(
    engine: &mut TagQuizEngine<StdRng>,
    provider: &FileProvider,
    set: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match engine.load_quiz(provider, set) {
        Ok(()) => Ok(()),
        Err(err) => {
            if let LoadError::UnknownAnswerSet(_) = &err {
                eprintln!("unknown answer set: {set}");
                eprintln!("available answer sets:");
                for id in provider.set_ids() {
                    eprintln!("  {id}");
                }
            }
            Err(err.into())
        }
    }
}

fn parse_seed_arg(raw: &str) -> Result<u64, Box<dyn std::error::Error>> {
    let trimmed = raw.trim();
    let value = if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X"))
    {
        u64::from_str_radix(hex, 16)?
    } else {
        trimmed.parse::<u64>()?
    };
    Ok(value)
}
