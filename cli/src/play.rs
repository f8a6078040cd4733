use std::error::Error;
use std::io::{self, BufRead, Write};

use rand::rngs::StdRng;
use tagquiz_core::{EvaluationResult, SubmitError, TagQuizEngine, TagToken};

pub fn run(engine: &mut TagQuizEngine<StdRng>) -> Result<(), Box<dyn Error>> {
    print_pools(engine);
    print_help();

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let (command, rest) = match input.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };
        match command {
            "pick" | "drop" => {
                let token: TagToken = match rest.parse() {
                    Ok(token) => token,
                    Err(err) => {
                        println!("{err}");
                        continue;
                    }
                };
                if engine.submitted() {
                    println!("answers are locked; reset to keep going");
                    continue;
                }
                if command == "pick" {
                    engine.move_to_selected(&token)?;
                } else {
                    engine.move_to_available(&token)?;
                }
                print_pools(engine);
            }
            "submit" => match engine.submit() {
                Ok(result) => {
                    let result = result.clone();
                    print_result(&result);
                }
                Err(SubmitError::NothingSelected) => {
                    println!("nothing selected yet; pick at least one tag");
                }
                Err(err) => return Err(err.into()),
            },
            "reset" => {
                engine.reset();
                print_pools(engine);
            }
            "show" => {
                print_pools(engine);
                if let Some(result) = engine.last_result() {
                    let result = result.clone();
                    print_result(&result);
                }
            }
            "quit" | "exit" => break,
            _ => print_help(),
        }
    }
    Ok(())
}

fn print_pools(engine: &TagQuizEngine<StdRng>) {
    println!("available: {}", join_tags(engine.available()));
    println!("selected:  {}", join_tags(engine.selected()));
}

fn join_tags(tags: &[TagToken]) -> String {
    if tags.is_empty() {
        return "(none)".to_string();
    }
    tags.iter()
        .map(|tag| format!("[{tag}]"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_result(result: &EvaluationResult) {
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
    if result.all_correct {
        println!("all correct, nicely done!");
    }
}

fn print_help() {
    println!("commands:");
    println!("  pick <tag>   move a tag into your answer");
    println!("  drop <tag>   move a tag back to the pool");
    println!("  submit       check your answer");
    println!("  reset        start over");
    println!("  show         print pools and the last result");
    println!("  quit         leave");
}
