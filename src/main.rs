//! game-screen-reader demo entry point
//!
//! Reads lines from stdin and announces each one through the screen reader
//! façade, the same way a game would announce menu items. Repeated lines
//! are dropped unless `--force` is given.

use game_screen_reader::{
    initialize_screen_reader, initialize_screen_reader_with, shut_down_screen_reader, speak_text,
    Config, Result,
};
use log::{error, info};
use std::io::{self, BufRead};
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let debug_mode = args.iter().any(|arg| arg == "--debug" || arg == "-d");

    // Initialize logger
    if debug_mode {
        // Debug mode: write to game-screen-reader.log
        use std::fs::OpenOptions;
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("game-screen-reader.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Warning: Failed to open game-screen-reader.log: {}", e);
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!(
            "{} version {} starting (debug mode)",
            game_screen_reader::APP_NAME,
            game_screen_reader::VERSION
        );
    } else {
        // Normal mode: errors only unless RUST_LOG says otherwise
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Error)
            .parse_default_env()
            .init();
    }

    if let Err(e) = run(&args) {
        error!("Fatal error: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &[String]) -> Result<()> {
    let force = args.iter().any(|arg| arg == "--force" || arg == "-f");

    match config_path(args) {
        Some(path) => {
            let config = Config::load_from(path)?;
            initialize_screen_reader_with(&config);
        }
        None => initialize_screen_reader(),
    }

    announce(io::stdin().lock(), force)
}

/// Speak every line of `input`, then release the screen reader
///
/// The reader is shut down even when reading fails part way.
fn announce(input: impl BufRead, force: bool) -> Result<()> {
    let result = speak_lines(input, |text| speak_text(text, force));
    shut_down_screen_reader();
    result
}

/// Hand each non-blank line of `input` to `speak`
fn speak_lines(input: impl BufRead, mut speak: impl FnMut(&str)) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        speak(text);
    }
    Ok(())
}

/// Value following `--config`, if given
fn config_path(args: &[String]) -> Option<&str> {
    args.iter()
        .position(|arg| arg == "--config" || arg == "-c")
        .and_then(|idx| args.get(idx + 1))
        .map(String::as_str)
}
