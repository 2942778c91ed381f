use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use colored::Colorize;
use tw_engine::{EngineConfig, GameSession, Phase};

use crate::render;

/// Steps of the rolling animation.
const ROLL_FRAMES: u64 = 3;

pub struct PlayOptions {
    pub seed: Option<u64>,
    pub roll_delay_ms: u64,
    pub start: Option<String>,
    pub debug: bool,
    pub journal: Option<PathBuf>,
}

pub fn run(path: &Path, options: PlayOptions) -> Result<(), String> {
    let graph = super::load_story(path)?;

    let mut config = EngineConfig::default();
    if let Some(seed) = options.seed {
        config = config.with_seed(seed);
    }
    if let Some(start) = &options.start {
        config = config.with_start_room(start.clone());
    }

    if let Some(title) = graph.title() {
        println!("  {}", title.bold());
    }
    println!("  Type a number to choose, 'r' to roll, 'i' for inventory, 'q' to quit.");

    let mut session = GameSession::new(Arc::new(graph), config);
    let outcome = play_loop(&mut session, &options);

    if let Some(journal_path) = &options.journal {
        let json = session
            .journal()
            .to_json()
            .map_err(|e| format!("failed to serialize journal: {e}"))?;
        std::fs::write(journal_path, json)
            .map_err(|e| format!("failed to write {}: {e}", journal_path.display()))?;
    }

    outcome
}

fn play_loop(session: &mut GameSession, options: &PlayOptions) -> Result<(), String> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();
    let mut redraw = true;

    loop {
        if redraw {
            let view = session.view();
            render::print_view(&view);
            if options.debug {
                render::print_debug(session, &view);
            }
            if let Phase::Failed(err) = session.phase() {
                return Err(err.to_string());
            }
            if view.is_terminal() {
                return Ok(());
            }
            redraw = false;
        }

        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => return Ok(()), // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        match input.to_ascii_lowercase().as_str() {
            "" => {}
            "q" | "quit" => return Ok(()),
            "i" | "inventory" => render::print_inventory(&session.view()),
            "restart" => {
                session.restart();
                redraw = true;
            }
            "r" | "roll" => match roll(session, options.roll_delay_ms) {
                Ok(()) => redraw = true,
                Err(e) => {
                    println!("  {}", e.yellow());
                    redraw = session.phase().is_terminal();
                }
            },
            other => match other.parse::<usize>() {
                Ok(n) if n >= 1 => match session.choose(n - 1) {
                    Ok(_) => redraw = true,
                    Err(e) => {
                        println!("  {}", e.to_string().yellow());
                        redraw = session.phase().is_terminal();
                    }
                },
                _ => println!("  {}", format!("unknown command: {input}").yellow()),
            },
        }
    }
}

fn roll(session: &mut GameSession, delay_ms: u64) -> Result<(), String> {
    let handle = session.request_roll().map_err(|e| e.to_string())?;

    print!("  Rolling");
    io::stdout().flush().map_err(|e| e.to_string())?;
    for _ in 0..ROLL_FRAMES {
        thread::sleep(Duration::from_millis(delay_ms / ROLL_FRAMES));
        print!(".");
        io::stdout().flush().map_err(|e| e.to_string())?;
    }
    println!();

    let resolution = session.commit_roll(&handle).map_err(|e| e.to_string())?;
    println!(
        "  You rolled {}: {}",
        resolution.roll.to_string().bold(),
        resolution.text
    );
    Ok(())
}
