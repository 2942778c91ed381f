//! Line-oriented rendering of turn views.

use colored::Colorize;
use tw_core::LootKind;
use tw_engine::{GameSession, Prompt, TurnView};

pub fn print_view(view: &TurnView) {
    println!();
    for line in &view.lines {
        println!("  {line}");
    }

    if !view.flavor.is_empty() {
        println!();
        for flavor in &view.flavor {
            println!("  {}", flavor.italic());
        }
    }

    println!();
    match &view.prompt {
        Prompt::Choices(choices) => {
            for (i, choice) in choices.iter().enumerate() {
                println!("  {} {choice}", format!("[{}]", i + 1).bold());
            }
        }
        Prompt::Dice { outcomes, .. } => {
            println!("  {}", "Roll the die (r):".bold());
            for outcome in outcomes {
                println!("  {}  {}", format!("{:>5}", outcome.range).dimmed(), outcome.text);
            }
        }
        Prompt::End => println!("  {}", "The End.".bold()),
        Prompt::Failed(message) => println!("  {}", message.red()),
    }
}

pub fn print_inventory(view: &TurnView) {
    if view.inventory.is_empty() {
        println!("  {}", "You carry nothing.".dimmed());
        return;
    }
    println!("  {}", "Inventory:".bold());
    for entry in &view.inventory {
        println!("  - {entry}");
    }
}

pub fn print_debug(session: &GameSession, view: &TurnView) {
    let version = view
        .version_index
        .map(|i| i.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "  {}",
        format!("room {} / version {version} / {:?}", view.room_id, session.phase()).dimmed()
    );

    for kind in LootKind::ALL {
        let labels: Vec<&str> = session
            .player()
            .collection(kind)
            .iter()
            .map(|e| e.label.as_deref().unwrap_or("(unlabeled)"))
            .collect();
        println!("  {}", format!("{}: [{}]", kind.key(), labels.join(", ")).dimmed());
    }

    for diagnostic in &view.diagnostics {
        println!("  {}", diagnostic.to_string().yellow());
    }
}
