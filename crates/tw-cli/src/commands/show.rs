use std::path::Path;

use colored::Colorize;
use tw_core::{Branch, Conditions, Loot, LootKind, RoomVersion, Trigger};
use tw_engine::validate::suggest;

pub fn run(path: &Path, id: &str) -> Result<(), String> {
    let graph = super::load_story(path)?;

    let room = graph.room(id).ok_or_else(|| match suggest(id, graph.room_ids()) {
        Some(close) => format!("room not found: \"{id}\" (did you mean \"{close}\"?)"),
        None => format!("room not found: \"{id}\""),
    })?;

    println!("  {} [{} versions]", format!("room {}", room.id).bold(), room.versions.len());

    for (index, version) in room.versions.iter().enumerate() {
        println!();
        print_version(index, version);
    }

    Ok(())
}

fn print_version(index: usize, version: &RoomVersion) {
    let header = match &version.conditions {
        None => format!("version {index} (default)"),
        Some(conditions) => format!("version {index} when {}", describe(conditions)),
    };
    println!("  {}", header.bold());

    if let Some(trigger) = &version.trigger {
        let name = match trigger {
            Trigger::ResetAll => "reset_all",
            Trigger::Other(name) => name.as_str(),
        };
        println!("  trigger:    {name}");
    }

    for line in version.lines() {
        println!("  {}", line.trim());
    }

    print_loot("  ", &version.loot);

    match &version.branch {
        Branch::Dice(outcomes) => {
            for outcome in outcomes {
                println!(
                    "  {} {} {} {}",
                    format!("{:>5}", outcome.val).dimmed(),
                    outcome.text,
                    "->".dimmed(),
                    outcome.goto
                );
                print_loot("        ", &outcome.loot);
            }
        }
        Branch::Choices(choices) => {
            for (i, choice) in choices.iter().enumerate() {
                println!(
                    "  {} {} {} {}",
                    format!("[{}]", i + 1).dimmed(),
                    choice.text,
                    "->".dimmed(),
                    choice.goto
                );
                print_loot("      ", &choice.loot);
                for kind in LootKind::ALL {
                    if let Some(label) = choice.get_command(kind) {
                        println!("      takes {kind} {label}");
                    }
                    if let Some(label) = choice.remove_command(kind) {
                        println!("      drops {kind} {label}");
                    }
                }
            }
        }
        Branch::End => println!("  {}", "(end)".dimmed()),
    }
}

fn print_loot(indent: &str, loot: &Loot) {
    for kind in LootKind::ALL {
        for entry in loot.get(kind) {
            let label = entry.label.as_deref().unwrap_or("(unlabeled)");
            let mode = if entry.autoloot { "auto" } else { "manual" };
            println!("{indent}{kind}: {label} {}", format!("({mode})").dimmed());
        }
    }
}

fn describe(conditions: &Conditions) -> String {
    let mut parts = Vec::new();
    for kind in LootKind::ALL {
        for label in conditions.required(kind) {
            parts.push(format!("has {kind} {label}"));
        }
        for label in conditions.forbidden(kind) {
            parts.push(format!("lacks {kind} {label}"));
        }
    }
    if parts.is_empty() {
        "(no recognized conditions)".to_string()
    } else {
        parts.join(" and ")
    }
}
