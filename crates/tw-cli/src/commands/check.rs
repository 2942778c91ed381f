use std::path::Path;

use colored::Colorize;
use tw_engine::validate_story;

pub fn run(path: &Path, die_sides: u32) -> Result<(), String> {
    let graph = super::load_story(path)?;
    let issues = validate_story(&graph, die_sides.max(1));

    for issue in &issues {
        let line = issue.to_string();
        if issue.is_error {
            eprintln!("  {}", line.red());
        } else {
            eprintln!("  {}", line.yellow());
        }
    }

    let errors = issues.iter().filter(|i| i.is_error).count();
    let warnings = issues.len() - errors;
    if errors > 0 {
        return Err(format!(
            "{} error{}, {} warning{}",
            errors,
            if errors == 1 { "" } else { "s" },
            warnings,
            if warnings == 1 { "" } else { "s" },
        ));
    }

    let name = graph.title().unwrap_or("story");
    if warnings > 0 {
        println!(
            "  '{name}' is playable with {} warning{}.",
            warnings,
            if warnings == 1 { "" } else { "s" },
        );
    } else {
        println!("  All checks passed for '{name}'.");
    }
    println!("  {} rooms, start room {}", graph.len(), graph.start());

    Ok(())
}
