use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use tw_core::{Branch, Room};

pub fn run(path: &Path) -> Result<(), String> {
    let graph = super::load_story(path)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Versions", "Default", "Offers", "Leads to"]);

    for room in graph.rooms() {
        let default = room
            .default_version_index()
            .map(|i| i.to_string())
            .unwrap_or_else(|| "—".to_string());

        let mut targets: Vec<&str> = room.versions.iter().flat_map(|v| v.targets()).collect();
        targets.sort_unstable();
        targets.dedup();
        let targets = if targets.is_empty() {
            "—".to_string()
        } else {
            targets.join(", ")
        };

        table.add_row(vec![
            room.id.clone(),
            room.versions.len().to_string(),
            default,
            offers(room),
            targets,
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} rooms", graph.len());

    Ok(())
}

/// Summarize the branches across a room's versions.
fn offers(room: &Room) -> String {
    let mut kinds: Vec<&str> = room
        .versions
        .iter()
        .map(|v| match &v.branch {
            Branch::Dice(_) => "dice",
            Branch::Choices(_) => "choices",
            Branch::End => "end",
        })
        .collect();
    kinds.dedup();
    kinds.join(", ")
}
