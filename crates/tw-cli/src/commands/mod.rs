pub mod check;
pub mod play;
pub mod rooms;
pub mod show;

use std::path::Path;

use tw_core::StoryGraph;

/// Load a story file, mapping load errors to a printable message.
fn load_story(path: &Path) -> Result<StoryGraph, String> {
    let graph = StoryGraph::load(path).map_err(|e| format!("{}: {e}", path.display()))?;
    tracing::debug!(path = %path.display(), rooms = graph.len(), start = graph.start(), "story loaded");
    Ok(graph)
}
