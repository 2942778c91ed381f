//! Static checks over a loaded story.
//!
//! Loading only rejects documents that cannot be played at all. These checks
//! find content that loads but misbehaves at run time: dangling `goto`
//! targets, rooms without a usable default version, dice tables with holes,
//! and so on.

use strsim::jaro_winkler;
use tw_core::{Branch, LootKind, Room, RoomVersion, StoryGraph, Trigger};

use crate::range::{RollRange, parse_range};

/// Minimum similarity score for "did you mean" suggestions (0.0-1.0).
const FUZZY_THRESHOLD: f64 = 0.8;

/// A warning or error found during story validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// The room where the issue was found.
    pub room: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl ValidationIssue {
    fn error(room: &str, message: impl Into<String>) -> Self {
        Self {
            room: room.to_string(),
            message: message.into(),
            is_error: true,
        }
    }

    fn warning(room: &str, message: impl Into<String>) -> Self {
        Self {
            room: room.to_string(),
            message: message.into(),
            is_error: false,
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: room {}: {}", self.room, self.message)
    }
}

/// Validate a story against a die with `die_sides` faces.
///
/// Issues are returned in room order. An empty list means the story is
/// clean.
pub fn validate_story(graph: &StoryGraph, die_sides: u32) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if !graph.contains(graph.start()) {
        issues.push(ValidationIssue::error(
            graph.start(),
            format!("start room does not exist{}", hint(graph, graph.start())),
        ));
    }

    for room in graph.rooms() {
        validate_room(graph, room, die_sides, &mut issues);
    }

    issues
}

/// The closest candidate to `input`, if any is similar enough.
pub fn suggest<'a>(
    input: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<&'a str> {
    let input_lower = input.to_lowercase();
    let mut best: Option<(&str, f64)> = None;
    for candidate in candidates {
        let score = jaro_winkler(&input_lower, &candidate.to_lowercase());
        if score >= FUZZY_THRESHOLD && best.is_none_or(|(_, s)| score > s) {
            best = Some((candidate, score));
        }
    }
    best.map(|(candidate, _)| candidate)
}

fn hint(graph: &StoryGraph, missing: &str) -> String {
    match suggest(missing, graph.room_ids()) {
        Some(close) => format!(" (did you mean \"{close}\"?)"),
        None => String::new(),
    }
}

fn validate_room(
    graph: &StoryGraph,
    room: &Room,
    die_sides: u32,
    issues: &mut Vec<ValidationIssue>,
) {
    if room.versions.is_empty() {
        issues.push(ValidationIssue::error(&room.id, "room has no versions"));
        return;
    }

    let defaults = room.versions.iter().filter(|v| v.conditions.is_none()).count();
    if defaults > 1 {
        issues.push(ValidationIssue::error(
            &room.id,
            format!("{defaults} versions have no conditions; only the first is used"),
        ));
    } else if defaults == 0 {
        issues.push(ValidationIssue::warning(
            &room.id,
            "no default version; entering fails when no condition matches",
        ));
    }

    for (index, version) in room.versions.iter().enumerate() {
        validate_version(graph, room, index, version, die_sides, issues);
    }
}

fn validate_version(
    graph: &StoryGraph,
    room: &Room,
    index: usize,
    version: &RoomVersion,
    die_sides: u32,
    issues: &mut Vec<ValidationIssue>,
) {
    let unrecognized = version
        .conditions
        .as_ref()
        .is_some_and(|c| !c.has_recognized_key());
    if unrecognized {
        issues.push(ValidationIssue::warning(
            &room.id,
            format!("version {index}: conditions have no recognized keys and never match"),
        ));
    }

    if let Some(Trigger::Other(name)) = &version.trigger {
        issues.push(ValidationIssue::warning(
            &room.id,
            format!("version {index}: unknown trigger \"{name}\" is ignored"),
        ));
    }

    for target in version.targets() {
        if !graph.contains(target) {
            issues.push(ValidationIssue::error(
                &room.id,
                format!(
                    "version {index}: goto \"{target}\" does not exist{}",
                    hint(graph, target)
                ),
            ));
        }
    }

    match &version.branch {
        Branch::Dice(outcomes) => {
            let mut ranges: Vec<RollRange> = Vec::new();
            for outcome in outcomes {
                match parse_range(&outcome.val) {
                    Ok(range) if range.is_empty() => issues.push(ValidationIssue::warning(
                        &room.id,
                        format!("version {index}: range \"{}\" covers no faces", outcome.val),
                    )),
                    Ok(range) => ranges.push(range),
                    Err(err) => issues.push(ValidationIssue::error(
                        &room.id,
                        format!("version {index}: range \"{}\": {err}", outcome.val),
                    )),
                }
            }

            let uncovered: Vec<String> = (1..=die_sides)
                .filter(|face| !ranges.iter().any(|r| r.contains(*face)))
                .map(|face| face.to_string())
                .collect();
            if !uncovered.is_empty() {
                issues.push(ValidationIssue::warning(
                    &room.id,
                    format!(
                        "version {index}: faces {} fall back to the first outcome",
                        uncovered.join(", ")
                    ),
                ));
            }
        }
        Branch::Choices(choices) => {
            for choice in choices {
                for kind in LootKind::ALL {
                    let Some(label) = choice.get_command(kind) else {
                        continue;
                    };
                    if !version.loot.contains(kind, label) {
                        issues.push(ValidationIssue::warning(
                            &room.id,
                            format!(
                                "version {index}: choice \"{}\" takes {kind} \"{label}\" that the version does not offer",
                                choice.text
                            ),
                        ));
                    }
                }
            }
        }
        Branch::End => {}
    }
}
