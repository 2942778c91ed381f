//! Room version selection.

use tw_core::{Room, RoomVersion};

use crate::condition;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{EngineError, EngineResult};
use crate::player::PlayerState;

/// The version picked for a room, with its position in the room.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedVersion<'a> {
    /// Index into [`Room::versions`].
    pub index: usize,
    /// The version itself.
    pub version: &'a RoomVersion,
}

/// Pick the version of `room` that applies to `player`.
///
/// Conditional versions that match take precedence over the default. When
/// several match, the first in declaration order wins and an
/// [`Diagnostic::AmbiguousVersions`] is recorded. When none match, the
/// conditionless version is used.
pub fn resolve<'a>(
    room: &'a Room,
    player: &PlayerState,
    diagnostics: &mut Diagnostics,
) -> EngineResult<ResolvedVersion<'a>> {
    let matching: Vec<usize> = room
        .versions
        .iter()
        .enumerate()
        .filter(|(_, v)| {
            v.conditions
                .as_ref()
                .is_some_and(|c| condition::matches(c, player, diagnostics))
        })
        .map(|(i, _)| i)
        .collect();

    if let Some(&index) = matching.first() {
        if matching.len() > 1 {
            diagnostics.push(Diagnostic::AmbiguousVersions {
                room: room.id.clone(),
                matched: matching,
            });
        }
        return Ok(ResolvedVersion {
            index,
            version: &room.versions[index],
        });
    }

    room.default_version_index()
        .map(|index| ResolvedVersion {
            index,
            version: &room.versions[index],
        })
        .ok_or_else(|| EngineError::MissingDefaultVersion(room.id.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tw_core::{Conditions, Loot, LootEntry};

    fn room() -> Room {
        Room::new("hall")
            .with_version(
                RoomVersion::new("guide waves")
                    .with_conditions(Conditions::new().require_achievement("met_guide")),
            )
            .with_version(RoomVersion::new("empty hall"))
            .with_version(
                RoomVersion::new("lantern light")
                    .with_conditions(Conditions::new().require_item("lantern")),
            )
    }

    fn player(items: &[&str], achievements: &[&str]) -> PlayerState {
        PlayerState::from_loot(Loot {
            items: items.iter().map(|l| LootEntry::new(*l)).collect(),
            achievements: achievements.iter().map(|l| LootEntry::new(*l)).collect(),
        })
    }

    #[test]
    fn falls_back_to_default() {
        let room = room();
        let mut diags = Diagnostics::new();
        let resolved = resolve(&room, &PlayerState::new(), &mut diags).unwrap();
        assert_eq!(resolved.index, 1);
        assert_eq!(resolved.version.text, "empty hall");
        assert!(diags.is_empty());
    }

    #[test]
    fn single_match_wins_over_default() {
        let room = room();
        let mut diags = Diagnostics::new();
        let resolved = resolve(&room, &player(&["lantern"], &[]), &mut diags).unwrap();
        assert_eq!(resolved.index, 2);
        assert!(diags.is_empty());
    }

    #[test]
    fn first_of_several_matches_wins() {
        let room = room();
        let mut diags = Diagnostics::new();
        let resolved = resolve(&room, &player(&["lantern"], &["met_guide"]), &mut diags).unwrap();
        assert_eq!(resolved.index, 0);
        assert_eq!(
            diags.entries(),
            [Diagnostic::AmbiguousVersions {
                room: "hall".to_string(),
                matched: vec![0, 2],
            }]
        );
    }

    #[test]
    fn missing_default_is_an_error() {
        let room = Room::new("vault").with_version(
            RoomVersion::new("open").with_conditions(Conditions::new().require_item("key")),
        );
        let err = resolve(&room, &PlayerState::new(), &mut Diagnostics::new()).unwrap_err();
        assert_eq!(err, EngineError::MissingDefaultVersion("vault".to_string()));

        let ok = resolve(&room, &player(&["key"], &[]), &mut Diagnostics::new()).unwrap();
        assert_eq!(ok.version.text, "open");
    }

    #[test]
    fn malformed_conditions_skip_to_default() {
        let room = Room::new("r")
            .with_version(RoomVersion::new("broken").with_conditions(Conditions::new()))
            .with_version(RoomVersion::new("fallback"));
        let mut diags = Diagnostics::new();
        let resolved = resolve(&room, &PlayerState::new(), &mut diags).unwrap();
        assert_eq!(resolved.version.text, "fallback");
        assert_eq!(diags.entries(), [Diagnostic::UnrecognizedConditions]);
    }

    #[test]
    fn room_without_versions_fails() {
        let err = resolve(&Room::new("void"), &PlayerState::new(), &mut Diagnostics::new())
            .unwrap_err();
        assert!(matches!(err, EngineError::MissingDefaultVersion(_)));
    }
}
