//! Loot transfer into player state.
//!
//! Automatic loot copies every auto-looted entry of a source into a
//! destination. Manual loot follows the get/remove commands on a choice.
//! Sources are never modified, so revisiting a room offers the same loot
//! again.

use tw_core::{Choice, Loot, LootKind, RoomVersion};

use crate::player::PlayerState;

/// Append the auto-looted entries of `source` to `destination`, per
/// category, preserving source order.
pub fn autoloot(source: &Loot, destination: &mut Loot, categories: &[LootKind]) {
    for &kind in categories {
        destination
            .get_mut(kind)
            .extend(source.get(kind).iter().filter(|e| e.autoloot).cloned());
    }
}

/// Apply a choice's get/remove commands.
///
/// A get command copies the first entry with the label from the version the
/// choice was displayed with. A remove command drops the first matching
/// entry from the player. Both are silent no-ops when nothing matches, and
/// both may apply in one transition; get runs first.
pub fn apply_manual_commands(choice: &Choice, player: &mut PlayerState, displayed: &RoomVersion) {
    for kind in LootKind::ALL {
        if let Some(label) = choice.get_command(kind) {
            match displayed.loot.find(kind, label) {
                Some(entry) => {
                    tracing::debug!(%kind, label, "getting loot");
                    player.loot_mut().get_mut(kind).push(entry.clone());
                }
                None => tracing::debug!(%kind, label, "get command names loot not offered here"),
            }
        }

        if let Some(label) = choice.remove_command(kind) {
            let removed = player.loot_mut().remove_first(kind, label).is_some();
            tracing::debug!(%kind, label, removed, "removing loot");
        }
    }
}
