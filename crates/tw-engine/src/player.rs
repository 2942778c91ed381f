//! Player state management.

use tw_core::{Loot, LootEntry, LootKind};

/// What the player has accumulated: items and achievements in acquisition
/// order.
///
/// Labels need not be unique. Only the loot engine and the `reset_all`
/// trigger mutate this; renderers get read access.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerState {
    loot: Loot,
}

impl PlayerState {
    /// Create an empty player state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing inventory.
    pub fn from_loot(loot: Loot) -> Self {
        Self { loot }
    }

    /// Items in acquisition order.
    pub fn items(&self) -> &[LootEntry] {
        &self.loot.items
    }

    /// Achievements in acquisition order.
    pub fn achievements(&self) -> &[LootEntry] {
        &self.loot.achievements
    }

    /// Entries of one category.
    pub fn collection(&self, kind: LootKind) -> &[LootEntry] {
        self.loot.get(kind)
    }

    /// The whole inventory.
    pub fn loot(&self) -> &Loot {
        &self.loot
    }

    /// Whether an entry with the label is held in the category.
    pub fn has_label(&self, kind: LootKind, label: &str) -> bool {
        self.loot.contains(kind, label)
    }

    /// How many entries with the label are held in the category.
    pub fn count_label(&self, kind: LootKind, label: &str) -> usize {
        self.loot
            .get(kind)
            .iter()
            .filter(|e| e.has_label(label))
            .count()
    }

    /// Whether nothing is held.
    pub fn is_empty(&self) -> bool {
        self.loot.is_empty()
    }

    pub(crate) fn loot_mut(&mut self) -> &mut Loot {
        &mut self.loot
    }

    pub(crate) fn clear(&mut self) {
        self.loot.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_state_new() {
        let state = PlayerState::new();
        assert!(state.is_empty());
        assert!(state.items().is_empty());
        assert!(state.achievements().is_empty());
    }

    #[test]
    fn label_queries() {
        let mut loot = Loot::new();
        loot.items.push(LootEntry::new("coin"));
        loot.items.push(LootEntry::new("coin"));
        loot.achievements.push(LootEntry::new("brave"));
        let state = PlayerState::from_loot(loot);

        assert!(state.has_label(LootKind::Item, "coin"));
        assert!(!state.has_label(LootKind::Achievement, "coin"));
        assert_eq!(state.count_label(LootKind::Item, "coin"), 2);
        assert_eq!(state.collection(LootKind::Achievement).len(), 1);
    }

    #[test]
    fn clear_resets_everything() {
        let mut state = PlayerState::new();
        state.loot_mut().items.push(LootEntry::new("x"));
        state.loot_mut().achievements.push(LootEntry::new("y"));
        state.clear();
        assert!(state.is_empty());
    }
}
