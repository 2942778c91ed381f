use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// The two loot categories a story can grant and a condition can test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LootKind {
    /// Physical things the player carries.
    Item,
    /// Milestones the player has reached.
    Achievement,
}

impl LootKind {
    /// Both categories, in the order the engine processes them.
    pub const ALL: [LootKind; 2] = [LootKind::Item, LootKind::Achievement];

    /// The document key holding this category (`items` / `achievements`).
    pub fn key(self) -> &'static str {
        match self {
            Self::Item => "items",
            Self::Achievement => "achievements",
        }
    }
}

impl fmt::Display for LootKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item => write!(f, "item"),
            Self::Achievement => write!(f, "achievement"),
        }
    }
}

/// A single item or achievement.
///
/// Labels are the stable identifiers used by conditions and by the
/// get/remove commands on choices. An entry without a label can still be
/// carried but never satisfies or violates a condition.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LootEntry {
    /// Stable identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Text shown in the inventory listing.
    #[serde(default)]
    pub inventory: String,
    /// Flavor text shown when the entry is offered.
    #[serde(default)]
    pub lyric: String,
    /// Whether the entry is picked up without an explicit command.
    #[serde(default = "default_autoloot", deserialize_with = "deserialize_autoloot")]
    pub autoloot: bool,
}

impl LootEntry {
    /// Create an auto-looted entry with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            inventory: String::new(),
            lyric: String::new(),
            autoloot: true,
        }
    }

    /// Set the inventory text.
    pub fn with_inventory(mut self, inventory: impl Into<String>) -> Self {
        self.inventory = inventory.into();
        self
    }

    /// Set the flavor text.
    pub fn with_lyric(mut self, lyric: impl Into<String>) -> Self {
        self.lyric = lyric.into();
        self
    }

    /// Require an explicit get command to acquire this entry.
    pub fn manual(mut self) -> Self {
        self.autoloot = false;
        self
    }

    /// Whether this entry carries the given label.
    pub fn has_label(&self, label: &str) -> bool {
        self.label.as_deref() == Some(label)
    }
}

fn default_autoloot() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AutolootFlag {
    Bool(bool),
    Text(String),
}

/// Only the literal "false" (any case) disables autoloot; every other value,
/// including a missing or null one, enables it.
fn deserialize_autoloot<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let flag = Option::<AutolootFlag>::deserialize(deserializer)?;
    Ok(match flag {
        None => true,
        Some(AutolootFlag::Bool(value)) => value,
        Some(AutolootFlag::Text(text)) => !text.trim().eq_ignore_ascii_case("false"),
    })
}

/// An ordered pair of loot collections, one per [`LootKind`].
///
/// Used both for what a version, dice outcome, or choice grants and for
/// what the player has accumulated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Loot {
    /// Items, in grant order.
    #[serde(default)]
    pub items: Vec<LootEntry>,
    /// Achievements, in grant order.
    #[serde(default)]
    pub achievements: Vec<LootEntry>,
}

impl Loot {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// The entries of one category.
    pub fn get(&self, kind: LootKind) -> &[LootEntry] {
        match kind {
            LootKind::Item => &self.items,
            LootKind::Achievement => &self.achievements,
        }
    }

    /// Mutable access to the entries of one category.
    pub fn get_mut(&mut self, kind: LootKind) -> &mut Vec<LootEntry> {
        match kind {
            LootKind::Item => &mut self.items,
            LootKind::Achievement => &mut self.achievements,
        }
    }

    /// Labels present in one category, skipping unlabeled entries.
    pub fn labels(&self, kind: LootKind) -> impl Iterator<Item = &str> {
        self.get(kind).iter().filter_map(|e| e.label.as_deref())
    }

    /// Whether any entry of the category carries the label.
    pub fn contains(&self, kind: LootKind, label: &str) -> bool {
        self.get(kind).iter().any(|e| e.has_label(label))
    }

    /// The first entry of the category carrying the label.
    pub fn find(&self, kind: LootKind, label: &str) -> Option<&LootEntry> {
        self.get(kind).iter().find(|e| e.has_label(label))
    }

    /// Remove the first entry of the category carrying the label.
    pub fn remove_first(&mut self, kind: LootKind, label: &str) -> Option<LootEntry> {
        let entries = self.get_mut(kind);
        let pos = entries.iter().position(|e| e.has_label(label))?;
        Some(entries.remove(pos))
    }

    /// Whether both categories are empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.achievements.is_empty()
    }

    /// Empty both categories.
    pub fn clear(&mut self) {
        self.items.clear();
        self.achievements.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(json: &str) -> LootEntry {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn autoloot_defaults_to_true() {
        assert!(entry(r#"{"label": "lantern"}"#).autoloot);
        assert!(entry(r#"{"label": "lantern", "autoloot": null}"#).autoloot);
    }

    #[test]
    fn only_false_string_disables_autoloot() {
        assert!(!entry(r#"{"label": "a", "autoloot": "false"}"#).autoloot);
        assert!(!entry(r#"{"label": "a", "autoloot": "FALSE"}"#).autoloot);
        assert!(!entry(r#"{"label": "a", "autoloot": "False"}"#).autoloot);
        assert!(entry(r#"{"label": "a", "autoloot": "true"}"#).autoloot);
        assert!(entry(r#"{"label": "a", "autoloot": "no"}"#).autoloot);
        assert!(entry(r#"{"label": "a", "autoloot": ""}"#).autoloot);
    }

    #[test]
    fn boolean_autoloot_accepted() {
        assert!(!entry(r#"{"label": "a", "autoloot": false}"#).autoloot);
        assert!(entry(r#"{"label": "a", "autoloot": true}"#).autoloot);
    }

    #[test]
    fn unlabeled_entry_never_matches() {
        let e = entry(r#"{"inventory": "A rusty nail"}"#);
        assert_eq!(e.label, None);
        assert!(!e.has_label(""));
        assert_eq!(e.inventory, "A rusty nail");
    }

    #[test]
    fn labels_skip_unlabeled() {
        let loot = Loot {
            items: vec![
                LootEntry::new("rope"),
                LootEntry::default(),
                LootEntry::new("torch"),
            ],
            achievements: Vec::new(),
        };
        let labels: Vec<_> = loot.labels(LootKind::Item).collect();
        assert_eq!(labels, vec!["rope", "torch"]);
        assert_eq!(loot.labels(LootKind::Achievement).count(), 0);
    }

    #[test]
    fn remove_first_only_removes_one() {
        let mut loot = Loot::new();
        loot.items.push(LootEntry::new("coin").with_inventory("first"));
        loot.items.push(LootEntry::new("coin").with_inventory("second"));

        let removed = loot.remove_first(LootKind::Item, "coin").unwrap();
        assert_eq!(removed.inventory, "first");
        assert_eq!(loot.items.len(), 1);
        assert_eq!(loot.items[0].inventory, "second");

        assert!(loot.remove_first(LootKind::Item, "missing").is_none());
        assert_eq!(loot.items.len(), 1);
    }

    #[test]
    fn clear_empties_both() {
        let mut loot = Loot::new();
        loot.items.push(LootEntry::new("a"));
        loot.achievements.push(LootEntry::new("b"));
        assert!(!loot.is_empty());
        loot.clear();
        assert!(loot.is_empty());
    }

    #[test]
    fn kind_keys() {
        assert_eq!(LootKind::Item.key(), "items");
        assert_eq!(LootKind::Achievement.key(), "achievements");
        assert_eq!(LootKind::Achievement.to_string(), "achievement");
    }
}
