use serde::{Deserialize, Serialize};

use crate::loot::LootKind;

/// The gating conditions of a room version.
///
/// Each list is optional. A condition set that carries none of the four
/// lists is malformed and never matches.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Conditions {
    /// Achievement labels the player must hold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievements: Option<Vec<String>>,
    /// Item labels the player must hold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
    /// Achievement labels the player must not hold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_achievements: Option<Vec<String>>,
    /// Item labels the player must not hold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_items: Option<Vec<String>>,
}

impl Conditions {
    /// Create a condition set with no lists.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require an achievement label.
    pub fn require_achievement(mut self, label: impl Into<String>) -> Self {
        self.achievements.get_or_insert_with(Vec::new).push(label.into());
        self
    }

    /// Require an item label.
    pub fn require_item(mut self, label: impl Into<String>) -> Self {
        self.items.get_or_insert_with(Vec::new).push(label.into());
        self
    }

    /// Forbid an achievement label.
    pub fn forbid_achievement(mut self, label: impl Into<String>) -> Self {
        self.not_achievements
            .get_or_insert_with(Vec::new)
            .push(label.into());
        self
    }

    /// Forbid an item label.
    pub fn forbid_item(mut self, label: impl Into<String>) -> Self {
        self.not_items.get_or_insert_with(Vec::new).push(label.into());
        self
    }

    /// Whether at least one of the four lists is present.
    pub fn has_recognized_key(&self) -> bool {
        self.achievements.is_some()
            || self.items.is_some()
            || self.not_achievements.is_some()
            || self.not_items.is_some()
    }

    /// Labels that must be held in the given category.
    pub fn required(&self, kind: LootKind) -> &[String] {
        let list = match kind {
            LootKind::Item => &self.items,
            LootKind::Achievement => &self.achievements,
        };
        list.as_deref().unwrap_or_default()
    }

    /// Labels that must not be held in the given category.
    pub fn forbidden(&self, kind: LootKind) -> &[String] {
        let list = match kind {
            LootKind::Item => &self.not_items,
            LootKind::Achievement => &self.not_achievements,
        };
        list.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all_keys() {
        let cond: Conditions = serde_json::from_str(
            r#"{
                "achievements": ["met_guide"],
                "items": ["lantern"],
                "not_achievements": ["lost"],
                "not_items": ["curse"]
            }"#,
        )
        .unwrap();

        assert!(cond.has_recognized_key());
        assert_eq!(cond.required(LootKind::Achievement), ["met_guide"]);
        assert_eq!(cond.required(LootKind::Item), ["lantern"]);
        assert_eq!(cond.forbidden(LootKind::Achievement), ["lost"]);
        assert_eq!(cond.forbidden(LootKind::Item), ["curse"]);
    }

    #[test]
    fn unknown_keys_are_not_recognized() {
        let cond: Conditions = serde_json::from_str(r#"{"flags": ["x"]}"#).unwrap();
        assert!(!cond.has_recognized_key());
        assert!(cond.required(LootKind::Item).is_empty());

        let empty: Conditions = serde_json::from_str("{}").unwrap();
        assert!(!empty.has_recognized_key());
    }

    #[test]
    fn negative_key_alone_is_recognized() {
        let cond = Conditions::new().forbid_item("curse");
        assert!(cond.has_recognized_key());
        assert!(cond.required(LootKind::Item).is_empty());
    }

    #[test]
    fn builder_accumulates() {
        let cond = Conditions::new()
            .require_achievement("a")
            .require_achievement("b")
            .forbid_achievement("c");
        assert_eq!(cond.required(LootKind::Achievement), ["a", "b"]);
        assert_eq!(cond.forbidden(LootKind::Achievement), ["c"]);
    }
}
