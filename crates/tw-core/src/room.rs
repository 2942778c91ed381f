use serde::{Deserialize, Deserializer};

use crate::condition::Conditions;
use crate::loot::{Loot, LootEntry, LootKind};

/// A node in the story graph.
#[derive(Debug, Clone, Deserialize)]
pub struct Room {
    /// Unique identifier, the target of `goto`.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Content variants, in declaration order.
    #[serde(default)]
    pub versions: Vec<RoomVersion>,
}

impl Room {
    /// Create a room with no versions.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            versions: Vec::new(),
        }
    }

    /// Add a version.
    pub fn with_version(mut self, version: RoomVersion) -> Self {
        self.versions.push(version);
        self
    }

    /// Index of the fallback version (the first one without conditions).
    pub fn default_version_index(&self) -> Option<usize> {
        self.versions.iter().position(|v| v.conditions.is_none())
    }

    /// The fallback version.
    pub fn default_version(&self) -> Option<&RoomVersion> {
        self.default_version_index().map(|i| &self.versions[i])
    }
}

/// A version-level side effect applied on entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Clear the player's items and achievements before any loot is granted.
    ResetAll,
    /// A trigger name the engine does not know.
    Other(String),
}

impl Trigger {
    /// Parse a trigger name as written in a story document.
    pub fn parse(name: &str) -> Self {
        match name {
            "reset_all" => Self::ResetAll,
            other => Self::Other(other.to_string()),
        }
    }
}

/// What a version offers the player once its content is shown.
#[derive(Debug, Clone, Default)]
pub enum Branch {
    /// A dice table; the roll picks the transition.
    Dice(Vec<DiceOutcome>),
    /// A list of choices; the player picks the transition.
    Choices(Vec<Choice>),
    /// Nothing to do: the story ends here.
    #[default]
    End,
}

/// One conditionally selected content variant of a room.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "RawRoomVersion")]
pub struct RoomVersion {
    /// Body text. Newlines are line breaks.
    pub text: String,
    /// Items and achievements offered on entry.
    pub loot: Loot,
    /// Side effect applied on entry.
    pub trigger: Option<Trigger>,
    /// Gating conditions; `None` marks the room's default version.
    pub conditions: Option<Conditions>,
    /// What happens next.
    pub branch: Branch,
}

impl RoomVersion {
    /// Create a version with the given text and no branch.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the gating conditions.
    pub fn with_conditions(mut self, conditions: Conditions) -> Self {
        self.conditions = Some(conditions);
        self
    }

    /// Set the entry trigger.
    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    /// Offer an item.
    pub fn with_item(mut self, entry: LootEntry) -> Self {
        self.loot.items.push(entry);
        self
    }

    /// Offer an achievement.
    pub fn with_achievement(mut self, entry: LootEntry) -> Self {
        self.loot.achievements.push(entry);
        self
    }

    /// Add a choice, turning the branch into a choice list if needed.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        match &mut self.branch {
            Branch::Choices(choices) => choices.push(choice),
            _ => self.branch = Branch::Choices(vec![choice]),
        }
        self
    }

    /// Add a dice outcome, turning the branch into a dice table if needed.
    pub fn with_outcome(mut self, outcome: DiceOutcome) -> Self {
        match &mut self.branch {
            Branch::Dice(outcomes) => outcomes.push(outcome),
            _ => self.branch = Branch::Dice(vec![outcome]),
        }
        self
    }

    /// The body text split into display lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    /// Flavor text of the offered items, skipping blank ones.
    pub fn flavor(&self) -> impl Iterator<Item = &str> {
        self.loot
            .items
            .iter()
            .map(|e| e.lyric.as_str())
            .filter(|l| !l.trim().is_empty())
    }

    /// Every goto target reachable from this version.
    pub fn targets(&self) -> Vec<&str> {
        match &self.branch {
            Branch::Dice(outcomes) => outcomes.iter().map(|o| o.goto.as_str()).collect(),
            Branch::Choices(choices) => choices.iter().map(|c| c.goto.as_str()).collect(),
            Branch::End => Vec::new(),
        }
    }
}

#[derive(Deserialize)]
struct RawRoomVersion {
    #[serde(default)]
    text: String,
    #[serde(flatten)]
    loot: Loot,
    #[serde(default)]
    triggers: Option<String>,
    #[serde(default)]
    conditions: Option<Conditions>,
    #[serde(default)]
    dice: Option<Vec<DiceOutcome>>,
    #[serde(default)]
    choices: Option<Vec<Choice>>,
}

impl From<RawRoomVersion> for RoomVersion {
    fn from(raw: RawRoomVersion) -> Self {
        // Dice take precedence; an empty list counts as absent.
        let branch = match (raw.dice, raw.choices) {
            (Some(dice), _) if !dice.is_empty() => Branch::Dice(dice),
            (_, Some(choices)) if !choices.is_empty() => Branch::Choices(choices),
            _ => Branch::End,
        };

        Self {
            text: raw.text,
            loot: raw.loot,
            trigger: raw.triggers.as_deref().map(Trigger::parse),
            conditions: raw.conditions,
            branch,
        }
    }
}

/// One row of a dice table.
#[derive(Debug, Clone, Deserialize)]
pub struct DiceOutcome {
    /// Range specifier as authored, e.g. `"4"` or `"2-5"`.
    pub val: String,
    /// Text shown in the outcome preview and after the roll.
    #[serde(default)]
    pub text: String,
    /// Loot granted when this outcome is rolled.
    #[serde(flatten)]
    pub loot: Loot,
    /// Room entered after this outcome.
    #[serde(deserialize_with = "deserialize_id")]
    pub goto: String,
}

impl DiceOutcome {
    /// Create an outcome with no loot.
    pub fn new(val: impl Into<String>, text: impl Into<String>, goto: impl Into<String>) -> Self {
        Self {
            val: val.into(),
            text: text.into(),
            loot: Loot::default(),
            goto: goto.into(),
        }
    }

    /// Grant an item with this outcome.
    pub fn with_item(mut self, entry: LootEntry) -> Self {
        self.loot.items.push(entry);
        self
    }

    /// Grant an achievement with this outcome.
    pub fn with_achievement(mut self, entry: LootEntry) -> Self {
        self.loot.achievements.push(entry);
        self
    }
}

/// A player-selectable option.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// Button text.
    #[serde(default)]
    pub text: String,
    /// Loot granted when this choice is taken.
    #[serde(flatten)]
    pub loot: Loot,
    /// Room entered after this choice.
    #[serde(deserialize_with = "deserialize_id")]
    pub goto: String,
    /// Label of an item to take from the displayed version.
    #[serde(default)]
    pub get_item: Option<String>,
    /// Label of an item to drop from the inventory.
    #[serde(default)]
    pub del_item: Option<String>,
    /// Label of an achievement to take from the displayed version.
    #[serde(default)]
    pub get_achievement: Option<String>,
    /// Label of an achievement to drop from the inventory.
    #[serde(default)]
    pub del_achievement: Option<String>,
}

impl Choice {
    /// Create a choice with no loot and no commands.
    pub fn new(text: impl Into<String>, goto: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            loot: Loot::default(),
            goto: goto.into(),
            get_item: None,
            del_item: None,
            get_achievement: None,
            del_achievement: None,
        }
    }

    /// Grant an item with this choice.
    pub fn with_item(mut self, entry: LootEntry) -> Self {
        self.loot.items.push(entry);
        self
    }

    /// Grant an achievement with this choice.
    pub fn with_achievement(mut self, entry: LootEntry) -> Self {
        self.loot.achievements.push(entry);
        self
    }

    /// Take the labeled entry from the displayed version.
    pub fn with_get(mut self, kind: LootKind, label: impl Into<String>) -> Self {
        match kind {
            LootKind::Item => self.get_item = Some(label.into()),
            LootKind::Achievement => self.get_achievement = Some(label.into()),
        }
        self
    }

    /// Drop the first inventory entry with the label.
    pub fn with_remove(mut self, kind: LootKind, label: impl Into<String>) -> Self {
        match kind {
            LootKind::Item => self.del_item = Some(label.into()),
            LootKind::Achievement => self.del_achievement = Some(label.into()),
        }
        self
    }

    /// The get command for a category, if any.
    pub fn get_command(&self, kind: LootKind) -> Option<&str> {
        match kind {
            LootKind::Item => self.get_item.as_deref(),
            LootKind::Achievement => self.get_achievement.as_deref(),
        }
    }

    /// The remove command for a category, if any.
    pub fn remove_command(&self, kind: LootKind) -> Option<&str> {
        match kind {
            LootKind::Item => self.del_item.as_deref(),
            LootKind::Achievement => self.del_achievement.as_deref(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// Room ids may be authored as strings or integers.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

/// Optional variant of [`deserialize_id`].
pub(crate) fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}
