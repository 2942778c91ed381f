//! What a renderer should display for the current turn.

use crate::diagnostics::Diagnostic;

/// One row of the dice outcome preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomePreview {
    /// The range specifier as authored.
    pub range: String,
    /// The outcome text.
    pub text: String,
}

/// The action a turn is waiting for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// Pick one of these choices by index.
    Choices(Vec<String>),
    /// Roll the die; these are the possible outcomes.
    Dice {
        /// Possible outcomes, in table order.
        outcomes: Vec<OutcomePreview>,
        /// Whether a roll has been requested and not yet committed.
        rolling: bool,
    },
    /// The story is over.
    End,
    /// The turn could not be resolved.
    Failed(String),
}

/// A snapshot of the current turn for renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnView {
    /// The room on display.
    pub room_id: String,
    /// Index of the displayed version, if one was resolved.
    pub version_index: Option<usize>,
    /// Body text, one entry per line.
    pub lines: Vec<String>,
    /// Flavor text of the items offered in this version.
    pub flavor: Vec<String>,
    /// Inventory texts of the items the player holds.
    pub inventory: Vec<String>,
    /// What happens next.
    pub prompt: Prompt,
    /// Diagnostics gathered while entering the room.
    pub diagnostics: Vec<Diagnostic>,
}

impl TurnView {
    /// A view for a turn that failed to resolve.
    pub fn failed(
        room_id: impl Into<String>,
        message: impl Into<String>,
        inventory: Vec<String>,
    ) -> Self {
        Self {
            room_id: room_id.into(),
            version_index: None,
            lines: Vec::new(),
            flavor: Vec::new(),
            inventory,
            prompt: Prompt::Failed(message.into()),
            diagnostics: Vec::new(),
        }
    }

    /// Body text with each newline replaced by `separator` (e.g. `<br>`).
    pub fn text_with_breaks(&self, separator: &str) -> String {
        self.lines.join(separator)
    }

    /// Whether no further action is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self.prompt, Prompt::End | Prompt::Failed(_))
    }

    /// Number of choices offered, zero unless the prompt is a choice list.
    pub fn choice_count(&self) -> usize {
        match &self.prompt {
            Prompt::Choices(choices) => choices.len(),
            _ => 0,
        }
    }
}
