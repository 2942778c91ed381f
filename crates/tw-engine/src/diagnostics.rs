//! Non-fatal content diagnostics.
//!
//! Malformed content must not stop a session. Evaluators that hit something
//! odd record a [`Diagnostic`], log it, and carry on with a best-effort
//! result.

use std::fmt;

/// Something questionable found while resolving content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A condition set carries none of the recognized keys and never matches.
    UnrecognizedConditions,
    /// More than one conditional version matched; the first one wins.
    AmbiguousVersions {
        /// The room being resolved.
        room: String,
        /// Indices of every matching version.
        matched: Vec<usize>,
    },
    /// A dice range specifier could not be parsed and was skipped.
    UnparseableRange {
        /// The specifier as authored.
        spec: String,
        /// Why parsing failed.
        reason: String,
    },
    /// No outcome covers the roll; the first outcome was used.
    UnmatchedRoll {
        /// The rolled value.
        roll: u32,
    },
    /// The version names a trigger the engine does not implement.
    UnknownTrigger {
        /// The room being entered.
        room: String,
        /// The trigger name.
        trigger: String,
    },
}

impl Diagnostic {
    /// Ambiguity is expected to be rare but harmless; everything else points
    /// at broken content.
    pub fn is_warning(&self) -> bool {
        !matches!(self, Self::AmbiguousVersions { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedConditions => write!(f, "condition set has no recognized keys"),
            Self::AmbiguousVersions { room, matched } => {
                let list: Vec<String> = matched.iter().map(|i| i.to_string()).collect();
                write!(
                    f,
                    "room {room}: versions [{}] all match, using the first",
                    list.join(", ")
                )
            }
            Self::UnparseableRange { spec, reason } => {
                write!(f, "dice range \"{spec}\" skipped: {reason}")
            }
            Self::UnmatchedRoll { roll } => {
                write!(f, "no outcome covers roll {roll}, using the first")
            }
            Self::UnknownTrigger { room, trigger } => {
                write!(f, "room {room}: unknown trigger \"{trigger}\" ignored")
            }
        }
    }
}

/// Collects diagnostics for one turn and logs them as they arrive.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record and log a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_warning() {
            tracing::warn!("{diagnostic}");
        } else {
            tracing::debug!("{diagnostic}");
        }
        self.entries.push(diagnostic);
    }

    /// All recorded diagnostics.
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Take ownership of the recorded diagnostics.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_in_order() {
        let mut diags = Diagnostics::new();
        assert!(diags.is_empty());

        diags.push(Diagnostic::UnrecognizedConditions);
        diags.push(Diagnostic::UnmatchedRoll { roll: 6 });

        assert_eq!(diags.len(), 2);
        assert_eq!(diags.entries()[1], Diagnostic::UnmatchedRoll { roll: 6 });
        assert_eq!(diags.into_vec()[0], Diagnostic::UnrecognizedConditions);
    }

    #[test]
    fn ambiguity_is_not_a_warning() {
        let d = Diagnostic::AmbiguousVersions {
            room: "3".to_string(),
            matched: vec![0, 2],
        };
        assert!(!d.is_warning());
        assert_eq!(d.to_string(), "room 3: versions [0, 2] all match, using the first");
        assert!(Diagnostic::UnrecognizedConditions.is_warning());
    }

    #[test]
    fn display_messages() {
        let d = Diagnostic::UnparseableRange {
            spec: "x".to_string(),
            reason: "invalid bound \"x\"".to_string(),
        };
        assert!(d.to_string().contains("\"x\""));
        let t = Diagnostic::UnknownTrigger {
            room: "4".to_string(),
            trigger: "boom".to_string(),
        };
        assert_eq!(t.to_string(), "room 4: unknown trigger \"boom\" ignored");
    }
}
