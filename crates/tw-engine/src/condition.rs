//! Condition evaluation for room versions.

use tw_core::{Conditions, LootKind};

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::player::PlayerState;

/// Whether the player satisfies a version's conditions.
///
/// Every required label must be held and no forbidden label may be held.
/// Required lists are checked before forbidden ones and evaluation stops at
/// the first failure. A condition set without any recognized list never
/// matches and records [`Diagnostic::UnrecognizedConditions`].
pub fn matches(
    conditions: &Conditions,
    player: &PlayerState,
    diagnostics: &mut Diagnostics,
) -> bool {
    if !conditions.has_recognized_key() {
        diagnostics.push(Diagnostic::UnrecognizedConditions);
        return false;
    }

    let holds_required = LootKind::ALL.iter().all(|&kind| {
        conditions
            .required(kind)
            .iter()
            .all(|label| player.has_label(kind, label))
    });

    holds_required
        && LootKind::ALL.iter().all(|&kind| {
            conditions
                .forbidden(kind)
                .iter()
                .all(|label| !player.has_label(kind, label))
        })
}
