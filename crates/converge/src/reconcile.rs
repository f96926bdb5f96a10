//! Decide the minimal action that brings remote state in line with intent

use crate::fields::{canonicalize_definition, map_fields};
use crate::types::{Action, Definition, GroupRequest, Intent, ReconcileOutcome};

/// Compute the action for `request` given the current remote definition
/// (`None` when the group does not exist).
///
/// Pure and side-effect-free: the remote lookup happens before this call and
/// nothing here writes. Applying the outcome and reconciling again with the
/// same request yields `NoOp`.
///
/// Found definitions are canonicalized before comparison, so element order
/// and duplicates in list attributes never register as drift regardless of
/// which side they came from. The proposed definition is
/// `merge(found, desired)`: desired keys overwrite, every other found key is
/// preserved untouched.
pub fn reconcile(request: &GroupRequest, current: Option<Definition>) -> ReconcileOutcome {
    let name = request.group.name.clone();
    let fields = map_fields(request);

    match (current, request.intent) {
        (None, Intent::Absent) => ReconcileOutcome {
            name,
            action: Action::NoOp,
            changed: false,
            previous: None,
            proposed: None,
        },
        (None, Intent::Present) => ReconcileOutcome {
            name,
            action: Action::Create,
            changed: true,
            previous: None,
            proposed: Some(fields),
        },
        (Some(found), Intent::Absent) => {
            // Existence alone triggers the delete; field content is irrelevant.
            ReconcileOutcome {
                name,
                action: Action::Delete,
                changed: true,
                previous: Some(canonicalize_definition(&found)),
                proposed: None,
            }
        }
        (Some(found), Intent::Present) => {
            let found = canonicalize_definition(&found);
            let proposed = found.merged(&fields);
            let changed = proposed != found;
            ReconcileOutcome {
                name,
                action: if changed { Action::Modify } else { Action::NoOp },
                changed,
                previous: Some(found),
                proposed: Some(proposed),
            }
        }
    }
}
