//! Apply a decided outcome through the store

use anyhow::{bail, Result};
use serde_json::Value;

use crate::fields::MAY_WRITE_SAFE_CODE;
use crate::store::{CreateSeed, GroupStore};
use crate::types::{Action, Definition, ReconcileOutcome};

/// Apply `outcome` and return the authoritative post-apply definition
/// (`None` once the group is absent).
///
/// Create is a two-call protocol: the creation endpoint accepts only the
/// seed attributes, so the remainder goes in a second full-definition write.
/// The server defaults `mayWriteSafeCode` to `false` when that write omits
/// it, so an unset value is sent as `true`. There is no rollback if the
/// second call fails after the group was created; the error surfaces
/// verbatim and the group is left partially initialized.
///
/// After Create and Modify the definition is re-read, since the server may
/// normalize or augment fields. With `dry_run` set, no store write happens
/// and the returned definition is the computed preview.
pub fn apply(
    store: &mut dyn GroupStore,
    outcome: &ReconcileOutcome,
    dry_run: bool,
) -> Result<Option<Definition>> {
    if dry_run {
        return Ok(match outcome.action {
            Action::Delete => None,
            _ => outcome.proposed.clone(),
        });
    }

    match outcome.action {
        Action::NoOp => Ok(outcome.proposed.clone()),
        Action::Delete => {
            store.delete(&outcome.name)?;
            Ok(None)
        }
        Action::Create => {
            let Some(proposed) = &outcome.proposed else {
                bail!("create action for '{}' carries no definition", outcome.name);
            };
            store.create(&outcome.name, &CreateSeed::from_definition(proposed))?;

            let mut full = proposed.clone();
            if !full.contains_key(MAY_WRITE_SAFE_CODE) {
                full.insert(MAY_WRITE_SAFE_CODE, Value::Bool(true));
            }
            store.set_definition(&outcome.name, &full)?;
            store.fetch(&outcome.name)
        }
        Action::Modify => {
            let Some(proposed) = &outcome.proposed else {
                bail!("modify action for '{}' carries no definition", outcome.name);
            };
            store.set_definition(&outcome.name, proposed)?;
            store.fetch(&outcome.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::reconcile;
    use crate::store::{MemoryStore, WriteCall};
    use crate::types::GroupRequest;
    use serde_json::json;

    fn definition(value: serde_json::Value) -> Definition {
        let Value::Object(object) = value else {
            panic!("test definition must be a JSON object");
        };
        Definition::from(object)
    }

    #[test]
    fn test_create_is_a_two_call_protocol() {
        let mut request = GroupRequest::new("analysts");
        request.group.description = Some("our analysts".into());
        request.group.admin = Some(true);

        let mut store = MemoryStore::new();
        let outcome = reconcile(&request, store.fetch("analysts").unwrap());
        let applied = apply(&mut store, &outcome, false).unwrap().unwrap();

        assert_eq!(
            store.writes,
            vec![
                WriteCall::Create("analysts".into()),
                WriteCall::SetDefinition("analysts".into()),
            ]
        );
        assert_eq!(applied.get("admin"), Some(&json!(true)));
        assert_eq!(applied.get("description"), Some(&json!("our analysts")));
    }

    #[test]
    fn test_create_corrects_unsafe_default() {
        let request = GroupRequest::new("analysts");

        let mut store = MemoryStore::new();
        let outcome = reconcile(&request, None);
        let applied = apply(&mut store, &outcome, false).unwrap().unwrap();

        // The seed write left it false; the follow-up write must flip it.
        assert_eq!(applied.get("mayWriteSafeCode"), Some(&json!(true)));
    }

    #[test]
    fn test_create_respects_explicit_safe_code_choice() {
        let mut request = GroupRequest::new("restricted");
        request.group.may_write_safe_code = Some(false);

        let mut store = MemoryStore::new();
        let outcome = reconcile(&request, None);
        let applied = apply(&mut store, &outcome, false).unwrap().unwrap();

        assert_eq!(applied.get("mayWriteSafeCode"), Some(&json!(false)));
    }

    #[test]
    fn test_modify_is_a_single_write_and_rereads() {
        let found = definition(json!({"name": "analysts", "admin": false}));
        let mut store = MemoryStore::with_group("analysts", found);

        let mut request = GroupRequest::new("analysts");
        request.group.admin = Some(true);

        let outcome = reconcile(&request, store.fetch("analysts").unwrap());
        let applied = apply(&mut store, &outcome, false).unwrap().unwrap();

        assert_eq!(
            store.writes,
            vec![WriteCall::SetDefinition("analysts".into())]
        );
        assert_eq!(applied.get("admin"), Some(&json!(true)));
    }

    #[test]
    fn test_delete_issues_one_call_and_returns_none() {
        let found = definition(json!({"name": "analysts", "admin": true}));
        let mut store = MemoryStore::with_group("analysts", found);

        let outcome = reconcile(
            &GroupRequest::absent("analysts"),
            store.fetch("analysts").unwrap(),
        );
        let applied = apply(&mut store, &outcome, false).unwrap();

        assert_eq!(store.writes, vec![WriteCall::Delete("analysts".into())]);
        assert_eq!(applied, None);
        assert_eq!(store.fetch("analysts").unwrap(), None);
    }

    #[test]
    fn test_noop_never_touches_the_store() {
        let found = definition(json!({"name": "analysts", "admin": true}));
        let mut store = MemoryStore::with_group("analysts", found.clone());

        let mut request = GroupRequest::new("analysts");
        request.group.admin = Some(true);

        let outcome = reconcile(&request, store.fetch("analysts").unwrap());
        let applied = apply(&mut store, &outcome, false).unwrap();

        assert!(store.writes.is_empty());
        assert_eq!(applied, Some(found));
    }

    #[test]
    fn test_dry_run_never_writes_but_previews() {
        let mut request = GroupRequest::new("analysts");
        request.group.admin = Some(true);

        let mut store = MemoryStore::new();
        let outcome = reconcile(&request, store.fetch("analysts").unwrap());
        let preview = apply(&mut store, &outcome, true).unwrap();

        assert!(store.writes.is_empty());
        assert_eq!(store.fetch("analysts").unwrap(), None);
        assert_eq!(preview, outcome.proposed);
    }

    #[test]
    fn test_dry_run_delete_previews_absence() {
        let found = definition(json!({"name": "analysts"}));
        let mut store = MemoryStore::with_group("analysts", found);

        let outcome = reconcile(
            &GroupRequest::absent("analysts"),
            store.fetch("analysts").unwrap(),
        );
        let preview = apply(&mut store, &outcome, true).unwrap();

        assert!(store.writes.is_empty());
        assert!(store.fetch("analysts").unwrap().is_some());
        assert_eq!(preview, None);
    }

    #[test]
    fn test_apply_then_reconcile_is_noop() {
        let mut request = GroupRequest::new("analysts");
        request.group.admin = Some(true);
        request.group.ldap_group_names = Some(vec!["eng".into(), "data".into()]);

        let mut store = MemoryStore::new();
        let outcome = reconcile(&request, store.fetch("analysts").unwrap());
        apply(&mut store, &outcome, false).unwrap();

        let second = reconcile(&request, store.fetch("analysts").unwrap());
        assert_eq!(second.action, Action::NoOp);
        assert!(!second.changed);
    }
}
