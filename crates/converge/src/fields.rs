//! Translation from caller-supplied options to the server's native fields
//!
//! The server names attributes in camelCase and transports set-valued
//! attributes as one comma-delimited string. Everything here is pure.

use serde::Serializer;
use serde_json::Value;
use std::collections::BTreeSet;

use crate::types::{Definition, GroupRequest};

/// Native key of the membership list attribute
pub const LDAP_GROUP_NAMES: &str = "ldapGroupNames";

/// Native key of the capability the server defaults to `false` when a
/// create omits it
pub const MAY_WRITE_SAFE_CODE: &str = "mayWriteSafeCode";

/// Attributes whose value is a set transported as one delimited string
const LIST_FIELDS: &[&str] = &[LDAP_GROUP_NAMES];

const LIST_DELIMITER: char = ',';

/// Map a request onto the server's native field names.
///
/// Unset attributes are excluded, list attributes are canonicalized, and
/// extra keys get the same snake_case to camelCase translation and pass
/// through unchanged in value. Unknown keys are never an error.
pub fn map_fields(request: &GroupRequest) -> Definition {
    let fields =
        serde_json::to_value(&request.group).expect("a desired group serializes to a JSON object");
    let Value::Object(fields) = fields else {
        unreachable!("DesiredGroup is a struct");
    };

    let mut mapped = Definition::from(fields);
    for (key, value) in &request.extras {
        mapped.insert(to_camel_case(key), value.clone());
    }
    mapped
}

/// Canonical order-independent form of a delimited set field: sorted,
/// de-duplicated, empty elements dropped
pub fn canonicalize_list(raw: &str) -> String {
    let elements: BTreeSet<&str> = raw
        .split(LIST_DELIMITER)
        .filter(|element| !element.is_empty())
        .collect();
    join(elements)
}

/// Canonical joined form of a membership list supplied as separate elements
pub fn canonical_members(members: &[String]) -> String {
    let elements: BTreeSet<&str> = members
        .iter()
        .map(String::as_str)
        .filter(|element| !element.is_empty())
        .collect();
    join(elements)
}

fn join(elements: BTreeSet<&str>) -> String {
    elements.into_iter().collect::<Vec<_>>().join(",")
}

/// A server-sourced definition with every list field rewritten to canonical
/// form, so element order and duplicates never show up as drift.
///
/// Handles both transport shapes: the joined string and a literal JSON array
/// of strings.
pub fn canonicalize_definition(definition: &Definition) -> Definition {
    let mut canonical = definition.clone();
    for &field in LIST_FIELDS {
        let joined = match definition.get(field) {
            Some(Value::String(raw)) => canonicalize_list(raw),
            Some(Value::Array(elements)) => {
                let members: Vec<String> = elements
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect();
                canonical_members(&members)
            }
            _ => continue,
        };
        canonical.insert(field, Value::String(joined));
    }
    canonical
}

/// snake_case to the server's camelCase
pub fn to_camel_case(key: &str) -> String {
    let mut translated = String::with_capacity(key.len());
    let mut upper_next = false;
    for ch in key.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            translated.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            translated.push(ch);
        }
    }
    translated
}

pub(crate) fn serialize_members<S>(
    members: &Option<Vec<String>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match members {
        Some(members) => serializer.serialize_str(&canonical_members(members)),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GroupRequest;
    use serde_json::json;

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("ldap_group_names"), "ldapGroupNames");
        assert_eq!(to_camel_case("source_type"), "sourceType");
        assert_eq!(to_camel_case("may_manage_udm"), "mayManageUdm");
        assert_eq!(to_camel_case("admin"), "admin");
        assert_eq!(
            to_camel_case("may_create_published_api_services"),
            "mayCreatePublishedApiServices"
        );
    }

    #[test]
    fn test_canonicalize_list_sorts_and_dedupes() {
        assert_eq!(canonicalize_list("b,a,a"), "a,b");
        assert_eq!(canonicalize_list("a,b"), "a,b");
    }

    #[test]
    fn test_canonicalize_list_drops_empty_elements() {
        assert_eq!(canonicalize_list(""), "");
        assert_eq!(canonicalize_list("a,,b"), "a,b");
    }

    #[test]
    fn test_map_fields_excludes_unset() {
        let mut request = GroupRequest::new("analysts");
        request.group.admin = Some(true);

        let mapped = map_fields(&request);
        assert_eq!(mapped.len(), 2);
        assert_eq!(mapped.get("name"), Some(&json!("analysts")));
        assert_eq!(mapped.get("admin"), Some(&json!(true)));
        assert!(!mapped.contains_key("description"));
        assert!(!mapped.contains_key(MAY_WRITE_SAFE_CODE));
    }

    #[test]
    fn test_map_fields_translates_keys() {
        let mut request = GroupRequest::new("analysts");
        request.group.source_type = Some("LDAP".parse().unwrap());
        request.group.may_write_unsafe_code = Some(false);

        let mapped = map_fields(&request);
        assert_eq!(mapped.get("sourceType"), Some(&json!("LDAP")));
        assert_eq!(mapped.get("mayWriteUnsafeCode"), Some(&json!(false)));
    }

    #[test]
    fn test_map_fields_canonicalizes_members() {
        let mut request = GroupRequest::new("analysts");
        request.group.ldap_group_names =
            Some(vec!["eng".into(), "data".into(), "data".into()]);

        let mapped = map_fields(&request);
        assert_eq!(mapped.get(LDAP_GROUP_NAMES), Some(&json!("data,eng")));
    }

    #[test]
    fn test_map_fields_passes_extras_through() {
        let mut request = GroupRequest::new("analysts");
        request
            .extras
            .insert("max_running_activities".to_string(), json!(12));

        let mapped = map_fields(&request);
        assert_eq!(mapped.get("maxRunningActivities"), Some(&json!(12)));
    }

    #[test]
    fn test_canonicalize_definition_string_form() {
        let found: Definition = [(LDAP_GROUP_NAMES.to_string(), json!("b,a,a"))]
            .into_iter()
            .collect();
        let canonical = canonicalize_definition(&found);
        assert_eq!(canonical.get(LDAP_GROUP_NAMES), Some(&json!("a,b")));
    }

    #[test]
    fn test_canonicalize_definition_array_form() {
        let found: Definition = [(LDAP_GROUP_NAMES.to_string(), json!(["b", "a"]))]
            .into_iter()
            .collect();
        let canonical = canonicalize_definition(&found);
        assert_eq!(canonical.get(LDAP_GROUP_NAMES), Some(&json!("a,b")));
    }

    #[test]
    fn test_canonicalize_definition_leaves_other_fields() {
        let found: Definition = [("admin".to_string(), json!(true))].into_iter().collect();
        assert_eq!(canonicalize_definition(&found), found);
    }
}
