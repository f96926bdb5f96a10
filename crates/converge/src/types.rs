//! Core types for group reconciliation

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::InvalidValue;

/// Declared target existence state for a group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// The group should exist with the desired attributes
    #[default]
    Present,
    /// The group should not exist
    Absent,
}

impl FromStr for Intent {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            other => Err(InvalidValue::new("state", other, &["present", "absent"])),
        }
    }
}

/// Account source of a group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SourceType {
    /// Accounts managed by the server itself
    #[default]
    Local,
    /// Accounts mapped from an LDAP directory
    Ldap,
    /// Accounts provisioned by the hosted offering
    Saas,
}

impl SourceType {
    /// The server's native spelling of this source type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "LOCAL",
            Self::Ldap => "LDAP",
            Self::Saas => "SAAS",
        }
    }
}

impl FromStr for SourceType {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOCAL" => Ok(Self::Local),
            "LDAP" => Ok(Self::Ldap),
            "SAAS" => Ok(Self::Saas),
            other => Err(InvalidValue::new(
                "source_type",
                other,
                &["LOCAL", "LDAP", "SAAS"],
            )),
        }
    }
}

/// Full or partial group attribute mapping as exchanged with the server.
///
/// The server owns the schema: a definition may carry attributes this crate
/// does not know about, and they survive merges untouched. Equality is
/// structural over the full mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Definition(BTreeMap<String, Value>);

impl Definition {
    /// Empty definition
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an attribute by its native key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set an attribute, returning the previous value if any
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Whether the attribute is set (a JSON null counts as set)
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate attributes in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// This definition with `overlay` keys written over it.
    ///
    /// Keys absent from the overlay are preserved untouched; omitted
    /// attributes are never cleared.
    pub fn merged(&self, overlay: &Self) -> Self {
        let mut merged = self.clone();
        for (key, value) in &overlay.0 {
            merged.0.insert(key.clone(), value.clone());
        }
        merged
    }

    /// Copy out as the JSON object shape wire clients use
    pub fn to_json_object(&self) -> serde_json::Map<String, Value> {
        self.0
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl From<serde_json::Map<String, Value>> for Definition {
    fn from(object: serde_json::Map<String, Value>) -> Self {
        Self(object.into_iter().collect())
    }
}

impl From<BTreeMap<String, Value>> for Definition {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for Definition {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Desired group attributes, one field per attribute the server knows.
///
/// `None` is the explicit "unset" sentinel, distinct from `Some(false)` or an
/// empty list: an unset attribute is excluded from the diff entirely, so it
/// neither forces a creation default nor overwrites an existing value.
///
/// Serde renaming doubles as the key translation to the server's native
/// camelCase, so the closed attribute set and the mapping cannot drift apart.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesiredGroup {
    /// Unique, immutable group name
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceType>,
    /// Whether the group carries administrator rights
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,
    /// LDAP groups mapped onto this group; a set, transported in canonical
    /// sorted joined form
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::fields::serialize_members"
    )]
    pub ldap_group_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub may_create_authenticated_connections: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub may_create_code_envs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub may_create_clusters: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub may_create_projects: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub may_create_projects_from_macros: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub may_create_projects_from_templates: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub may_create_projects_from_apps: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub may_create_published_api_services: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub may_create_published_projects: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub may_create_active_web_content: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub may_develop_plugins: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub may_edit_lib_folders: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub may_manage_code_envs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub may_manage_clusters: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub may_manage_udm: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub may_view_indexed_hive_connections: Option<bool>,
    /// Safety-relevant: the server defaults this to an unsafe value on
    /// create, see the executor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub may_write_safe_code: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub may_write_unsafe_code: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub may_write_in_root_project_folder: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_obtain_api_ticket_from_cookies_for_groups_regex: Option<String>,
}

impl DesiredGroup {
    /// Desired group with every attribute unset
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// One reconciliation request, constructed once per invocation
#[derive(Debug, Clone, Default)]
pub struct GroupRequest {
    pub intent: Intent,
    pub group: DesiredGroup,
    /// Attributes this crate does not know yet, snake_case keyed; they get
    /// the same key translation as known fields and pass through unchanged
    /// in value
    pub extras: BTreeMap<String, Value>,
}

impl GroupRequest {
    /// Request that the group exist, with every attribute unset
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            intent: Intent::Present,
            group: DesiredGroup::new(name),
            extras: BTreeMap::new(),
        }
    }

    /// Request that the group not exist
    pub fn absent(name: impl Into<String>) -> Self {
        let mut request = Self::new(name);
        request.intent = Intent::Absent;
        request
    }
}

/// The minimal action that brings remote state in line with intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// The group is missing and should exist
    Create,
    /// The group exists but differs from the desired definition
    Modify,
    /// The group exists and should not
    Delete,
    /// Remote state already matches intent
    NoOp,
}

impl Action {
    /// Whether applying this action mutates remote state
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::NoOp)
    }
}

/// Result of planning one reconciliation.
///
/// Constructed once by [`crate::reconcile`] and never mutated afterwards;
/// the post-apply definition the server returns is attached by the report,
/// not written back here.
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileOutcome {
    /// Group name, the immutable resource handle
    pub name: String,
    pub action: Action,
    pub changed: bool,
    /// Canonicalized pre-action snapshot, when the group existed
    pub previous: Option<Definition>,
    /// Full definition the apply step would write; `None` when the
    /// post-action intent is absence
    pub proposed: Option<Definition>,
}
