//! Blocking client for the Studio public admin API.
//!
//! Groups live under `{base}/api/admin/groups`. Every request carries the
//! API key as a bearer token. HTTP 404 on a lookup is not an error: it is
//! the typed not-found signal callers branch on.

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// A group definition as the server holds it: arbitrary JSON attributes.
pub type GroupDefinition = serde_json::Map<String, Value>;

/// Client for the Studio admin API.
///
/// # Example
///
/// ```no_run
/// use studiokit::StudioClient;
///
/// let client = StudioClient::new("https://studio.example.com", "s3cret");
/// let group = client.fetch_group("analysts").unwrap();
/// println!("exists: {}", group.is_some());
/// ```
pub struct StudioClient {
    /// HTTP agent for requests.
    agent: ureq::Agent,
    /// Server base URL, without a trailing slash.
    base_url: String,
    /// Admin API key, sent as a bearer token.
    api_key: String,
}

#[derive(Serialize)]
struct CreateGroupBody<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(rename = "sourceType")]
    source_type: &'a str,
}

impl StudioClient {
    /// Create a client for the server at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            agent: ureq::Agent::new_with_defaults(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Get the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn groups_url(&self) -> String {
        format!("{}/api/admin/groups", self.base_url)
    }

    fn group_url(&self, name: &str) -> String {
        format!("{}/api/admin/groups/{}", self.base_url, name)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Fetch a group's full definition, or `None` if it does not exist.
    pub fn fetch_group(&self, name: &str) -> Result<Option<GroupDefinition>> {
        let mut response = match self
            .agent
            .get(&self.group_url(name))
            .header("Authorization", self.bearer())
            .header("Accept", "application/json")
            .call()
        {
            Ok(response) => response,
            Err(ureq::Error::StatusCode(404)) => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let definition: GroupDefinition = response.body_mut().read_json()?;
        Ok(Some(definition))
    }

    /// Create a group from its bootstrap attributes.
    ///
    /// The endpoint accepts only the name, an optional description, and the
    /// source type; everything else must follow through
    /// [`set_group_definition`](Self::set_group_definition).
    pub fn create_group(
        &self,
        name: &str,
        description: Option<&str>,
        source_type: &str,
    ) -> Result<()> {
        self.agent
            .post(&self.groups_url())
            .header("Authorization", self.bearer())
            .send_json(CreateGroupBody {
                name,
                description,
                source_type,
            })?;
        Ok(())
    }

    /// Replace a group's full definition.
    pub fn set_group_definition(&self, name: &str, definition: &GroupDefinition) -> Result<()> {
        self.agent
            .put(&self.group_url(name))
            .header("Authorization", self.bearer())
            .send_json(definition)?;
        Ok(())
    }

    /// Delete a group.
    pub fn delete_group(&self, name: &str) -> Result<()> {
        self.agent
            .delete(&self.group_url(name))
            .header("Authorization", self.bearer())
            .call()?;
        Ok(())
    }
}
