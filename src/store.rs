//! Remote store adapter over the Studio API client

use anyhow::Result;
use converge::{CreateSeed, Definition, GroupStore};
use log::debug;
use studiokit::StudioClient;

/// Groups on a remote Studio server, seen through the store interface the
/// reconciler needs
pub struct RemoteGroups {
    client: StudioClient,
}

impl RemoteGroups {
    pub fn new(client: StudioClient) -> Self {
        Self { client }
    }
}

impl GroupStore for RemoteGroups {
    fn fetch(&self, name: &str) -> Result<Option<Definition>> {
        debug!("fetching group '{name}'");
        let found = self.client.fetch_group(name)?;
        Ok(found.map(Definition::from))
    }

    fn create(&mut self, name: &str, seed: &CreateSeed) -> Result<()> {
        debug!("creating group '{name}' from seed");
        self.client
            .create_group(name, seed.description.as_deref(), seed.source_type.as_str())?;
        Ok(())
    }

    fn set_definition(&mut self, name: &str, definition: &Definition) -> Result<()> {
        debug!("writing full definition of group '{name}'");
        self.client
            .set_group_definition(name, &definition.to_json_object())?;
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        debug!("deleting group '{name}'");
        self.client.delete_group(name)?;
        Ok(())
    }
}
