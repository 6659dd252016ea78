//! Resource trait for services backed by a single collection.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::locator::locator_id;
use crate::traits::Service;

/// Standard operations over one REST collection.
///
/// Implementors name their collection; the default methods derive every path
/// from it. Top-level resources address items by locator
/// (`projects/id:MyProject`); nested ones override [`Resource::item_path`].
///
/// # Example
///
/// ```no_run
/// use teamcity::{Resource, TeamCityClient, Transport};
///
/// # async fn example() -> teamcity::Result<()> {
/// let client = TeamCityClient::with_address(
///     "admin",
///     "secret",
///     "http://teamcity.local:8111",
///     Transport::default_client()?,
/// )?;
/// let project = client.projects.get("MyProject").await?;
/// println!("{}", project["name"]);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait Resource: Service {
    /// Collection path relative to the service's prefix.
    const COLLECTION: &'static str;

    /// Path of a single item.
    fn item_path(id: &str) -> String {
        format!("{}/{}", Self::COLLECTION, locator_id(id))
    }

    /// Fetch the whole collection.
    async fn list(&self) -> Result<Value> {
        self.get_json(Self::COLLECTION).await
    }

    /// Fetch one item.
    ///
    /// # Errors
    ///
    /// Returns an API error (typically 404) if the item does not exist.
    async fn get(&self, id: &str) -> Result<Value> {
        self.get_json(&Self::item_path(id)).await
    }

    /// Create an item and return the server's representation of it.
    async fn create(&self, body: &Value) -> Result<Value> {
        self.post_json(Self::COLLECTION, body).await
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        self.delete_path(&Self::item_path(id)).await
    }
}
