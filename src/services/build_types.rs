//! Build configuration services.
//!
//! [`BuildTypeService`] covers the `buildTypes` collection. The other services
//! here are derived per build configuration, with their template already
//! narrowed to `buildTypes/id:<id>/`.

use serde_json::Value;

use crate::error::Result;
use crate::traits::{Resource, Service};

scoped_service! {
    /// Build configurations, under `buildTypes`.
    BuildTypeService
}

impl Resource for BuildTypeService {
    const COLLECTION: &'static str = "buildTypes";
}

scoped_service! {
    /// Agent requirements of one build configuration.
    AgentRequirementService
}

impl Resource for AgentRequirementService {
    const COLLECTION: &'static str = "agent-requirements";

    fn item_path(id: &str) -> String {
        nested_item_path(Self::COLLECTION, id)
    }
}

scoped_service! {
    /// Build features of one build configuration.
    BuildFeatureService
}

impl Resource for BuildFeatureService {
    const COLLECTION: &'static str = "features";

    fn item_path(id: &str) -> String {
        nested_item_path(Self::COLLECTION, id)
    }
}

scoped_service! {
    /// Build triggers of one build configuration.
    TriggerService
}

impl Resource for TriggerService {
    const COLLECTION: &'static str = "triggers";

    fn item_path(id: &str) -> String {
        nested_item_path(Self::COLLECTION, id)
    }
}

scoped_service! {
    /// Snapshot and artifact dependencies of one build configuration.
    DependencyService
}

const SNAPSHOT_DEPENDENCIES: &str = "snapshot-dependencies";
const ARTIFACT_DEPENDENCIES: &str = "artifact-dependencies";

impl DependencyService {
    #[tracing::instrument(skip(self))]
    pub async fn snapshot_dependencies(&self) -> Result<Value> {
        self.get_json(SNAPSHOT_DEPENDENCIES).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn artifact_dependencies(&self) -> Result<Value> {
        self.get_json(ARTIFACT_DEPENDENCIES).await
    }

    #[tracing::instrument(skip(self, body))]
    pub async fn add_snapshot_dependency(&self, body: &Value) -> Result<Value> {
        self.post_json(SNAPSHOT_DEPENDENCIES, body).await
    }

    #[tracing::instrument(skip(self, body))]
    pub async fn add_artifact_dependency(&self, body: &Value) -> Result<Value> {
        self.post_json(ARTIFACT_DEPENDENCIES, body).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_snapshot_dependency(&self, id: &str) -> Result<()> {
        self.delete_path(&nested_item_path(SNAPSHOT_DEPENDENCIES, id))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_artifact_dependency(&self, id: &str) -> Result<()> {
        self.delete_path(&nested_item_path(ARTIFACT_DEPENDENCIES, id))
            .await
    }
}

// Nested items (e.g. RQ_1, TRIGGER_2) are addressed by their bare id.
fn nested_item_path(collection: &str, id: &str) -> String {
    format!("{}/{}", collection, urlencoding::encode(id))
}
