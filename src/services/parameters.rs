//! Parameters service.
//!
//! Parameters only exist relative to a project or a build configuration, so
//! this service is always derived with a narrowed path
//! (`projects/id:<id>/` or `buildTypes/id:<id>/`).

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::traits::Service;

const PARAMETERS: &str = "parameters";

scoped_service! {
    /// Parameters of one project or build configuration.
    ParameterService
}

/// A single parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,

    #[serde(default)]
    pub value: String,

    /// Whether the value comes from a parent project or template.
    #[serde(default)]
    pub inherited: bool,
}

/// The parameter collection of a project or build configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Properties {
    #[serde(default)]
    pub count: u32,

    #[serde(default, rename = "property")]
    pub items: Vec<Property>,
}

impl ParameterService {
    /// All parameters, including inherited ones.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Properties> {
        self.get_json(PARAMETERS).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, name: &str) -> Result<Property> {
        self.get_json(&parameter_path(name)).await
    }

    /// Create or overwrite a parameter's value.
    ///
    /// The value is sent as a plain-text body.
    #[tracing::instrument(skip(self, value))]
    pub async fn set(&self, name: &str, value: &str) -> Result<Property> {
        let stored = self
            .put_text(&format!("{}/value", parameter_path(name)), value)
            .await?;
        Ok(Property {
            name: name.to_string(),
            value: stored,
            inherited: false,
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, name: &str) -> Result<()> {
        self.delete_path(&parameter_path(name)).await
    }
}

fn parameter_path(name: &str) -> String {
    format!("{}/{}", PARAMETERS, urlencoding::encode(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_path_encodes_name() {
        assert_eq!(parameter_path("env.JAVA_HOME"), "parameters/env.JAVA_HOME");
        assert_eq!(parameter_path("a b"), "parameters/a%20b");
    }

    #[test]
    fn test_properties_deserialize() {
        let props: Properties = serde_json::from_value(serde_json::json!({
            "count": 2,
            "href": "/app/rest/projects/id:p1/parameters",
            "property": [
                { "name": "env.A", "value": "1", "inherited": true },
                { "name": "system.b", "value": "" }
            ]
        }))
        .unwrap();

        assert_eq!(props.count, 2);
        assert_eq!(props.items.len(), 2);
        assert!(props.items[0].inherited);
        assert!(!props.items[1].inherited);
    }
}
