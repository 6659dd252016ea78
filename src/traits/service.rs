//! Service trait: a request template plus the shared transport.

use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;
use crate::template::{Body, RequestTemplate, TEXT_PLAIN};
use crate::transport::{ApiResponse, Transport};

/// A resource-scoped client handle.
///
/// A service owns its own [`RequestTemplate`] and a clone of the client's
/// [`Transport`]. Paths passed to the request helpers are resolved below the
/// template's prefix. Any non-2xx answer becomes
/// [`TeamCityError::Api`](crate::TeamCityError::Api).
#[async_trait]
pub trait Service: Sized + Send + Sync {
    /// Assemble the service from a template it now owns.
    fn from_parts(template: RequestTemplate, transport: Transport) -> Self;

    fn template(&self) -> &RequestTemplate;

    fn transport(&self) -> &Transport;

    /// Effective base path of this service's requests.
    fn base_path(&self) -> String {
        self.template().base_path()
    }

    /// Issue one request through this service's template.
    async fn send(&self, method: Method, path: &str, body: Option<Body>) -> Result<ApiResponse> {
        let request = self
            .template()
            .build(self.transport().http(), method, path, body)?;
        self.transport().execute(request).await?.error_for_status()
    }

    /// GET `path` and deserialize the JSON answer.
    async fn get_json<T: DeserializeOwned + Send>(&self, path: &str) -> Result<T> {
        self.send(Method::GET, path, None).await?.json()
    }

    /// POST a JSON body to `path`.
    async fn post_json(&self, path: &str, body: &Value) -> Result<Value> {
        self.send(Method::POST, path, Some(Body::Json(body.clone())))
            .await?
            .json()
    }

    /// PUT a JSON body to `path`.
    async fn put_json(&self, path: &str, body: &Value) -> Result<Value> {
        self.send(Method::PUT, path, Some(Body::Json(body.clone())))
            .await?
            .json()
    }

    /// PUT a raw string to `path` and return the server's text answer.
    async fn put_text(&self, path: &str, text: &str) -> Result<String> {
        // Plain-text endpoints answer in plain text too.
        let template = self
            .template()
            .clone()
            .with_header(ACCEPT, HeaderValue::from_static(TEXT_PLAIN));
        let request = template.build(
            self.transport().http(),
            Method::PUT,
            path,
            Some(Body::Text(text.to_string())),
        )?;
        let response = self.transport().execute(request).await?.error_for_status()?;
        Ok(response.text())
    }

    /// DELETE `path`.
    async fn delete_path(&self, path: &str) -> Result<()> {
        self.send(Method::DELETE, path, None).await?;
        Ok(())
    }
}
