//! TeamCity API client.
//!
//! Builds the authenticated root template once and derives every service
//! from it. Construction is local: nothing is sent until a service method or
//! [`TeamCityClient::validate`] is called.

use std::time::Duration;

use reqwest::{Method, StatusCode};
use url::Url;

use crate::config::ConnectionConfig;
use crate::error::{Result, TeamCityError};
use crate::locator::locator_id;
use crate::services::{
    self, AgentRequirementService, BuildFeatureService, BuildTypeService, DependencyService,
    ParameterService, ProjectService, ServerService, TriggerService, VcsRootService, SERVER_PATH,
};
use crate::template::{Credentials, RequestTemplate};
use crate::traits::Service;
use crate::transport::Transport;

/// REST root below the server address, using HTTP Basic authentication.
const REST_PATH: &str = "httpAuth/app/rest/";

/// Entry point to the TeamCity REST API.
///
/// Holds the connection configuration, the shared [`Transport`] and the root
/// [`RequestTemplate`]. The services for projects, build configurations, the
/// server resource and VCS roots are built with the client; services that
/// belong to one project or build configuration are derived on demand.
///
/// # Example
///
/// ```no_run
/// use teamcity::{Resource, TeamCityClient, Transport};
///
/// # async fn example() -> teamcity::Result<()> {
/// // Address from TEAMCITY_ADDR
/// let client = TeamCityClient::from_env("admin", "secret", Transport::default_client()?)?;
///
/// // Or explicit
/// let client = TeamCityClient::with_address(
///     "admin",
///     "secret",
///     "http://teamcity.local:8111",
///     Transport::default_client()?,
/// )?;
///
/// client.validate().await?;
/// let params = client.build_type_parameters("MyProject_Build").list().await?;
/// # Ok(())
/// # }
/// ```
pub struct TeamCityClient {
    config: ConnectionConfig,
    transport: Transport,
    root: RequestTemplate,
    retry_timeout: Duration,

    pub projects: ProjectService,
    pub build_types: BuildTypeService,
    pub server: ServerService,
    pub vcs_roots: VcsRootService,
}

impl std::fmt::Debug for TeamCityClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeamCityClient")
            .field("address", &self.config.address())
            .field("base_url", &self.root.base_url().as_str())
            .finish_non_exhaustive()
    }
}

impl TeamCityClient {
    /// Create a client for the server named by `TEAMCITY_ADDR`.
    ///
    /// # Errors
    ///
    /// Returns [`TeamCityError::Configuration`] if the variable is unset or empty.
    pub fn from_env(username: &str, password: &str, transport: Transport) -> Result<Self> {
        let config = ConnectionConfig::from_env(username, password)?;
        Self::new(config, transport)
    }

    /// Create a client for an explicit server address.
    ///
    /// # Errors
    ///
    /// Returns [`TeamCityError::Configuration`] if `address` is empty, not an
    /// absolute `http`/`https` URL, or carries a query or fragment.
    pub fn with_address(
        username: &str,
        password: &str,
        address: &str,
        transport: Transport,
    ) -> Result<Self> {
        let config = ConnectionConfig::new(username, password, address)?;
        Self::new(config, transport)
    }

    /// Create a client from a resolved configuration.
    pub fn new(config: ConnectionConfig, transport: Transport) -> Result<Self> {
        let base_url = Url::parse(&format!("{}/{}", config.address(), REST_PATH)).map_err(|e| {
            TeamCityError::Configuration(format!(
                "invalid server address '{}': {e}",
                config.address()
            ))
        })?;
        let root = RequestTemplate::new(
            base_url,
            Credentials::new(config.username(), config.password()),
        );

        tracing::debug!(base_url = %root.base_url(), "creating TeamCity client");

        Ok(Self {
            projects: services::derive(&root, &transport, None),
            build_types: services::derive(&root, &transport, None),
            server: services::derive(&root, &transport, None),
            vcs_roots: services::derive(&root, &transport, None),
            config,
            transport,
            root,
            retry_timeout: Duration::ZERO,
        })
    }

    /// Set the retry timeout.
    ///
    /// Stored for callers that implement their own retries; no request made by
    /// this crate consults it.
    #[must_use]
    pub fn with_retry_timeout(mut self, retry_timeout: Duration) -> Self {
        self.retry_timeout = retry_timeout;
        self
    }

    pub fn retry_timeout(&self) -> Duration {
        self.retry_timeout
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// The root template every service is derived from.
    pub fn root_template(&self) -> &RequestTemplate {
        &self.root
    }

    /// REST root URL, e.g. `http://teamcity.local/httpAuth/app/rest/`.
    pub fn base_url(&self) -> &Url {
        self.root.base_url()
    }

    /// Derive any service type from the root template, optionally narrowed
    /// by a path suffix.
    pub fn service<S: Service>(&self, suffix: Option<&str>) -> S {
        services::derive(&self.root, &self.transport, suffix)
    }

    /// Agent requirements of the build configuration `build_type_id`.
    pub fn agent_requirements(&self, build_type_id: &str) -> AgentRequirementService {
        self.service(Some(&build_type_path(build_type_id)))
    }

    /// Build features of the build configuration `build_type_id`.
    pub fn build_features(&self, build_type_id: &str) -> BuildFeatureService {
        self.service(Some(&build_type_path(build_type_id)))
    }

    /// Snapshot and artifact dependencies of the build configuration `build_type_id`.
    pub fn dependencies(&self, build_type_id: &str) -> DependencyService {
        self.service(Some(&build_type_path(build_type_id)))
    }

    /// Triggers of the build configuration `build_type_id`.
    pub fn triggers(&self, build_type_id: &str) -> TriggerService {
        self.service(Some(&build_type_path(build_type_id)))
    }

    /// Parameters of the project `project_id`.
    pub fn project_parameters(&self, project_id: &str) -> ParameterService {
        self.service(Some(&format!("projects/{}", locator_id(project_id))))
    }

    /// Parameters of the build configuration `build_type_id`.
    pub fn build_type_parameters(&self, build_type_id: &str) -> ParameterService {
        self.service(Some(&build_type_path(build_type_id)))
    }

    /// Check that the server is reachable and accepts the credentials.
    ///
    /// Sends one `GET server` through the root template. Both `200 OK` and
    /// `403 Forbidden` count as success: a 403 means authentication went
    /// through and only this endpoint is off limits for the user.
    ///
    /// # Errors
    ///
    /// Returns [`TeamCityError::Transport`] if the server cannot be reached and
    /// [`TeamCityError::Api`] with the status line and body for any other status.
    #[tracing::instrument(skip(self), fields(address = %self.config.address()))]
    pub async fn validate(&self) -> Result<bool> {
        let request = self
            .root
            .build(self.transport.http(), Method::GET, SERVER_PATH, None)?;
        let response = self.transport.execute(request).await?;

        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::FORBIDDEN => {
                tracing::debug!("server reachable, server endpoint forbidden for this user");
                Ok(true)
            }
            _ => Err(TeamCityError::Api {
                status: response.status_line(),
                body: response.text(),
            }),
        }
    }
}

fn build_type_path(build_type_id: &str) -> String {
    format!("buildTypes/{}", locator_id(build_type_id))
}
