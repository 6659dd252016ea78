//! TeamCity REST API client library.
//!
//! A [`TeamCityClient`] builds one authenticated [`RequestTemplate`] and
//! derives resource-scoped services from it. Every service owns its own copy
//! of the template and shares the client's [`Transport`].
//!
//! # Quick Start
//!
//! ```no_run
//! use teamcity::{Resource, TeamCityClient, TraceConfig, Transport};
//!
//! #[tokio::main]
//! async fn main() -> teamcity::Result<()> {
//!     // Dump outgoing requests to stdout
//!     let transport = Transport::default_client()?
//!         .with_trace_config(TraceConfig::new().with_requests(true));
//!
//!     // Address from TEAMCITY_ADDR
//!     let client = TeamCityClient::from_env("admin", "secret", transport)?;
//!     client.validate().await?;
//!
//!     let info = client.server.info().await?;
//!     println!("TeamCity {}", info.version.unwrap_or_default());
//!
//!     let project = client.projects.get("MyProject").await?;
//!     println!("Project: {}", project["name"]);
//!
//!     let params = client.project_parameters("MyProject").list().await?;
//!     println!("{} parameters", params.count);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`RequestTemplate`] - base URL, path prefix, credentials, default headers
//! - [`Service`] - a template plus the transport, with request helpers
//! - [`Resource`] - get/list/create/delete over one collection
//! - [`derive`] - the factory producing services from a template
//! - [`TraceConfig`] - request/response dump switches held by the transport
//!
//! # Configuration
//!
//! - `TEAMCITY_ADDR` - server address used by [`TeamCityClient::from_env`]

pub mod cli;
mod client;
mod config;
mod error;
mod locator;
pub mod output;
mod services;
mod template;
mod trace;
mod traits;
mod transport;

// Re-export core types
pub use client::TeamCityClient;
pub use config::{ConnectionConfig, ADDRESS_ENV_VAR};
pub use error::{Result, TeamCityError};
pub use locator::locator_id;
pub use template::{Body, Credentials, RequestTemplate, APPLICATION_JSON, TEXT_PLAIN};
pub use trace::{dump_request, dump_response, DumpError, StdoutSink, TraceConfig, TraceSink};
pub use transport::{ApiResponse, Transport};

// Re-export traits
pub use traits::{Resource, Service};

// Re-export services
pub use services::{
    derive, AgentRequirementService, BuildFeatureService, BuildTypeService, DependencyService,
    ParameterService, ProjectService, Properties, Property, ServerInfo, ServerService,
    TriggerService, VcsRootService,
};
