//! Resource-scoped services and the factory that derives them.
//!
//! Every service is built the same way: copy a template, optionally narrow
//! its path, and pair it with the shared transport. [`derive`] is the single
//! place that happens.

/// Declares a service struct holding a template and a transport.
macro_rules! scoped_service {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            template: $crate::template::RequestTemplate,
            transport: $crate::transport::Transport,
        }

        impl $crate::traits::Service for $name {
            fn from_parts(
                template: $crate::template::RequestTemplate,
                transport: $crate::transport::Transport,
            ) -> Self {
                Self { template, transport }
            }

            fn template(&self) -> &$crate::template::RequestTemplate {
                &self.template
            }

            fn transport(&self) -> &$crate::transport::Transport {
                &self.transport
            }
        }
    };
}

mod build_types;
mod parameters;
mod projects;
mod server;
mod vcs_roots;

pub use build_types::{
    AgentRequirementService, BuildFeatureService, BuildTypeService, DependencyService,
    TriggerService,
};
pub use parameters::{ParameterService, Properties, Property};
pub use projects::ProjectService;
pub use server::{ServerInfo, ServerService};
pub(crate) use server::SERVER_PATH;
pub use vcs_roots::VcsRootService;

use crate::template::RequestTemplate;
use crate::traits::Service;
use crate::transport::Transport;

/// Build a service of type `S` from a copy of `template`.
///
/// With a `suffix`, the copy's path is narrowed by it (e.g.
/// `buildTypes/id:MyBuild/`). The original template is never modified; the
/// transport is shared.
pub fn derive<S: Service>(
    template: &RequestTemplate,
    transport: &Transport,
    suffix: Option<&str>,
) -> S {
    S::from_parts(template.derive(suffix), transport.clone())
}
