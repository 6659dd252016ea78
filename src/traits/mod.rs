//! Trait definitions for TeamCity services.
//!
//! [`Service`] is what every scoped sub-client implements; [`Resource`] adds
//! the standard collection operations for services backed by one collection.

mod resource;
mod service;

pub use resource::Resource;
pub use service::Service;
