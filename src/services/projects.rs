//! Projects service.

use crate::traits::Resource;

scoped_service! {
    /// Projects, under `projects`.
    ProjectService
}

impl Resource for ProjectService {
    const COLLECTION: &'static str = "projects";
}
