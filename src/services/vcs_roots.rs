//! VCS roots service.

use crate::traits::Resource;

scoped_service! {
    /// VCS roots, under `vcs-roots`.
    VcsRootService
}

impl Resource for VcsRootService {
    const COLLECTION: &'static str = "vcs-roots";
}
