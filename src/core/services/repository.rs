//! Repository existence and visibility checks

use crate::core::models::{Failure, RepositoryRef, RepositoryStatus};
use crate::core::ports::HostingApi;

/// Resolve a `source-code` reference without touching the API
pub fn parse_reference(reference: &str) -> Result<RepositoryRef, Failure> {
    RepositoryRef::parse(reference).map_err(|e| {
        log::debug!("Rejecting source-code reference: {e}");
        Failure::InvalidReference {
            reference: reference.trim().to_string(),
        }
    })
}

/// Require `repo` to exist and be public
pub fn check_repository(api: &dyn HostingApi, repo: &RepositoryRef) -> Result<(), Failure> {
    log::debug!("Checking repository {repo}");
    let info = api
        .repository(repo.owner(), repo.name())
        .map_err(|e| Failure::transport(format!("check repository {repo}"), e))?;

    if let Some(info) = &info {
        log::debug!("Found {} (private: {})", info.full_name, info.private);
    }

    match RepositoryStatus::from_lookup(info.as_ref()) {
        RepositoryStatus::Public => Ok(()),
        RepositoryStatus::Private => Err(Failure::RepositoryPrivate {
            repository: repo.to_string(),
        }),
        RepositoryStatus::NotFound => Err(Failure::RepositoryNotFound {
            repository: repo.to_string(),
        }),
    }
}
