//! LGTM approval fallback
//!
//! When the PR author is not an active team member, an active member can
//! approve the change by commenting with the approval token (`LGTM` by
//! default). The first such comment by an active member wins.

use crate::core::models::{Failure, PullRequestContext};
use crate::core::ports::HostingApi;

use super::membership::check_membership;

/// Find an approving team member among the pull request comments
///
/// Returns the approver's login, or `None` when no comment containing
/// `token` was written by an active member of `team`.
pub fn find_approval(
    api: &dyn HostingApi,
    context: &PullRequestContext,
    team: &str,
    token: &str,
) -> Result<Option<String>, Failure> {
    log::debug!("Scanning pull request comments for '{token}' from team '{team}'");

    let comments = api
        .list_comments(&context.comments_url)
        .map_err(|e| Failure::transport("list pull request comments", e))?;

    for comment in comments
        .iter()
        .filter(|c| !c.author.is_empty() && c.body.contains(token))
    {
        let membership = check_membership(api, &context.organization, team, &comment.author)?;
        if membership.is_active() {
            log::info!("Found {token} from @{} (team '{team}')", comment.author);
            return Ok(Some(comment.author.clone()));
        }
        log::debug!("Ignoring {token} from @{}: {membership}", comment.author);
    }

    Ok(None)
}
