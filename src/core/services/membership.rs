//! Team membership checks

use crate::core::models::{Failure, TeamMembership};
use crate::core::ports::HostingApi;

/// Look up `user`'s membership in `team`
///
/// API failures become [`Failure::Transport`] so they read differently from
/// a user who is simply not a member.
pub fn check_membership(
    api: &dyn HostingApi,
    org: &str,
    team: &str,
    user: &str,
) -> Result<TeamMembership, Failure> {
    log::debug!("Checking if @{user} is a member of team '{team}' in org {org}");

    let membership = api.team_membership(org, team, user).map_err(|e| {
        Failure::transport(format!("check membership of @{user} in team '{team}'"), e)
    })?;

    log::debug!("@{user} in team '{team}': {membership}");
    Ok(membership)
}
