//! Team membership states and the policy applied to them

use serde::{Deserialize, Serialize};

/// Membership of a user in a team, as reported by the hosting API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamMembership {
    /// Active member - the only state that satisfies the gate
    Active,
    /// Invited or otherwise not yet active
    Pending,
    /// No membership record at all
    NotMember,
}

impl TeamMembership {
    /// Map the API's `state` field onto a membership
    ///
    /// Anything other than `active` is treated as pending.
    #[must_use]
    pub fn from_state(state: &str) -> Self {
        if state.eq_ignore_ascii_case("active") {
            Self::Active
        } else {
            Self::Pending
        }
    }

    /// Whether this membership satisfies the gate
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for TeamMembership {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Pending => write!(f, "pending"),
            Self::NotMember => write!(f, "not a member"),
        }
    }
}

/// What happens when the PR author is not an active team member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipPolicy {
    /// Look for an LGTM comment from an active team member
    #[default]
    Lgtm,
    /// Fail the file immediately
    Strict,
}

impl std::fmt::Display for MembershipPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lgtm => write!(f, "lgtm"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

impl std::str::FromStr for MembershipPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lgtm" => Ok(Self::Lgtm),
            "strict" => Ok(Self::Strict),
            _ => Err(format!("Invalid membership policy: {s}. Use: lgtm, strict")),
        }
    }
}
