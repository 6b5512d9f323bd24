//! Profile and group domain model.
//!
//! # Responsibility
//! - Mirror the host-owned actor entities the plugin cores read from.
//! - Provide display-name selection used by notice message templates.
//!
//! # Invariants
//! - `uri` is the canonical mention target for a profile and never changes.
//! - `account_id` is `None` for remote/unregistered profiles.

use super::notice::AccountId;
use serde::{Deserialize, Serialize};

/// Stable identifier for a profile.
pub type ProfileId = i64;

/// Stable identifier for a group.
pub type GroupId = i64;

/// A person on the platform, local or remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    /// Short handle used for `for:` mention lookups.
    pub nickname: String,
    /// Optional long display name.
    pub fullname: Option<String>,
    /// Public profile page URL.
    pub profile_url: String,
    /// Canonical URI used when this profile is mentioned.
    pub uri: String,
    /// Linked registered account, when one exists.
    pub account_id: Option<AccountId>,
}

impl Profile {
    /// Returns the preferred display name: fullname when set, else nickname.
    pub fn best_name(&self) -> &str {
        self.fullname.as_deref().unwrap_or(&self.nickname)
    }

    /// Returns whether this profile is linked to a registered account.
    pub fn has_account(&self) -> bool {
        self.account_id.is_some()
    }
}

/// A user group on the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub nickname: String,
    pub fullname: Option<String>,
    /// Group home page URL.
    pub home_url: String,
}

impl Group {
    /// Returns the preferred display name: fullname when set, else nickname.
    pub fn best_name(&self) -> &str {
        self.fullname.as_deref().unwrap_or(&self.nickname)
    }
}
