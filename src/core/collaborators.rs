//! Interfaces the core expects from the rest of the system.
//!
//! Every bulk operation returns results index-aligned to its input. An
//! implementation that answers with a different number of items is a bug in
//! that implementation; the core reports it as
//! [`GroupsError::LengthMismatch`].

use async_trait::async_trait;

use super::error::GroupsError;
use super::types::{Group, Uid, UserRecord};

/// Group data and membership lookups.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Test `uid` against every group in `group_names` in one call.
    async fn is_member_of_groups(
        &self,
        uid: Uid,
        group_names: &[String],
    ) -> Result<Vec<bool>, GroupsError>;

    /// Full records for `group_names`, in the same order.
    async fn get_groups_data(&self, group_names: &[String]) -> Result<Vec<Group>, GroupsError>;

    /// Groups of the ordered catalog `set` (descending score, inclusive
    /// `start..=stop`) with privilege groups removed.
    async fn get_non_privilege_groups(
        &self,
        set: &str,
        start: isize,
        stop: isize,
    ) -> Result<Vec<Group>, GroupsError>;
}

/// User profile and site role lookups.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn get_users_data(&self, uids: &[Uid]) -> Result<Vec<UserRecord>, GroupsError>;

    /// Like [`UserDirectory::get_users_data`] but limited to `fields`.
    async fn get_users_fields(
        &self,
        uids: &[Uid],
        fields: &[String],
    ) -> Result<Vec<UserRecord>, GroupsError>;

    async fn is_administrator(&self, uid: Uid) -> Result<bool, GroupsError>;

    async fn is_global_moderator(&self, uid: Uid) -> Result<bool, GroupsError>;
}

/// Per-group ownership.
#[async_trait]
pub trait OwnershipService: Send + Sync {
    async fn is_owner(&self, uid: Uid, group_name: &str) -> Result<bool, GroupsError>;
}
