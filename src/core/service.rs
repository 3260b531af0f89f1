//! The group membership capability exposed to callers.

use std::sync::Arc;

use async_trait::async_trait;
use store::{KeyValueStore, MemoryStore};
use tracing::debug;

use super::aggregate::GroupDataAggregator;
use super::collaborators::UserDirectory;
use super::ephemeral::EphemeralGroups;
use super::error::GroupsError;
use super::invite::{InviteGroupSelector, RoleGroupNames};
use super::provider::{GroupsProvider, MemoryProvider};
use super::resolver::MembershipResolver;
use super::types::{Group, InviteGroup, MembershipRecord, Uid, UserRecord};
use crate::backend::{StoreGroupRepository, StoreOwnership, StoreUserDirectory};
use crate::config::GroupsConfig;

/// Read-side group membership operations.
///
/// Every method returns results aligned to its input order.
#[async_trait]
pub trait GroupMembership: Send + Sync {
    /// Profiles of every member of the plain set `set`. With `fields`, only
    /// those fields are loaded.
    async fn get_users_from_set(
        &self,
        set: &str,
        fields: Option<&[String]>,
    ) -> Result<Vec<UserRecord>, GroupsError>;

    /// Groups of each user, from the default visible catalog.
    async fn get_user_groups(&self, uids: &[Uid]) -> Result<Vec<Vec<Group>>, GroupsError>;

    /// Groups of each user, from the catalog at `set`.
    async fn get_user_groups_from_set(
        &self,
        set: &str,
        uids: &[Uid],
    ) -> Result<Vec<Vec<Group>>, GroupsError>;

    /// Catalog entries of `set` each user belongs to.
    async fn get_user_group_membership(
        &self,
        set: &str,
        uids: &[Uid],
    ) -> Result<Vec<MembershipRecord>, GroupsError>;

    /// Groups `uid` may invite other users into.
    async fn get_user_invite_groups(&self, uid: Uid) -> Result<Vec<InviteGroup>, GroupsError>;
}

/// [`GroupMembership`] over injected collaborators.
///
/// The type parameter `P` selects the collaborator implementations. Use
/// [`MemoryProvider`] (via [`MembershipService::in_memory`]) for the
/// store-backed defaults.
pub struct MembershipService<P: GroupsProvider> {
    store: Arc<P::Store>,
    groups: Arc<P::Groups>,
    users: Arc<P::Users>,
    ownership: Arc<P::Ownership>,
    ephemeral: Arc<EphemeralGroups>,
    config: GroupsConfig,
}

impl<P: GroupsProvider> MembershipService<P> {
    /// Create a service from pre-built collaborators.
    ///
    /// `ephemeral` is the frozen ephemeral set; pass the same `Arc` the group
    /// repository was built with.
    ///
    /// # Errors
    /// [`GroupsError::Config`] if `config` fails validation.
    pub fn new(
        store: Arc<P::Store>,
        groups: Arc<P::Groups>,
        users: Arc<P::Users>,
        ownership: Arc<P::Ownership>,
        ephemeral: Arc<EphemeralGroups>,
        config: GroupsConfig,
    ) -> Result<Self, GroupsError> {
        config.validate()?;
        Ok(Self {
            store,
            groups,
            users,
            ownership,
            ephemeral,
            config,
        })
    }

    fn resolver(&self) -> MembershipResolver<'_, P::Store, P::Groups> {
        MembershipResolver::new(&*self.store, &*self.groups)
    }

    fn aggregator(&self) -> GroupDataAggregator<'_, P::Groups> {
        GroupDataAggregator::new(&*self.groups)
    }

    fn invite_selector(&self) -> InviteGroupSelector<'_, P::Groups, P::Users, P::Ownership> {
        InviteGroupSelector::new(
            &*self.groups,
            &*self.users,
            &*self.ownership,
            &self.ephemeral,
            &self.config.invite_catalog_key,
            RoleGroupNames {
                administrators: &self.config.administrators_group,
                global_moderators: &self.config.global_moderators_group,
            },
        )
    }
}

impl MembershipService<MemoryProvider> {
    /// Wire every collaborator over one shared [`MemoryStore`].
    pub fn in_memory(store: Arc<MemoryStore>, config: GroupsConfig) -> Result<Self, GroupsError> {
        let ephemeral = Arc::new(EphemeralGroups::new(config.ephemeral_groups.iter().cloned()));
        let groups = Arc::new(StoreGroupRepository::new(
            Arc::clone(&store),
            Arc::clone(&ephemeral),
        ));
        let users = Arc::new(StoreUserDirectory::new(
            Arc::clone(&store),
            &config.administrators_group,
            &config.global_moderators_group,
        ));
        let ownership = Arc::new(StoreOwnership::new(Arc::clone(&store)));
        Self::new(store, groups, users, ownership, ephemeral, config)
    }
}

fn parse_uid(raw: &str) -> Result<Uid, GroupsError> {
    raw.parse::<Uid>()
        .map_err(|_| GroupsError::InvalidUid(raw.to_string()))
}

#[async_trait]
impl<P: GroupsProvider> GroupMembership for MembershipService<P> {
    async fn get_users_from_set(
        &self,
        set: &str,
        fields: Option<&[String]>,
    ) -> Result<Vec<UserRecord>, GroupsError> {
        let uids = self
            .store
            .set_members(set)
            .await?
            .iter()
            .map(|raw| parse_uid(raw))
            .collect::<Result<Vec<Uid>, _>>()?;
        if uids.is_empty() {
            return Ok(Vec::new());
        }

        let users = match fields {
            Some(fields) => self.users.get_users_fields(&uids, fields).await?,
            None => self.users.get_users_data(&uids).await?,
        };
        GroupsError::check_len(uids.len(), users.len())?;
        Ok(users)
    }

    async fn get_user_groups(&self, uids: &[Uid]) -> Result<Vec<Vec<Group>>, GroupsError> {
        self.get_user_groups_from_set(&self.config.visible_catalog_key, uids)
            .await
    }

    async fn get_user_groups_from_set(
        &self,
        set: &str,
        uids: &[Uid],
    ) -> Result<Vec<Vec<Group>>, GroupsError> {
        let member_of = self.get_user_group_membership(set, uids).await?;
        self.aggregator().expand_membership(&member_of).await
    }

    async fn get_user_group_membership(
        &self,
        set: &str,
        uids: &[Uid],
    ) -> Result<Vec<MembershipRecord>, GroupsError> {
        debug!(
            "[get_user_group_membership]: Resolving {} users against {set}",
            uids.len()
        );
        self.resolver().resolve_membership(set, uids).await
    }

    async fn get_user_invite_groups(&self, uid: Uid) -> Result<Vec<InviteGroup>, GroupsError> {
        self.invite_selector().select_invite_groups(uid).await
    }
}
