//! Invite eligibility: which groups a user may invite others into.
//!
//! Visibility is tiered. Administrators see the two role pseudo-groups, every
//! listed private group and every public group. Global moderators see every
//! listed private group and every public group. Everyone else sees the
//! private groups they own and every public group. Hidden and system groups
//! never appear, nor do ephemeral ones.

use futures::future::try_join_all;
use tracing::{debug, info};

use super::collaborators::{GroupRepository, OwnershipService, UserDirectory};
use super::ephemeral::EphemeralGroups;
use super::error::GroupsError;
use super::types::{Group, InviteGroup, RoleFacts, Uid};

/// Names of the role pseudo-groups prepended for administrators.
#[derive(Clone, Debug)]
pub struct RoleGroupNames<'a> {
    pub administrators: &'a str,
    pub global_moderators: &'a str,
}

/// Computes invite listings for single users.
pub struct InviteGroupSelector<'a, G: ?Sized, U: ?Sized, O: ?Sized> {
    groups: &'a G,
    users: &'a U,
    ownership: &'a O,
    ephemeral: &'a EphemeralGroups,
    catalog_key: &'a str,
    roles: RoleGroupNames<'a>,
}

impl<'a, G, U, O> InviteGroupSelector<'a, G, U, O>
where
    G: GroupRepository + ?Sized,
    U: UserDirectory + ?Sized,
    O: OwnershipService + ?Sized,
{
    pub fn new(
        groups: &'a G,
        users: &'a U,
        ownership: &'a O,
        ephemeral: &'a EphemeralGroups,
        catalog_key: &'a str,
        roles: RoleGroupNames<'a>,
    ) -> Self {
        Self {
            groups,
            users,
            ownership,
            ephemeral,
            catalog_key,
            roles,
        }
    }

    /// Ordered invite listing for `uid`.
    ///
    /// Ownership of each listed private group and both role flags are looked
    /// up concurrently. Any failed lookup fails the whole selection.
    pub async fn select_invite_groups(&self, uid: Uid) -> Result<Vec<InviteGroup>, GroupsError> {
        let candidates: Vec<Group> = self
            .groups
            .get_non_privilege_groups(self.catalog_key, 0, -1)
            .await?
            .into_iter()
            .filter(|group| !self.ephemeral.contains(&group.name))
            .collect();

        let public: Vec<Group> = candidates
            .iter()
            .filter(|group| group.is_public())
            .cloned()
            .collect();
        let private: Vec<Group> = candidates
            .into_iter()
            .filter(Group::is_private_visible)
            .collect();

        let (ownership, is_administrator, is_global_moderator) = tokio::try_join!(
            self.ownership_of(uid, &private),
            self.users.is_administrator(uid),
            self.users.is_global_moderator(uid),
        )?;
        GroupsError::check_len(private.len(), ownership.len())?;

        let roles = RoleFacts {
            is_administrator,
            is_global_moderator,
        };
        debug!(
            "[select_invite_groups]: uid {uid} roles {roles:?}, {} private, {} public",
            private.len(),
            public.len()
        );

        let owned: Vec<Group> = private
            .iter()
            .zip(ownership)
            .filter(|(_, owns)| *owns)
            .map(|(group, _)| group.clone())
            .collect();

        let invite_groups = compose_invite_groups(roles, &self.roles, private, owned, public);
        info!(
            "[select_invite_groups]: uid {uid} may invite to {} groups",
            invite_groups.len()
        );
        Ok(invite_groups)
    }

    async fn ownership_of(&self, uid: Uid, private: &[Group]) -> Result<Vec<bool>, GroupsError> {
        try_join_all(
            private
                .iter()
                .map(|group| self.ownership.is_owner(uid, &group.name)),
        )
        .await
    }
}

/// Assemble the final listing from already classified segments.
///
/// Exactly one branch applies, by precedence administrator, global
/// moderator, owner. Public groups always close the list. Segments keep their
/// catalog order and are not deduplicated.
pub fn compose_invite_groups(
    roles: RoleFacts,
    role_names: &RoleGroupNames<'_>,
    private: Vec<Group>,
    owned: Vec<Group>,
    public: Vec<Group>,
) -> Vec<InviteGroup> {
    let mut invite_groups = Vec::new();
    if roles.is_administrator {
        invite_groups.push(InviteGroup::role(role_names.administrators));
        invite_groups.push(InviteGroup::role(role_names.global_moderators));
        invite_groups.extend(private.into_iter().map(InviteGroup::from));
    } else if roles.is_global_moderator {
        invite_groups.extend(private.into_iter().map(InviteGroup::from));
    } else {
        invite_groups.extend(owned.into_iter().map(InviteGroup::from));
    }
    invite_groups.extend(public.into_iter().map(InviteGroup::from));
    invite_groups
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROLE_NAMES: RoleGroupNames<'static> = RoleGroupNames {
        administrators: "administrators",
        global_moderators: "Global Moderators",
    };

    fn group(name: &str, private: bool) -> Group {
        Group {
            name: name.to_string(),
            display_name: name.to_string(),
            private,
            ..Default::default()
        }
    }

    fn names(list: &[InviteGroup]) -> Vec<&str> {
        list.iter().map(InviteGroup::name).collect()
    }

    #[test]
    fn administrator_precedes_moderator() {
        let roles = RoleFacts {
            is_administrator: true,
            is_global_moderator: true,
        };
        let result = compose_invite_groups(
            roles,
            &ROLE_NAMES,
            vec![group("p1", true), group("p2", true)],
            vec![],
            vec![group("pub", false)],
        );
        assert_eq!(
            names(&result),
            vec!["administrators", "Global Moderators", "p1", "p2", "pub"]
        );
        assert!(matches!(result[0], InviteGroup::Role { .. }));
    }

    #[test]
    fn moderator_sees_all_private() {
        let roles = RoleFacts {
            is_administrator: false,
            is_global_moderator: true,
        };
        let result = compose_invite_groups(
            roles,
            &ROLE_NAMES,
            vec![group("p1", true), group("p2", true)],
            vec![group("p2", true)],
            vec![group("pub", false)],
        );
        assert_eq!(names(&result), vec!["p1", "p2", "pub"]);
    }

    #[test]
    fn plain_user_sees_owned_only() {
        let result = compose_invite_groups(
            RoleFacts::default(),
            &ROLE_NAMES,
            vec![group("p1", true), group("p2", true)],
            vec![group("p2", true)],
            vec![group("pub", false)],
        );
        assert_eq!(names(&result), vec!["p2", "pub"]);
    }
}
