//! [`GroupRepository`] over a [`KeyValueStore`].

use std::sync::Arc;

use async_trait::async_trait;
use store::KeyValueStore;
use tracing::{debug, warn};

use super::keys::{
    ephemeral_group, group_from_object, group_key, group_members_key, is_privilege_group,
};
use crate::core::{
    EphemeralGroups, Group, GroupRepository, GroupsError, Uid, GUEST_UID, SPIDER_UID,
};

/// Reads group hashes and member sets from the store.
pub struct StoreGroupRepository<S: KeyValueStore> {
    store: Arc<S>,
    ephemeral: Arc<EphemeralGroups>,
}

impl<S: KeyValueStore> StoreGroupRepository<S> {
    pub fn new(store: Arc<S>, ephemeral: Arc<EphemeralGroups>) -> Self {
        Self { store, ephemeral }
    }
}

/// Membership of unauthenticated principals, which never hit the store.
fn unauthenticated_membership(uid: Uid, group_names: &[String]) -> Vec<bool> {
    let implicit = match uid {
        GUEST_UID => Some("guests"),
        SPIDER_UID => Some("spiders"),
        _ => None,
    };
    group_names
        .iter()
        .map(|name| implicit == Some(name.as_str()))
        .collect()
}

#[async_trait]
impl<S: KeyValueStore + 'static> GroupRepository for StoreGroupRepository<S> {
    async fn is_member_of_groups(
        &self,
        uid: Uid,
        group_names: &[String],
    ) -> Result<Vec<bool>, GroupsError> {
        if uid <= 0 || group_names.is_empty() {
            return Ok(unauthenticated_membership(uid, group_names));
        }
        let keys: Vec<String> = group_names
            .iter()
            .map(|name| group_members_key(name))
            .collect();
        Ok(self
            .store
            .is_member_of_sets(&keys, &uid.to_string())
            .await?)
    }

    async fn get_groups_data(&self, group_names: &[String]) -> Result<Vec<Group>, GroupsError> {
        let stored: Vec<&String> = group_names
            .iter()
            .filter(|name| !self.ephemeral.contains(name))
            .collect();
        let keys: Vec<String> = stored.iter().map(|name| group_key(name)).collect();
        let objects = if keys.is_empty() {
            Vec::new()
        } else {
            self.store.get_objects(&keys).await?
        };
        GroupsError::check_len(keys.len(), objects.len())?;
        let mut objects = objects.into_iter();

        group_names
            .iter()
            .map(|name| {
                if self.ephemeral.contains(name) {
                    return Ok(ephemeral_group(name));
                }
                match objects.next().flatten() {
                    Some(object) => Ok(group_from_object(name, &object)),
                    None => {
                        warn!("[get_groups_data]: No data for group {name}");
                        Err(GroupsError::GroupNotFound(name.clone()))
                    }
                }
            })
            .collect()
    }

    async fn get_non_privilege_groups(
        &self,
        set: &str,
        start: isize,
        stop: isize,
    ) -> Result<Vec<Group>, GroupsError> {
        let names: Vec<String> = self
            .store
            .sorted_set_rev_range(set, start, stop)
            .await?
            .into_iter()
            .filter(|name| !is_privilege_group(name))
            .collect();
        debug!(
            "[get_non_privilege_groups]: {} non-privilege groups in {set}",
            names.len()
        );
        self.get_groups_data(&names).await
    }
}
