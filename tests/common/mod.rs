//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use forum_groups::backend::keys::{
    group_key, group_members_key, group_owners_key, group_to_object, user_key,
};
use forum_groups::core::{
    Group, GroupRepository, GroupsError, OwnershipService, Uid, UserDirectory, UserRecord,
};
use store::{KeyValueStore, MemoryStore};

pub const INVITE_CATALOG: &str = "groups:createtime";
pub const VISIBLE_CATALOG: &str = "groups:visible:createtime";

pub fn group(name: &str, hidden: bool, system: bool, private: bool) -> Group {
    Group {
        name: name.to_string(),
        display_name: name.to_string(),
        slug: name.to_string(),
        user_title: name.to_string(),
        hidden,
        system,
        private,
        ..Default::default()
    }
}

/// Store a group and list it in the catalogs. Higher `score` sorts first.
pub async fn seed_group(store: &MemoryStore, group: &Group, score: f64) {
    store
        .set_object(&group_key(&group.name), group_to_object(group))
        .await
        .unwrap();
    store
        .sorted_set_add(INVITE_CATALOG, score, &group.name)
        .await
        .unwrap();
    if !group.hidden {
        store
            .sorted_set_add(VISIBLE_CATALOG, score, &group.name)
            .await
            .unwrap();
    }
}

pub async fn add_member(store: &MemoryStore, group_name: &str, uid: Uid) {
    store
        .set_add(&group_members_key(group_name), &uid.to_string())
        .await
        .unwrap();
}

pub async fn add_owner(store: &MemoryStore, group_name: &str, uid: Uid) {
    store
        .set_add(&group_owners_key(group_name), &uid.to_string())
        .await
        .unwrap();
}

pub async fn seed_user(store: &MemoryStore, uid: Uid, username: &str) {
    store
        .set_object(
            &user_key(uid),
            HashMap::from([
                ("username".to_string(), username.to_string()),
                ("userslug".to_string(), username.to_lowercase()),
                ("reputation".to_string(), "0".to_string()),
            ]),
        )
        .await
        .unwrap();
}

/// The three-group catalog `[pub1, priv1, hid1]` in that order.
pub async fn basic_catalog() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    seed_group(&store, &group("pub1", false, false, false), 3.0).await;
    seed_group(&store, &group("priv1", false, false, true), 2.0).await;
    seed_group(&store, &group("hid1", true, false, false), 1.0).await;
    store
}

pub fn names<T, F>(items: &[T], name: F) -> Vec<String>
where
    F: Fn(&T) -> &str,
{
    items.iter().map(|item| name(item).to_string()).collect()
}

// ─────────────────────────── Mock Collaborators ───────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    IsMemberOfGroups { uid: Uid, groups: Vec<String> },
    GetGroupsData { groups: Vec<String> },
    GetNonPrivilegeGroups { set: String },
    IsAdministrator { uid: Uid },
    IsGlobalModerator { uid: Uid },
    IsOwner { uid: Uid, group: String },
}

/// In-process collaborators answering from fixed tables and recording every
/// call.
#[derive(Clone, Default)]
pub struct MockCollaborators {
    pub calls: Arc<Mutex<Vec<Call>>>,
    pub groups: Vec<Group>,
    pub memberships: HashMap<Uid, Vec<String>>,
    pub owners: HashMap<Uid, Vec<String>>,
    pub administrators: Vec<Uid>,
    pub global_moderators: Vec<Uid>,
    /// Users whose membership test fails.
    pub failing_members: Vec<Uid>,
    /// Drop the last element of every bulk membership answer.
    pub truncate_membership: bool,
    pub fail_role_lookup: bool,
    pub fail_ownership: bool,
}

impl MockCollaborators {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl GroupRepository for MockCollaborators {
    async fn is_member_of_groups(
        &self,
        uid: Uid,
        group_names: &[String],
    ) -> Result<Vec<bool>, GroupsError> {
        self.record(Call::IsMemberOfGroups {
            uid,
            groups: group_names.to_vec(),
        });
        if self.failing_members.contains(&uid) {
            return Err(GroupsError::Dependency(format!("membership of {uid}")));
        }
        let member_of = self.memberships.get(&uid).cloned().unwrap_or_default();
        let mut result: Vec<bool> = group_names
            .iter()
            .map(|name| member_of.contains(name))
            .collect();
        if self.truncate_membership {
            result.pop();
        }
        Ok(result)
    }

    async fn get_groups_data(&self, group_names: &[String]) -> Result<Vec<Group>, GroupsError> {
        self.record(Call::GetGroupsData {
            groups: group_names.to_vec(),
        });
        group_names
            .iter()
            .map(|name| {
                self.groups
                    .iter()
                    .find(|group| &group.name == name)
                    .cloned()
                    .ok_or_else(|| GroupsError::GroupNotFound(name.clone()))
            })
            .collect()
    }

    async fn get_non_privilege_groups(
        &self,
        set: &str,
        _start: isize,
        _stop: isize,
    ) -> Result<Vec<Group>, GroupsError> {
        self.record(Call::GetNonPrivilegeGroups {
            set: set.to_string(),
        });
        Ok(self.groups.clone())
    }
}

#[async_trait]
impl UserDirectory for MockCollaborators {
    async fn get_users_data(&self, uids: &[Uid]) -> Result<Vec<UserRecord>, GroupsError> {
        Ok(uids.iter().map(|&uid| UserRecord::new(uid)).collect())
    }

    async fn get_users_fields(
        &self,
        uids: &[Uid],
        _fields: &[String],
    ) -> Result<Vec<UserRecord>, GroupsError> {
        Ok(uids.iter().map(|&uid| UserRecord::new(uid)).collect())
    }

    async fn is_administrator(&self, uid: Uid) -> Result<bool, GroupsError> {
        self.record(Call::IsAdministrator { uid });
        if self.fail_role_lookup {
            return Err(GroupsError::Dependency("role lookup".to_string()));
        }
        Ok(self.administrators.contains(&uid))
    }

    async fn is_global_moderator(&self, uid: Uid) -> Result<bool, GroupsError> {
        self.record(Call::IsGlobalModerator { uid });
        Ok(self.global_moderators.contains(&uid))
    }
}

#[async_trait]
impl OwnershipService for MockCollaborators {
    async fn is_owner(&self, uid: Uid, group_name: &str) -> Result<bool, GroupsError> {
        self.record(Call::IsOwner {
            uid,
            group: group_name.to_string(),
        });
        if self.fail_ownership {
            return Err(GroupsError::Dependency("ownership".to_string()));
        }
        Ok(self
            .owners
            .get(&uid)
            .is_some_and(|owned| owned.iter().any(|name| name == group_name)))
    }
}
