//! [`UserDirectory`] over a [`KeyValueStore`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use store::{KeyValueStore, Object};

use super::keys::{group_members_key, user_key};
use crate::core::{GroupsError, Uid, UserDirectory, UserRecord};

/// Reads `user:<uid>` hashes; site roles are membership of the role groups.
pub struct StoreUserDirectory<S: KeyValueStore> {
    store: Arc<S>,
    administrators_key: String,
    global_moderators_key: String,
}

impl<S: KeyValueStore> StoreUserDirectory<S> {
    pub fn new(store: Arc<S>, administrators_group: &str, global_moderators_group: &str) -> Self {
        Self {
            store,
            administrators_key: group_members_key(administrators_group),
            global_moderators_key: group_members_key(global_moderators_group),
        }
    }

    async fn load(
        &self,
        uids: &[Uid],
        fields: Option<&[String]>,
    ) -> Result<Vec<UserRecord>, GroupsError> {
        if uids.is_empty() {
            return Ok(Vec::new());
        }
        let keys: Vec<String> = uids.iter().map(|&uid| user_key(uid)).collect();
        let objects = self.store.get_objects(&keys).await?;
        GroupsError::check_len(uids.len(), objects.len())?;

        Ok(uids
            .iter()
            .zip(objects)
            .map(|(&uid, object)| to_record(uid, object.unwrap_or_default(), fields))
            .collect())
    }

    async fn is_role_member(&self, key: &str, uid: Uid) -> Result<bool, GroupsError> {
        if uid <= 0 {
            return Ok(false);
        }
        Ok(self.store.is_set_member(key, &uid.to_string()).await?)
    }
}

fn to_record(uid: Uid, object: Object, fields: Option<&[String]>) -> UserRecord {
    let mut record = UserRecord::new(uid);
    for (name, value) in object {
        if name == "uid" {
            continue;
        }
        if fields.map_or(true, |wanted| wanted.contains(&name)) {
            record.fields.insert(name, Value::String(value));
        }
    }
    record
}

#[async_trait]
impl<S: KeyValueStore + 'static> UserDirectory for StoreUserDirectory<S> {
    async fn get_users_data(&self, uids: &[Uid]) -> Result<Vec<UserRecord>, GroupsError> {
        self.load(uids, None).await
    }

    async fn get_users_fields(
        &self,
        uids: &[Uid],
        fields: &[String],
    ) -> Result<Vec<UserRecord>, GroupsError> {
        self.load(uids, Some(fields)).await
    }

    async fn is_administrator(&self, uid: Uid) -> Result<bool, GroupsError> {
        self.is_role_member(&self.administrators_key, uid).await
    }

    async fn is_global_moderator(&self, uid: Uid) -> Result<bool, GroupsError> {
        self.is_role_member(&self.global_moderators_key, uid).await
    }
}
