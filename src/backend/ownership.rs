use std::sync::Arc;

use async_trait::async_trait;
use store::KeyValueStore;

use super::keys::group_owners_key;
use crate::core::{GroupsError, OwnershipService, Uid};

/// Owners of a group are the members of its `group:<name>:owners` set.
pub struct StoreOwnership<S: KeyValueStore> {
    store: Arc<S>,
}

impl<S: KeyValueStore> StoreOwnership<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: KeyValueStore + 'static> OwnershipService for StoreOwnership<S> {
    async fn is_owner(&self, uid: Uid, group_name: &str) -> Result<bool, GroupsError> {
        if uid <= 0 {
            return Ok(false);
        }
        Ok(self
            .store
            .is_set_member(&group_owners_key(group_name), &uid.to_string())
            .await?)
    }
}
