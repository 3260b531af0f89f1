//! Batch membership resolution against an ordered group catalog.

use std::collections::HashSet;

use futures::future::try_join_all;
use store::KeyValueStore;
use tracing::{debug, warn};

use super::collaborators::GroupRepository;
use super::error::GroupsError;
use super::types::{CatalogEntry, MembershipRecord, Uid};

/// Resolves, per user, which entries of a catalog the user belongs to.
pub struct MembershipResolver<'a, S: ?Sized, G: ?Sized> {
    store: &'a S,
    groups: &'a G,
}

impl<'a, S, G> MembershipResolver<'a, S, G>
where
    S: KeyValueStore + ?Sized,
    G: GroupRepository + ?Sized,
{
    pub fn new(store: &'a S, groups: &'a G) -> Self {
        Self { store, groups }
    }

    /// Fetch the full catalog at `set_key`, most recent first.
    ///
    /// # Errors
    /// - [`GroupsError::Store`] if the read fails
    /// - [`GroupsError::DuplicateCatalogEntry`] if a name appears twice
    pub async fn fetch_catalog(&self, set_key: &str) -> Result<Vec<CatalogEntry>, GroupsError> {
        let names = self.store.sorted_set_rev_range(set_key, 0, -1).await?;
        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if !seen.insert(name.as_str()) {
                warn!("[fetch_catalog]: Catalog {set_key} lists {name} twice");
                return Err(GroupsError::DuplicateCatalogEntry(name.clone()));
            }
        }
        Ok(names
            .into_iter()
            .enumerate()
            .map(|(index, name)| CatalogEntry { name, index })
            .collect())
    }

    /// Resolve membership of every user in `uids` against the catalog at
    /// `set_key`.
    ///
    /// The result holds one record per input user, in input order. Each record
    /// is a subsequence of the catalog in catalog order. Users are resolved
    /// concurrently with one bulk membership test each; the first failure
    /// aborts the whole call.
    pub async fn resolve_membership(
        &self,
        set_key: &str,
        uids: &[Uid],
    ) -> Result<Vec<MembershipRecord>, GroupsError> {
        if uids.is_empty() {
            return Ok(Vec::new());
        }

        let catalog = self.fetch_catalog(set_key).await?;
        if catalog.is_empty() {
            return Ok(vec![Vec::new(); uids.len()]);
        }
        let names: Vec<String> = catalog.iter().map(|entry| entry.name.clone()).collect();

        debug!(
            "[resolve_membership]: Testing {} users against {} groups of {set_key}",
            uids.len(),
            names.len()
        );
        try_join_all(
            uids.iter()
                .map(|&uid| self.find_user_groups(uid, &catalog, &names)),
        )
        .await
    }

    async fn find_user_groups(
        &self,
        uid: Uid,
        catalog: &[CatalogEntry],
        names: &[String],
    ) -> Result<MembershipRecord, GroupsError> {
        let is_member = self.groups.is_member_of_groups(uid, names).await?;
        GroupsError::check_len(names.len(), is_member.len())?;
        Ok(catalog
            .iter()
            .zip(is_member)
            .filter(|(_, member)| *member)
            .map(|(entry, _)| entry.clone())
            .collect())
    }
}
