//! Expansion of membership records into full group data.

use futures::future::try_join_all;
use tracing::debug;

use super::collaborators::GroupRepository;
use super::error::GroupsError;
use super::types::{Group, MembershipRecord};

/// Turns per-user membership records into per-user group records.
pub struct GroupDataAggregator<'a, G: ?Sized> {
    groups: &'a G,
}

impl<'a, G> GroupDataAggregator<'a, G>
where
    G: GroupRepository + ?Sized,
{
    pub fn new(groups: &'a G) -> Self {
        Self { groups }
    }

    /// Fetch group data for every record, one bulk fetch per user.
    ///
    /// Order is preserved at both levels: the outer list follows `records`,
    /// each inner list follows its record.
    pub async fn expand_membership(
        &self,
        records: &[MembershipRecord],
    ) -> Result<Vec<Vec<Group>>, GroupsError> {
        debug!("[expand_membership]: Expanding {} records", records.len());
        try_join_all(records.iter().map(|record| self.expand_record(record))).await
    }

    async fn expand_record(&self, record: &MembershipRecord) -> Result<Vec<Group>, GroupsError> {
        if record.is_empty() {
            return Ok(Vec::new());
        }
        let names: Vec<String> = record.iter().map(|entry| entry.name.clone()).collect();
        let groups = self.groups.get_groups_data(&names).await?;
        GroupsError::check_len(names.len(), groups.len())?;
        Ok(groups)
    }
}
