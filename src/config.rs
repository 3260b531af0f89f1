//! Service configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::GroupsError;

/// Catalog of listed groups ordered by creation time.
pub const DEFAULT_VISIBLE_CATALOG_KEY: &str = "groups:visible:createtime";
/// Catalog of every group ordered by creation time.
pub const DEFAULT_INVITE_CATALOG_KEY: &str = "groups:createtime";
pub const DEFAULT_ADMINISTRATORS_GROUP: &str = "administrators";
pub const DEFAULT_GLOBAL_MODERATORS_GROUP: &str = "Global Moderators";
pub const DEFAULT_EPHEMERAL_GROUPS: [&str; 2] = ["guests", "spiders"];

/// Configuration for [`MembershipService`](crate::core::MembershipService).
///
/// Every field has a default, so a config file only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GroupsConfig {
    /// Catalog used by `get_user_groups`.
    pub visible_catalog_key: String,
    /// Catalog scanned by invite selection.
    pub invite_catalog_key: String,
    /// Groups excluded from every catalog-driven listing.
    pub ephemeral_groups: Vec<String>,
    /// Name of the administrators role group.
    pub administrators_group: String,
    /// Name of the global moderators role group.
    pub global_moderators_group: String,
}

impl Default for GroupsConfig {
    fn default() -> Self {
        Self {
            visible_catalog_key: DEFAULT_VISIBLE_CATALOG_KEY.to_string(),
            invite_catalog_key: DEFAULT_INVITE_CATALOG_KEY.to_string(),
            ephemeral_groups: DEFAULT_EPHEMERAL_GROUPS
                .iter()
                .map(|name| name.to_string())
                .collect(),
            administrators_group: DEFAULT_ADMINISTRATORS_GROUP.to_string(),
            global_moderators_group: DEFAULT_GLOBAL_MODERATORS_GROUP.to_string(),
        }
    }
}

impl GroupsConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, GroupsError> {
        let config: GroupsConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GroupsError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Reject configs that would make lookups meaningless.
    pub fn validate(&self) -> Result<(), GroupsError> {
        let required = [
            ("visibleCatalogKey", &self.visible_catalog_key),
            ("inviteCatalogKey", &self.invite_catalog_key),
            ("administratorsGroup", &self.administrators_group),
            ("globalModeratorsGroup", &self.global_moderators_group),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(GroupsError::Config(format!("{field} must not be empty")));
            }
        }
        if self
            .ephemeral_groups
            .iter()
            .any(|name| name == &self.administrators_group || name == &self.global_moderators_group)
        {
            return Err(GroupsError::Config(
                "role groups cannot be ephemeral".to_string(),
            ));
        }
        Ok(())
    }
}
