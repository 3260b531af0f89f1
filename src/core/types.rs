//! Core types for membership and invite operations.

use serde::{Deserialize, Serialize};

/// User identifier. Values `<= 0` are unauthenticated principals.
pub type Uid = i64;

/// Anonymous visitor.
pub const GUEST_UID: Uid = 0;
/// Crawler / bot traffic.
pub const SPIDER_UID: Uid = -1;

/// One group's position in an ordered catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    /// Position in the fetched catalog, starting at 0.
    pub index: usize,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }
}

/// The catalog entries one user belongs to, in catalog order.
pub type MembershipRecord = Vec<CatalogEntry>;

/// Full group record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub name: String,
    pub display_name: String,
    pub slug: String,
    pub description: String,
    pub user_title: String,
    pub member_count: u64,
    pub create_time: i64,
    pub hidden: bool,
    pub system: bool,
    pub private: bool,
}

impl Group {
    /// Listed, user-created and open to anyone.
    pub fn is_public(&self) -> bool {
        !self.hidden && !self.system && !self.private
    }

    /// Listed, user-created, but join-by-approval.
    pub fn is_private_visible(&self) -> bool {
        !self.hidden && !self.system && self.private
    }
}

/// An entry of an invite listing: either a real group or one of the fixed
/// role pseudo-groups.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InviteGroup {
    Group(Group),
    #[serde(rename_all = "camelCase")]
    Role { name: String, display_name: String },
}

impl InviteGroup {
    pub fn role(name: &str) -> Self {
        InviteGroup::Role {
            name: name.to_string(),
            display_name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            InviteGroup::Group(group) => &group.name,
            InviteGroup::Role { name, .. } => name,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            InviteGroup::Group(group) => &group.display_name,
            InviteGroup::Role { display_name, .. } => display_name,
        }
    }
}

impl From<Group> for InviteGroup {
    fn from(group: Group) -> Self {
        InviteGroup::Group(group)
    }
}

/// Site-wide role flags for one user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoleFacts {
    pub is_administrator: bool,
    pub is_global_moderator: bool,
}

/// A user profile, or a projection of one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub uid: Uid,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl UserRecord {
    pub fn new(uid: Uid) -> Self {
        Self {
            uid,
            fields: serde_json::Map::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.fields.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(hidden: bool, system: bool, private: bool) -> Group {
        Group {
            name: "g".to_string(),
            hidden,
            system,
            private,
            ..Default::default()
        }
    }

    #[test]
    fn flag_classes_are_disjoint() {
        for hidden in [false, true] {
            for system in [false, true] {
                for private in [false, true] {
                    let g = group(hidden, system, private);
                    assert!(!(g.is_public() && g.is_private_visible()));
                    if hidden || system {
                        assert!(!g.is_public() && !g.is_private_visible());
                    }
                }
            }
        }
        assert!(group(false, false, false).is_public());
        assert!(group(false, false, true).is_private_visible());
    }

    #[test]
    fn invite_group_serializes_flat() {
        let role = serde_json::to_value(InviteGroup::role("administrators")).unwrap();
        assert_eq!(
            role,
            serde_json::json!({"name": "administrators", "displayName": "administrators"})
        );

        let g = InviteGroup::from(Group {
            name: "pub1".to_string(),
            display_name: "Public".to_string(),
            ..Default::default()
        });
        let value = serde_json::to_value(&g).unwrap();
        assert_eq!(value["name"], "pub1");
        assert_eq!(value["private"], false);
        assert_eq!(g.display_name(), "Public");
    }
}
