//! Key layout and field encoding of group and user records.

use std::sync::LazyLock;

use regex::Regex;
use store::Object;

use crate::core::{Group, Uid};

pub fn group_key(name: &str) -> String {
    format!("group:{name}")
}

pub fn group_members_key(name: &str) -> String {
    format!("group:{name}:members")
}

pub fn group_owners_key(name: &str) -> String {
    format!("group:{name}:owners")
}

pub fn user_key(uid: Uid) -> String {
    format!("user:{uid}")
}

static PRIVILEGE_GROUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^cid:(?:-?[0-9]+|admin):privileges:[A-Za-z0-9_\-:]+$")
        .expect("privilege group pattern is valid")
});

/// Whether `name` is a per-category or admin privilege group, e.g.
/// `cid:5:privileges:groups:find` or `cid:admin:privileges:admin:users`.
pub fn is_privilege_group(name: &str) -> bool {
    PRIVILEGE_GROUP.is_match(name)
}

/// Lowercase, with runs of anything non-alphanumeric collapsed to `-`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

fn flag(object: &Object, field: &str) -> bool {
    matches!(
        object.get(field).map(String::as_str),
        Some("1") | Some("true")
    )
}

fn text(object: &Object, field: &str) -> Option<String> {
    object.get(field).filter(|v| !v.is_empty()).cloned()
}

/// Decode the stored hash of group `name`.
pub fn group_from_object(name: &str, object: &Object) -> Group {
    let name = text(object, "name").unwrap_or_else(|| name.to_string());
    Group {
        display_name: text(object, "displayName").unwrap_or_else(|| name.clone()),
        slug: text(object, "slug").unwrap_or_else(|| slugify(&name)),
        description: text(object, "description").unwrap_or_default(),
        user_title: text(object, "userTitle").unwrap_or_else(|| name.clone()),
        member_count: object
            .get("memberCount")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0),
        create_time: object
            .get("createtime")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0),
        hidden: flag(object, "hidden"),
        system: flag(object, "system"),
        private: flag(object, "private"),
        name,
    }
}

/// Encode `group` for [`store::KeyValueStore::set_object`].
pub fn group_to_object(group: &Group) -> Object {
    let bit = |b: bool| (if b { "1" } else { "0" }).to_string();
    Object::from([
        ("name".to_string(), group.name.clone()),
        ("displayName".to_string(), group.display_name.clone()),
        ("slug".to_string(), group.slug.clone()),
        ("description".to_string(), group.description.clone()),
        ("userTitle".to_string(), group.user_title.clone()),
        ("memberCount".to_string(), group.member_count.to_string()),
        ("createtime".to_string(), group.create_time.to_string()),
        ("hidden".to_string(), bit(group.hidden)),
        ("system".to_string(), bit(group.system)),
        ("private".to_string(), bit(group.private)),
    ])
}

/// Record served for ephemeral groups, which have no stored hash.
pub fn ephemeral_group(name: &str) -> Group {
    Group {
        name: name.to_string(),
        display_name: name.to_string(),
        slug: slugify(name),
        user_title: name.to_string(),
        system: true,
        ..Default::default()
    }
}
