//! Group membership resolution and invite eligibility for a community
//! access-control system.
//!
//! The crate answers two read-side questions:
//!
//! - which groups of an ordered catalog each user belongs to
//!   ([`core::MembershipResolver`], expanded to full records by
//!   [`core::GroupDataAggregator`]);
//! - which groups a user may invite others into
//!   ([`core::InviteGroupSelector`]).
//!
//! Persistence, user profiles and group ownership are collaborators behind
//! traits ([`core::GroupRepository`], [`core::UserDirectory`],
//! [`core::OwnershipService`]). The [`backend`] module implements them over
//! any [`store::KeyValueStore`].
//!
//! ```ignore
//! use std::sync::Arc;
//! use forum_groups::{config::GroupsConfig, core::{GroupMembership, MembershipService}};
//! use store::MemoryStore;
//!
//! let service = MembershipService::in_memory(Arc::new(MemoryStore::new()), GroupsConfig::default())?;
//! let groups = service.get_user_groups(&[1, 2]).await?;
//! let invite = service.get_user_invite_groups(1).await?;
//! ```

pub mod backend;
pub mod config;
pub mod core;
pub mod logging;

pub use store;
