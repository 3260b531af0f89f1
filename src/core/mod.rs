//! Membership resolution and invite eligibility.
//!
//! # Key Components
//!
//! - [`MembershipResolver`] - which catalog groups each user belongs to
//! - [`GroupDataAggregator`] - membership records to full group records
//! - [`InviteGroupSelector`] - tiered invite visibility for one user
//! - [`MembershipService`] - the [`GroupMembership`] capability over
//!   injected collaborators
//!
//! # Data Flow
//!
//! ```text
//! catalog + uids ─► MembershipResolver ─► Vec<MembershipRecord>
//!                                          │
//!                                          ▼
//!                                 GroupDataAggregator ─► Vec<Vec<Group>>
//!
//! non-privilege catalog + roles + ownership ─► InviteGroupSelector ─► Vec<InviteGroup>
//! ```

mod aggregate;
mod collaborators;
mod ephemeral;
mod error;
mod invite;
mod provider;
mod resolver;
mod service;
mod types;

pub use aggregate::GroupDataAggregator;
pub use collaborators::{GroupRepository, OwnershipService, UserDirectory};
pub use ephemeral::EphemeralGroups;
pub use error::GroupsError;
pub use invite::{compose_invite_groups, InviteGroupSelector, RoleGroupNames};
pub use provider::{GroupsProvider, MemoryProvider};
pub use resolver::MembershipResolver;
pub use service::{GroupMembership, MembershipService};
pub use types::{
    CatalogEntry, Group, InviteGroup, MembershipRecord, RoleFacts, Uid, UserRecord, GUEST_UID,
    SPIDER_UID,
};
