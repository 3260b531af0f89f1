//! Service provider trait for the groups core.
//!
//! The [`GroupsProvider`] trait bundles the collaborator implementations into
//! a single type parameter instead of threading four generics through every
//! component.
//!
//! # Example
//!
//! ```ignore
//! use forum_groups::core::{GroupsProvider, MemoryProvider, MembershipService};
//!
//! // Everything backed by one in-memory store
//! let service: MembershipService<MemoryProvider> =
//!     MembershipService::in_memory(store, GroupsConfig::default());
//!
//! // Or plug in your own collaborators
//! struct MyProvider;
//! impl GroupsProvider for MyProvider {
//!     type Store = RedisStore;
//!     // ...
//! }
//! ```

use store::{KeyValueStore, MemoryStore};

use super::collaborators::{GroupRepository, OwnershipService, UserDirectory};
use crate::backend::{StoreGroupRepository, StoreOwnership, StoreUserDirectory};

/// Bundles all collaborators of a membership deployment.
pub trait GroupsProvider: 'static {
    /// Persistence used for catalog and set reads.
    type Store: KeyValueStore + 'static;

    /// Group data and bulk membership.
    type Groups: GroupRepository + 'static;

    /// User profiles and site roles.
    type Users: UserDirectory + 'static;

    /// Group ownership.
    type Ownership: OwnershipService + 'static;
}

/// Provider wiring every collaborator over a shared [`MemoryStore`].
pub struct MemoryProvider;

impl GroupsProvider for MemoryProvider {
    type Store = MemoryStore;
    type Groups = StoreGroupRepository<MemoryStore>;
    type Users = StoreUserDirectory<MemoryStore>;
    type Ownership = StoreOwnership<MemoryStore>;
}
