//! Store-backed collaborator implementations.
//!
//! Key layout:
//!
//! ```text
//! group:<name>            hash   group record (flags stored as "0"/"1")
//! group:<name>:members    set    member uids
//! group:<name>:owners     set    owner uids
//! user:<uid>              hash   user profile
//! ```

mod groups;
pub mod keys;
mod ownership;
mod users;

pub use groups::StoreGroupRepository;
pub use ownership::StoreOwnership;
pub use users::StoreUserDirectory;
