//! User and employee directory.
//!
//! Users (customers and staff accounts) and employees are open records in
//! their own collections, identified by their `usuario` login. Credential
//! checks are not done here; [`Directory::find_account`] only resolves a
//! login to the record that owns it.

pub mod admin;
pub mod directory;
pub mod error;

pub use admin::AdminProfile;
pub use directory::{Account, AccountKind, Directory, DEFAULT_ROLE};
pub use error::{DirectoryError, DirectoryResult};
