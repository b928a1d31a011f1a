//! Foundation types for the shipdesk back office.
//!
//! Every other shipdesk crate depends on `shipdesk-types`.
//!
//! # Key Types
//!
//! - [`Record`] -- an open field-to-value mapping representing one business entity
//! - [`RecordExt`] -- lenient field accessors shared by every component
//! - [`Collection`] -- the named, independently persisted record sequences
//! - [`Clock`] -- wall-clock source for audit timestamps and emission dates

pub mod clock;
pub mod collection;
pub mod error;
pub mod record;

pub use clock::{Clock, FixedClock, SystemClock};
pub use collection::Collection;
pub use error::TypeError;
pub use record::{Record, RecordExt};
