//! # Converge
//!
//! Reconcile the desired definition of a named group against its current
//! state on a remote store.
//!
//! The crate turns a declarative request ("this group should exist, with
//! these attributes") into the minimal idempotent action (create, modify,
//! delete, or nothing) and applies it through a pluggable store, with
//! dry-run support and a structured report of what changed.
//!
//! ## Core Concepts
//!
//! - **GroupRequest**: intent (present/absent) plus the desired attributes,
//!   where unset attributes are left unmanaged
//! - **Definition**: the open attribute mapping a server holds for a group
//! - **reconcile**: pure planning; fetches nothing, writes nothing
//! - **apply**: execute the planned action through a [`GroupStore`]
//! - **Report**: `changed` flag, status label, before/after snapshots
//!
//! ## Example
//!
//! ```
//! use converge::{apply, reconcile, GroupRequest, GroupStore, MemoryStore, Report};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut request = GroupRequest::new("analysts");
//! request.group.admin = Some(true);
//!
//! let mut store = MemoryStore::new();
//! let current = store.fetch(&request.group.name)?;
//! let outcome = reconcile(&request, current);
//! let applied = apply(&mut store, &outcome, false)?;
//!
//! let report = Report::new(&outcome, applied);
//! assert!(report.changed);
//! # Ok(())
//! # }
//! ```
//!
//! List-typed attributes (group memberships) compare as sets: order and
//! duplicates never register as drift, on either side of the comparison.

pub mod error;
pub mod executor;
pub mod fields;
pub mod reconcile;
pub mod report;
pub mod store;
pub mod types;

// Re-export main types at crate root
pub use error::InvalidValue;
pub use executor::apply;
pub use fields::{canonicalize_list, map_fields, to_camel_case};
pub use reconcile::reconcile;
pub use report::{Report, Status};
pub use store::{CreateSeed, GroupStore, MemoryStore, WriteCall};
pub use types::{
    Action, Definition, DesiredGroup, GroupRequest, Intent, ReconcileOutcome, SourceType,
};
