//! EPICENTER Cache - Session Overlays over a Global Store
//!
//! In-memory caching core for multi-analyst event review. A process-wide
//! [`GlobalStore`] holds committed state; each analyst session works against
//! copy-on-write [`SessionOverlay`]s seeded from that store. Committing
//! publishes drafts back to the store and fans the committed ids out to
//! every live session, so sessions converge on committed data while
//! uncommitted drafts stay private.
//!
//! This crate performs no I/O. Durable persistence and client notification
//! happen in the surrounding service layer after a commit returns, so a
//! failed durable write leaves in-memory state ahead of the backing store;
//! detecting and reconciling that divergence is the caller's concern.

pub mod collaboration;
pub mod context;
pub mod merge;
pub mod overlay;
pub mod registry;
pub mod session;
pub mod store;
pub mod traits;

pub use collaboration::CollaborationState;
pub use context::CacheContext;
pub use merge::merge;
pub use overlay::SessionOverlay;
pub use registry::SessionRegistry;
pub use session::{Session, SessionEntity};
pub use store::GlobalStore;
pub use traits::{CacheEntity, Committer};
