//! Changelog diff engine
//!
//! Pipeline, in order:
//!
//! 1. [`engine::detect_changes`]: primitive diff keyed by record id
//! 2. [`reconcile::reconcile`]: merge related additions and removals, drop
//!    moves that are side effects of other edits, fold swaps
//! 3. [`format::ChangelogFormatter`]: Markdown notation with neighbour
//!    context from [`context`]
//!
//! [`generate_changelog`] runs all three.

pub mod changelog;
pub mod context;
pub mod engine;
pub mod format;
pub mod model;
pub mod reconcile;
pub mod relation;

pub use changelog::{ensure_diffable, generate_changelog, ChangelogOutput};
pub use context::{context_at, resolve_index, Context, ContextResolver, IdIndex};
pub use engine::detect_changes;
pub use format::{marker, ChangelogFormatter};
pub use model::{Change, ChangeKind, MoveRanks};
pub use reconcile::reconcile;
pub use relation::{are_related, level_base};
