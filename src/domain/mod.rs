//! Core review-expression logic.
//!
//! The invariant protected here: a user can express at most one reaction
//! (like or dislike) per review, ever. The session overlay bridges the
//! window between an optimistic counter update and the durable write.

mod aggregate;
mod guard;
mod overlay;
mod pipeline;
mod submission;

pub use aggregate::*;
pub use guard::*;
pub use overlay::*;
pub use pipeline::*;
pub use submission::*;
