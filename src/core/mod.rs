//! Simulation cores – growth curves, the toy block filesystem, and the
//! toy CPU scheduler.
//!
//! Nothing in this module depends on any TUI or rendering crate.
//! Every type is `Send + Sync` so it can be shared across async tasks.

pub mod alloc;
pub mod fsim;
pub mod fstree;
pub mod growth;
pub mod sched;
