//! Named mirrors behind a single "current" pointer
//!
//! - **set**: list, switch, and remove repositories under `<base>/repos/`
//! - **pointer**: the `current` record naming the active repository

mod pointer;
mod set;

pub use set::{Repository, RepositorySet};
