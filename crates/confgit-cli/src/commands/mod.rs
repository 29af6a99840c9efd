//! Command implementations for confgit-cli

pub mod files;
pub mod list;
pub mod mirror;
pub mod repo;
pub mod root;
pub mod sync;

pub use files::{run_add, run_rm};
pub use list::run_list;
pub use mirror::{run_external, run_path, run_tig, run_tree};
pub use repo::run_repo;
pub use root::run_root;
pub use sync::run_sync;
