//! Filesystem primitives for confgit
//!
//! Provides the attribute-preserving copier used to move files between the
//! live filesystem and a mirror, atomic writes for small state records, and a
//! format-agnostic configuration store.

pub mod access;
pub mod config;
pub mod copy;
pub mod error;
pub mod io;
pub mod layout;
pub mod path;

pub use config::ConfigStore;
pub use copy::copy_entry;
pub use error::{Error, Result};
pub use layout::BaseLayout;
pub use path::{exists_or_symlink, is_real_dir, validate_path_identifier};
