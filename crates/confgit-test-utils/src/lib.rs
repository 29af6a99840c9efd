//! Shared test utilities for the confgit workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`] commit helpers for mirrors
//! - [`home`] [`TestHome`] with a temporary base directory and live root

pub mod git;
pub mod home;

pub use home::TestHome;
