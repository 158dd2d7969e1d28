#![doc = "lo-tree-core: traversal and transformation of Tutors learning-object trees."]

//! This crate contains the learning-object model and every operation over it:
//! URL helpers, read-only walks, in-place rewrites and derived records.
//! Network fetch and persistence are reached only through the traits in
//! [`contract`].
//!
//! # Usage
//! Add this as a dependency wherever a course tree is loaded, queried or
//! summarised; the CLI crate is one such consumer.

pub mod contract;
pub mod derive;
pub mod error;
pub mod fetch;
pub mod lo;
pub mod mutate;
pub mod path_ops;
pub mod walk;

pub use error::LoError;
pub use lo::{Course, Icon, Lo, LoHandle, LoKind};
