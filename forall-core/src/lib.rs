//! Core functionality for forall property-based testing.
//!
//! This crate provides the building blocks: an explicitly threaded random
//! [`Seed`], composable generators ([`Gen`]) with integrated shrinking
//! ([`Tree`]), a [`sample`] function for inspecting generators, and the
//! property runner ([`check`], [`check_parallel`]).

pub mod data;
pub mod error;
pub mod gen;
pub mod parallel;
pub mod property;
pub mod sample;
pub mod tree;
pub mod value;

// Re-export the main types
pub use data::*;
pub use error::*;
pub use gen::*;
pub use parallel::*;
pub use property::*;
pub use sample::*;
pub use tree::*;
pub use value::*;
