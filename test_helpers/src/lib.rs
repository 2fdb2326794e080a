//! Test helpers shared across crates.
//!
//! This crate provides on-disk composition fixtures and text normalisation
//! for comparing command output.

pub mod text;
pub mod tree;

pub use tree::ComposeTree;
