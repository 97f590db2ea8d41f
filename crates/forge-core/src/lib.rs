//! Core types for the Forge UI transpiler.
//!
//! This crate provides the types every Forge stage agrees on:
//! - The semantic bundle, the persisted intermediate representation
//! - UI node trees and their prop values
//! - Well-known locations inside a project working directory
//! - Error types for loading bundles

pub mod bundle;
pub mod errors;
pub mod node;
pub mod paths;

pub use bundle::*;
pub use errors::*;
pub use node::*;
