//! Lowering of Forge semantic bundles to native UI frameworks.
//!
//! A single tree walk ([`lower`]) turns a [`UiNode`](forge_core::UiNode) into
//! target source text. Backends differ only in their [`Dialect`], a table of
//! tokens and templates, so every backend composes children the same way.
//!
//! # Backends
//!
//! - `android` - Jetpack Compose (`MainActivity.kt`)
//! - `ios` - SwiftUI for iOS (`ContentView.swift`)
//! - `macos` - SwiftUI for macOS (`ForgeApp/ContentView.swift`)
//!
//! # Example
//!
//! ```ignore
//! use forge_codegen::{Backend, NativeGenerator};
//!
//! let generator = NativeGenerator::new(Backend::Android);
//! let out_dir = generator.generate(&workdir)?;
//! println!("wrote {}", out_dir.display());
//! ```

pub mod error;
pub mod generators;
pub mod lower;

pub use error::{CodegenError, Result};
pub use generators::{
    write_project, Backend, GeneratedFile, GeneratedProject, NativeGenerator, ProjectOptions,
    RootSelection, TemplateEngine, TemplateFile, TemplateSource,
};
pub use lower::{lower, lower_stack, Dialect, SourceFragment};
