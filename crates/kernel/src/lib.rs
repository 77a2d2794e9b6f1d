//! Core traits, settings, and module lifecycle shared by the Catálogo crates.

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Module};
pub use registry::ModuleRegistry;
