//! Component module loader.
//!
//! Rewrites a component module so that docgen can read it, extracts the
//! blocks and slots of the template it imports and attaches the merged
//! metadata to the exported component object.

pub mod config;
pub mod docgen;
pub mod imports;
pub mod inject;
pub mod loader;
pub mod merge;
pub mod slots;
pub mod transform;

pub use config::LoaderOptions;
pub use docgen::{Docgen, ExportNameDocgen, StaticDocgen};
pub use imports::{ImportResolver, TEMPLATE_EXTENSION};
pub use inject::{inject, COMPONENT_BINDING};
pub use loader::{LoadOutput, Loader};
pub use merge::{filter_descriptors, merge_all, merge_component};
pub use slots::{RegexSlotScanner, SlotScanner};
pub use transform::{transform_source, RegistrationType};
