pub mod catalog;
pub mod content;
pub mod document;
pub mod instructions;
pub mod manifest;
pub mod meta;
pub mod paths;
pub mod pretty;
pub mod render;
pub mod slug;

// Re-export main types
pub use document::{Document, DocumentError, DocumentMetadata, TemplateFamily};
pub use manifest::{Manifest, ManifestError};
pub use meta::{Plan, PlanError, ProbeError, RepoProbe};
pub use render::{render_document, RenderError};
