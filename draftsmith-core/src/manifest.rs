//! TOML manifest describing a whole document, so a page can be built
//! headlessly instead of through the interactive flow.
//!
//! ```toml
//! template = "concepts"
//!
//! [metadata]
//! title = "Grover's Algorithm"
//! custom_path = "concepts/algorithms/grover.html"
//!
//! [[section]]
//! kind = "text"
//! text_content = "Grover's algorithm searches an unstructured list..."
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::SectionKind;
use crate::content::{SectionBody, SectionContent};
use crate::document::{Document, DocumentMetadata, TemplateFamily};

#[derive(Debug)]
pub enum ManifestError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// A section table failed the document's placement rules or could not
    /// be decoded into its kind's payload.
    Section { kind: String, message: String },
}

impl From<std::io::Error> for ManifestError {
    fn from(err: std::io::Error) -> Self {
        ManifestError::Io(err)
    }
}

impl From<toml::de::Error> for ManifestError {
    fn from(err: toml::de::Error) -> Self {
        ManifestError::Parse(err)
    }
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestError::Io(e) => write!(f, "Failed to read manifest: {}", e),
            ManifestError::Parse(e) => write!(f, "Failed to parse manifest: {}", e),
            ManifestError::Section { kind, message } => {
                write!(f, "Invalid \"{}\" section: {}", kind, message)
            }
        }
    }
}

impl std::error::Error for ManifestError {}

/// One `[[section]]` table. Everything beyond the routing fields stays in
/// `extra` and is decoded against the kind's payload shape.
#[derive(Debug, Deserialize)]
pub struct ManifestSection {
    pub kind: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(flatten)]
    pub extra: toml::Table,
}

#[derive(Debug, Deserialize)]
pub struct Manifest {
    pub template: TemplateFamily,
    #[serde(default)]
    pub metadata: DocumentMetadata,
    #[serde(default)]
    pub featured: Vec<String>,
    #[serde(default, rename = "section")]
    pub sections: Vec<ManifestSection>,
}

impl Manifest {
    pub fn read(path: &Path) -> Result<Self, ManifestError> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Build the document the manifest describes. Sections are added in
    /// file order and go through the same placement rules as interactive
    /// editing, so a duplicated singleton is rejected here too.
    pub fn into_document(self) -> Result<Document, ManifestError> {
        let mut doc = Document::new(self.template, self.metadata);

        for section in self.sections {
            let kind = SectionKind::from_id(&section.kind);
            let unique_id = doc.add_section(kind.clone()).map_err(|e| {
                ManifestError::Section {
                    kind: section.kind.clone(),
                    message: e.to_string(),
                }
            })?;

            // A bare `kind = "..."` line places the section but keeps the
            // rendered placeholder; any content field makes it edited.
            let has_content = section.title.is_some()
                || section.icon.is_some()
                || !section.extra.is_empty();
            if has_content {
                let body = SectionBody::from_table(&kind, section.extra).map_err(|e| {
                    ManifestError::Section {
                        kind: section.kind.clone(),
                        message: e.to_string(),
                    }
                })?;
                doc.save_content(
                    &unique_id,
                    SectionContent {
                        title: section.title.unwrap_or_default(),
                        icon: section.icon.unwrap_or_default(),
                        body,
                    },
                );
            }
        }

        for element in &self.featured {
            doc.add_featured(element);
        }

        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_builds_a_full_document() {
        let manifest: Manifest = toml::from_str(
            r#"
            template = "concepts"
            featured = ["interactive demo"]

            [metadata]
            title = "Grover's Algorithm"
            level = "Intermediate"
            custom_path = "concepts/algorithms/grover.html"

            [[section]]
            kind = "introduction"

            [[section]]
            kind = "text"
            title = "Why it matters"
            text_content = "Search in sqrt(N) oracle calls."
            info_box_type = "insight"
            info_box_content = "Quadratic, not exponential."
            "#,
        )
        .unwrap();

        let doc = manifest.into_document().unwrap();
        assert_eq!(doc.family, TemplateFamily::Concepts);
        assert_eq!(doc.metadata.title, "Grover's Algorithm");
        assert_eq!(doc.sections().len(), 2);
        assert_eq!(doc.sections()[1].display_name, "Why it matters");
        assert_eq!(doc.featured(), ["interactive demo"]);

        // The bare introduction stays placeholder, the text section doesn't.
        assert!(doc.content("introduction").is_none());
        match &doc.content("text").unwrap().body {
            SectionBody::Text(t) => {
                assert_eq!(t.info_box_type, "insight");
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn duplicated_singleton_is_reported_with_its_kind() {
        let manifest: Manifest = toml::from_str(
            r#"
            template = "research"

            [[section]]
            kind = "references"

            [[section]]
            kind = "references"
            "#,
        )
        .unwrap();

        match manifest.into_document() {
            Err(ManifestError::Section { kind, .. }) => assert_eq!(kind, "references"),
            other => panic!("expected section error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_kind_falls_back_to_the_generic_payload() {
        let manifest: Manifest = toml::from_str(
            r#"
            template = "concepts"

            [[section]]
            kind = "outlook"
            title = "Outlook"
            main_content = "Where this line of work goes next."
            "#,
        )
        .unwrap();

        let doc = manifest.into_document().unwrap();
        match &doc.content("outlook").unwrap().body {
            SectionBody::Generic(g) => {
                assert!(g.main_content.starts_with("Where"));
            }
            other => panic!("unexpected body {other:?}"),
        }
    }
}
