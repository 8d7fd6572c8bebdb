use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{self, SectionKind};
use crate::content::SectionContent;

/// The two fixed page archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateFamily {
    Concepts,
    Research,
}

impl TemplateFamily {
    pub fn id(&self) -> &'static str {
        match self {
            TemplateFamily::Concepts => "concepts",
            TemplateFamily::Research => "research",
        }
    }

    pub fn stylesheet_name(&self) -> &'static str {
        match self {
            TemplateFamily::Concepts => "concepts-template.css",
            TemplateFamily::Research => "research-template.css",
        }
    }

    /// Index tag every page of this family carries.
    pub fn tag(&self) -> &'static str {
        match self {
            TemplateFamily::Concepts => "quantum-concepts",
            TemplateFamily::Research => "research-paper",
        }
    }

    /// Fallback `featured` entry when the author supplied none.
    pub fn default_featured(&self) -> &'static str {
        match self {
            TemplateFamily::Concepts => "basic",
            TemplateFamily::Research => "research",
        }
    }
}

impl fmt::Display for TemplateFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// One placed occurrence of a catalog kind in the ordered section list.
#[derive(Debug, Clone)]
pub struct SectionInstance {
    pub kind: SectionKind,
    /// Stable identifier, distinct from the kind id when the kind repeats
    /// (`text`, `text_2`, `text_3`, ...). Suffixes come from the live
    /// count, so an id can be reissued after a removal.
    pub unique_id: String,
    pub display_name: String,
    pub icon: String,
}

#[derive(Debug)]
pub enum DocumentError {
    /// Only one instance of this kind is allowed per document.
    SingletonExists(SectionKind),
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::SingletonExists(kind) => {
                write!(f, "only one {} section is allowed", kind)
            }
        }
    }
}

impl std::error::Error for DocumentError {}

/// Basic form fields shared by the renderer and the patch planner.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DocumentMetadata {
    pub title: String,
    pub description: String,
    /// Difficulty level, concepts pages only.
    pub level: String,
    /// Minutes, kept as entered; parsed leniently where a number is needed.
    pub reading_time: String,
    /// Comma-separated author list, research pages only.
    pub authors: String,
    pub venue: String,
    pub category: String,
    pub framework: String,
    /// Slash-delimited target path inside the site repo, ending in the
    /// output filename, e.g. `concepts/algorithms/grover.html`.
    pub custom_path: String,
}

/// One editing session: the ordered section list, the per-section content
/// store keyed by unique id, the flat metadata record, and the featured
/// tags. All mutation goes through the methods below; a failed operation
/// leaves the document untouched.
#[derive(Debug)]
pub struct Document {
    pub family: TemplateFamily,
    pub metadata: DocumentMetadata,
    sections: Vec<SectionInstance>,
    contents: HashMap<String, SectionContent>,
    featured: Vec<String>,
}

impl Document {
    pub fn new(family: TemplateFamily, metadata: DocumentMetadata) -> Self {
        Self {
            family,
            metadata,
            sections: Vec::new(),
            contents: HashMap::new(),
            featured: Vec::new(),
        }
    }

    pub fn sections(&self) -> &[SectionInstance] {
        &self.sections
    }

    pub fn content(&self, unique_id: &str) -> Option<&SectionContent> {
        self.contents.get(unique_id)
    }

    pub fn featured(&self) -> &[String] {
        &self.featured
    }

    /// Append a new instance of `kind` and return its unique id.
    ///
    /// Singleton kinds are rejected when already present. Repeated kinds get
    /// an incrementing suffix computed from the live count, so the numbering
    /// can never drift from the list's true contents.
    pub fn add_section(&mut self, kind: SectionKind) -> Result<String, DocumentError> {
        if kind.is_singleton() && self.sections.iter().any(|s| s.kind == kind) {
            return Err(DocumentError::SingletonExists(kind));
        }

        let (name, icon) = match catalog::entry_for(self.family, &kind) {
            Some(entry) => (entry.name.to_string(), entry.icon.to_string()),
            None => (kind.id().to_string(), "📄".to_string()),
        };

        let existing = self.sections.iter().filter(|s| s.kind == kind).count();
        let (unique_id, display_name) = if existing > 0 {
            (
                format!("{}_{}", kind.id(), existing + 1),
                format!("{} {}", name, existing + 1),
            )
        } else {
            (kind.id().to_string(), name)
        };

        self.sections.push(SectionInstance {
            kind,
            unique_id: unique_id.clone(),
            display_name,
            icon,
        });
        Ok(unique_id)
    }

    /// Remove the instance with a matching unique id and its content
    /// record; no-op when nothing matches. A first instance carries its
    /// kind id as unique id, so removal by kind works for the unsuffixed
    /// case. The record goes too: a later add can reissue the same
    /// suffix, and it must start from the placeholder.
    pub fn remove_section(&mut self, unique_id: &str) {
        self.sections.retain(|s| s.unique_id != unique_id);
        self.contents.remove(unique_id);
    }

    /// Swap with the previous neighbor; no-op at index 0 or out of range.
    pub fn move_up(&mut self, index: usize) {
        if index > 0 && index < self.sections.len() {
            self.sections.swap(index, index - 1);
        }
    }

    /// Swap with the next neighbor; no-op at the last index or out of range.
    pub fn move_down(&mut self, index: usize) {
        if index + 1 < self.sections.len() {
            self.sections.swap(index, index + 1);
        }
    }

    /// Save edited content for a section, fully replacing any prior record.
    /// A changed title or icon also renames the instance in the list, so
    /// the picker and the rendered placeholder stay in sync.
    pub fn save_content(&mut self, unique_id: &str, content: SectionContent) {
        if let Some(section) = self.sections.iter_mut().find(|s| s.unique_id == unique_id) {
            if !content.title.is_empty() && content.title != section.display_name {
                section.display_name = content.title.clone();
            }
            if !content.icon.is_empty() && content.icon != section.icon {
                section.icon = content.icon.clone();
            }
        }
        self.contents.insert(unique_id.to_string(), content);
    }

    /// Insert a featured tag; empty and already-present values are ignored.
    pub fn add_featured(&mut self, element: &str) {
        let element = element.trim();
        if !element.is_empty() && !self.featured.iter().any(|e| e == element) {
            self.featured.push(element.to_string());
        }
    }

    /// Remove a featured tag by position; no-op when out of range.
    pub fn remove_featured(&mut self, index: usize) {
        if index < self.featured.len() {
            self.featured.remove(index);
        }
    }
}
