//! Planning the meta.json edits that make a generated page discoverable.
//!
//! The planner never mutates the remote repository. It probes for the
//! target folder and index file through a caller-supplied [`RepoProbe`]
//! and emits an ordered list of copy-pasteable patch steps; a probe
//! failure degrades the plan to a minimal entry instead of aborting.

use chrono::NaiveDate;
use serde::Serialize;

use crate::catalog;
use crate::document::{Document, TemplateFamily};
use crate::slug::slugify;

#[derive(Debug)]
pub enum ProbeError {
    /// The existence-check collaborator could not be reached.
    Unavailable(String),
}

impl std::fmt::Display for ProbeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeError::Unavailable(reason) => write!(f, "repository check failed: {}", reason),
        }
    }
}

impl std::error::Error for ProbeError {}

/// Read-only view of the remote repository layout. Both checks may fail;
/// the planner treats failure as a signal to degrade, never as a fault.
pub trait RepoProbe {
    fn folder_exists(&self, path: &str) -> Result<bool, ProbeError>;
    fn file_exists(&self, path: &str) -> Result<bool, ProbeError>;
}

#[derive(Debug)]
pub enum PlanError {
    Serialization(serde_json::Error),
}

impl From<serde_json::Error> for PlanError {
    fn from(err: serde_json::Error) -> Self {
        PlanError::Serialization(err)
    }
}

impl std::fmt::Display for PlanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanError::Serialization(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for PlanError {}

/// Index entry for one page. Optional fields are family-specific: level
/// and reading time belong to concepts pages, the author/venue block to
/// research pages.
#[derive(Debug, Clone, Serialize)]
pub struct ItemEntry {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub entry_type: &'static str,
    pub path: String,
    pub url: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(rename = "readingTime", skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    pub tags: Vec<String>,
    pub featured: Vec<String>,
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
}

/// New entry for the parent index's `sections` array.
#[derive(Debug, Clone, Serialize)]
pub struct SectionEntry {
    pub id: String,
    pub title: String,
    pub icon: &'static str,
    #[serde(rename = "type")]
    pub entry_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub description: String,
    pub children: Vec<ItemEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexMetadata {
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
    pub version: &'static str,
    #[serde(rename = "totalArticles")]
    pub total_articles: u32,
    pub structure: &'static str,
}

/// A brand-new subcategory index document carrying the page as its sole
/// item.
#[derive(Debug, Clone, Serialize)]
pub struct IndexDocument {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub entry_type: &'static str,
    #[serde(rename = "parentPath")]
    pub parent_path: String,
    pub items: Vec<ItemEntry>,
    pub metadata: IndexMetadata,
}

/// Fallback entry emitted when the repository cannot be probed. Several
/// fields of the full entry are deliberately missing; the instruction text
/// flags the plan as degraded so the author knows to complete it by hand.
#[derive(Debug, Clone, Serialize)]
pub struct BasicEntry {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub entry_type: &'static str,
    pub path: String,
    pub url: String,
    pub description: String,
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
}

/// One ordered instruction. `fragment` fields hold the pretty-printed JSON
/// to paste.
#[derive(Debug)]
pub enum PlanStep {
    /// The custom path cannot be mapped to a category.
    InvalidPath { reason: String },
    /// The subcategory folder has to be created before any index edit.
    CreateFolder { path: String },
    /// Add a new section to the parent index's `sections` array.
    AddSection { meta_path: String, fragment: String },
    /// Append the item to a named section's `children` array in the
    /// parent index.
    AppendChild {
        meta_path: String,
        section_id: String,
        fragment: String,
    },
    /// Create a whole new subcategory index file.
    CreateIndex { meta_path: String, fragment: String },
    /// Append the item to an existing `items` array.
    AppendItem { meta_path: String, fragment: String },
    /// Probe failure: minimal entry plus the reason, completed by hand.
    Degraded {
        reason: String,
        meta_path: String,
        fragment: String,
    },
}

#[derive(Debug)]
pub struct Plan {
    pub steps: Vec<PlanStep>,
}

impl Plan {
    fn single(step: PlanStep) -> Self {
        Plan { steps: vec![step] }
    }

    /// Render the numbered, human-readable instruction text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (index, step) in self.steps.iter().enumerate() {
            let number = index + 1;
            match step {
                PlanStep::InvalidPath { reason } => {
                    out.push_str(&format!("{}\n", reason));
                }
                PlanStep::CreateFolder { path } => {
                    out.push_str(&format!(
                        "{number}. Folder creation required: {path} does not exist yet. Create it before editing any meta.json.\n\n"
                    ));
                }
                PlanStep::AddSection { meta_path, fragment } => {
                    out.push_str(&format!(
                        "{number}. Update {meta_path}: add this new section to the \"sections\" array, after the last existing section:\n{fragment}\n\n"
                    ));
                }
                PlanStep::AppendChild {
                    meta_path,
                    section_id,
                    fragment,
                } => {
                    out.push_str(&format!(
                        "{number}. Update {meta_path}: find the section with id \"{section_id}\" and add this entry to its \"children\" array. Add a comma after the previous entry if it's not the last item.\n{fragment}\n\n"
                    ));
                }
                PlanStep::CreateIndex { meta_path, fragment } => {
                    out.push_str(&format!(
                        "{number}. Create the new file {meta_path} with this content:\n{fragment}\n\n"
                    ));
                }
                PlanStep::AppendItem { meta_path, fragment } => {
                    out.push_str(&format!(
                        "{number}. Update {meta_path}: add this entry to the \"items\" array. Add a comma after the previous entry if it's not the last item.\n{fragment}\n\n"
                    ));
                }
                PlanStep::Degraded {
                    reason,
                    meta_path,
                    fragment,
                } => {
                    out.push_str(&format!(
                        "Repository structure could not be verified ({reason}). Generating a basic update without folder verification; complete the missing fields by hand.\nAdd this entry to {meta_path}:\n{fragment}\n"
                    ));
                }
            }
        }
        out
    }
}

/// Tags for the index entry: each chosen section kind contributes its fixed
/// tags, plus one family tag, first-seen order, no duplicates.
pub fn tags_for(doc: &Document) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for section in doc.sections() {
        for tag in section.kind.tags() {
            if !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }
    }
    let family_tag = doc.family.tag();
    if !tags.iter().any(|t| t == family_tag) {
        tags.push(family_tag.to_string());
    }
    tags
}

fn or_placeholder(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// First letter upper-cased, remaining hyphens spaced out
/// (`machine-learning` -> `Machine learning`).
fn capitalize_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>() + &chars.as_str().replace('-', " ")
        }
        None => String::new(),
    }
}

fn item_entry(doc: &Document, family: TemplateFamily, today: NaiveDate) -> ItemEntry {
    let meta = &doc.metadata;
    let title = or_placeholder(&meta.title, "[Your Title]");
    let featured = if doc.featured().is_empty() {
        vec![family.default_featured().to_string()]
    } else {
        doc.featured().to_vec()
    };

    let mut entry = ItemEntry {
        id: slugify(&title),
        title,
        entry_type: "page",
        path: meta.custom_path.clone(),
        url: meta.custom_path.clone(),
        description: or_placeholder(&meta.description, "[Your Description]"),
        level: None,
        reading_time: None,
        authors: None,
        venue: None,
        category: None,
        framework: None,
        tags: tags_for(doc),
        featured,
        last_updated: today.format("%Y-%m-%d").to_string(),
    };

    match family {
        TemplateFamily::Concepts => {
            entry.level = Some(or_placeholder(&meta.level, "Beginner"));
            entry.reading_time = Some(meta.reading_time.trim().parse().unwrap_or(10));
        }
        TemplateFamily::Research => {
            entry.authors = Some(
                or_placeholder(&meta.authors, "[Authors]")
                    .split(',')
                    .map(|a| a.trim().to_string())
                    .collect(),
            );
            entry.venue = Some(or_placeholder(&meta.venue, "[Venue]"));
            entry.category = Some(or_placeholder(&meta.category, "Research"));
            entry.framework = Some(or_placeholder(&meta.framework, "[Framework]"));
        }
    }

    entry
}

fn section_entry(family: TemplateFamily, subcategory: &str) -> SectionEntry {
    match family {
        TemplateFamily::Concepts => SectionEntry {
            id: subcategory.to_string(),
            title: capitalize_name(subcategory),
            icon: catalog::subcategory_icon(subcategory),
            entry_type: "folder",
            path: Some(format!("concepts/{subcategory}")),
            url: Some(format!("concepts/{subcategory}.html")),
            description: format!("Explore {subcategory} concepts and implementations."),
            children: Vec::new(),
        },
        TemplateFamily::Research => SectionEntry {
            id: subcategory.to_string(),
            title: format!("{} Research", capitalize_name(subcategory)),
            icon: catalog::subcategory_icon(subcategory),
            entry_type: "section",
            path: None,
            url: None,
            description: format!("Research papers and implementations for {subcategory}."),
            children: Vec::new(),
        },
    }
}

fn index_document(
    family: TemplateFamily,
    subcategory: &str,
    item: ItemEntry,
    today: NaiveDate,
) -> IndexDocument {
    let (title, description) = match family {
        TemplateFamily::Concepts => (
            capitalize_name(subcategory),
            format!("Comprehensive collection of {subcategory} content."),
        ),
        TemplateFamily::Research => (
            format!("{} Research", capitalize_name(subcategory)),
            format!("Research papers and implementations for {subcategory}."),
        ),
    };

    IndexDocument {
        title,
        description,
        entry_type: "folder",
        parent_path: family.id().to_string(),
        items: vec![item],
        metadata: IndexMetadata {
            last_updated: today.format("%Y-%m-%d").to_string(),
            version: "1.0",
            total_articles: 1,
            structure: "folder",
        },
    }
}

fn degraded_plan(
    doc: &Document,
    meta_path: String,
    error: &ProbeError,
    today: NaiveDate,
) -> Result<Plan, PlanError> {
    let meta = &doc.metadata;
    let title = or_placeholder(&meta.title, "[Your Title]");
    let entry = BasicEntry {
        id: slugify(&title),
        title,
        entry_type: "page",
        path: meta.custom_path.clone(),
        url: meta.custom_path.clone(),
        description: or_placeholder(&meta.description, "[Your Description]"),
        last_updated: today.format("%Y-%m-%d").to_string(),
    };
    Ok(Plan::single(PlanStep::Degraded {
        reason: error.to_string(),
        meta_path,
        fragment: serde_json::to_string_pretty(&entry)?,
    }))
}

/// Decide which patch scenario applies and emit its ordered steps.
///
/// At most two probes are issued, strictly in sequence: the subcategory
/// folder first, its meta.json second, because the second check is only
/// meaningful once the first has answered. A probe failure produces the
/// degraded single-step plan rather than an error.
pub fn plan(doc: &Document, probe: &dyn RepoProbe, today: NaiveDate) -> Result<Plan, PlanError> {
    let custom_path = doc.metadata.custom_path.trim();
    let segments: Vec<&str> = custom_path.split('/').filter(|s| !s.is_empty()).collect();

    if segments.len() < 2 {
        return Ok(Plan::single(PlanStep::InvalidPath {
            reason: "Please enter a valid path (e.g. concepts/algorithms/file.html)".to_string(),
        }));
    }

    // The path, not the template choice, decides which index gets patched.
    let family = match segments[0] {
        "concepts" => TemplateFamily::Concepts,
        "research" => TemplateFamily::Research,
        _ => {
            return Ok(Plan::single(PlanStep::InvalidPath {
                reason: "Path must start with \"concepts/\" or \"research/\"".to_string(),
            }));
        }
    };
    let category = segments[0];
    let parent_meta = format!("{category}/meta.json");
    let item = item_entry(doc, family, today);

    // No subcategory: a single append to the category-level index.
    let Some(subcategory) = (segments.len() > 2).then(|| segments[1].to_string()) else {
        return Ok(Plan::single(PlanStep::AppendItem {
            meta_path: parent_meta,
            fragment: serde_json::to_string_pretty(&item)?,
        }));
    };

    let folder = format!("{category}/{subcategory}");
    let subcategory_meta = format!("{folder}/meta.json");

    let folder_exists = match probe.folder_exists(&folder) {
        Ok(exists) => exists,
        Err(e) => return degraded_plan(doc, subcategory_meta, &e, today),
    };

    if !folder_exists {
        // Dependency order a human editor must follow: declare the section,
        // then its child entry, then the subcategory's own index file.
        return Ok(Plan {
            steps: vec![
                PlanStep::CreateFolder { path: folder },
                PlanStep::AddSection {
                    meta_path: parent_meta.clone(),
                    fragment: serde_json::to_string_pretty(&section_entry(family, &subcategory))?,
                },
                PlanStep::AppendChild {
                    meta_path: parent_meta,
                    section_id: subcategory.clone(),
                    fragment: serde_json::to_string_pretty(&item)?,
                },
                PlanStep::CreateIndex {
                    meta_path: subcategory_meta,
                    fragment: serde_json::to_string_pretty(&index_document(
                        family,
                        &subcategory,
                        item,
                        today,
                    ))?,
                },
            ],
        });
    }

    let file_exists = match probe.file_exists(&subcategory_meta) {
        Ok(exists) => exists,
        Err(e) => return degraded_plan(doc, subcategory_meta, &e, today),
    };

    if !file_exists {
        // The folder is there but carries no index yet.
        return Ok(Plan {
            steps: vec![
                PlanStep::AppendChild {
                    meta_path: parent_meta,
                    section_id: subcategory.clone(),
                    fragment: serde_json::to_string_pretty(&item)?,
                },
                PlanStep::CreateIndex {
                    meta_path: subcategory_meta,
                    fragment: serde_json::to_string_pretty(&index_document(
                        family,
                        &subcategory,
                        item,
                        today,
                    ))?,
                },
            ],
        });
    }

    // Both exist: a plain append into the subcategory's items.
    Ok(Plan::single(PlanStep::AppendItem {
        meta_path: subcategory_meta,
        fragment: serde_json::to_string_pretty(&item)?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SectionKind;
    use crate::document::DocumentMetadata;

    struct StubProbe {
        folder: bool,
        file: bool,
    }

    impl RepoProbe for StubProbe {
        fn folder_exists(&self, _path: &str) -> Result<bool, ProbeError> {
            Ok(self.folder)
        }
        fn file_exists(&self, _path: &str) -> Result<bool, ProbeError> {
            Ok(self.file)
        }
    }

    struct FailingProbe;

    impl RepoProbe for FailingProbe {
        fn folder_exists(&self, _path: &str) -> Result<bool, ProbeError> {
            Err(ProbeError::Unavailable("network unreachable".into()))
        }
        fn file_exists(&self, _path: &str) -> Result<bool, ProbeError> {
            Err(ProbeError::Unavailable("network unreachable".into()))
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn research_doc() -> Document {
        let mut doc = Document::new(
            TemplateFamily::Research,
            DocumentMetadata {
                title: "Noise-aware QAOA".into(),
                description: "Depth-one QAOA under realistic noise".into(),
                authors: "A. Author, B. Coauthor".into(),
                venue: "QIP 2026".into(),
                framework: "Qiskit".into(),
                custom_path: "research/optics/noise-aware-qaoa.html".into(),
                ..Default::default()
            },
        );
        doc.add_section(SectionKind::Results).unwrap();
        doc.add_section(SectionKind::Implementation).unwrap();
        doc
    }

    #[test]
    fn missing_folder_emits_all_four_steps_in_order() {
        let doc = research_doc();
        let plan = plan(&doc, &StubProbe { folder: false, file: false }, date()).unwrap();

        assert_eq!(plan.steps.len(), 4);
        assert!(matches!(&plan.steps[0], PlanStep::CreateFolder { path } if path == "research/optics"));
        assert!(matches!(&plan.steps[1], PlanStep::AddSection { meta_path, .. } if meta_path == "research/meta.json"));
        assert!(matches!(
            &plan.steps[2],
            PlanStep::AppendChild { section_id, .. } if section_id == "optics"
        ));
        assert!(matches!(
            &plan.steps[3],
            PlanStep::CreateIndex { meta_path, .. } if meta_path == "research/optics/meta.json"
        ));
    }

    #[test]
    fn folder_without_index_skips_the_section_step() {
        let doc = research_doc();
        let plan = plan(&doc, &StubProbe { folder: true, file: false }, date()).unwrap();
        assert_eq!(plan.steps.len(), 2);
        assert!(matches!(&plan.steps[0], PlanStep::AppendChild { .. }));
        assert!(matches!(&plan.steps[1], PlanStep::CreateIndex { .. }));
    }

    #[test]
    fn both_present_is_a_single_append() {
        let doc = research_doc();
        let plan = plan(&doc, &StubProbe { folder: true, file: true }, date()).unwrap();
        assert_eq!(plan.steps.len(), 1);
        assert!(matches!(
            &plan.steps[0],
            PlanStep::AppendItem { meta_path, .. } if meta_path == "research/optics/meta.json"
        ));
    }

    #[test]
    fn two_segment_path_appends_to_the_category_index() {
        let mut doc = research_doc();
        doc.metadata.custom_path = "research/survey.html".into();
        let plan = plan(&doc, &StubProbe { folder: false, file: false }, date()).unwrap();
        assert_eq!(plan.steps.len(), 1);
        assert!(matches!(
            &plan.steps[0],
            PlanStep::AppendItem { meta_path, .. } if meta_path == "research/meta.json"
        ));
    }

    #[test]
    fn probe_failure_degrades_with_reason() {
        let doc = research_doc();
        let plan = plan(&doc, &FailingProbe, date()).unwrap();
        assert_eq!(plan.steps.len(), 1);
        match &plan.steps[0] {
            PlanStep::Degraded { reason, fragment, .. } => {
                assert!(reason.contains("network unreachable"));
                // The degraded fragment is deliberately minimal.
                assert!(fragment.contains("\"lastUpdated\""));
                assert!(!fragment.contains("\"tags\""));
                assert!(!fragment.contains("\"featured\""));
            }
            other => panic!("expected degraded step, got {other:?}"),
        }
        assert!(plan.to_text().contains("could not be verified"));
    }

    #[test]
    fn invalid_paths_ask_for_a_valid_one() {
        let mut doc = research_doc();
        doc.metadata.custom_path = "loose-file.html".into();
        let plan1 = plan(&doc, &StubProbe { folder: true, file: true }, date()).unwrap();
        assert!(matches!(&plan1.steps[0], PlanStep::InvalidPath { .. }));

        doc.metadata.custom_path = "blog/2026/post.html".into();
        let plan2 = plan(&doc, &StubProbe { folder: true, file: true }, date()).unwrap();
        assert!(matches!(
            &plan2.steps[0],
            PlanStep::InvalidPath { reason } if reason.contains("concepts")
        ));
    }

    #[test]
    fn research_entry_carries_the_author_block_not_level() {
        let doc = research_doc();
        let entry = item_entry(&doc, TemplateFamily::Research, date());
        assert_eq!(entry.id, "noise-aware-qaoa");
        assert_eq!(
            entry.authors.as_deref(),
            Some(&["A. Author".to_string(), "B. Coauthor".to_string()][..])
        );
        assert_eq!(entry.level, None);
        assert_eq!(entry.featured, vec!["research"]);
        assert_eq!(entry.last_updated, "2026-03-14");
    }

    #[test]
    fn concepts_entry_parses_reading_time_leniently() {
        let mut doc = Document::new(
            TemplateFamily::Concepts,
            DocumentMetadata {
                title: "Bell States".into(),
                reading_time: "not-a-number".into(),
                custom_path: "concepts/fundamentals/bell-states.html".into(),
                ..Default::default()
            },
        );
        doc.add_section(SectionKind::Mathematical).unwrap();
        let entry = item_entry(&doc, TemplateFamily::Concepts, date());
        assert_eq!(entry.reading_time, Some(10));
        assert_eq!(entry.level.as_deref(), Some("Beginner"));
    }

    #[test]
    fn tags_dedupe_and_keep_first_seen_order() {
        let mut doc = Document::new(
            TemplateFamily::Research,
            DocumentMetadata::default(),
        );
        doc.add_section(SectionKind::Results).unwrap();
        doc.add_section(SectionKind::Methodology).unwrap();
        doc.add_section(SectionKind::Results).unwrap();
        assert_eq!(
            tags_for(&doc),
            vec!["research", "results", "methodology", "research-paper"]
        );
    }

    #[test]
    fn section_entry_shapes_differ_by_family() {
        let concepts = section_entry(TemplateFamily::Concepts, "machine-learning");
        assert_eq!(concepts.entry_type, "folder");
        assert_eq!(concepts.title, "Machine learning");
        assert_eq!(concepts.icon, "🤖");
        assert_eq!(concepts.path.as_deref(), Some("concepts/machine-learning"));

        let research = section_entry(TemplateFamily::Research, "optics");
        assert_eq!(research.entry_type, "section");
        assert_eq!(research.title, "Optics Research");
        assert_eq!(research.path, None);
    }

    #[test]
    fn index_document_wraps_the_single_item() {
        let doc = research_doc();
        let item = item_entry(&doc, TemplateFamily::Research, date());
        let index = index_document(TemplateFamily::Research, "optics", item, date());
        assert_eq!(index.parent_path, "research");
        assert_eq!(index.items.len(), 1);
        assert_eq!(index.metadata.total_articles, 1);
        assert_eq!(index.metadata.version, "1.0");
    }

    #[test]
    fn plan_text_orders_and_numbers_the_steps() {
        let doc = research_doc();
        let plan = plan(&doc, &StubProbe { folder: false, file: false }, date()).unwrap();
        let text = plan.to_text();
        let folder_pos = text.find("Folder creation required").unwrap();
        let section_pos = text.find("\"sections\" array").unwrap();
        let child_pos = text.find("\"children\" array").unwrap();
        let create_pos = text.find("Create the new file").unwrap();
        assert!(folder_pos < section_pos && section_pos < child_pos && child_pos < create_pos);
        assert!(text.contains("1. Folder creation required"));
        assert!(text.contains("4. Create the new file"));
    }
}
