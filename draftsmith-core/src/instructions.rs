//! Pull-request checklist that accompanies a patch plan.

use crate::document::Document;
use crate::slug::filename_for;

/// Human-readable submission checklist: where the HTML file goes, which
/// index files the plan touches, the git commands to run, and reminders
/// the review queue keeps tripping on.
pub fn pr_checklist(doc: &Document) -> String {
    let custom_path = doc.metadata.custom_path.trim();
    let segments: Vec<&str> = custom_path.split('/').filter(|s| !s.is_empty()).collect();

    let html_path = if custom_path.is_empty() {
        filename_for(&doc.metadata.title)
    } else {
        custom_path.to_string()
    };

    let mut meta_files: Vec<String> = Vec::new();
    if segments.len() >= 3 {
        let category = segments[0];
        let subcategory = segments[1];
        meta_files.push(format!(
            "{category}/{subcategory}/meta.json: add the new entry to the \"items\" array"
        ));
        meta_files.push(format!(
            "{category}/meta.json: only if the \"{subcategory}\" section doesn't exist yet"
        ));
    } else if segments.len() == 2 {
        meta_files.push(format!(
            "{}/meta.json: add the new entry to the \"items\" array",
            segments[0]
        ));
    }

    let mut out = String::from("Pull request checklist\n\n");

    out.push_str("1. HTML file location:\n");
    out.push_str(&format!("   {html_path}\n\n"));

    out.push_str("2. meta.json updates:\n");
    if meta_files.is_empty() {
        out.push_str("   (set a repository path first to see which index files to update)\n");
    } else {
        for file in &meta_files {
            out.push_str(&format!("   - {file}\n"));
        }
    }
    out.push('\n');

    out.push_str("3. Git commands:\n");
    out.push_str(&format!("   git add {html_path}\n"));
    if segments.len() >= 3 {
        out.push_str(&format!("   git add {}/{}/meta.json\n", segments[0], segments[1]));
        out.push_str(&format!("   git add {}/meta.json\n", segments[0]));
    } else if segments.len() == 2 {
        out.push_str(&format!("   git add {}/meta.json\n", segments[0]));
    }
    let title = if doc.metadata.title.is_empty() {
        "[Your Title]"
    } else {
        doc.metadata.title.as_str()
    };
    out.push_str(&format!(
        "   git commit -m \"Add new {}: {}\"\n",
        doc.family.id(),
        title
    ));
    out.push_str("   git push origin your-branch-name\n\n");

    out.push_str("Notes:\n");
    out.push_str("   - Keep the HTML file and every meta.json change in the same commit\n");
    out.push_str("   - Open the HTML file locally before submitting\n");
    out.push_str("   - Check that each edited meta.json is still valid JSON\n");
    let featured = if doc.featured().is_empty() {
        "None specified".to_string()
    } else {
        doc.featured().join(", ")
    };
    out.push_str(&format!("   - Featured elements: {featured}\n"));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentMetadata, TemplateFamily};

    #[test]
    fn checklist_names_every_file_to_stage() {
        let mut doc = Document::new(
            TemplateFamily::Concepts,
            DocumentMetadata {
                title: "Grover's Algorithm".into(),
                custom_path: "concepts/algorithms/grover.html".into(),
                ..Default::default()
            },
        );
        doc.add_featured("interactive demo");

        let text = pr_checklist(&doc);
        assert!(text.contains("concepts/algorithms/grover.html"));
        assert!(text.contains("git add concepts/algorithms/meta.json"));
        assert!(text.contains("git add concepts/meta.json"));
        assert!(text.contains("git commit -m \"Add new concepts: Grover's Algorithm\""));
        assert!(text.contains("Featured elements: interactive demo"));
    }

    #[test]
    fn missing_path_falls_back_to_the_slug_filename() {
        let doc = Document::new(
            TemplateFamily::Research,
            DocumentMetadata {
                title: "Noise-aware QAOA".into(),
                ..Default::default()
            },
        );
        let text = pr_checklist(&doc);
        assert!(text.contains("noise-aware-qaoa.html"));
        assert!(text.contains("set a repository path first"));
        assert!(text.contains("Featured elements: None specified"));
    }
}
