/// Relative asset paths and repo coordinates derived from the custom path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedPath {
    pub stylesheet: String,
    pub favicon: String,
    /// First path segment (`concepts`, `research`, or anything else).
    pub category: Option<String>,
    /// Second segment when the file sits in a subcategory folder.
    pub subcategory: Option<String>,
    /// Number of directory segments before the filename.
    pub depth: usize,
}

/// Derive stylesheet/favicon hrefs and the category/subcategory pair from a
/// slash-delimited path ending in the output filename.
///
/// An empty path resolves to empty hrefs; the caller is expected to handle
/// that degenerate case (the renderer will emit empty `href` attributes).
pub fn resolve(custom_path: &str) -> ResolvedPath {
    if custom_path.is_empty() {
        return ResolvedPath::default();
    }

    let segments: Vec<&str> = custom_path.split('/').collect();
    // Everything before the filename.
    let depth = segments.len() - 1;
    let category = segments.first().map(|s| s.to_string());
    let subcategory = if segments.len() > 2 {
        Some(segments[1].to_string())
    } else {
        None
    };

    let (stylesheet, favicon) = match segments[0] {
        family @ ("concepts" | "research") if depth >= 1 => {
            let sheet = format!("{family}-template.css");
            if depth == 1 {
                // Directly in the family folder.
                (sheet, "../_img/favicon.svg".to_string())
            } else {
                // One subcategory down.
                (format!("../{sheet}"), "../../_img/favicon.svg".to_string())
            }
        }
        _ => {
            let back = "../".repeat(depth);
            (format!("{back}style.css"), format!("{back}_img/favicon.svg"))
        }
    };

    ResolvedPath {
        stylesheet,
        favicon,
        category,
        subcategory,
        depth,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concepts_root_file() {
        let r = resolve("concepts/file.html");
        assert_eq!(r.depth, 1);
        assert_eq!(r.stylesheet, "concepts-template.css");
        assert_eq!(r.favicon, "../_img/favicon.svg");
        assert_eq!(r.category.as_deref(), Some("concepts"));
        assert_eq!(r.subcategory, None);
    }

    #[test]
    fn concepts_subcategory_file() {
        let r = resolve("concepts/algorithms/file.html");
        assert_eq!(r.depth, 2);
        assert_eq!(r.stylesheet, "../concepts-template.css");
        assert_eq!(r.favicon, "../../_img/favicon.svg");
        assert_eq!(r.subcategory.as_deref(), Some("algorithms"));
    }

    #[test]
    fn research_paths_use_their_own_stylesheet() {
        assert_eq!(
            resolve("research/papers/file.html").stylesheet,
            "../research-template.css"
        );
        assert_eq!(resolve("research/file.html").stylesheet, "research-template.css");
    }

    #[test]
    fn other_prefixes_fall_back_to_generic_paths() {
        let r = resolve("tools/widgets/thing.html");
        assert_eq!(r.stylesheet, "../../style.css");
        assert_eq!(r.favicon, "../../_img/favicon.svg");
        assert_eq!(r.category.as_deref(), Some("tools"));
    }

    #[test]
    fn bare_filename_resolves_at_depth_zero() {
        let r = resolve("page.html");
        assert_eq!(r.depth, 0);
        assert_eq!(r.stylesheet, "style.css");
        assert_eq!(r.favicon, "_img/favicon.svg");
    }

    #[test]
    fn empty_path_is_the_degenerate_case() {
        let r = resolve("");
        assert!(r.stylesheet.is_empty());
        assert!(r.favicon.is_empty());
        assert_eq!(r.depth, 0);
        assert_eq!(r.category, None);
    }
}
