/// Slug-form identifier for index entries and filenames: lowercase, strip
/// anything that is not alphanumeric/space/hyphen, collapse whitespace runs
/// to single hyphens, collapse repeated hyphens, trim stray hyphens.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();

    let mut slug = String::with_capacity(kept.len());
    let mut last_hyphen = false;
    for c in kept.trim().chars() {
        let c = if c.is_whitespace() { '-' } else { c };
        if c == '-' {
            if !last_hyphen {
                slug.push('-');
            }
            last_hyphen = true;
        } else {
            slug.push(c);
            last_hyphen = false;
        }
    }

    slug.trim_matches('-').to_string()
}

/// Download filename derived from the document title.
pub fn filename_for(title: &str) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        "document.html".to_string()
    } else {
        format!("{slug}.html")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_collapses_whitespace() {
        assert_eq!(slugify("Grover's Algorithm!! 2.0"), "grovers-algorithm-20");
    }

    #[test]
    fn collapses_existing_hyphen_runs() {
        assert_eq!(slugify("Shor -- the factoring  algorithm"), "shor-the-factoring-algorithm");
    }

    #[test]
    fn no_leading_or_trailing_hyphens() {
        assert_eq!(slugify("  ...QAOA...  "), "qaoa");
        assert_eq!(slugify("- dashed title -"), "dashed-title");
    }

    #[test]
    fn filename_falls_back_when_title_is_all_symbols() {
        assert_eq!(filename_for("Bell States"), "bell-states.html");
        assert_eq!(filename_for("!!!"), "document.html");
    }
}
