use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use tera::{Context, Tera};

use crate::catalog;
use crate::content::{
    ApplicationsSection, ConceptsGridSection, GenericSection, ImplementationSection,
    InteractiveDemoSection, MathematicalSection, ReferencesSection, ResultsSection, SectionBody,
    TextSection, VideoSection,
};
use crate::document::{Document, SectionInstance, TemplateFamily};
use crate::paths;

// The two page skeletons are fixed; parse them once. Autoescaping is off on
// purpose: the authoring tool serves trusted contributors, and only code
// fields get escaped (see implementation_html).
static TERA: LazyLock<Tera> = LazyLock::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("concepts.html", include_str!("../templates/concepts.html")),
        ("research.html", include_str!("../templates/research.html")),
    ])
    .expect("page skeletons are valid templates");
    tera.autoescape_on(vec![]);
    tera
});

#[derive(Debug)]
pub enum RenderError {
    Template(tera::Error),
}

impl From<tera::Error> for RenderError {
    fn from(err: tera::Error) -> Self {
        RenderError::Template(err)
    }
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Template(e) => write!(f, "Template error: {}", e),
        }
    }
}

impl std::error::Error for RenderError {}

/// Render the whole document for its template family. Sections appear in
/// exactly the list order; `today` feeds the updated/published stamps and
/// the citation year, and is the only non-deterministic input.
pub fn render_document(doc: &Document, today: NaiveDate) -> Result<String, RenderError> {
    let resolved = paths::resolve(&doc.metadata.custom_path);

    let mut sections = String::new();
    for instance in doc.sections() {
        sections.push_str(&render_section(doc, instance));
    }

    let meta = &doc.metadata;
    let mut ctx = Context::new();
    ctx.insert("favicon", &resolved.favicon);
    ctx.insert("stylesheet", &resolved.stylesheet);
    ctx.insert("sections", &sections);
    ctx.insert("year", &today.year());

    let html = match doc.family {
        TemplateFamily::Concepts => {
            ctx.insert("title", or_default(&meta.title, "[Your Concept Title Here]"));
            ctx.insert(
                "description",
                or_default(
                    &meta.description,
                    "A comprehensive guide to understanding [concept name] in quantum computing",
                ),
            );
            ctx.insert("level", or_default(&meta.level, "Beginner"));
            ctx.insert("reading_time", or_default(&meta.reading_time, "X"));
            ctx.insert("updated", &today.format("%Y-%m-%d").to_string());
            TERA.render("concepts.html", &ctx)?
        }
        TemplateFamily::Research => {
            ctx.insert(
                "title",
                or_default(&meta.title, "[Your Research Paper Title Here]"),
            );
            ctx.insert(
                "authors",
                or_default(&meta.authors, "[Author Names, Affiliations]"),
            );
            ctx.insert("venue", or_default(&meta.venue, "[Conference/Journal Name Year]"));
            ctx.insert("category", or_default(&meta.category, "Algorithm"));
            ctx.insert("framework", or_default(&meta.framework, "[Framework Used]"));
            ctx.insert("published", &today.format("%Y-%m-%d").to_string());
            TERA.render("research.html", &ctx)?
        }
    };

    Ok(html)
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

/// One section block. An un-edited section (no saved content) renders the
/// edit-me placeholder; that is defined behavior, not an error.
fn render_section(doc: &Document, instance: &SectionInstance) -> String {
    let Some(content) = doc.content(&instance.unique_id) else {
        return format!(
            "<section class=\"content-section\"><h2>{}</h2><p>Please edit this section to add content.</p></section>",
            instance.display_name
        );
    };

    let body = match doc.family {
        TemplateFamily::Concepts => render_body_concepts(&content.body),
        TemplateFamily::Research => render_body_research(&content.body),
    };

    format!(
        "<section class=\"content-section\"><div class=\"section-header\"><span class=\"section-icon\">{}</span><h2 class=\"section-title\">{}</h2></div>{}</section>",
        content.icon, content.title, body
    )
}

fn render_body_concepts(body: &SectionBody) -> String {
    match body {
        SectionBody::Text(c) => text_html(c),
        SectionBody::Mathematical(c) => mathematical_html(c),
        SectionBody::ConceptsGrid(c) => concepts_grid_html(c),
        SectionBody::Implementation(c) => implementation_html(c),
        SectionBody::Video(c) => video_html(c),
        SectionBody::InteractiveDemo(c) => interactive_demo_html(c),
        SectionBody::Applications(c) => applications_html(c),
        SectionBody::References(c) => references_html(c),
        SectionBody::Generic(c) => generic_html(c),
        // Not part of the concepts family; nothing sensible to emit.
        SectionBody::Results(_) => String::new(),
    }
}

/// The research family routes fewer kinds to dedicated markup; everything
/// else goes through the generic main-content generator.
fn render_body_research(body: &SectionBody) -> String {
    match body {
        SectionBody::Text(c) => text_html(c),
        SectionBody::Implementation(c) => implementation_html(c),
        SectionBody::Results(c) => results_html(c),
        SectionBody::Applications(c) => applications_html(c),
        SectionBody::References(c) => references_html(c),
        SectionBody::Generic(c) => generic_html(c),
        SectionBody::Mathematical(_)
        | SectionBody::ConceptsGrid(_)
        | SectionBody::Video(_)
        | SectionBody::InteractiveDemo(_) => String::new(),
    }
}

fn text_html(c: &TextSection) -> String {
    let mut html = String::new();
    if !c.text_content.is_empty() {
        html.push_str(&format!(
            "<div class=\"main-content\">{}</div>",
            format_text_content(&c.text_content)
        ));
    }
    if !c.info_box_content.is_empty() {
        let box_type = or_default(&c.info_box_type, "note");
        html.push_str(&format!(
            "<div class=\"info-box {}\"><div class=\"info-box-title\">{} {}</div><p>{}</p></div>",
            box_type,
            catalog::info_box_icon(box_type),
            catalog::info_box_title(box_type),
            c.info_box_content
        ));
    }
    html
}

fn mathematical_html(c: &MathematicalSection) -> String {
    let mut html = String::new();
    if !c.description.is_empty() {
        html.push_str(&format!(
            "<div class=\"main-content\">{}</div>",
            format_text_content(&c.description)
        ));
    }
    for equation in c.latex_equations.lines().filter(|l| !l.trim().is_empty()) {
        html.push_str(&format!(
            "<div class=\"equation-block\">{}</div>",
            equation.trim()
        ));
    }
    if !c.explanation.is_empty() {
        html.push_str(&format!(
            "<div class=\"math-explanation\">{}</div>",
            format_text_content(&c.explanation)
        ));
    }
    if !c.key_points.is_empty() {
        html.push_str(&format!(
            "<div class=\"key-points\"><h4>Key Mathematical Points:</h4>{}</div>",
            format_text_content(&c.key_points)
        ));
    }
    html
}

fn concepts_grid_html(c: &ConceptsGridSection) -> String {
    let mut html = String::new();
    if !c.intro.is_empty() {
        html.push_str(&format!(
            "<div class=\"main-content\">{}</div>",
            format_text_content(&c.intro)
        ));
    }
    if !c.concepts.is_empty() {
        html.push_str("<div class=\"concept-grid\">");
        for card in &c.concepts {
            if card.title.is_empty() && card.description.is_empty() {
                continue;
            }
            html.push_str(&format!(
                "<div class=\"concept-card\"><h3>{}</h3><p>{}</p></div>",
                or_default(&card.title, "Concept"),
                or_default(&card.description, "Description not provided")
            ));
        }
        html.push_str("</div>");
    }
    html
}

fn implementation_html(c: &ImplementationSection) -> String {
    let mut html = String::new();
    if !c.description.is_empty() {
        html.push_str(&format!(
            "<div class=\"main-content\">{}</div>",
            format_text_content(&c.description)
        ));
    }
    if !c.code.is_empty() {
        // Code is the one field embedded with escaping.
        html.push_str(&format!(
            "<div class=\"code-block\"><div class=\"code-header\"><span>Implementation Code</span><span class=\"code-language\">{}</span></div><pre><code>{}</code></pre></div>",
            or_default(&c.language, "Code"),
            html_escape::encode_text(&c.code)
        ));
    }
    if !c.explanation.is_empty() {
        html.push_str(&format!(
            "<div class=\"code-explanation\">{}</div>",
            format_text_content(&c.explanation)
        ));
    }
    if !c.key_steps.is_empty() {
        html.push_str(&format!(
            "<div class=\"key-points\"><h4>Implementation Steps:</h4>{}</div>",
            format_text_content(&c.key_steps)
        ));
    }
    html
}

fn video_html(c: &VideoSection) -> String {
    let mut html = String::new();
    if !c.intro.is_empty() {
        html.push_str(&format!(
            "<div class=\"main-content\">{}</div>",
            format_text_content(&c.intro)
        ));
    }
    if !c.video_id.is_empty() {
        let title = or_default(&c.video_title, "Video Explanation");
        let description = if c.description.is_empty() {
            String::new()
        } else {
            format!("<p class=\"video-description\">{}</p>", c.description)
        };
        html.push_str(&format!(
            "<div class=\"video-container\"><h3 class=\"video-title\">{title}</h3>{description}<div class=\"video-wrapper\"><iframe src=\"https://www.youtube.com/embed/{id}\" title=\"{title}\" allow=\"accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture; web-share\" allowfullscreen></iframe></div></div>",
            id = c.video_id
        ));
    }
    html
}

fn interactive_demo_html(c: &InteractiveDemoSection) -> String {
    let mut html = String::new();
    if !c.description.is_empty() {
        html.push_str(&format!(
            "<div class=\"main-content\">{}</div>",
            format_text_content(&c.description)
        ));
    }
    html.push_str(&format!(
        "<div class=\"interactive-demo\"><h3>{}</h3><button class=\"demo-button\" onclick=\"runDemo()\">{}</button></div>",
        or_default(&c.demo_title, "Try It Yourself!"),
        or_default(&c.button_label, "Run Demo")
    ));
    if !c.demo_code.is_empty() {
        html.push_str(&format!(
            "<script>function runDemo() {{ {} }}</script>",
            c.demo_code
        ));
    }
    html
}

fn applications_html(c: &ApplicationsSection) -> String {
    let mut html = String::new();
    if !c.intro.is_empty() {
        html.push_str(&format!(
            "<div class=\"main-content\">{}</div>",
            format_text_content(&c.intro)
        ));
    }
    if !c.applications.is_empty() {
        html.push_str("<div class=\"applications-list\">");
        for (index, app) in c.applications.iter().enumerate() {
            if app.title.is_empty() && app.description.is_empty() {
                continue;
            }
            let fallback = format!("Application {}", index + 1);
            html.push_str(&format!(
                "<div class=\"application-item\"><h4>{}</h4><p>{}</p></div>",
                or_default(&app.title, &fallback),
                or_default(&app.description, "Description not provided")
            ));
        }
        html.push_str("</div>");
    }
    html
}

fn results_html(c: &ResultsSection) -> String {
    let mut html = String::new();
    if !c.intro.is_empty() {
        html.push_str(&format!(
            "<div class=\"main-content\">{}</div>",
            format_text_content(&c.intro)
        ));
    }
    if !c.key_findings.is_empty() {
        html.push_str(&format!(
            "<div class=\"key-points\"><h4>Key Findings:</h4>{}</div>",
            format_text_content(&c.key_findings)
        ));
    }
    if !c.performance_metrics.is_empty() {
        html.push_str(&format!(
            "<div class=\"performance-section\"><h4>Performance Metrics:</h4>{}</div>",
            format_text_content(&c.performance_metrics)
        ));
    }
    if !c.data_visualization.is_empty() {
        html.push_str(&format!(
            "<div class=\"data-visualization\"><h4>Data Analysis:</h4>{}</div>",
            format_text_content(&c.data_visualization)
        ));
    }
    html
}

fn references_html(c: &ReferencesSection) -> String {
    let entries: Vec<&str> = c
        .bibliography
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut html = String::from("<div class=\"bibliography\">");
    if entries.is_empty() {
        html.push_str("<div class=\"reference-item\"><strong>[1]</strong> Add your references here.</div>");
    } else {
        for (index, entry) in entries.iter().enumerate() {
            html.push_str(&format!(
                "<div class=\"reference-item\"><strong>[{}]</strong> {}</div>",
                index + 1,
                entry
            ));
        }
    }
    html.push_str("</div>");
    html
}

fn generic_html(c: &GenericSection) -> String {
    let mut html = String::new();
    if !c.main_content.is_empty() {
        html.push_str(&format!(
            "<div class=\"main-content\">{}</div>",
            format_text_content(&c.main_content)
        ));
    }
    if !c.key_points.is_empty() {
        html.push_str(&format!(
            "<div class=\"key-points\"><h4>Key Points:</h4>{}</div>",
            format_text_content(&c.key_points)
        ));
    }
    html
}

/// Free-text formatter shared by every generator: blank-line-delimited
/// blocks become paragraphs, except blocks opening with a bullet marker
/// (`•` or `-`), which become unordered lists with one item per line.
pub fn format_text_content(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    text.split("\n\n")
        .filter_map(|paragraph| {
            let trimmed = paragraph.trim();
            if trimmed.is_empty() {
                return None;
            }
            if trimmed.starts_with('•') || trimmed.starts_with('-') {
                let items: String = paragraph
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(|line| {
                        let stripped = line
                            .strip_prefix('•')
                            .or_else(|| line.strip_prefix('-'))
                            .unwrap_or(line)
                            .trim();
                        format!("<li>{}</li>", stripped)
                    })
                    .collect();
                Some(format!("<ul>{}</ul>", items))
            } else {
                Some(format!("<p>{}</p>", trimmed))
            }
        })
        .collect()
}
