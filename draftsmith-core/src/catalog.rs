use crate::document::TemplateFamily;

/// One content-block kind. The set is closed per template family, with
/// `Other` as a catch-all so an unrecognized id still renders through the
/// generic main-content generator instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Introduction,
    Text,
    Mathematical,
    Implementation,
    ConceptsGrid,
    InteractiveDemo,
    Video,
    Applications,
    Pitfalls,
    References,
    ProblemStatement,
    Methodology,
    Results,
    CodeVariations,
    Discussion,
    Limitations,
    Other(String),
}

impl SectionKind {
    pub fn from_id(id: &str) -> Self {
        match id {
            "introduction" => SectionKind::Introduction,
            "text" => SectionKind::Text,
            "mathematical" => SectionKind::Mathematical,
            "implementation" => SectionKind::Implementation,
            "concepts-grid" => SectionKind::ConceptsGrid,
            "interactive-demo" => SectionKind::InteractiveDemo,
            "video" => SectionKind::Video,
            "applications" => SectionKind::Applications,
            "pitfalls" => SectionKind::Pitfalls,
            "references" => SectionKind::References,
            "problem-statement" => SectionKind::ProblemStatement,
            "methodology" => SectionKind::Methodology,
            "results" => SectionKind::Results,
            "code-variations" => SectionKind::CodeVariations,
            "discussion" => SectionKind::Discussion,
            "limitations" => SectionKind::Limitations,
            other => SectionKind::Other(other.to_string()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            SectionKind::Introduction => "introduction",
            SectionKind::Text => "text",
            SectionKind::Mathematical => "mathematical",
            SectionKind::Implementation => "implementation",
            SectionKind::ConceptsGrid => "concepts-grid",
            SectionKind::InteractiveDemo => "interactive-demo",
            SectionKind::Video => "video",
            SectionKind::Applications => "applications",
            SectionKind::Pitfalls => "pitfalls",
            SectionKind::References => "references",
            SectionKind::ProblemStatement => "problem-statement",
            SectionKind::Methodology => "methodology",
            SectionKind::Results => "results",
            SectionKind::CodeVariations => "code-variations",
            SectionKind::Discussion => "discussion",
            SectionKind::Limitations => "limitations",
            SectionKind::Other(id) => id,
        }
    }

    /// Introduction and references may appear at most once per document.
    pub fn is_singleton(&self) -> bool {
        matches!(self, SectionKind::Introduction | SectionKind::References)
    }

    /// Index tags contributed by a section of this kind.
    pub fn tags(&self) -> &'static [&'static str] {
        match self {
            SectionKind::Mathematical => &["mathematics", "theory"],
            SectionKind::Implementation => &["programming", "implementation"],
            SectionKind::ConceptsGrid => &["concepts", "education"],
            SectionKind::Video => &["video", "tutorial"],
            SectionKind::InteractiveDemo => &["interactive", "demo"],
            SectionKind::Applications => &["applications", "practical"],
            SectionKind::Results => &["research", "results"],
            SectionKind::Methodology => &["methodology", "research"],
            _ => &[],
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Catalog entry: what the section picker shows for one kind.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub kind: SectionKind,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

static CONCEPTS_CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        kind: SectionKind::Introduction,
        name: "Introduction",
        icon: "🎯",
        description: "Overview and key insights",
    },
    CatalogEntry {
        kind: SectionKind::Text,
        name: "Text Section",
        icon: "📝",
        description: "Basic text content",
    },
    CatalogEntry {
        kind: SectionKind::Mathematical,
        name: "Mathematical Foundation",
        icon: "📐",
        description: "Equations and mathematical concepts",
    },
    CatalogEntry {
        kind: SectionKind::Implementation,
        name: "Implementation Examples",
        icon: "💻",
        description: "Code examples and circuits",
    },
    CatalogEntry {
        kind: SectionKind::ConceptsGrid,
        name: "Key Concepts Grid",
        icon: "🧩",
        description: "Concept cards layout",
    },
    CatalogEntry {
        kind: SectionKind::InteractiveDemo,
        name: "Interactive Demo",
        icon: "🎮",
        description: "Interactive elements",
    },
    CatalogEntry {
        kind: SectionKind::Video,
        name: "Video Explanation",
        icon: "🎬",
        description: "YouTube video embed",
    },
    CatalogEntry {
        kind: SectionKind::Applications,
        name: "Real-World Applications",
        icon: "🚀",
        description: "Practical applications",
    },
    CatalogEntry {
        kind: SectionKind::Pitfalls,
        name: "Common Pitfalls",
        icon: "⚠️",
        description: "Mistakes to avoid",
    },
    CatalogEntry {
        kind: SectionKind::References,
        name: "References & Further Reading",
        icon: "📚",
        description: "Bibliography and sources",
    },
];

static RESEARCH_CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        kind: SectionKind::ProblemStatement,
        name: "Problem Statement",
        icon: "🎯",
        description: "Research problem definition",
    },
    CatalogEntry {
        kind: SectionKind::Text,
        name: "Text Section",
        icon: "📝",
        description: "Basic text content",
    },
    CatalogEntry {
        kind: SectionKind::Methodology,
        name: "Methodology & Approach",
        icon: "🔬",
        description: "Research methods",
    },
    CatalogEntry {
        kind: SectionKind::Implementation,
        name: "Implementation Details",
        icon: "💻",
        description: "Code and algorithms",
    },
    CatalogEntry {
        kind: SectionKind::Results,
        name: "Results & Analysis",
        icon: "📊",
        description: "Performance metrics",
    },
    CatalogEntry {
        kind: SectionKind::CodeVariations,
        name: "Alternative Implementations",
        icon: "🔧",
        description: "Different frameworks",
    },
    CatalogEntry {
        kind: SectionKind::Discussion,
        name: "Discussion & Implications",
        icon: "💭",
        description: "Broader implications",
    },
    CatalogEntry {
        kind: SectionKind::Limitations,
        name: "Limitations & Challenges",
        icon: "⚠️",
        description: "Current limitations",
    },
    CatalogEntry {
        kind: SectionKind::References,
        name: "References & Further Reading",
        icon: "📚",
        description: "Bibliography and sources",
    },
];

pub fn catalog(family: TemplateFamily) -> &'static [CatalogEntry] {
    match family {
        TemplateFamily::Concepts => CONCEPTS_CATALOG,
        TemplateFamily::Research => RESEARCH_CATALOG,
    }
}

pub fn entry_for(family: TemplateFamily, kind: &SectionKind) -> Option<&'static CatalogEntry> {
    catalog(family).iter().find(|e| &e.kind == kind)
}

pub fn info_box_icon(kind: &str) -> &'static str {
    match kind {
        "note" => "💡",
        "tip" => "🎯",
        "warning" => "⚠️",
        "insight" => "🔍",
        "challenge" => "🎯",
        "future" => "🔮",
        _ => "💡",
    }
}

pub fn info_box_title(kind: &str) -> &'static str {
    match kind {
        "note" => "Note",
        "tip" => "Tip",
        "warning" => "Warning",
        "insight" => "Key Insight",
        "challenge" => "Challenge",
        "future" => "Future Directions",
        _ => "Note",
    }
}

pub fn subcategory_icon(subcategory: &str) -> &'static str {
    match subcategory {
        "algorithms" => "⚡",
        "fundamentals" => "🧠",
        "quantum-gates" => "🚪",
        "applications" => "🚀",
        "hardware" => "🔧",
        "theory" => "📚",
        "cryptography" => "🔐",
        "optimization" => "📊",
        "machine-learning" => "🤖",
        "simulation" => "💻",
        _ => "📄",
    }
}
