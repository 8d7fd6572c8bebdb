use serde::Deserialize;

use crate::catalog::SectionKind;

/// A titled card used by the concept grid and the applications list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TextSection {
    pub text_content: String,
    pub info_box_type: String,
    pub info_box_content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MathematicalSection {
    pub description: String,
    /// One LaTeX equation per line.
    pub latex_equations: String,
    pub explanation: String,
    pub key_points: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConceptsGridSection {
    pub intro: String,
    pub concepts: Vec<CardItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImplementationSection {
    pub description: String,
    pub language: String,
    pub code: String,
    pub explanation: String,
    pub key_steps: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VideoSection {
    pub video_title: String,
    pub video_id: String,
    pub description: String,
    pub intro: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InteractiveDemoSection {
    pub demo_title: String,
    pub description: String,
    pub button_label: String,
    pub demo_code: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApplicationsSection {
    pub intro: String,
    pub applications: Vec<CardItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResultsSection {
    pub intro: String,
    pub key_findings: String,
    pub performance_metrics: String,
    pub data_visualization: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReferencesSection {
    /// One reference per line; numbering is added at render time.
    pub bibliography: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenericSection {
    pub main_content: String,
    pub key_points: String,
}

/// The structured payload behind one placed section. Fields are plain owned
/// strings that default to empty, so an omitted field is a typed default
/// rather than a runtime lookup.
#[derive(Debug, Clone)]
pub enum SectionBody {
    Text(TextSection),
    Mathematical(MathematicalSection),
    ConceptsGrid(ConceptsGridSection),
    Implementation(ImplementationSection),
    Video(VideoSection),
    InteractiveDemo(InteractiveDemoSection),
    Applications(ApplicationsSection),
    Results(ResultsSection),
    References(ReferencesSection),
    Generic(GenericSection),
}

impl SectionBody {
    /// Deserialize the payload shape that matches `kind` from a manifest
    /// table. Kinds without a dedicated shape get the generic
    /// main-content/key-points payload.
    pub fn from_table(kind: &SectionKind, table: toml::Table) -> Result<Self, toml::de::Error> {
        let value = toml::Value::Table(table);
        let body = match kind {
            SectionKind::Text => SectionBody::Text(value.try_into()?),
            SectionKind::Mathematical => SectionBody::Mathematical(value.try_into()?),
            SectionKind::ConceptsGrid => SectionBody::ConceptsGrid(value.try_into()?),
            SectionKind::Implementation => SectionBody::Implementation(value.try_into()?),
            SectionKind::Video => SectionBody::Video(value.try_into()?),
            SectionKind::InteractiveDemo => SectionBody::InteractiveDemo(value.try_into()?),
            SectionKind::Applications => SectionBody::Applications(value.try_into()?),
            SectionKind::Results => SectionBody::Results(value.try_into()?),
            SectionKind::References => SectionBody::References(value.try_into()?),
            _ => SectionBody::Generic(value.try_into()?),
        };
        Ok(body)
    }
}

/// Saved content for one section instance: the editable header plus the
/// kind-specific body. Saving fully replaces any prior record.
#[derive(Debug, Clone)]
pub struct SectionContent {
    pub title: String,
    pub icon: String,
    pub body: SectionBody,
}
