//! Read-only view models over catalog records.
//!
//! Everything here is derived from a `CatalogRecord` and the filter output;
//! nothing feeds back into the engine. Optional record fields are replaced
//! with a placeholder so consumers never deal with absence themselves.

use crate::catalog::{CatalogRecord, ImageSource};
use serde::Serialize;
use std::fmt;

/// Shown wherever an optional field is absent.
pub const PLACEHOLDER: &str = "Unknown";

/// Shown in place of an image that cannot be displayed.
pub const IMAGE_FALLBACK: &str = "[no image]";

const CARNIVORE: &str = "Carnivore";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
/// Accent used for the diet chip.
pub enum DietTone {
    Danger,
    Safe,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
/// Accent used for the period chip.
pub enum PeriodTone {
    Warning,
    Info,
    Neutral,
}

impl DietTone {
    pub fn for_diet(diet: &str) -> Self {
        if diet == CARNIVORE {
            DietTone::Danger
        } else {
            DietTone::Safe
        }
    }
}

impl PeriodTone {
    // Jurassic is checked first; a label naming both eras gets the warning tone.
    pub fn for_period(period: &str) -> Self {
        if period.contains("Jurassic") {
            PeriodTone::Warning
        } else if period.contains("Cretaceous") {
            PeriodTone::Info
        } else {
            PeriodTone::Neutral
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
/// Compact card shown in the result grid.
pub struct RecordCard {
    pub name: String,
    pub period: String,
    pub period_tone: PeriodTone,
    pub diet: String,
    pub diet_tone: DietTone,
    pub height: String,
    pub weight: String,
    pub image: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
/// Full detail view for one record.
pub struct RecordDetail {
    #[serde(flatten)]
    pub card: RecordCard,
    pub description: String,
    pub habitat: String,
    pub speed: String,
    pub discovery: String,
    pub fun_facts: Vec<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
/// Result count line plus the empty-state hint.
pub struct ResultSummary {
    pub count: usize,
}

fn or_placeholder(value: Option<&String>) -> String {
    value
        .map(|text| text.trim())
        .filter(|text| !text.is_empty())
        .unwrap_or(PLACEHOLDER)
        .to_string()
}

/// Text for an image slot: the reference when displayable, else the fallback.
pub fn image_display(image: &ImageSource) -> String {
    match image {
        ImageSource::Remote(url) => url.clone(),
        ImageSource::Asset(path) => path.display().to_string(),
        ImageSource::Unresolved(_) | ImageSource::Missing => IMAGE_FALLBACK.to_string(),
    }
}

impl RecordCard {
    pub fn from_record(record: &CatalogRecord) -> Self {
        Self {
            name: record.name.clone(),
            period: record.period.clone(),
            period_tone: PeriodTone::for_period(&record.period),
            diet: record.diet.clone(),
            diet_tone: DietTone::for_diet(&record.diet),
            height: or_placeholder(record.height.as_ref()),
            weight: or_placeholder(record.weight.as_ref()),
            image: image_display(&record.image),
        }
    }
}

impl RecordDetail {
    pub fn from_record(record: &CatalogRecord) -> Self {
        Self {
            card: RecordCard::from_record(record),
            description: record.description.clone(),
            habitat: or_placeholder(record.habitat.as_ref()),
            speed: or_placeholder(record.speed.as_ref()),
            discovery: or_placeholder(record.discovery.as_ref()),
            fun_facts: record.fun_facts.clone().unwrap_or_default(),
        }
    }
}

impl ResultSummary {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Extra lines shown when nothing matched.
    pub fn empty_hint(&self) -> Option<[&'static str; 2]> {
        self.is_empty().then_some([
            "No dinosaurs found",
            "Try adjusting your search terms or filters",
        ])
    }
}

impl fmt::Display for ResultSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.count == 1 { "" } else { "s" };
        write!(f, "{} dinosaur{plural} found", self.count)
    }
}

impl fmt::Display for RecordCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(
            f,
            "  {} ({:?}) | {} ({:?})",
            self.period, self.period_tone, self.diet, self.diet_tone
        )?;
        writeln!(f, "  Height: {}  Weight: {}", self.height, self.weight)?;
        write!(f, "  Image: {}", self.image)
    }
}

impl fmt::Display for RecordDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.card)?;
        writeln!(f, "  {}", self.description)?;
        writeln!(f, "  Habitat: {}", self.habitat)?;
        writeln!(f, "  Speed: {}", self.speed)?;
        write!(f, "  Discovery: {}", self.discovery)?;
        if !self.fun_facts.is_empty() {
            write!(f, "\n  Fun facts:")?;
            for fact in &self.fun_facts {
                write!(f, "\n    - {fact}")?;
            }
        }
        Ok(())
    }
}
