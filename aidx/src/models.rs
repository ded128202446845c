//! Guide document model
//!
//! Guides arrive already validated; the engine only reads them. Optional
//! sections are modelled as `Option` and treated as empty wherever text is
//! extracted.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Emergency category a guide belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    BasicLifeSupport,
    WoundsBleeding,
    BurnsScalds,
    BonesJoints,
    BreathingChoking,
    CardiacEmergencies,
    Poisoning,
    AllergicReactions,
    EnvironmentalEmergencies,
    MedicalConditions,
    MentalHealth,
}

impl Category {
    /// All categories, in declaration order
    pub const ALL: [Category; 11] = [
        Category::BasicLifeSupport,
        Category::WoundsBleeding,
        Category::BurnsScalds,
        Category::BonesJoints,
        Category::BreathingChoking,
        Category::CardiacEmergencies,
        Category::Poisoning,
        Category::AllergicReactions,
        Category::EnvironmentalEmergencies,
        Category::MedicalConditions,
        Category::MentalHealth,
    ];

    /// Wire name, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::BasicLifeSupport => "basic_life_support",
            Category::WoundsBleeding => "wounds_bleeding",
            Category::BurnsScalds => "burns_scalds",
            Category::BonesJoints => "bones_joints",
            Category::BreathingChoking => "breathing_choking",
            Category::CardiacEmergencies => "cardiac_emergencies",
            Category::Poisoning => "poisoning",
            Category::AllergicReactions => "allergic_reactions",
            Category::EnvironmentalEmergencies => "environmental_emergencies",
            Category::MedicalConditions => "medical_conditions",
            Category::MentalHealth => "mental_health",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

/// Severity level, ordered from least to most urgent
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Wire name, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// Contribution of this severity to a guide's base relevance score
    pub fn weight(&self) -> f64 {
        match self {
            Severity::Critical => 40.0,
            Severity::High => 30.0,
            Severity::Medium => 20.0,
            Severity::Low => 10.0,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(Error::UnknownSeverity(s.to_string())),
        }
    }
}

/// A single instruction step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideStep {
    pub title: String,
    pub description: String,
    /// Free-form duration hint, e.g. "2 minutes"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// Structured guide body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideContent {
    #[serde(default)]
    pub steps: Vec<GuideStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when_to_seek_help: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prevention_tips: Option<Vec<String>>,
}

impl GuideContent {
    /// Every free-text field of the body, absent sections contributing nothing
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        let steps = self
            .steps
            .iter()
            .flat_map(|s| [s.title.as_str(), s.description.as_str()]);
        let lists = [&self.warnings, &self.when_to_seek_help, &self.prevention_tips]
            .into_iter()
            .flat_map(|list| list.iter().flatten().map(String::as_str));
        steps.chain(lists)
    }
}

/// An emergency guide document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guide {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub category: Category,
    pub severity: Severity,
    #[serde(default)]
    pub search_tags: Vec<String>,
    #[serde(default)]
    pub content: GuideContent,
    #[serde(default)]
    pub is_offline_available: bool,
    #[serde(default)]
    pub view_count: u64,
    /// Review timestamp, RFC 3339 or a plain `YYYY-MM-DD` date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed_at: Option<String>,
}
