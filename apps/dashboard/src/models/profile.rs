use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The whole configuration payload behind the dashboard, as authored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDocument {
    pub profile: Profile,
    #[serde(default)]
    pub education: Option<Education>,
    #[serde(default)]
    pub skill_hints: BTreeMap<String, String>,
    /// Jobs in display order. This order drives the clickable marker series.
    pub experience: Vec<JobEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telegram: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub chat_url: Option<String>,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub numbers: Vec<KeyNumber>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyNumber {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    pub short: String,
    #[serde(default)]
    pub details: Vec<String>,
}

/// A job as written in the document. Fields are loosely typed here and
/// checked by `ExperienceStore::from_entries`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobEntry {
    #[serde(default)]
    pub id: String,
    /// Explicit timeline position. Takes precedence over `start_date`.
    #[serde(default)]
    pub ordinal: Option<f64>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub start_label: Option<String>,
    #[serde(default)]
    pub tasks: Vec<String>,
    #[serde(default)]
    pub stack: Vec<String>,
    /// Skill name → level. Nominally 0–10; out-of-range values are clamped at render time.
    #[serde(default)]
    pub skills: BTreeMap<String, i64>,
}
