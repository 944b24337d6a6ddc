//! Experience store — the canonical, validated sequence of jobs.
//!
//! Display order (used to build the clickable marker series and to resolve
//! click indices) is the document order. Chronological order is derived from
//! the same sequence once, here, and never re-sorted elsewhere.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::profile::JobEntry;
use crate::profile::error::ProfileError;
use crate::timeline::chronology::to_fractional_year;

/// A validated job. Immutable after load.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct JobRecord {
    pub id: String,
    pub ordinal: f64,
    pub company: String,
    pub role: String,
    pub period: String,
    pub start_label: String,
    pub tasks: Vec<String>,
    pub stack: Vec<String>,
    pub skills: BTreeMap<String, i64>,
}

#[derive(Debug, Clone)]
pub struct ExperienceStore {
    jobs: Vec<JobRecord>,
    chronological: Vec<usize>,
}

impl ExperienceStore {
    /// Validates raw entries and builds the store. Entry order is kept as display order.
    pub fn from_entries(entries: Vec<JobEntry>) -> Result<Self, ProfileError> {
        if entries.is_empty() {
            return Err(ProfileError::EmptyExperience);
        }

        let mut seen = HashSet::new();
        let mut jobs = Vec::with_capacity(entries.len());

        for (index, entry) in entries.into_iter().enumerate() {
            let id = required(entry.id, index, "id")?;
            if !seen.insert(id.clone()) {
                return Err(ProfileError::DuplicateId(id));
            }
            let company = required(entry.company, index, "company")?;
            let role = required(entry.role, index, "role")?;
            let period = required(entry.period, index, "period")?;

            let ordinal = match (entry.ordinal, entry.start_date) {
                (Some(value), _) => value,
                (None, Some(date)) => to_fractional_year(date),
                (None, None) => return Err(ProfileError::MissingCoordinate(id)),
            };
            if !ordinal.is_finite() {
                return Err(ProfileError::InvalidOrdinal { id, value: ordinal });
            }

            let start_label = entry
                .start_label
                .filter(|label| !label.trim().is_empty())
                .unwrap_or_else(|| derive_start_label(entry.start_date, ordinal));

            jobs.push(JobRecord {
                id,
                ordinal,
                company,
                role,
                period,
                start_label,
                tasks: entry.tasks,
                stack: entry.stack,
                skills: entry.skills,
            });
        }

        let mut chronological: Vec<usize> = (0..jobs.len()).collect();
        // Stable sort: equal ordinals keep display order.
        chronological.sort_by(|&a, &b| jobs[a].ordinal.total_cmp(&jobs[b].ordinal));

        Ok(Self {
            jobs,
            chronological,
        })
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Jobs in display order.
    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    /// The default selection for a new session.
    pub fn first(&self) -> &JobRecord {
        &self.jobs[0]
    }

    /// Job at a display-order position.
    pub fn at(&self, index: usize) -> Option<&JobRecord> {
        self.jobs.get(index)
    }

    /// Looks up a job by id, returning its display-order position too.
    pub fn find(&self, id: &str) -> Option<(usize, &JobRecord)> {
        self.jobs.iter().enumerate().find(|(_, job)| job.id == id)
    }

    /// Display-order indices sorted by ordinal, earliest first.
    pub fn chronological_order(&self) -> &[usize] {
        &self.chronological
    }
}

fn required(value: String, index: usize, field: &'static str) -> Result<String, ProfileError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ProfileError::MissingField { index, field });
    }
    Ok(trimmed.to_string())
}

fn derive_start_label(start_date: Option<NaiveDate>, ordinal: f64) -> String {
    match start_date {
        Some(date) => date.format("%b %Y").to_string(),
        None => format!("{}", ordinal.trunc() as i64),
    }
}
