//! Chronology-to-coordinate mapping for the career timeline.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::profile::error::ProfileError;
use crate::profile::store::ExperienceStore;

pub const DEFAULT_NOW_OFFSET: f64 = 0.9;
/// Minimum room left after the latest job under the calendar policy.
pub const CALENDAR_EPSILON: f64 = 0.05;

/// How the open end of the axis ("Now") is placed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum NowPolicy {
    /// `now = max(ordinal) + offset`.
    FixedOffset { offset: f64 },
    /// `now = today` on the fractional-year scale, never closer than
    /// `epsilon` to the latest job.
    CalendarProportional { epsilon: f64 },
}

impl Default for NowPolicy {
    fn default() -> Self {
        NowPolicy::FixedOffset {
            offset: DEFAULT_NOW_OFFSET,
        }
    }
}

impl NowPolicy {
    /// Parses the `NOW_POLICY` / `NOW_OFFSET` pair.
    pub fn parse(name: &str, offset: f64) -> Result<Self, ProfileError> {
        let policy = match name.trim().to_ascii_lowercase().as_str() {
            "fixed" | "fixed_offset" => NowPolicy::FixedOffset { offset },
            "calendar" | "calendar_proportional" => NowPolicy::CalendarProportional {
                epsilon: CALENDAR_EPSILON,
            },
            other => {
                return Err(ProfileError::InvalidNowPolicy(format!(
                    "unknown policy '{other}' (expected 'fixed' or 'calendar')"
                )))
            }
        };
        policy.validate()?;
        Ok(policy)
    }

    fn validate(&self) -> Result<(), ProfileError> {
        let step = match self {
            NowPolicy::FixedOffset { offset } => offset,
            NowPolicy::CalendarProportional { epsilon } => epsilon,
        };
        if !step.is_finite() || *step <= 0.0 {
            return Err(ProfileError::InvalidNowPolicy(format!(
                "step after the latest job must be positive, got {step}"
            )));
        }
        Ok(())
    }
}

/// Plot coordinates for every job plus the synthetic "now" endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Chronology {
    /// x per job, in display order.
    pub xs: Vec<f64>,
    /// Strictly greater than every entry of `xs`.
    pub now: f64,
    /// Earliest job coordinate; the axis line starts here.
    pub start: f64,
}

impl Chronology {
    pub fn build(
        store: &ExperienceStore,
        policy: NowPolicy,
        today: NaiveDate,
    ) -> Result<Self, ProfileError> {
        if store.is_empty() {
            return Err(ProfileError::EmptyExperience);
        }
        policy.validate()?;

        let xs: Vec<f64> = store.jobs().iter().map(|job| job.ordinal).collect();
        let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let start = xs.iter().copied().fold(f64::INFINITY, f64::min);

        let now = match policy {
            NowPolicy::FixedOffset { offset } => max + offset,
            NowPolicy::CalendarProportional { epsilon } => {
                to_fractional_year(today).max(max + epsilon)
            }
        };
        // A step far below the ordinal's precision rounds back onto the latest job.
        if now <= max {
            return Err(ProfileError::NowNotAfterLatest { now, latest: max });
        }

        Ok(Self { xs, now, start })
    }

    /// The coordinate that follows display index `index` in time: the next
    /// job chronologically, or "now" for the latest one.
    pub fn next_after(&self, store: &ExperienceStore, index: usize) -> f64 {
        let order = store.chronological_order();
        order
            .iter()
            .position(|&i| i == index)
            .and_then(|pos| order.get(pos + 1))
            .map(|&next| self.xs[next])
            .unwrap_or(self.now)
    }
}

/// `year + days_since_jan1 / days_in_year`.
pub fn to_fractional_year(date: NaiveDate) -> f64 {
    let year = date.year();
    let days_in_year = if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
        366.0
    } else {
        365.0
    };
    year as f64 + f64::from(date.ordinal0()) / days_in_year
}
