//! Selection resolver: turns a raw marker click into a job id.
//!
//! Clicks on empty chart space, labels, or the axis are routine, so every
//! invalid event resolves to `Ignore` rather than an error.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::profile::store::ExperienceStore;
use crate::timeline::figure::CLICKABLE_TRACE;

/// Click payload as emitted by the charting front end.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClickEvent {
    #[serde(default)]
    pub points: Vec<ClickPoint>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClickPoint {
    #[serde(default, alias = "curveNumber")]
    pub curve_number: Option<i64>,
    #[serde(default, alias = "pointNumber")]
    pub point_number: Option<i64>,
}

impl ClickEvent {
    /// Lenient decode: anything that is not a well-formed click becomes `None`.
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        serde_json::from_value(value).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickResolution {
    Select { index: usize, job_id: String },
    Ignore(IgnoreReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    NoEvent,
    NoPoints,
    WrongSeries,
    MissingIndex,
    OutOfRange,
}

/// Maps a click to the job at that display-order position.
pub fn resolve_click(store: &ExperienceStore, event: Option<&ClickEvent>) -> ClickResolution {
    let Some(event) = event else {
        return ClickResolution::Ignore(IgnoreReason::NoEvent);
    };
    let Some(point) = event.points.first() else {
        return ClickResolution::Ignore(IgnoreReason::NoPoints);
    };
    if point.curve_number != Some(CLICKABLE_TRACE as i64) {
        debug!("Ignoring click on series {:?}", point.curve_number);
        return ClickResolution::Ignore(IgnoreReason::WrongSeries);
    }
    let Some(raw) = point.point_number else {
        return ClickResolution::Ignore(IgnoreReason::MissingIndex);
    };

    let job = usize::try_from(raw)
        .ok()
        .and_then(|index| store.at(index).map(|job| (index, job)));
    match job {
        Some((index, job)) => ClickResolution::Select {
            index,
            job_id: job.id.clone(),
        },
        None => {
            debug!("Ignoring click on out-of-range point {raw}");
            ClickResolution::Ignore(IgnoreReason::OutOfRange)
        }
    }
}
