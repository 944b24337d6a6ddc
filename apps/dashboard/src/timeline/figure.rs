//! Figure description for the career timeline.
//!
//! The service never draws: it describes traces, one annotation, and layout
//! settings in a shape a charting front end can consume directly.

use serde::Serialize;

use crate::profile::store::ExperienceStore;
use crate::timeline::chronology::Chronology;

/// Trace index of the only series that accepts clicks. Must match the
/// position of the markers trace pushed in `build_figure`.
pub const CLICKABLE_TRACE: usize = 1;

/// Baseline of the axis line.
const AXIS_Y: f64 = 0.2;
/// Row for start-date labels and the "Now" label.
const LABEL_Y: f64 = -0.10;

const BASE_MARKER_SIZE: u32 = 10;
const ACTIVE_MARKER_SIZE: u32 = 16;
const GLOW_EXTRA_SIZE: u32 = 18;

const AXIS_COLOR: &str = "rgba(17,24,39,0.92)";
const MARKER_FILL: &str = "#FDE68A";
const MARKER_OUTLINE: &str = "#FBBF24";
const GLOW_COLOR: &str = "rgba(253,230,138,0.35)";
const TRANSPARENT: &str = "rgba(0,0,0,0)";

/// Gaps wider than this (in ordinal units) get a centered annotation.
pub const LABEL_GAP_THRESHOLD: f64 = 1.5;
/// Shift applied to an annotation placed beside its marker.
pub const LABEL_RIGHT_OFFSET: f64 = 0.08;

pub const HOVER_TEXT: &str = "Click to show responsibilities";
pub const NOW_LABEL: &str = "Now";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceRole {
    Axis,
    Markers,
    ActiveMarker,
    GlowRing,
    StartLabels,
    NowLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceMode {
    Lines,
    Markers,
    Text,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineStyle {
    pub width: u32,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkerStyle {
    /// One size per point.
    pub sizes: Vec<u32>,
    pub color: &'static str,
    pub outline: LineStyle,
    pub opacity: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Trace {
    pub role: TraceRole,
    pub mode: TraceMode,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<MarkerStyle>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub text: Vec<String>,
    /// Present only on the clickable series.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_text: Option<String>,
    pub interactive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationPlacement {
    /// Midway between the selected job and the next point in time.
    Centered,
    /// Just right of the selected marker, text anchored on its left edge.
    OffsetRight,
}

impl AnnotationPlacement {
    pub fn text_position(self) -> TextPosition {
        match self {
            AnnotationPlacement::Centered => TextPosition::MiddleCenter,
            AnnotationPlacement::OffsetRight => TextPosition::MiddleRight,
        }
    }
}

/// Where text sits relative to its anchor point, in the charting front end's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextPosition {
    /// Centered on the point.
    #[serde(rename = "middle center")]
    MiddleCenter,
    /// Starts at the point and runs rightwards.
    #[serde(rename = "middle right")]
    MiddleRight,
}

#[derive(Debug, Clone, Serialize)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub company: String,
    pub role: String,
    pub placement: AnnotationPlacement,
    pub text_position: TextPosition,
}

#[derive(Debug, Clone, Serialize)]
pub struct Transition {
    pub duration_ms: u32,
    pub easing: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct FigureLayout {
    pub height: u32,
    pub axes_visible: bool,
    pub fixed_range: bool,
    pub transition: Transition,
}

impl Default for FigureLayout {
    fn default() -> Self {
        Self {
            height: 120,
            axes_visible: false,
            fixed_range: true,
            transition: Transition {
                duration_ms: 380,
                easing: "cubic-in-out",
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FigureSpec {
    pub traces: Vec<Trace>,
    pub annotation: Annotation,
    pub clickable_trace: usize,
    pub now_x: f64,
    pub layout: FigureLayout,
}

/// Builds the timeline figure with `selected` (a display-order index) emphasized.
pub fn build_figure(
    store: &ExperienceStore,
    chronology: &Chronology,
    selected: usize,
) -> FigureSpec {
    let xs = &chronology.xs;
    let n = xs.len();
    let selected_x = xs[selected];
    let selected_job = &store.jobs()[selected];

    let axis = Trace {
        role: TraceRole::Axis,
        mode: TraceMode::Lines,
        x: vec![chronology.start, chronology.now],
        y: vec![AXIS_Y, AXIS_Y],
        line: Some(LineStyle {
            width: 3,
            color: AXIS_COLOR,
        }),
        marker: None,
        text: Vec::new(),
        hover_text: None,
        interactive: false,
    };

    let mut sizes = vec![BASE_MARKER_SIZE; n];
    sizes[selected] = ACTIVE_MARKER_SIZE;
    let markers = Trace {
        role: TraceRole::Markers,
        mode: TraceMode::Markers,
        x: xs.clone(),
        y: vec![AXIS_Y; n],
        line: None,
        marker: Some(MarkerStyle {
            sizes,
            color: MARKER_FILL,
            outline: LineStyle {
                width: 2,
                color: MARKER_OUTLINE,
            },
            opacity: 0.9,
        }),
        text: Vec::new(),
        hover_text: Some(HOVER_TEXT.to_string()),
        interactive: true,
    };

    let active = Trace {
        role: TraceRole::ActiveMarker,
        mode: TraceMode::Markers,
        x: vec![selected_x],
        y: vec![AXIS_Y],
        line: None,
        marker: Some(MarkerStyle {
            sizes: vec![ACTIVE_MARKER_SIZE],
            color: MARKER_FILL,
            outline: LineStyle {
                width: 4,
                color: MARKER_OUTLINE,
            },
            opacity: 1.0,
        }),
        text: Vec::new(),
        hover_text: None,
        interactive: false,
    };

    let glow = Trace {
        role: TraceRole::GlowRing,
        mode: TraceMode::Markers,
        x: vec![selected_x],
        y: vec![AXIS_Y],
        line: None,
        marker: Some(MarkerStyle {
            sizes: vec![ACTIVE_MARKER_SIZE + GLOW_EXTRA_SIZE],
            color: TRANSPARENT,
            outline: LineStyle {
                width: 2,
                color: GLOW_COLOR,
            },
            opacity: 1.0,
        }),
        text: Vec::new(),
        hover_text: None,
        interactive: false,
    };

    let start_labels = Trace {
        role: TraceRole::StartLabels,
        mode: TraceMode::Text,
        x: xs.clone(),
        y: vec![LABEL_Y; n],
        line: None,
        marker: None,
        text: store.jobs().iter().map(|j| j.start_label.clone()).collect(),
        hover_text: None,
        interactive: false,
    };

    let now_label = Trace {
        role: TraceRole::NowLabel,
        mode: TraceMode::Text,
        x: vec![chronology.now],
        y: vec![LABEL_Y],
        line: None,
        marker: None,
        text: vec![NOW_LABEL.to_string()],
        hover_text: None,
        interactive: false,
    };

    let next_x = chronology.next_after(store, selected);
    let (x, placement) = place_annotation(selected_x, next_x);

    FigureSpec {
        traces: vec![axis, markers, active, glow, start_labels, now_label],
        annotation: Annotation {
            x,
            y: AXIS_Y,
            company: selected_job.company.clone(),
            role: selected_job.role.clone(),
            placement,
            text_position: placement.text_position(),
        },
        clickable_trace: CLICKABLE_TRACE,
        now_x: chronology.now,
        layout: FigureLayout::default(),
    }
}

/// Centers the label in wide gaps; tucks it beside the marker on dense stretches.
pub fn place_annotation(x: f64, next_x: f64) -> (f64, AnnotationPlacement) {
    if next_x - x > LABEL_GAP_THRESHOLD {
        ((x + next_x) / 2.0, AnnotationPlacement::Centered)
    } else {
        (x + LABEL_RIGHT_OFFSET, AnnotationPlacement::OffsetRight)
    }
}
