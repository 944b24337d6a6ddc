//! Skill bars and growth deltas.
//!
//! `grew` compares against the immediately previous render only. A skill
//! missing from the previous snapshot counts as level 0, so on a first
//! render every positive skill is flagged and animates in.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const SEGMENTS: u8 = 10;
pub const MAX_LEVEL: i64 = SEGMENTS as i64;

const ROW_DELAY_MS: u32 = 90;
const SEGMENT_DELAY_MS: u32 = 55;

pub const DEFAULT_HINT: &str = "No description for this skill yet.";
pub const EMPTY_SKILLS_PLACEHOLDER: &str = "—";

/// Skill name → last displayed level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSnapshot(pub BTreeMap<String, u8>);

impl SkillSnapshot {
    pub fn level(&self, name: &str) -> u8 {
        self.0.get(name).copied().unwrap_or(0)
    }

    /// Snapshot of a job's skills as they will be displayed (clamped).
    pub fn from_levels(skills: &BTreeMap<String, i64>) -> Self {
        Self(
            skills
                .iter()
                .map(|(name, &level)| (name.clone(), clamp_level(level)))
                .collect(),
        )
    }
}

pub fn clamp_level(level: i64) -> u8 {
    level.clamp(0, MAX_LEVEL) as u8
}

/// `level > previous.get(name, 0)`.
pub fn grew(name: &str, level: u8, previous: &SkillSnapshot) -> bool {
    level > previous.level(name)
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Segment {
    pub on: bool,
    /// Stagger for the fill animation; only set on "on" segments of a grown row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u32>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SkillRow {
    pub name: String,
    pub level: u8,
    pub grew: bool,
    pub segments: Vec<Segment>,
    pub name_id: String,
    pub bar_id: String,
    pub hint: String,
    pub delay_ms: u32,
}

#[cfg(test)]
impl SkillRow {
    pub fn lit_segments(&self) -> usize {
        self.segments.iter().filter(|s| s.on).count()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SkillsPanel {
    pub rows: Vec<SkillRow>,
    /// Changes whenever the job or any level changes, so the front end restarts animations.
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// Builds the skill bars for one job, sorted by level (desc) then name (case-insensitive).
pub fn build_skills_panel(
    job_id: &str,
    skills: &BTreeMap<String, i64>,
    previous: &SkillSnapshot,
    hints: &BTreeMap<String, String>,
) -> SkillsPanel {
    if skills.is_empty() {
        return SkillsPanel {
            rows: Vec::new(),
            key: format!("skills-wrapper-{job_id}"),
            placeholder: Some(EMPTY_SKILLS_PLACEHOLDER.to_string()),
        };
    }

    let mut items: Vec<(&str, u8)> = skills
        .iter()
        .map(|(name, &level)| (name.as_str(), clamp_level(level)))
        .collect();
    items.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| a.0.to_lowercase().cmp(&b.0.to_lowercase()))
    });

    let rows = items
        .iter()
        .enumerate()
        .map(|(idx, &(name, level))| {
            let has_grown = grew(name, level, previous);
            let row_delay = idx as u32 * ROW_DELAY_MS;
            let segments = (0..SEGMENTS)
                .map(|i| {
                    let on = i < level;
                    Segment {
                        on,
                        delay_ms: (on && has_grown)
                            .then(|| row_delay + u32::from(i) * SEGMENT_DELAY_MS),
                    }
                })
                .collect();
            let sid = slug(name);
            SkillRow {
                name: name.to_string(),
                level,
                grew: has_grown,
                segments,
                name_id: format!("skill-name-{job_id}-{sid}"),
                bar_id: format!("skill-bar-{job_id}-{sid}"),
                hint: hints
                    .get(name)
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_HINT.to_string()),
                delay_ms: row_delay,
            }
        })
        .collect();

    let levels: Vec<String> = items
        .iter()
        .map(|(name, level)| format!("{}{}", slug(name), level))
        .collect();

    SkillsPanel {
        rows,
        key: format!("skills-wrapper-{job_id}-{}", levels.join("-")),
        placeholder: None,
    }
}

/// Lowercase ASCII slug for DOM ids: runs of other characters collapse to `-`.
pub fn slug(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_dash = false;
    for c in s.trim().chars() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(pairs: &[(&str, i64)]) -> BTreeMap<String, i64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn snapshot(pairs: &[(&str, u8)]) -> SkillSnapshot {
        SkillSnapshot(pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect())
    }

    fn panel(pairs: &[(&str, i64)], prev: &SkillSnapshot) -> SkillsPanel {
        build_skills_panel("job", &skills(pairs), prev, &BTreeMap::new())
    }

    #[test]
    fn test_grew_absent_counts_as_zero() {
        let prev = SkillSnapshot::default();
        assert!(grew("SQL", 1, &prev));
        assert!(!grew("SQL", 0, &prev));
    }

    #[test]
    fn test_grew_only_on_strict_increase() {
        let prev = snapshot(&[("SQL", 5)]);
        assert!(grew("SQL", 6, &prev));
        assert!(!grew("SQL", 5, &prev));
        assert!(!grew("SQL", 2, &prev));
    }

    #[test]
    fn test_levels_clamped_to_segment_range() {
        let p = panel(&[("Over", 15), ("Under", -3), ("Mid", 7)], &SkillSnapshot::default());
        for row in &p.rows {
            assert_eq!(row.segments.len(), SEGMENTS as usize);
            assert!(row.lit_segments() <= 10);
        }
        let by_name = |n: &str| p.rows.iter().find(|r| r.name == n).unwrap();
        assert_eq!(by_name("Over").lit_segments(), 10);
        assert_eq!(by_name("Under").lit_segments(), 0);
        assert!(!by_name("Under").grew);
        assert_eq!(by_name("Mid").lit_segments(), 7);
    }

    #[test]
    fn test_sorted_by_level_then_case_insensitive_name() {
        let p = panel(
            &[("excel", 7), ("Python", 9), ("SQL", 8), ("Airflow", 7), ("power bi", 8)],
            &SkillSnapshot::default(),
        );
        let names: Vec<_> = p.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Python", "power bi", "SQL", "Airflow", "excel"]);
    }

    #[test]
    fn test_reselecting_same_levels_flags_nothing() {
        let levels = skills(&[("SQL", 8), ("Excel", 12), ("Neg", -1)]);
        let prev = SkillSnapshot::from_levels(&levels);
        let p = build_skills_panel("job", &levels, &prev, &BTreeMap::new());
        assert!(p.rows.iter().all(|r| !r.grew));
        assert!(p.rows.iter().flat_map(|r| &r.segments).all(|s| s.delay_ms.is_none()));
    }

    #[test]
    fn test_grown_segments_carry_staggered_delays() {
        let p = panel(&[("A", 3), ("B", 2)], &SkillSnapshot::default());
        let second = &p.rows[1];
        assert_eq!(second.delay_ms, 90);
        assert_eq!(second.segments[0].delay_ms, Some(90));
        assert_eq!(second.segments[1].delay_ms, Some(145));
        assert_eq!(second.segments[2].delay_ms, None);
    }

    #[test]
    fn test_hints_and_ids() {
        let hints: BTreeMap<_, _> = [("Power BI".to_string(), "DAX".to_string())].into();
        let p = build_skills_panel(
            "job3",
            &skills(&[("Power BI", 8), ("C++", 2)]),
            &SkillSnapshot::default(),
            &hints,
        );
        assert_eq!(p.rows[0].hint, "DAX");
        assert_eq!(p.rows[0].name_id, "skill-name-job3-power-bi");
        assert_eq!(p.rows[0].bar_id, "skill-bar-job3-power-bi");
        assert_eq!(p.rows[1].hint, DEFAULT_HINT);
        assert_eq!(p.key, "skills-wrapper-job3-power-bi8-c2");
    }

    #[test]
    fn test_empty_skills_render_placeholder() {
        let p = panel(&[], &snapshot(&[("SQL", 3)]));
        assert!(p.rows.is_empty());
        assert_eq!(p.placeholder.as_deref(), Some(EMPTY_SKILLS_PLACEHOLDER));
    }

    #[test]
    fn test_snapshot_stores_clamped_levels() {
        let snap = SkillSnapshot::from_levels(&skills(&[("A", 42), ("B", -7), ("C", 4)]));
        assert_eq!(snap, snapshot(&[("A", 10), ("B", 0), ("C", 4)]));
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Power BI"), "power-bi");
        assert_eq!(slug("  C++ "), "c");
        assert_eq!(slug("SAP ERP/BW"), "sap-erp-bw");
        assert_eq!(slug("snake_case-ok"), "snake_case-ok");
    }
}
