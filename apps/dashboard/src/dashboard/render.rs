//! View-model renderer: selected job + previous skill snapshot → everything
//! the job panel, timeline and skills card need.

use serde::Serialize;
use tracing::warn;

use crate::dashboard::skills::{build_skills_panel, SkillSnapshot, SkillsPanel};
use crate::profile::loader::Catalog;
use crate::timeline::figure::{build_figure, FigureSpec};

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub job_id: String,
    pub title: String,
    pub period: String,
    pub tasks: Vec<String>,
    pub stack_line: String,
    pub figure: FigureSpec,
    pub skills: SkillsPanel,
}

/// A render result. `snapshot` replaces the session's previous snapshot.
#[derive(Debug, Clone)]
pub struct RenderedJob {
    pub view: DashboardView,
    pub snapshot: SkillSnapshot,
}

/// Pure: does not touch session state. Unknown ids fall back to the first job.
pub fn render_job(
    catalog: &Catalog,
    selected_job_id: &str,
    previous: &SkillSnapshot,
) -> RenderedJob {
    let store = &catalog.store;
    let (index, job) = match store.find(selected_job_id) {
        Some(found) => found,
        None => {
            warn!("Unknown job id '{selected_job_id}', rendering first job instead");
            (0, store.first())
        }
    };

    let figure = build_figure(store, &catalog.chronology, index);
    let skills = build_skills_panel(&job.id, &job.skills, previous, &catalog.skill_hints);

    RenderedJob {
        view: DashboardView {
            job_id: job.id.clone(),
            title: format!("{} — {}", job.company, job.role),
            period: job.period.clone(),
            tasks: job.tasks.clone(),
            stack_line: format!("Stack: {}", job.stack.join(" · ")),
            figure,
            skills,
        },
        snapshot: SkillSnapshot::from_levels(&job.skills),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::loader::tests::scenario_catalog;
    use crate::timeline::figure::AnnotationPlacement;

    #[test]
    fn test_text_panels() {
        let catalog = scenario_catalog();
        let r = render_job(&catalog, "b", &SkillSnapshot::default());
        assert_eq!(r.view.job_id, "b");
        assert_eq!(r.view.title, "Beta — Lead");
        assert_eq!(r.view.period, "2022 — Now");
        assert_eq!(r.view.tasks, vec!["Led team", "Tuned queries"]);
        assert_eq!(r.view.stack_line, "Stack: SQL · Excel");
    }

    #[test]
    fn test_figure_highlights_selected_job() {
        let catalog = scenario_catalog();
        let r = render_job(&catalog, "a", &SkillSnapshot::default());
        assert_eq!(r.view.figure.traces[2].x, vec![2020.0]);
        assert_eq!(r.view.figure.annotation.company, "Alpha");
        // 2020 → 2022 is wider than the label threshold
        assert_eq!(
            r.view.figure.annotation.placement,
            AnnotationPlacement::Centered
        );
    }

    #[test]
    fn test_unknown_id_falls_back_to_first() {
        let catalog = scenario_catalog();
        let r = render_job(&catalog, "zzz", &SkillSnapshot::default());
        assert_eq!(r.view.job_id, "a");
    }

    #[test]
    fn test_snapshot_is_selected_jobs_skills_only() {
        let catalog = scenario_catalog();
        let prev = SkillSnapshot([("Rust".to_string(), 9)].into());
        let r = render_job(&catalog, "a", &prev);
        assert_eq!(r.snapshot, SkillSnapshot([("SQL".to_string(), 5)].into()));
    }

    #[test]
    fn test_only_selected_jobs_data_in_panels() {
        let catalog = scenario_catalog();
        let r = render_job(&catalog, "a", &SkillSnapshot::default());
        let names: Vec<_> = r.view.skills.rows.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["SQL"]);
        assert!(!r.view.tasks.iter().any(|t| t == "Led team"));
    }
}
