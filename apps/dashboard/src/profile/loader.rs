//! Loads the profile document once at startup and freezes it into a `Catalog`.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use tracing::info;

use crate::models::profile::{Education, Profile, ProfileDocument};
use crate::profile::error::ProfileError;
use crate::profile::store::ExperienceStore;
use crate::timeline::chronology::{Chronology, NowPolicy};

/// Document compiled into the binary, used when `CV_DATA_PATH` is unset.
const EMBEDDED_DOCUMENT: &str = include_str!("../../data/cv.json");

/// Everything the dashboard renders from. Immutable after load and shared by all sessions.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub profile: Profile,
    pub education: Option<Education>,
    pub skill_hints: BTreeMap<String, String>,
    pub store: ExperienceStore,
    pub chronology: Chronology,
}

impl Catalog {
    pub fn from_document(
        document: ProfileDocument,
        policy: NowPolicy,
        today: NaiveDate,
    ) -> Result<Self, ProfileError> {
        let store = ExperienceStore::from_entries(document.experience)?;
        let chronology = Chronology::build(&store, policy, today)?;
        Ok(Self {
            profile: document.profile,
            education: document.education,
            skill_hints: document.skill_hints,
            store,
            chronology,
        })
    }
}

pub fn parse_document(raw: &str) -> Result<ProfileDocument, ProfileError> {
    Ok(serde_json::from_str(raw)?)
}

/// Reads the document from `path`, or the embedded one when `path` is `None`.
pub async fn load_document(path: Option<&Path>) -> Result<ProfileDocument, ProfileError> {
    match path {
        Some(path) => {
            info!("Loading profile document from {}", path.display());
            let raw = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ProfileError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
            parse_document(&raw)
        }
        None => {
            info!("Using embedded profile document");
            parse_document(EMBEDDED_DOCUMENT)
        }
    }
}

pub async fn load_catalog(
    path: Option<&Path>,
    policy: NowPolicy,
    today: NaiveDate,
) -> Result<Catalog, ProfileError> {
    let document = load_document(path).await?;
    let catalog = Catalog::from_document(document, policy, today)?;
    info!(
        "Loaded {} jobs; timeline spans {:.2} → {:.2}",
        catalog.store.len(),
        catalog.chronology.start,
        catalog.chronology.now
    );
    Ok(catalog)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;

    pub(crate) fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    /// Two-job catalog used across module tests.
    pub(crate) fn scenario_catalog() -> Catalog {
        let document = parse_document(
            r#"{
                "profile": { "name": "Test Person", "title": "Analyst" },
                "skill_hints": { "SQL": "Queries" },
                "experience": [
                    { "id": "a", "ordinal": 2020, "company": "Alpha", "role": "Analyst",
                      "period": "2020 — 2022", "start_label": "2020",
                      "tasks": ["Built reports"], "stack": ["SQL"],
                      "skills": { "SQL": 5 } },
                    { "id": "b", "ordinal": 2022, "company": "Beta", "role": "Lead",
                      "period": "2022 — Now", "start_label": "2022",
                      "tasks": ["Led team", "Tuned queries"], "stack": ["SQL", "Excel"],
                      "skills": { "SQL": 8, "Excel": 2 } }
                ]
            }"#,
        )
        .unwrap();
        Catalog::from_document(document, NowPolicy::default(), today()).unwrap()
    }

    #[test]
    fn test_embedded_document_is_valid() {
        let document = parse_document(EMBEDDED_DOCUMENT).unwrap();
        let catalog = Catalog::from_document(document, NowPolicy::default(), today()).unwrap();
        assert_eq!(catalog.store.len(), 3);
        assert_eq!(catalog.store.first().id, "job3");
        assert!(catalog.chronology.xs.iter().all(|&x| catalog.chronology.now > x));
    }

    #[test]
    fn test_empty_experience_is_fatal() {
        let document =
            parse_document(r#"{ "profile": { "name": "X", "title": "Y" }, "experience": [] }"#)
                .unwrap();
        let err = Catalog::from_document(document, NowPolicy::default(), today()).unwrap_err();
        assert!(matches!(err, ProfileError::EmptyExperience));
        assert!(err.to_string().contains("no experience"));
    }

    #[test]
    fn test_missing_experience_key_is_parse_error() {
        let err = parse_document(r#"{ "profile": { "name": "X", "title": "Y" } }"#).unwrap_err();
        assert!(matches!(err, ProfileError::Parse(_)));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "profile": {{ "name": "File", "title": "T" }},
                 "experience": [ {{ "id": "only", "start_date": "2018-01-01",
                                    "company": "C", "role": "R", "period": "P" }} ] }}"#
        )
        .unwrap();
        let catalog = load_catalog(Some(file.path()), NowPolicy::default(), today())
            .await
            .unwrap();
        assert_eq!(catalog.profile.name, "File");
        assert_eq!(catalog.store.first().ordinal, 2018.0);
        assert_eq!(catalog.store.first().start_label, "Jan 2018");
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_catalog(
            Some(&dir.path().join("absent.json")),
            NowPolicy::default(),
            today(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ProfileError::Io { .. }));
    }

    #[tokio::test]
    async fn test_load_embedded_when_no_path() {
        let catalog = load_catalog(None, NowPolicy::default(), today()).await.unwrap();
        assert_eq!(catalog.store.len(), 3);
    }
}
