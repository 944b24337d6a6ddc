use thiserror::Error;

/// Problems with the profile document. All of them are fatal at load time:
/// the dashboard cannot draw a timeline without this data.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile document has no experience entries")]
    EmptyExperience,

    #[error("experience entry #{index} is missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },

    #[error("duplicate job id '{0}'")]
    DuplicateId(String),

    #[error("job '{0}' has neither 'ordinal' nor 'start_date'; cannot place it on the timeline")]
    MissingCoordinate(String),

    #[error("job '{id}' has non-finite ordinal {value}")]
    InvalidOrdinal { id: String, value: f64 },

    #[error("invalid now policy: {0}")]
    InvalidNowPolicy(String),

    #[error("'now' coordinate {now} does not come after the latest job at {latest}")]
    NowNotAfterLatest { now: f64, latest: f64 },

    #[error("failed to read profile document {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse profile document: {0}")]
    Parse(#[from] serde_json::Error),
}
