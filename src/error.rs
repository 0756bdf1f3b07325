use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid regex {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    /// Unparsable JSON keeps the parser error as its source.
    #[error("malformed groups: {reason}")]
    MalformedConfig {
        reason: String,
        #[source]
        source: Option<serde_json::Error>,
    },
}

impl Error {
    pub fn malformed(reason: String) -> Self {
        Error::MalformedConfig {
            reason,
            source: None,
        }
    }
}
