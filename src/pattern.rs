use regex::{Regex, RegexBuilder};

use crate::error::Error;

/// A single rule folding merchant names into a group. Raw patterns wrapped in
/// slashes (`/body/` or `/body/i`) are regular expressions, anything else is
/// compared literally.
#[derive(Debug, Clone)]
pub enum Pattern {
    Literal(String),
    Regex { regex: Regex, insensitive: bool },
}

impl Pattern {
    /// Classifies and compiles a raw pattern. Empty patterns yield `None`.
    pub fn parse(raw: &str) -> Result<Option<Pattern>, Error> {
        if raw.is_empty() {
            return Ok(None);
        }

        // The delimiters may share a slash, so "/" is an empty regex and
        // "/i" is a case-insensitive "i".
        let (body, insensitive) = match raw.strip_prefix('/') {
            Some(rest) if raw.ends_with('/') => {
                (rest.strip_suffix('/').unwrap_or(rest), false)
            }
            Some(rest) if raw.ends_with("/i") => {
                (rest.strip_suffix("/i").unwrap_or(rest), true)
            }
            _ => return Ok(Some(Pattern::Literal(raw.to_owned()))),
        };

        let regex = RegexBuilder::new(body)
            .case_insensitive(insensitive)
            .build()
            .map_err(|source| Error::InvalidPattern {
                pattern: raw.to_owned(),
                source,
            })?;

        Ok(Some(Pattern::Regex { regex, insensitive }))
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Pattern::Literal(literal) => literal == name,
            Pattern::Regex { regex, .. } => regex.is_match(name),
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pattern::Literal(literal) => f.pad(literal),
            Pattern::Regex {
                regex,
                insensitive: true,
            } => f.pad(&format!("/{}/i", regex.as_str())),
            Pattern::Regex {
                regex,
                insensitive: false,
            } => f.pad(&format!("/{}/", regex.as_str())),
        }
    }
}
