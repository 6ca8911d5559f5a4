//! Filter pattern compilation
//!
//! Filter text is treated as a case-insensitive regular expression searched
//! anywhere in an item. Text that does not compile is handled by an
//! [`InvalidFilterPolicy`] instead of failing the render.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid filter pattern {pattern:?}: {source}")]
pub struct FilterError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// What to do with filter text that is not a valid pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidFilterPolicy {
    /// Show nothing until the pattern becomes valid
    #[default]
    MatchNone,
    /// Match the raw text as a case-insensitive substring
    Literal,
}

#[derive(Debug, Clone)]
enum Matcher {
    Pattern(Regex),
    Nothing,
}

#[derive(Debug, Clone)]
pub struct FilterPattern {
    matcher: Matcher,
    valid: bool,
}

impl FilterPattern {
    /// Compile filter text as a case-insensitive, unanchored pattern
    pub fn compile(text: &str) -> Result<Self, FilterError> {
        let regex = build(text).map_err(|source| FilterError {
            pattern: text.to_string(),
            source,
        })?;
        Ok(Self {
            matcher: Matcher::Pattern(regex),
            valid: true,
        })
    }

    /// Compile filter text, falling back to `policy` when it is not a valid pattern
    pub fn from_text(text: &str, policy: InvalidFilterPolicy) -> Self {
        match Self::compile(text) {
            Ok(pattern) => pattern,
            Err(e) => {
                tracing::debug!("{}; applying {:?}", e, policy);
                let matcher = match policy {
                    InvalidFilterPolicy::MatchNone => Matcher::Nothing,
                    // An escaped pattern always compiles
                    InvalidFilterPolicy::Literal => build(&regex::escape(text))
                        .map(Matcher::Pattern)
                        .unwrap_or(Matcher::Nothing),
                };
                Self {
                    matcher,
                    valid: false,
                }
            }
        }
    }

    pub fn is_match(&self, item: &str) -> bool {
        match &self.matcher {
            Matcher::Pattern(re) => re.is_match(item),
            Matcher::Nothing => false,
        }
    }

    /// Whether the filter text compiled as written
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl Default for FilterPattern {
    /// The empty pattern, which matches every item
    fn default() -> Self {
        Self::from_text("", InvalidFilterPolicy::default())
    }
}

fn build(text: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(text).case_insensitive(true).build()
}
