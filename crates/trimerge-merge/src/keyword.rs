//! Volatile keyword lines.
//!
//! Version-control systems that expand keywords such as `$Id$` or
//! `$Revision$` rewrite those lines on every checkout, so both sides of a
//! merge routinely disagree about them. A [`KeywordPolicy`] marks such lines;
//! when both sides insert competing lines it accepts, the merger keeps mine's
//! line instead of raising a conflict.

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::error::{MergeError, Result};

/// Pattern for keywords expanded inside a `//` line comment, e.g.
/// `// $Id: top.v 1234 2024-01-01 $`.
pub const SVN_KEYWORD_PATTERN: &str = r"//\s*\$.*\$";

static SVN_KEYWORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SVN_KEYWORD_PATTERN).expect("built-in keyword pattern is valid"));

/// Predicate deciding whether a line is volatile.
#[derive(Clone)]
pub struct KeywordPolicy {
    predicate: Arc<dyn Fn(&str) -> bool + Send + Sync>,
    label: String,
}

impl KeywordPolicy {
    /// Wrap an arbitrary predicate over a line's content.
    pub fn custom<F>(label: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            label: label.into(),
        }
    }

    /// Lines matching `pattern` anywhere are volatile.
    pub fn pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| MergeError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self::from_regex(regex))
    }

    /// Use an already compiled regular expression.
    pub fn from_regex(regex: Regex) -> Self {
        let label = regex.as_str().to_string();
        Self::custom(label, move |line| regex.is_match(line))
    }

    /// Keyword expansions inside `//` comments (Verilog, C, C++ sources).
    pub fn svn_keywords() -> Self {
        Self::from_regex(SVN_KEYWORDS.clone())
    }

    /// Returns `true` if `line` is volatile under this policy.
    pub fn is_volatile(&self, line: &str) -> bool {
        (self.predicate)(line)
    }

    /// Human-readable description, the pattern for regex policies.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for KeywordPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeywordPolicy")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
