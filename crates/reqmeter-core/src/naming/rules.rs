//! Grouping rule compilation and matching.
//!
//! A grouping table maps a group name to a path regex. Entries are kept as an
//! ordered sequence so the first declared match wins, and each pattern is
//! anchored at compile time so it must match the whole path.

use regex::Regex;

use crate::error::{ReqMeterError, Result};

/// One compiled `(group name, path pattern)` entry.
#[derive(Debug, Clone)]
pub struct GroupingRule {
    name: String,
    pattern: Regex,
}

impl GroupingRule {
    /// Compile a rule. The pattern is wrapped as `^(?:pattern)$`.
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(ReqMeterError::BadConfig(format!(
                "grouping rule for pattern {pattern:?} has an empty name"
            )));
        }
        let pattern = Regex::new(&format!("^(?:{pattern})$")).map_err(|source| {
            ReqMeterError::InvalidPattern {
                group: name.clone(),
                source,
            }
        })?;
        Ok(Self { name, pattern })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matches(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }
}

/// Ordered, immutable grouping table. Empty means "no overrides".
#[derive(Debug, Clone, Default)]
pub struct GroupingRules {
    rules: Vec<GroupingRule>,
}

impl GroupingRules {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compile `(name, pattern)` pairs in declared order.
    pub fn compile<'a, I>(raw: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let rules = raw
            .into_iter()
            .map(|(name, pattern)| GroupingRule::new(name, pattern))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(rules = rules.len(), "grouping rules compiled");
        Ok(Self { rules })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroupingRule> {
        self.rules.iter()
    }

    /// Name of the first rule whose pattern matches the whole path.
    pub fn first_match(&self, path: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| r.matches(path))
            .map(GroupingRule::name)
    }
}
