use regex::Regex;
use std::borrow::Cow;
use tracing::warn;

use crate::core::error::{DependError, Result};

#[derive(Debug, Clone)]
struct MacroRule {
    pattern: String,
    regex: Regex,
    replacement: String,
}

/// Ordered pattern -> replacement rules applied to imported names.
///
/// A pattern is a regular expression anchored at the start of the name and
/// matched case-insensitively. Only the first matching rule is applied.
#[derive(Debug, Clone, Default)]
pub struct MacroTable {
    rules: Vec<MacroRule>,
}

impl MacroTable {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Parses `NAME=VALUE` definitions as given on the command line.
    pub fn from_definitions<I, S>(definitions: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for definition in definitions {
            let definition = definition.as_ref();
            let (pattern, replacement) = definition
                .split_once('=')
                .ok_or_else(|| DependError::MacroDefinition(definition.to_string()))?;
            table.insert(pattern, replacement)?;
        }
        Ok(table)
    }

    pub fn insert(&mut self, pattern: &str, replacement: &str) -> Result<()> {
        let regex = Regex::new(&format!("(?i)^(?:{pattern})")).map_err(|source| {
            DependError::InvalidMacro {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        self.rules.push(MacroRule {
            pattern: pattern.to_string(),
            regex,
            replacement: replacement.to_string(),
        });
        Ok(())
    }

    pub fn with_macro(mut self, pattern: &str, replacement: &str) -> Result<Self> {
        self.insert(pattern, replacement)?;
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Replaces the matched prefix of `name` using the first rule that matches.
    pub fn substitute<'a>(&self, name: &'a str) -> Cow<'a, str> {
        let mut matching = self
            .rules
            .iter()
            .filter_map(|rule| rule.regex.find(name).map(|m| (rule, m.end())));

        let Some((rule, matched_end)) = matching.next() else {
            return Cow::Borrowed(name);
        };

        let others: Vec<&str> = matching.map(|(other, _)| other.pattern.as_str()).collect();
        if !others.is_empty() {
            // Which rule wins here is not something callers should rely on.
            warn!(
                "Multiple macros match '{}': applying '{}', ignoring {:?}",
                name, rule.pattern, others
            );
        }

        let mut substituted = String::with_capacity(rule.replacement.len() + name.len());
        substituted.push_str(&rule.replacement);
        substituted.push_str(&name[matched_end..]);
        Cow::Owned(substituted)
    }
}
