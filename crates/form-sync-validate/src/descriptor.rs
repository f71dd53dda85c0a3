use std::collections::BTreeSet;
use std::fmt;

use serde_json::{Map, Value};

/// A declarative validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rule {
    Required,
    Min,
    Max,
    MaxLength,
    Pattern,
}

impl Rule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Min => "min",
            Rule::Max => "max",
            Rule::MaxLength => "maxLength",
            Rule::Pattern => "pattern",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of rules a field violated. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorDescriptor {
    rules: BTreeSet<Rule>,
}

impl ErrorDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rule: Rule) {
        self.rules.insert(rule);
    }

    pub fn contains(&self, rule: Rule) -> bool {
        self.rules.contains(&rule)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Rule> + '_ {
        self.rules.iter().copied()
    }

    /// The error-store form: `{"required": true, "pattern": true}`.
    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .rules
            .iter()
            .map(|rule| (rule.as_str().to_string(), Value::Bool(true)))
            .collect();
        Value::Object(map)
    }
}

impl FromIterator<Rule> for ErrorDescriptor {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_value() {
        let descriptor: ErrorDescriptor = [Rule::Pattern, Rule::MaxLength].into_iter().collect();
        assert_eq!(descriptor.to_value(), json!({"maxLength": true, "pattern": true}));
        assert_eq!(ErrorDescriptor::new().to_value(), json!({}));
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut descriptor = ErrorDescriptor::new();
        descriptor.insert(Rule::Required);
        descriptor.insert(Rule::Required);
        assert_eq!(descriptor.len(), 1);
        assert!(descriptor.contains(Rule::Required));
        assert!(!descriptor.contains(Rule::Min));
    }
}
