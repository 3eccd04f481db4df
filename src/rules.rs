// Ordered keyword rules
//
// First-match-wins rule tables, as used by the canned responder. Precedence
// is the order rules were added; the default is explicit.

use crate::error::RuleError;
use aho_corasick::{AhoCorasick, AhoCorasickBuilder};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Condition that selects a rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RuleCondition {
    /// Any of the keywords appears (case-insensitive substring)
    AnyLiteral(Vec<String>),
    /// Regex pattern match
    Regex(String),
}

impl RuleCondition {
    /// Convenience constructor for keyword conditions
    pub fn any_of<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AnyLiteral(keywords.into_iter().map(Into::into).collect())
    }
}

/// Compiled form of a [`RuleCondition`]
enum Matcher {
    Literal(Option<AhoCorasick>),
    Regex(Regex),
}

impl Matcher {
    fn compile(condition: &RuleCondition) -> Result<Self, RuleError> {
        match condition {
            RuleCondition::AnyLiteral(keywords) => {
                let keywords: Vec<String> = keywords
                    .iter()
                    .filter(|k| !k.is_empty())
                    .map(|k| k.to_lowercase())
                    .collect();
                if keywords.is_empty() {
                    return Ok(Self::Literal(None));
                }
                let automaton = AhoCorasickBuilder::new()
                    .ascii_case_insensitive(true)
                    .build(&keywords)
                    .map_err(|e| RuleError::InvalidPattern {
                        pattern: keywords.join("|"),
                        message: e.to_string(),
                    })?;
                Ok(Self::Literal(Some(automaton)))
            }
            RuleCondition::Regex(pattern) => Regex::new(pattern)
                .map(Self::Regex)
                .map_err(|e| RuleError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                }),
        }
    }

    fn is_match(&self, lowercase_text: &str) -> bool {
        match self {
            Self::Literal(Some(ac)) => ac.is_match(lowercase_text),
            Self::Literal(None) => false,
            Self::Regex(re) => re.is_match(lowercase_text),
        }
    }
}

struct Rule<T> {
    condition: RuleCondition,
    matcher: Matcher,
    result: T,
}

/// Ordered sequence of `{condition, result}` rules with an explicit default
pub struct RuleTable<T> {
    rules: Vec<Rule<T>>,
    default: T,
}

impl<T> RuleTable<T> {
    /// Create an empty table that always yields `default`
    pub fn new(default: T) -> Self {
        Self {
            rules: Vec::new(),
            default,
        }
    }

    /// Append a rule. Rules added earlier take precedence.
    pub fn rule(mut self, condition: RuleCondition, result: T) -> Result<Self, RuleError> {
        let matcher = Matcher::compile(&condition)?;
        self.rules.push(Rule {
            condition,
            matcher,
            result,
        });
        Ok(self)
    }

    /// Result of the first matching rule, if any
    ///
    /// Regex conditions see the lower-cased text.
    pub fn first_match(&self, text: &str) -> Option<&T> {
        let lowercase = text.to_lowercase();
        self.rules.iter().enumerate().find_map(|(idx, rule)| {
            if rule.matcher.is_match(&lowercase) {
                trace!(rule_index = idx, condition = ?rule.condition, "Rule matched");
                Some(&rule.result)
            } else {
                None
            }
        })
    }

    /// Result of the first matching rule, or the default
    pub fn evaluate(&self, text: &str) -> &T {
        self.first_match(text).unwrap_or(&self.default)
    }

    /// The fallback result
    pub fn default_result(&self) -> &T {
        &self.default
    }

    /// Conditions in precedence order
    pub fn conditions(&self) -> impl Iterator<Item = &RuleCondition> {
        self.rules.iter().map(|r| &r.condition)
    }

    /// Number of rules, not counting the default
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for RuleTable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleTable")
            .field("rules", &self.rules.iter().map(|r| &r.condition).collect::<Vec<_>>())
            .field("default", &self.default)
            .finish()
    }
}
