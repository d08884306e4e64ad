// SPDX-License-Identifier: MIT

//!
//! Date token configuration
//!
//! Each named segment of an [`AbstractDate`](crate::AbstractDate) is displayed
//! according to a [`DateTokenConfiguration`]: either as a (padded) number, or
//! as an entry looked up in a dictionary of labels.
//!

use serde::{Deserialize, Serialize};

/// How a single date segment is displayed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DateTokenConfiguration {
    /// Display the segment as a number
    #[serde(rename = "number")]
    Numeric(NumericTokenConfiguration),

    /// Display the segment as a label from a dictionary
    #[serde(rename = "string")]
    Enumerated(EnumeratedTokenConfiguration),
}

impl DateTokenConfiguration {
    /// Create a numeric configuration using the default settings
    pub fn numeric<S: ToString>(name: S) -> Self {
        DateTokenConfiguration::Numeric(NumericTokenConfiguration::new(name))
    }

    /// Create an enumerated configuration with the given labels
    pub fn enumerated<S: ToString>(name: S, dictionary: Vec<String>) -> Self {
        DateTokenConfiguration::Enumerated(EnumeratedTokenConfiguration {
            name: name.to_string(),
            dictionary,
            formatting: Vec::new(),
        })
    }

    /// The segment name this configuration applies to
    pub fn name(&self) -> &str {
        match self {
            DateTokenConfiguration::Numeric(configuration) => &configuration.name,
            DateTokenConfiguration::Enumerated(configuration) => &configuration.name,
        }
    }

    /// The conditional formatting rules, in the order they are applied
    pub fn formatting(&self) -> &[ConditionalFormat] {
        match self {
            DateTokenConfiguration::Numeric(configuration) => &configuration.formatting,
            DateTokenConfiguration::Enumerated(configuration) => &configuration.formatting,
        }
    }

    /// Whether a segment with this value is not displayed at all
    pub fn hides(&self, value: i64) -> bool {
        match self {
            DateTokenConfiguration::Numeric(configuration) => {
                value == 0 && !configuration.display_when_zero
            }
            DateTokenConfiguration::Enumerated(_) => false,
        }
    }
}

/// Numeric segment display settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericTokenConfiguration {
    pub name: String,

    /// Left pad with zeros up to this many digits (`<= 0` disables padding)
    #[serde(default = "default_min_length", alias = "minLeght")]
    pub min_length: i32,

    /// If `false`, a zero value is displayed as an empty string
    #[serde(default = "default_true")]
    pub display_when_zero: bool,

    /// If `true`, negative values are displayed without their `-`
    #[serde(default)]
    pub hide_sign: bool,

    #[serde(default)]
    pub formatting: Vec<ConditionalFormat>,
}

impl NumericTokenConfiguration {
    pub fn new<S: ToString>(name: S) -> Self {
        Self {
            name: name.to_string(),
            min_length: default_min_length(),
            display_when_zero: true,
            hide_sign: false,
            formatting: Vec::new(),
        }
    }
}

/// Enumerated segment display settings.  The segment's value is used as the
/// index into the dictionary (index 0 is conventionally unused).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumeratedTokenConfiguration {
    pub name: String,
    pub dictionary: Vec<String>,

    #[serde(default)]
    pub formatting: Vec<ConditionalFormat>,
}

/// A formatting rule applied when its evaluations match.  The `format`
/// string's `{value}` placeholder is replaced by the token formatted so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalFormat {
    pub evaluations: Vec<Evaluation>,

    /// `true`: any evaluation may match.  `false`: all evaluations must match.
    pub conditions_are_exclusive: bool,

    pub format: String,
}

impl ConditionalFormat {
    /// Whether the rule applies to the raw segment value
    pub fn matches(&self, value: i64) -> bool {
        let mut evaluations = self.evaluations.iter();
        if self.conditions_are_exclusive {
            evaluations.any(|evaluation| evaluation.matches(value))
        } else {
            evaluations.all(|evaluation| evaluation.matches(value))
        }
    }
}

/// A single comparison of the raw segment value against a constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub condition: Condition,
    pub value: i64,
}

impl Evaluation {
    pub fn matches(&self, value: i64) -> bool {
        self.condition.evaluate(value, self.value)
    }
}

#[rustfmt::skip]
#[derive(derive_more::Display, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    #[display("==")] Equal,
    #[display("!=")] NotEqual,
    #[display(">")]  Greater,
    #[display(">=")] GreaterOrEqual,
    #[display("<")]  Less,
    #[display("<=")] LessOrEqual,
}

impl Condition {
    /// Evaluate `left <condition> right`
    pub fn evaluate(self, left: i64, right: i64) -> bool {
        match self {
            Condition::Equal => left == right,
            Condition::NotEqual => left != right,
            Condition::Greater => left > right,
            Condition::GreaterOrEqual => left >= right,
            Condition::Less => left < right,
            Condition::LessOrEqual => left <= right,
        }
    }
}

fn default_min_length() -> i32 {
    2
}

fn default_true() -> bool {
    true
}
