use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

fn default_requires_url() -> bool {
    true
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Boolean,
    String,
    Number,
    Select,
}

impl Display for ValueType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(match self {
            ValueType::Boolean => "boolean",
            ValueType::String => "string",
            ValueType::Number => "number",
            ValueType::Select => "select",
        })
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ChoiceDefinition {
    pub label: String,
    pub value: String,
}

/// One selectable yt-dlp flag from the option catalog.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct OptionDefinition {
    pub id: String,
    pub name: String,
    pub flag: String,
    /// Single-letter alias such as `-x`.
    pub short_flag: Option<String>,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    pub description: Option<String>,
    pub placeholder: Option<String>,
    pub example: Option<String>,
    #[serde(default)]
    pub incompatible_with: Vec<String>,
    #[serde(default = "default_requires_url")]
    pub requires_url: bool,
    #[serde(default)]
    pub utility_only: bool,
    #[serde(default)]
    pub info_command: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub choices: Option<Vec<ChoiceDefinition>>,
}

impl OptionDefinition {
    /// Whether `flag` is this option's long flag or its short alias.
    #[must_use]
    pub fn answers_to(&self, flag: &str) -> bool {
        self.flag == flag || self.short_flag.as_deref() == Some(flag)
    }

    #[must_use]
    pub fn is_switch(&self) -> bool {
        self.value_type == ValueType::Boolean
    }

    /// Human readable range, e.g. `>= 1` or `0..=10`, if the option has bounds.
    #[must_use]
    pub fn range_description(&self) -> Option<String> {
        match (self.min, self.max) {
            (Some(min), Some(max)) => Some(format!("{min}..={max}")),
            (Some(min), None) => Some(format!(">= {min}")),
            (None, Some(max)) => Some(format!("<= {max}")),
            (None, None) => None,
        }
    }

    #[must_use]
    pub fn choice_values(&self) -> Vec<&str> {
        self.choices
            .iter()
            .flatten()
            .map(|choice| choice.value.as_str())
            .collect()
    }
}

impl Display for OptionDefinition {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "\"{}\" ({})", self.name, self.flag)
    }
}
