//! The user's current choices: option ID to value.

use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::Error::{
    FlagWithValue, InvalidNumber, MissingValue, NotAChoice, NumberOutOfRange,
};
use crate::error::Result;
use crate::option_definitions::{OptionDefinition, ValueType};

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum OptionValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl Display for OptionValue {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionValue::Flag(flag) => write!(formatter, "{flag}"),
            OptionValue::Number(number) => write!(formatter, "{number}"),
            OptionValue::Text(text) => formatter.write_str(text),
        }
    }
}

impl OptionValue {
    /// Builds a value from command-line text.
    ///
    /// Switches accept no value, `true` or `false`; every other type needs a value.
    /// `Ok(None)` means the option ends up unselected.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not fit the option's type.
    pub fn from_argument(option: &OptionDefinition, raw: Option<&str>) -> Result<Option<Self>> {
        match (option.value_type, raw) {
            (ValueType::Boolean, None) => Ok(Some(OptionValue::Flag(true))),
            (ValueType::Boolean, Some(raw)) => match raw.trim().to_lowercase().as_str() {
                "true" => Ok(Some(OptionValue::Flag(true))),
                "false" => Ok(None),
                _ => Err(FlagWithValue(option.id.clone())),
            },
            (_, None) => Err(MissingValue(option.id.clone())),
            (_, Some(raw)) => OptionValue::Text(raw.to_string()).coerce(option),
        }
    }

    /// Checks this value against `option` and converts it to the canonical form
    /// for the option's type.
    ///
    /// `Ok(None)` means the value deselects the option (`false` or empty text).
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not valid for the option.
    pub fn coerce(self, option: &OptionDefinition) -> Result<Option<Self>> {
        if self == OptionValue::Flag(false) {
            return Ok(None);
        }

        match option.value_type {
            ValueType::Boolean => match self {
                OptionValue::Flag(_) => Ok(Some(self)),
                _ => Err(FlagWithValue(option.id.clone())),
            },
            ValueType::Number => {
                let number = match self {
                    OptionValue::Number(number) => number,
                    OptionValue::Text(text) if text.trim().is_empty() => return Ok(None),
                    OptionValue::Text(text) => text
                        .trim()
                        .parse::<f64>()
                        .ok()
                        .filter(|number| number.is_finite())
                        .ok_or_else(|| InvalidNumber(option.id.clone(), text.clone()))?,
                    OptionValue::Flag(_) => return Err(MissingValue(option.id.clone())),
                };
                check_range(option, number)?;
                Ok(Some(OptionValue::Number(number)))
            }
            ValueType::String | ValueType::Select => {
                let text = match self {
                    OptionValue::Text(text) => text,
                    OptionValue::Number(number) => number.to_string(),
                    OptionValue::Flag(_) => return Err(MissingValue(option.id.clone())),
                };

                if text.is_empty() {
                    return Ok(None);
                }

                if option.value_type == ValueType::Select {
                    check_choice(option, &text)?;
                }

                Ok(Some(OptionValue::Text(text)))
            }
        }
    }
}

fn check_range(option: &OptionDefinition, number: f64) -> Result<()> {
    let below = option.min.is_some_and(|min| number < min);
    let above = option.max.is_some_and(|max| number > max);

    if below || above {
        return Err(NumberOutOfRange {
            id: option.id.clone(),
            value: number,
            range: option.range_description().unwrap_or_default(),
        });
    }

    Ok(())
}

fn check_choice(option: &OptionDefinition, text: &str) -> Result<()> {
    let choices = option.choice_values();

    if choices.is_empty() || choices.contains(&text) {
        return Ok(());
    }

    Err(NotAChoice {
        id: option.id.clone(),
        value: text.to_string(),
        choices: choices.join(", "),
    })
}

/// Selected options in the order they were first chosen.
///
/// Switches are only ever stored as `true`; deselecting removes the entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    entries: IndexMap<String, OptionValue>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value for `option`, or removes it if the value deselects it.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not valid for the option; the
    /// selection is left unchanged in that case.
    pub fn set(&mut self, option: &OptionDefinition, value: OptionValue) -> Result<()> {
        match value.coerce(option)? {
            Some(value) => {
                self.entries.insert(option.id.clone(), value);
            }
            None => {
                self.entries.shift_remove(&option.id);
            }
        }

        Ok(())
    }

    /// Removes an entry, returning whether it was present.
    pub fn remove(&mut self, id: &str) -> bool {
        self.entries.shift_remove(id).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&OptionValue> {
        self.entries.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(id, value)| (id.as_str(), value))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub(crate) fn retain(&mut self, keep: impl FnMut(&String, &mut OptionValue) -> bool) {
        self.entries.retain(keep);
    }

    pub(crate) fn insert_if_absent(&mut self, id: &str, value: OptionValue) {
        if !self.entries.contains_key(id) {
            self.entries.insert(id.to_string(), value);
        }
    }
}
