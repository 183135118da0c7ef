//! Quick templates: named selection snapshots that can be applied in one step.

use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::sync::OnceLock;

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;

use crate::catalog::{validate_id, Catalog};
use crate::error::Error::{NonUniqueTemplateId, UnknownTemplate, UnknownTemplateOption};
use crate::error::{Error, Result};
use crate::selection::{OptionValue, Selection};

const BUILTIN_TEMPLATES: &str = include_str!("../data/templates.yml");

static BUILTIN: OnceLock<Vec<QuickTemplate>> = OnceLock::new();

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct QuickTemplate {
    pub id: String,
    pub name: String,
    pub selection: IndexMap<String, OptionValue>,
}

impl Display for QuickTemplate {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{} ({})", self.id, self.name)
    }
}

impl QuickTemplate {
    /// Turns the snapshot into a checked selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the template names an unknown option or a value
    /// is invalid for its option.
    pub fn to_selection(&self, catalog: &Catalog) -> Result<Selection> {
        let mut selection = Selection::new();

        for (id, value) in &self.selection {
            let option = catalog
                .get(id)
                .ok_or_else(|| UnknownTemplateOption(self.id.clone(), id.clone()))?;
            selection.set(option, value.clone())?;
        }

        Ok(selection)
    }
}

/// The templates shipped with the crate, checked against the built-in catalog.
///
/// # Errors
///
/// Returns an error if the embedded templates fail to parse or validate.
pub fn builtin_templates() -> Result<&'static [QuickTemplate]> {
    if let Some(templates) = BUILTIN.get() {
        return Ok(templates);
    }

    let templates: Vec<QuickTemplate> = serde_yaml::from_str(BUILTIN_TEMPLATES).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "templates".to_string(),
            "built-in templates".to_string(),
            e,
        )
    })?;
    validate_templates(&templates, Catalog::builtin()?)?;
    debug!("Loaded {} built-in templates", templates.len());

    Ok(BUILTIN.get_or_init(|| templates))
}

/// # Errors
///
/// Returns [`UnknownTemplate`] if no template has the given ID.
pub fn find_template<'a>(templates: &'a [QuickTemplate], id: &str) -> Result<&'a QuickTemplate> {
    templates
        .iter()
        .find(|template| template.id == id)
        .ok_or_else(|| UnknownTemplate(id.to_string()))
}

pub(crate) fn validate_templates(templates: &[QuickTemplate], catalog: &Catalog) -> Result<()> {
    let mut ids = HashSet::new();

    for template in templates {
        validate_id(&template.id)?;

        if !ids.insert(template.id.as_str()) {
            return Err(NonUniqueTemplateId(template.id.clone()));
        }

        template.to_selection(catalog)?;
    }

    Ok(())
}
