//! The option catalog: every flag the builder knows about, grouped by category.
//!
//! The built-in catalog is embedded from `data/options.yml` and parsed once per
//! process; [`Catalog::builtin`] hands out a shared, read-only reference.

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::sync::OnceLock;

use indexmap::IndexMap;
use log::{debug, warn};
use serde::Deserialize;

use crate::error::Error::{
    EmptyId, IdWithSpace, InvalidFlag, MissingChoices, NonUniqueOptionId, NumericId,
};
use crate::error::{Error, Result};
use crate::option_definitions::{OptionDefinition, ValueType};

const BUILTIN_CATALOG: &str = include_str!("../data/options.yml");

static BUILTIN: OnceLock<Catalog> = OnceLock::new();

#[derive(Deserialize, Debug)]
struct CatalogFile {
    categories: IndexMap<String, Vec<OptionDefinition>>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    categories: IndexMap<String, Vec<OptionDefinition>>,
    /// Option ID to (category index, position in category).
    positions: HashMap<String, (usize, usize)>,
}

impl Catalog {
    /// The catalog shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded catalog fails to parse or validate.
    pub fn builtin() -> Result<&'static Catalog> {
        if let Some(catalog) = BUILTIN.get() {
            return Ok(catalog);
        }

        let catalog = Self::from_yaml_str(BUILTIN_CATALOG, "built-in catalog")?;
        debug!("Loaded built-in catalog with {} options", catalog.len());

        Ok(BUILTIN.get_or_init(|| catalog))
    }

    /// Parses and validates a catalog from YAML text.
    ///
    /// `source` names where the text came from and is used in error messages.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, the catalog is empty, or
    /// option IDs, flags or choices are invalid.
    pub fn from_yaml_str(yaml: &str, source: &str) -> Result<Self> {
        let parsed: CatalogFile = serde_yaml::from_str(yaml).map_err(|e| {
            Error::yaml_error(
                "reading".to_string(),
                "catalog".to_string(),
                source.to_string(),
                e,
            )
        })?;

        Self::from_categories(parsed.categories, source)
    }

    /// Parses and validates a catalog from a reader.
    ///
    /// # Errors
    ///
    /// See [`Catalog::from_yaml_str`].
    pub fn from_reader<R: Read>(reader: R, source: &str) -> Result<Self> {
        let parsed: CatalogFile = serde_yaml::from_reader(reader).map_err(|e| {
            Error::yaml_error(
                "reading".to_string(),
                "catalog".to_string(),
                source.to_string(),
                e,
            )
        })?;

        Self::from_categories(parsed.categories, source)
    }

    fn from_categories(
        categories: IndexMap<String, Vec<OptionDefinition>>,
        source: &str,
    ) -> Result<Self> {
        if categories.values().all(Vec::is_empty) {
            return Err(Error::empty_catalog(source.to_string()));
        }

        let mut positions = HashMap::new();

        for (category_index, options) in categories.values().enumerate() {
            for (option_index, option) in options.iter().enumerate() {
                validate_option(option)?;

                if positions
                    .insert(option.id.clone(), (category_index, option_index))
                    .is_some()
                {
                    return Err(NonUniqueOptionId(option.id.clone()));
                }
            }
        }

        let catalog = Self {
            categories,
            positions,
        };
        catalog.warn_on_stale_references();

        Ok(catalog)
    }

    fn warn_on_stale_references(&self) {
        for option in self.options() {
            for other in &option.incompatible_with {
                if !self.positions.contains_key(other) {
                    warn!(
                        "Option `{}` is declared incompatible with unknown option `{other}`",
                        option.id
                    );
                }
            }
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&OptionDefinition> {
        let (category_index, option_index) = *self.positions.get(id)?;
        self.categories
            .get_index(category_index)
            .and_then(|(_, options)| options.get(option_index))
    }

    /// Looks an option up by its flag text, e.g. `--embed-subs` or the alias `-x`.
    #[must_use]
    pub fn find_by_flag(&self, flag: &str) -> Option<&OptionDefinition> {
        self.options().find(|option| option.answers_to(flag))
    }

    #[must_use]
    pub fn category_of(&self, id: &str) -> Option<&str> {
        let (category_index, _) = *self.positions.get(id)?;
        self.categories
            .get_index(category_index)
            .map(|(name, _)| name.as_str())
    }

    /// All options, in category order then declaration order.
    pub fn options(&self) -> impl Iterator<Item = &OptionDefinition> {
        self.categories.values().flatten()
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &[OptionDefinition])> {
        self.categories
            .iter()
            .map(|(name, options)| (name.as_str(), options.as_slice()))
    }

    #[must_use]
    pub fn category(&self, name: &str) -> Option<&[OptionDefinition]> {
        self.categories.get(name).map(Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Options whose name, flag or description contains `term`, ignoring case.
    ///
    /// Results stay grouped by category; categories without a hit are left out.
    /// A blank term matches everything.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<(&str, Vec<&OptionDefinition>)> {
        let term = term.trim().to_lowercase();

        self.categories()
            .filter_map(|(name, options)| {
                let hits: Vec<&OptionDefinition> = options
                    .iter()
                    .filter(|option| term.is_empty() || matches_term(option, &term))
                    .collect();

                (!hits.is_empty()).then_some((name, hits))
            })
            .collect()
    }
}

fn matches_term(option: &OptionDefinition, lowercase_term: &str) -> bool {
    option.name.to_lowercase().contains(lowercase_term)
        || option.flag.to_lowercase().contains(lowercase_term)
        || option
            .description
            .as_ref()
            .is_some_and(|description| description.to_lowercase().contains(lowercase_term))
}

pub(crate) fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(EmptyId);
    }

    if id.contains(char::is_whitespace) {
        return Err(IdWithSpace(id.to_string()));
    }

    if id.chars().all(|c| c.is_numeric()) {
        return Err(NumericId(id.to_string()));
    }

    Ok(())
}

fn validate_option(option: &OptionDefinition) -> Result<()> {
    validate_id(&option.id)?;

    if !option.flag.starts_with('-') || option.flag.contains(char::is_whitespace) {
        return Err(InvalidFlag(option.id.clone(), option.flag.clone()));
    }

    if let Some(short_flag) = &option.short_flag {
        if !short_flag.starts_with('-') || short_flag.contains(char::is_whitespace) {
            return Err(InvalidFlag(option.id.clone(), short_flag.clone()));
        }
    }

    if option.value_type == ValueType::Select && option.choice_values().is_empty() {
        return Err(MissingChoices(option.id.clone()));
    }

    let mut seen = HashSet::new();
    for other in &option.incompatible_with {
        if !seen.insert(other) {
            debug!(
                "Option `{}` lists `{other}` as incompatible more than once",
                option.id
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"
categories:
  general:
    - id: ignore-errors
      name: Ignore errors (-i)
      flag: --ignore-errors
      type: boolean
      description: Ignore download and postprocessing errors.
      incompatible_with: [abort-on-error]
    - id: abort-on-error
      name: Abort on error
      flag: --abort-on-error
      type: boolean
  post-processing:
    - id: extract-audio
      name: Extract audio (-x)
      flag: --extract-audio
      short_flag: "-x"
      type: boolean
      description: Convert video files to audio-only files.
"#;

    #[test]
    fn test_lookup_and_order() {
        let catalog = Catalog::from_yaml_str(SMALL, "test").unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(
            catalog.options().map(|o| o.id.as_str()).collect::<Vec<_>>(),
            vec!["ignore-errors", "abort-on-error", "extract-audio"]
        );
        assert_eq!(catalog.get("extract-audio").unwrap().flag, "--extract-audio");
        assert!(catalog.get("missing").is_none());
        assert_eq!(catalog.category_of("abort-on-error"), Some("general"));
        assert_eq!(
            catalog.find_by_flag("--extract-audio").map(|o| o.id.as_str()),
            Some("extract-audio")
        );
        assert_eq!(catalog.category("post-processing").unwrap().len(), 1);
    }

    #[test]
    fn test_find_by_short_flag() {
        let catalog = Catalog::from_yaml_str(SMALL, "test").unwrap();

        assert_eq!(
            catalog.find_by_flag("-x").map(|o| o.id.as_str()),
            Some("extract-audio")
        );
        // Aliases only count when declared
        assert!(catalog.find_by_flag("-i").is_none());
        assert!(catalog.find_by_flag("--x").is_none());

        let builtin = Catalog::builtin().unwrap();
        assert_eq!(builtin.find_by_flag("-f").map(|o| o.id.as_str()), Some("format"));
        assert_eq!(builtin.find_by_flag("-4").map(|o| o.id.as_str()), Some("force-ipv4"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let yaml = r#"
categories:
  a:
    - {id: dup, name: One, flag: --one, type: boolean}
  b:
    - {id: dup, name: Two, flag: --two, type: boolean}
"#;
        let result = Catalog::from_yaml_str(yaml, "test");
        assert!(matches!(result, Err(NonUniqueOptionId(id)) if id == "dup"));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let result = Catalog::from_yaml_str("categories: {general: []}", "test");
        assert!(matches!(result, Err(Error::EmptyCatalog { .. })));
    }

    #[test]
    fn test_invalid_definitions_rejected() {
        let bad_flag = "categories: {a: [{id: x, name: X, flag: x, type: boolean}]}";
        assert!(matches!(
            Catalog::from_yaml_str(bad_flag, "test"),
            Err(InvalidFlag(_, _))
        ));

        let bad_short_flag =
            "categories: {a: [{id: x, name: X, flag: --x, short_flag: x, type: boolean}]}";
        assert!(matches!(
            Catalog::from_yaml_str(bad_short_flag, "test"),
            Err(InvalidFlag(_, flag)) if flag == "x"
        ));

        let bad_id = "categories: {a: [{id: '42', name: X, flag: --x, type: boolean}]}";
        assert!(matches!(
            Catalog::from_yaml_str(bad_id, "test"),
            Err(NumericId(_))
        ));

        let no_choices = "categories: {a: [{id: x, name: X, flag: --x, type: select}]}";
        assert!(matches!(
            Catalog::from_yaml_str(no_choices, "test"),
            Err(MissingChoices(_))
        ));

        assert!(matches!(
            Catalog::from_yaml_str("categories: [", "test"),
            Err(Error::Yaml { .. })
        ));
    }

    #[test]
    fn test_validate_id() {
        assert!(validate_id("embed-subs").is_ok());
        assert!(matches!(validate_id(""), Err(EmptyId)));
        assert!(matches!(validate_id("has space"), Err(IdWithSpace(_))));
        assert!(matches!(validate_id("123"), Err(NumericId(_))));
    }

    #[test]
    fn test_search_groups_by_category() {
        let catalog = Catalog::from_yaml_str(SMALL, "test").unwrap();

        let hits = catalog.search("AUDIO");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, "post-processing");
        assert_eq!(hits[0].1[0].id, "extract-audio");

        // description match
        let hits = catalog.search("postprocessing");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].1[0].id, "ignore-errors");

        assert_eq!(catalog.search("  ").len(), 2);
        assert!(catalog.search("no such thing").is_empty());
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.len() > 200);

        for id in ["paths", "ffmpeg-location", "update", "list-formats", "extract-audio"] {
            assert!(catalog.get(id).is_some(), "missing `{id}`");
        }

        // Same instance on every call
        assert!(std::ptr::eq(catalog, Catalog::builtin().unwrap()));
    }

    #[test]
    fn test_builtin_incompatibilities_reference_known_options() {
        let catalog = Catalog::builtin().unwrap();
        for option in catalog.options() {
            for other in &option.incompatible_with {
                assert!(
                    catalog.get(other).is_some(),
                    "`{}` refers to unknown `{other}`",
                    option.id
                );
            }
        }
    }
}
