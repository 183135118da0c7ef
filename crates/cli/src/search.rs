//! Option search for `ytc search`.
//!
//! Name and flag are matched fuzzily, descriptions by plain substring.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use ytdlp_commands_core::catalog::Catalog;
use ytdlp_commands_core::option_definitions::OptionDefinition;

/// Options matching `term`, grouped by category in catalog order.
///
/// Categories without a hit are left out; a blank term matches everything.
#[must_use]
pub fn fuzzy_search<'c>(catalog: &'c Catalog, term: &str) -> Vec<(&'c str, Vec<&'c OptionDefinition>)> {
    let term = term.trim();
    if term.is_empty() {
        return catalog.search("");
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let lowercase_term = term.to_lowercase();

    catalog
        .categories()
        .filter_map(|(category, options)| {
            let hits: Vec<&OptionDefinition> = options
                .iter()
                .filter(|option| {
                    let title = format!("{} {}", option.flag, option.name);

                    matcher.fuzzy_match(&title, term).is_some()
                        || option.description.as_ref().is_some_and(|description| {
                            description.to_lowercase().contains(&lowercase_term)
                        })
                })
                .collect();

            (!hits.is_empty()).then_some((category, hits))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(groups: &[(&str, Vec<&OptionDefinition>)]) -> Vec<String> {
        groups
            .iter()
            .flat_map(|(_, options)| options.iter().map(|option| option.id.clone()))
            .collect()
    }

    #[test]
    fn test_fuzzy_name_match() {
        let catalog = Catalog::builtin().unwrap();
        let groups = fuzzy_search(catalog, "xtrct aud");

        assert!(ids(&groups).contains(&"extract-audio".to_string()));
    }

    #[test]
    fn test_description_match() {
        let catalog = Catalog::builtin().unwrap();
        let groups = fuzzy_search(catalog, "FFMPEG BINARY");

        assert!(ids(&groups).contains(&"ffmpeg-location".to_string()));
    }

    #[test]
    fn test_groups_follow_catalog_order() {
        let catalog = Catalog::builtin().unwrap();
        let groups = fuzzy_search(catalog, "playlist");

        let categories: Vec<&str> = groups.iter().map(|(category, _)| *category).collect();
        let catalog_order: Vec<&str> = catalog
            .categories()
            .map(|(category, _)| category)
            .filter(|category| categories.contains(category))
            .collect();
        assert_eq!(categories, catalog_order);
        assert!(groups.iter().all(|(_, options)| !options.is_empty()));
    }

    #[test]
    fn test_blank_term_matches_everything() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(ids(&fuzzy_search(catalog, "  ")).len(), catalog.len());
    }

    #[test]
    fn test_no_match() {
        let catalog = Catalog::builtin().unwrap();
        assert!(fuzzy_search(catalog, "qqqzzzqqq").is_empty());
    }
}
