//! Mutual-exclusion checks and the validation gate in front of the assembler.

use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use crate::catalog::Catalog;
use crate::mode::Mode;
use crate::selection::Selection;

/// Two selected options that are declared incompatible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub option: String,
    pub option_name: String,
    pub conflicts_with: String,
    pub conflicts_with_name: String,
}

impl Display for Conflict {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "\"{}\" (`{}`) is incompatible with \"{}\" (`{}`)",
            self.option_name, self.option, self.conflicts_with_name, self.conflicts_with
        )
    }
}

/// Anything that blocks command assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    Conflict(Conflict),
    MissingUrl,
}

impl Display for Issue {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Issue::Conflict(conflict) => write!(formatter, "{conflict}"),
            Issue::MissingUrl => formatter.write_str("URL is required for the selected options"),
        }
    }
}

/// Reports every pair of selected options that are declared incompatible.
///
/// Options are visited in catalog order and their `incompatible_with` lists in
/// declaration order, so the result is stable for a given selection. A pair is
/// reported once even if both sides declare it. IDs missing from the catalog
/// are ignored.
#[must_use]
pub fn find_conflicts(catalog: &Catalog, selection: &Selection) -> Vec<Conflict> {
    let mut reported: HashSet<(&str, &str)> = HashSet::new();
    let mut conflicts = Vec::new();

    for option in catalog.options() {
        if !selection.contains(&option.id) {
            continue;
        }

        for other_id in &option.incompatible_with {
            let Some(other) = catalog.get(other_id) else {
                continue;
            };

            if !selection.contains(&other.id) {
                continue;
            }

            let pair = if option.id <= other.id {
                (option.id.as_str(), other.id.as_str())
            } else {
                (other.id.as_str(), option.id.as_str())
            };

            if reported.insert(pair) {
                conflicts.push(Conflict {
                    option: option.id.clone(),
                    option_name: option.name.clone(),
                    conflicts_with: other.id.clone(),
                    conflicts_with_name: other.name.clone(),
                });
            }
        }
    }

    conflicts
}

/// Whether any selected option that is eligible in `mode` needs a URL.
#[must_use]
pub fn selection_requires_url(catalog: &Catalog, selection: &Selection, mode: Mode) -> bool {
    selection
        .ids()
        .filter_map(|id| catalog.get(id))
        .any(|option| mode.is_eligible(option) && option.requires_url)
}

/// Runs every check that gates assembly. An empty result means the command can be built.
#[must_use]
pub fn validate(catalog: &Catalog, selection: &Selection, mode: Mode, url: &str) -> Vec<Issue> {
    let mut issues: Vec<Issue> = find_conflicts(catalog, selection)
        .into_iter()
        .map(Issue::Conflict)
        .collect();

    if mode.requires_url()
        && url.trim().is_empty()
        && selection_requires_url(catalog, selection, mode)
    {
        issues.push(Issue::MissingUrl);
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::OptionValue;

    const CATALOG: &str = r#"
categories:
  general:
    - id: ignore-errors
      name: Ignore errors
      flag: --ignore-errors
      type: boolean
      incompatible_with: [abort-on-error]
    - id: no-abort-on-error
      name: Continue on error
      flag: --no-abort-on-error
      type: boolean
      incompatible_with: [abort-on-error]
    - id: abort-on-error
      name: Abort on error
      flag: --abort-on-error
      type: boolean
      incompatible_with: [ignore-errors, no-abort-on-error]
    - id: verbose
      name: Verbose
      flag: --verbose
      type: boolean
      requires_url: false
      incompatible_with: [ghost]
    - id: update
      name: Update
      flag: --update
      type: boolean
      requires_url: false
      utility_only: true
  formats:
    - id: format
      name: Format
      flag: --format
      type: string
      incompatible_with: [worst]
    - id: worst
      name: Worst
      flag: --worst
      type: boolean
      incompatible_with: [format]
    - id: force-ipv4
      name: Force IPv4
      flag: --force-ipv4
      type: boolean
    - id: force-ipv6
      name: Force IPv6
      flag: --force-ipv6
      type: boolean
      incompatible_with: [force-ipv4]
"#;

    fn catalog() -> Catalog {
        Catalog::from_yaml_str(CATALOG, "test catalog").unwrap()
    }

    fn select(catalog: &Catalog, ids: &[&str]) -> Selection {
        let mut selection = Selection::new();
        for id in ids {
            let option = catalog.get(id).unwrap();
            let value = if option.is_switch() {
                OptionValue::Flag(true)
            } else {
                OptionValue::Text("best".to_string())
            };
            selection.set(option, value).unwrap();
        }
        selection
    }

    #[test]
    fn test_no_conflicts() {
        let catalog = catalog();
        let selection = select(&catalog, &["ignore-errors", "no-abort-on-error", "verbose"]);
        assert!(find_conflicts(&catalog, &selection).is_empty());
    }

    #[test]
    fn test_mutual_declaration_reported_once() {
        let catalog = catalog();
        let selection = select(&catalog, &["format", "worst"]);

        let conflicts = find_conflicts(&catalog, &selection);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].option, "format");
        assert_eq!(conflicts[0].conflicts_with, "worst");
    }

    #[test]
    fn test_one_sided_declaration_detected_in_either_order() {
        let catalog = catalog();

        for ids in [["force-ipv4", "force-ipv6"], ["force-ipv6", "force-ipv4"]] {
            let conflicts = find_conflicts(&catalog, &select(&catalog, &ids));
            assert_eq!(conflicts.len(), 1);
            assert_eq!(conflicts[0].option, "force-ipv6");
            assert_eq!(conflicts[0].conflicts_with, "force-ipv4");
        }
    }

    #[test]
    fn test_order_follows_catalog() {
        let catalog = catalog();
        let selection = select(
            &catalog,
            &["abort-on-error", "no-abort-on-error", "ignore-errors"],
        );

        let conflicts = find_conflicts(&catalog, &selection);
        let pairs: Vec<(&str, &str)> = conflicts
            .iter()
            .map(|c| (c.option.as_str(), c.conflicts_with.as_str()))
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("ignore-errors", "abort-on-error"),
                ("no-abort-on-error", "abort-on-error"),
            ]
        );

        // stable across runs
        assert_eq!(conflicts, find_conflicts(&catalog, &selection));
    }

    #[test]
    fn test_stale_reference_ignored() {
        let catalog = catalog();
        let selection = select(&catalog, &["verbose"]);
        assert!(find_conflicts(&catalog, &selection).is_empty());
    }

    #[test]
    fn test_conflict_message_mentions_both_options() {
        let catalog = catalog();
        let conflicts = find_conflicts(&catalog, &select(&catalog, &["format", "worst"]));
        let message = conflicts[0].to_string();

        assert!(message.contains("`format`"));
        assert!(message.contains("`worst`"));
        assert_eq!(
            message,
            "\"Format\" (`format`) is incompatible with \"Worst\" (`worst`)"
        );
    }

    #[test]
    fn test_missing_url() {
        let catalog = catalog();
        let selection = select(&catalog, &["format"]);

        assert_eq!(
            validate(&catalog, &selection, Mode::Download, "  "),
            vec![Issue::MissingUrl]
        );
        assert_eq!(
            validate(&catalog, &selection, Mode::All, ""),
            vec![Issue::MissingUrl]
        );
        assert!(validate(&catalog, &selection, Mode::Download, "https://example.com/v").is_empty());
    }

    #[test]
    fn test_url_not_needed_without_url_options() {
        let catalog = catalog();

        let selection = select(&catalog, &["verbose"]);
        assert!(validate(&catalog, &selection, Mode::Download, "").is_empty());

        let selection = select(&catalog, &["update"]);
        assert!(validate(&catalog, &selection, Mode::Utility, "").is_empty());
        assert!(validate(&catalog, &Selection::new(), Mode::Download, "").is_empty());
    }

    #[test]
    fn test_validate_reports_conflicts_before_missing_url() {
        let catalog = catalog();
        let selection = select(&catalog, &["format", "worst"]);

        let issues = validate(&catalog, &selection, Mode::Download, "");
        assert_eq!(issues.len(), 2);
        assert!(matches!(issues[0], Issue::Conflict(_)));
        assert_eq!(issues[1], Issue::MissingUrl);
        assert_eq!(
            issues[1].to_string(),
            "URL is required for the selected options"
        );
    }
}
