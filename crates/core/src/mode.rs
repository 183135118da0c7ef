//! Command modes and option eligibility.
//!
//! A [`Mode`] restricts which catalog options may take part in a command.
//! [`Mode::is_eligible`] is the only place the rules live; both pruning on
//! a mode change and command assembly go through it.

use std::fmt::{Display, Formatter};

use log::debug;

use crate::catalog::Catalog;
use crate::option_definitions::OptionDefinition;
use crate::selection::Selection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Every option, URL optional.
    All,
    /// Media download: everything except utility-only options.
    #[default]
    Download,
    /// Update/version style invocations that never take a URL.
    Utility,
    /// Listing and introspection options only.
    Info,
}

impl Mode {
    /// Whether `option` may be selected and emitted in this mode.
    #[must_use]
    pub fn is_eligible(self, option: &OptionDefinition) -> bool {
        match self {
            Mode::All => true,
            Mode::Download => !option.utility_only,
            Mode::Utility => !option.requires_url,
            Mode::Info => option.info_command && !option.utility_only,
        }
    }

    /// Whether a URL token is appended, given how many options were emitted.
    #[must_use]
    pub fn accepts_url(self, emitted_options: usize) -> bool {
        match self {
            Mode::All | Mode::Download => true,
            Mode::Info => emitted_options > 0,
            Mode::Utility => false,
        }
    }

    /// Whether an empty URL blocks assembly when URL-requiring options are selected.
    #[must_use]
    pub fn requires_url(self) -> bool {
        matches!(self, Mode::All | Mode::Download)
    }
}

impl Display for Mode {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(match self {
            Mode::All => "all",
            Mode::Download => "download",
            Mode::Utility => "utility",
            Mode::Info => "info",
        })
    }
}

/// Returns `selection` without the entries that are ineligible under `mode`.
///
/// Entries whose ID is not in the catalog are kept as they are.
#[must_use]
pub fn prune_for_mode(catalog: &Catalog, selection: &Selection, mode: Mode) -> Selection {
    let mut pruned = selection.clone();

    pruned.retain(|id, _| match catalog.get(id) {
        Some(option) if !mode.is_eligible(option) => {
            debug!("Dropping `{id}` from selection, not available in {mode} mode");
            false
        }
        _ => true,
    });

    pruned
}
