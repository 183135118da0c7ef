//! Session state for building one command.
//!
//! [`Generator`] owns the mode, URL and selection. After every change it
//! re-validates; when nothing blocks assembly it rebuilds the command,
//! otherwise the previously built command is dropped.

use log::{debug, info};

use crate::assembler::{assemble, Invocation, Shell};
use crate::catalog::Catalog;
use crate::constraints::{validate, Issue};
use crate::error::Error::{IneligibleOption, UnknownOption};
use crate::error::Result;
use crate::mode::{prune_for_mode, Mode};
use crate::preferences::LocalSettings;
use crate::selection::{OptionValue, Selection};
use crate::templates::QuickTemplate;

#[derive(Debug, Clone)]
pub struct Generator<'c> {
    catalog: &'c Catalog,
    settings: LocalSettings,
    shell: Shell,
    mode: Mode,
    url: String,
    selection: Selection,
    command: Option<String>,
    issues: Vec<Issue>,
}

impl<'c> Generator<'c> {
    /// Starts an empty session in [`Mode::Download`].
    #[must_use]
    pub fn new(catalog: &'c Catalog, settings: LocalSettings, shell: Shell) -> Self {
        let mut generator = Self {
            catalog,
            settings,
            shell,
            mode: Mode::default(),
            url: String::new(),
            selection: Selection::new(),
            command: None,
            issues: Vec::new(),
        };
        generator.refresh();
        generator
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The assembled command, or None while [`Generator::issues`] is non-empty.
    #[must_use]
    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Sets (or, for `false`/empty values, clears) an option.
    ///
    /// # Errors
    ///
    /// Returns an error if the option is unknown, unavailable in the current
    /// mode, or the value does not fit the option.
    pub fn set_option(&mut self, id: &str, value: OptionValue) -> Result<()> {
        let catalog = self.catalog;
        let option = catalog
            .get(id)
            .ok_or_else(|| UnknownOption(id.to_string()))?;

        if !self.mode.is_eligible(option) {
            return Err(IneligibleOption {
                id: id.to_string(),
                mode: self.mode.to_string(),
            });
        }

        self.selection.set(option, value)?;
        self.refresh();
        Ok(())
    }

    /// Like [`Generator::set_option`], with the value given as command-line text.
    ///
    /// # Errors
    ///
    /// See [`Generator::set_option`] and [`OptionValue::from_argument`].
    pub fn set_option_argument(&mut self, id: &str, raw: Option<&str>) -> Result<()> {
        let catalog = self.catalog;
        let option = catalog
            .get(id)
            .ok_or_else(|| UnknownOption(id.to_string()))?;

        match OptionValue::from_argument(option, raw)? {
            Some(value) => self.set_option(id, value),
            None => {
                self.clear_option(id);
                Ok(())
            }
        }
    }

    /// Deselects an option, returning whether it was selected.
    pub fn clear_option(&mut self, id: &str) -> bool {
        let removed = self.selection.remove(id);
        if removed {
            self.refresh();
        }
        removed
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
        self.refresh();
    }

    /// Switches mode, dropping options the new mode does not allow.
    ///
    /// Utility invocations never take a URL, so switching to [`Mode::Utility`]
    /// also clears it.
    pub fn change_mode(&mut self, mode: Mode) {
        debug!("Changing mode from {} to {mode}", self.mode);

        self.selection = prune_for_mode(self.catalog, &self.selection, mode);
        self.mode = mode;

        if mode == Mode::Utility {
            self.url.clear();
        }

        self.refresh();
    }

    /// Replaces the selection with the template's, pruned for the current mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the template does not fit the catalog; the
    /// session is unchanged in that case.
    pub fn apply_template(&mut self, template: &QuickTemplate) -> Result<()> {
        let selection = template.to_selection(self.catalog)?;
        self.selection = prune_for_mode(self.catalog, &selection, self.mode);

        info!("Applied template `{}`", template.id);
        self.refresh();
        Ok(())
    }

    /// Clears the selection, URL and command. Mode and settings are kept.
    pub fn clear(&mut self) {
        self.selection.clear();
        self.url.clear();
        self.refresh();
    }

    fn refresh(&mut self) {
        self.issues = validate(self.catalog, &self.selection, self.mode, &self.url);

        if self.issues.is_empty() {
            let command = assemble(
                self.catalog,
                &self.selection,
                &Invocation {
                    mode: self.mode,
                    url: &self.url,
                    shell: self.shell,
                    settings: &self.settings,
                },
            );
            debug!("Assembled command: {command}");
            self.command = Some(command);
        } else {
            debug!("{} issue(s) block assembly", self.issues.len());
            self.command = None;
        }
    }
}
