//! Turns a validated selection into the final yt-dlp command line.

use std::fmt::{Display, Formatter};

use log::debug;

use crate::catalog::Catalog;
use crate::config::DEFAULT_TOOL_PATH;
use crate::mode::Mode;
use crate::preferences::LocalSettings;
use crate::selection::{OptionValue, Selection};

/// Option filled in from the configured download directory.
pub const PATHS_OPTION_ID: &str = "paths";
/// Option filled in from the configured helper binary (ffmpeg) location.
pub const HELPER_LOCATION_OPTION_ID: &str = "ffmpeg-location";

/// The shell the command is meant to be pasted into.
///
/// This is a hint from the caller; nothing here tries to detect it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shell {
    #[default]
    Posix,
    PowerShell,
}

impl Shell {
    /// Wraps `value` in double quotes so the shell passes it through as one argument.
    #[must_use]
    pub fn quote(self, value: &str) -> String {
        let mut quoted = String::with_capacity(value.len() + 2);
        quoted.push('"');

        match self {
            Shell::Posix => {
                for c in value.chars() {
                    if matches!(c, '"' | '\\' | '$' | '`') {
                        quoted.push('\\');
                    }
                    quoted.push(c);
                }
            }
            Shell::PowerShell => {
                for c in value.chars() {
                    match c {
                        '"' => quoted.push_str("\"\""),
                        '$' | '`' => {
                            quoted.push('`');
                            quoted.push(c);
                        }
                        _ => quoted.push(c),
                    }
                }
            }
        }

        quoted.push('"');
        quoted
    }

    fn program_token(self, tool_path: &str) -> String {
        let tool_path = tool_path.trim();
        let tool_path = if tool_path.is_empty() {
            DEFAULT_TOOL_PATH
        } else {
            tool_path
        };

        if !tool_path.contains(char::is_whitespace) {
            return tool_path.to_string();
        }

        match self {
            Shell::Posix => self.quote(tool_path),
            // A quoted string on its own is an expression in PowerShell, not a call
            Shell::PowerShell => format!("& {}", self.quote(tool_path)),
        }
    }
}

impl Display for Shell {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(match self {
            Shell::Posix => "posix",
            Shell::PowerShell => "powershell",
        })
    }
}

/// Everything besides the selection that shapes the command.
#[derive(Debug, Clone)]
pub struct Invocation<'a> {
    pub mode: Mode,
    pub url: &'a str,
    pub shell: Shell,
    pub settings: &'a LocalSettings,
}

/// Builds the command string.
///
/// The caller is expected to have run [`crate::constraints::validate`] first
/// and to skip assembly while it reports issues; this function itself never fails.
/// `selection` is not modified: options implied by the settings are merged into
/// a working copy, and an explicit selection of the same option wins.
///
/// The result is a single line: every run of whitespace, including tabs and
/// newlines inside values, becomes one space and the ends are trimmed.
#[must_use]
pub fn assemble(catalog: &Catalog, selection: &Selection, invocation: &Invocation) -> String {
    let shell = invocation.shell;
    let merged = merge_settings(selection, invocation.settings);

    let mut tokens = vec![shell.program_token(&invocation.settings.tool_path)];
    let mut emitted_options = 0;

    for option in catalog.options() {
        let Some(value) = merged.get(&option.id) else {
            continue;
        };

        if !invocation.mode.is_eligible(option) {
            debug!(
                "Skipping `{}`, not available in {} mode",
                option.id, invocation.mode
            );
            continue;
        }

        match value {
            OptionValue::Flag(true) => tokens.push(option.flag.clone()),
            OptionValue::Flag(false) => continue,
            value => {
                tokens.push(option.flag.clone());
                tokens.push(shell.quote(&value.to_string()));
            }
        }

        emitted_options += 1;
    }

    let url = invocation.url.trim();
    if !url.is_empty() && invocation.mode.accepts_url(emitted_options) {
        tokens.push(shell.quote(url));
    }

    tokens
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn merge_settings(selection: &Selection, settings: &LocalSettings) -> Selection {
    let mut merged = selection.clone();

    if let Some(download_directory) = non_blank(settings.download_directory.as_deref()) {
        merged.insert_if_absent(
            PATHS_OPTION_ID,
            OptionValue::Text(download_directory.to_string()),
        );
    }

    if let Some(helper_binary_path) = non_blank(settings.helper_binary_path.as_deref()) {
        merged.insert_if_absent(
            HELPER_LOCATION_OPTION_ID,
            OptionValue::Text(helper_binary_path.to_string()),
        );
    }

    merged
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
