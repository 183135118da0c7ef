//! Styled terminal output for listings, details, templates and issues.
//!
//! Everything here writes to a caller-provided writer so the same code serves
//! stdout, stderr and tests. The assembled command itself is never styled.

pub mod colors;

use std::fmt::Display;
use std::io::Write;

use crossterm::queue;
use crossterm::style::Color::{DarkGreen, DarkGrey, Red};
use crossterm::style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor};
use itertools::Itertools;
use ytdlp_commands_core::catalog::Catalog;
use ytdlp_commands_core::constraints::Issue;
use ytdlp_commands_core::error::Result;
use ytdlp_commands_core::mode::Mode;
use ytdlp_commands_core::option_definitions::OptionDefinition;
use ytdlp_commands_core::preferences::LocalSettings;
use ytdlp_commands_core::selection::OptionValue;
use ytdlp_commands_core::templates::QuickTemplate;

use colors::AsTermColor;

const LABEL_WIDTH: usize = 14;
const MODES: [Mode; 4] = [Mode::Download, Mode::Utility, Mode::Info, Mode::All];

/// Prints options grouped under their category headers.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn print_options<W: Write>(out: &mut W, groups: &[(&str, Vec<&OptionDefinition>)]) -> Result<()> {
    let flag_width = groups
        .iter()
        .flat_map(|(_, options)| options)
        .map(|option| option.flag.len())
        .max()
        .unwrap_or_default();

    for (category, options) in groups {
        queue!(
            out,
            SetAttribute(Attribute::Bold),
            SetForegroundColor(DarkGreen),
            Print(category),
            SetAttribute(Attribute::Reset),
            ResetColor,
            Print(format!(" ({})\n", options.len())),
        )?;

        for option in options {
            print_option_row(out, option, flag_width)?;
        }

        queue!(out, Print("\n"))?;
    }

    out.flush()?;
    Ok(())
}

fn print_option_row<W: Write>(out: &mut W, option: &OptionDefinition, flag_width: usize) -> Result<()> {
    queue!(
        out,
        Print("  "),
        SetForegroundColor(option.value_type.as_crossterm_color()),
        Print(format!("{:<flag_width$}", option.flag)),
        ResetColor,
        Print("  "),
        Print(&option.name),
    )?;

    if let Some(placeholder) = &option.placeholder {
        queue!(
            out,
            SetForegroundColor(DarkGrey),
            Print(format!(" <{placeholder}>")),
            ResetColor,
        )?;
    }

    queue!(out, Print("\n"))?;
    Ok(())
}

/// Prints every detail of one option.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn print_option_detail<W: Write>(
    out: &mut W,
    catalog: &Catalog,
    option: &OptionDefinition,
) -> Result<()> {
    queue!(
        out,
        SetAttribute(Attribute::Bold),
        Print(&option.name),
        SetAttribute(Attribute::Reset),
        Print("\n"),
    )?;

    print_field(out, "ID", &option.id)?;
    print_field(out, "Flag", &option.flag)?;
    if let Some(short_flag) = &option.short_flag {
        print_field(out, "Short flag", short_flag)?;
    }

    print_label(out, "Type")?;
    queue!(
        out,
        SetForegroundColor(option.value_type.as_crossterm_color()),
        Print(option.value_type),
        ResetColor,
        Print("\n"),
    )?;

    if let Some(category) = catalog.category_of(&option.id) {
        print_field(out, "Category", category)?;
    }
    if let Some(description) = &option.description {
        print_field(out, "Description", description)?;
    }
    if let Some(placeholder) = &option.placeholder {
        print_field(out, "Placeholder", placeholder)?;
    }
    if let Some(example) = &option.example {
        print_field(out, "Example", example)?;
    }
    if let Some(range) = option.range_description() {
        print_field(out, "Range", range)?;
    }

    if let Some(choices) = &option.choices {
        let choices = choices
            .iter()
            .map(|choice| format!("{} ({})", choice.value, choice.label))
            .join(", ");
        print_field(out, "Choices", choices)?;
    }

    if !option.incompatible_with.is_empty() {
        let others = option
            .incompatible_with
            .iter()
            .map(|id| catalog.get(id).map_or(id.as_str(), |other| other.flag.as_str()))
            .join(", ");
        print_field(out, "Conflicts", others)?;
    }

    print_field(out, "Requires URL", if option.requires_url { "yes" } else { "no" })?;

    print_label(out, "Modes")?;
    for mode in MODES.iter().filter(|mode| mode.is_eligible(option)) {
        queue!(
            out,
            SetForegroundColor(mode.as_crossterm_color()),
            Print(mode),
            ResetColor,
            Print(" "),
        )?;
    }
    queue!(out, Print("\n"))?;

    out.flush()?;
    Ok(())
}

fn print_label<W: Write>(out: &mut W, label: &str) -> Result<()> {
    queue!(
        out,
        SetForegroundColor(DarkGrey),
        Print(format!("  {:<LABEL_WIDTH$}", format!("{label}:"))),
        ResetColor,
    )?;
    Ok(())
}

fn print_field<W: Write>(out: &mut W, label: &str, value: impl Display) -> Result<()> {
    print_label(out, label)?;
    queue!(out, Print(value), Print("\n"))?;
    Ok(())
}

/// Prints the quick templates with a preview of the flags each one selects.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn print_templates<W: Write>(
    out: &mut W,
    templates: &[QuickTemplate],
    catalog: &Catalog,
) -> Result<()> {
    for template in templates {
        queue!(
            out,
            SetAttribute(Attribute::Bold),
            Print(&template.id),
            SetAttribute(Attribute::Reset),
            Print(format!("  {}\n", template.name)),
            SetForegroundColor(DarkGrey),
            Print(format!("    {}\n", template_preview(template, catalog))),
            ResetColor,
        )?;
    }

    out.flush()?;
    Ok(())
}

/// The template's selection as flags, e.g. `--extract-audio --audio-format mp3`.
#[must_use]
pub fn template_preview(template: &QuickTemplate, catalog: &Catalog) -> String {
    template
        .selection
        .iter()
        .map(|(id, value)| {
            let flag = catalog.get(id).map_or(id.as_str(), |option| option.flag.as_str());
            match value {
                OptionValue::Flag(_) => flag.to_string(),
                value => format!("{flag} {value}"),
            }
        })
        .join(" ")
}

/// Prints the issues that keep a command from being assembled.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn print_issues<W: Write>(out: &mut W, issues: &[Issue]) -> Result<()> {
    for issue in issues {
        queue!(
            out,
            SetForegroundColor(Red),
            SetAttribute(Attribute::Bold),
            Print("error: "),
            SetAttribute(Attribute::Reset),
            ResetColor,
            Print(issue),
            Print("\n"),
        )?;
    }

    out.flush()?;
    Ok(())
}

/// Prints the local settings and where they are stored.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn print_settings<W: Write>(out: &mut W, settings: &LocalSettings, path: &str) -> Result<()> {
    print_field(out, "Preferences", path)?;
    print_field(out, "Tool path", &settings.tool_path)?;
    print_field(
        out,
        "FFmpeg path",
        settings.helper_binary_path.as_deref().unwrap_or("(not set)"),
    )?;
    print_field(
        out,
        "Download path",
        settings.download_directory.as_deref().unwrap_or("(not set)"),
    )?;

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use ytdlp_commands_core::error::Error;

    /// A terminal that has gone away.
    struct ClosedTerminal;

    impl Write for ClosedTerminal {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    const CATALOG: &str = r#"
categories:
  general:
    - id: update
      name: Update
      flag: --update
      type: boolean
      requires_url: false
      utility_only: true
  post-processing:
    - id: audio-format
      name: Audio format
      flag: --audio-format
      short_flag: "-a"
      type: select
      placeholder: FORMAT
      incompatible_with: [update, gone]
      choices:
        - {label: MP3, value: mp3}
        - {label: Opus, value: opus}
"#;

    fn render(write: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buffer = Vec::new();
        write(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_print_options() {
        let catalog = Catalog::from_yaml_str(CATALOG, "test").unwrap();
        let groups = catalog.search("");

        let text = render(|out| print_options(out, &groups));

        assert!(text.contains("general"));
        assert!(text.contains("post-processing"));
        assert!(text.contains("--update"));
        assert!(text.contains("Audio format"));
        assert!(text.contains("<FORMAT>"));
    }

    #[test]
    fn test_print_option_detail() {
        let catalog = Catalog::from_yaml_str(CATALOG, "test").unwrap();
        let option = catalog.get("audio-format").unwrap();

        let text = render(|out| print_option_detail(out, &catalog, option));

        assert!(text.contains("mp3 (MP3), opus (Opus)"));
        assert!(text.contains("Short flag:"));
        assert!(text.contains("--update, gone"));
        assert!(text.contains("post-processing"));
        assert!(text.contains("yes"));
        assert!(text.contains("download"));
        assert!(!text.contains("utility"));
    }

    #[test]
    fn test_print_issues() {
        let text = render(|out| print_issues(out, &[Issue::MissingUrl]));
        assert!(text.contains("error: "));
        assert!(text.contains("URL is required for the selected options"));
    }

    #[test]
    fn test_write_failure_is_reported() {
        let result = print_issues(&mut ClosedTerminal, &[Issue::MissingUrl]);

        match result {
            Err(error @ Error::Stdio(_)) => {
                assert_eq!(error.to_string(), "Terminal error: closed");
            }
            other => panic!("Expected a terminal error, got {other:?}"),
        }
    }

    #[test]
    fn test_template_preview() {
        let catalog = Catalog::from_yaml_str(CATALOG, "test").unwrap();
        let template: QuickTemplate = serde_yaml::from_str(
            "{id: t, name: T, selection: {update: true, audio-format: mp3}}",
        )
        .unwrap();

        assert_eq!(
            template_preview(&template, &catalog),
            "--update --audio-format mp3"
        );
    }

    #[test]
    fn test_print_settings() {
        let settings = LocalSettings {
            download_directory: Some("/media/videos".to_string()),
            ..LocalSettings::default()
        };

        let text = render(|out| print_settings(out, &settings, "/tmp/preferences.json"));

        assert!(text.contains("/tmp/preferences.json"));
        assert!(text.contains("yt-dlp"));
        assert!(text.contains("(not set)"));
        assert!(text.contains("/media/videos"));
    }
}
