//! Command-line argument parsing.
//!
//! This module defines the command-line interface structure using the
//! `clap` crate. Mode and shell choices are CLI-side enums that convert
//! into their core counterparts.

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use ytdlp_commands_core::assembler::Shell;
use ytdlp_commands_core::mode::Mode;

/// Command-line arguments for the `ytc` tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use ytdlp_commands_cli::cli_args::{Args, Commands};
///
/// let args = Args::parse_from(["ytc", "build", "-s", "extract-audio", "https://example.com/v"]);
/// assert!(matches!(args.command, Commands::Build(_)));
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
#[command(version, about = "Build yt-dlp command lines from a catalog of known options")]
pub struct Args {
    /// Path to an option catalog YAML file.
    ///
    /// If not provided, the built-in catalog is used.
    #[arg(long, short = 'c', global = true)]
    pub catalog: Option<String>,

    /// Path to a quick templates YAML file.
    ///
    /// If not provided, the built-in templates are used.
    #[arg(long, short = 't', global = true)]
    pub templates: Option<String>,

    /// Path to the preferences file holding local settings.
    ///
    /// If not provided, defaults to `~/.ytdlp-commands/preferences.json`.
    #[arg(long, short = 'p', global = true)]
    pub preferences_path: Option<String>,

    /// Shell the command will be pasted into, which decides how values are quoted.
    #[arg(long, value_enum, default_value_t = ShellChoice::Auto, global = true)]
    pub shell: ShellChoice,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble a yt-dlp command from selected options.
    Build(BuildArgs),

    /// List catalog options, optionally restricted to a category or mode.
    List {
        /// Only list options in this category.
        #[arg(long)]
        category: Option<String>,

        /// Only list options available in this mode.
        #[arg(long, short = 'm', value_enum)]
        mode: Option<ModeChoice>,
    },

    /// Search options by name, flag or description.
    Search {
        /// Text to look for; name and flag are matched fuzzily.
        #[arg(allow_hyphen_values = true)]
        term: String,
    },

    /// Show every detail of one option.
    Show {
        /// Option ID or flag (e.g. `extract-audio` or `--extract-audio`).
        #[arg(allow_hyphen_values = true)]
        option: String,
    },

    /// List the quick templates.
    Templates,

    /// Show, change or reset the local settings.
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(ClapArgs, Debug, Default)]
pub struct BuildArgs {
    /// Command mode, which restricts the options that may be used.
    #[arg(long, short = 'm', value_enum, default_value_t = ModeChoice::Download)]
    pub mode: ModeChoice,

    /// Apply a quick template before the `--set` options.
    #[arg(long = "template", short = 'T')]
    pub template: Option<String>,

    /// Options to select, as `ID`, `ID=VALUE` or `--flag=VALUE`.
    ///
    /// Multiple options can be provided with repeated `-s` flags. A boolean
    /// option set to `false` or any option set to an empty value is deselected.
    ///
    /// # Examples
    /// ```bash
    /// ytc build -s extract-audio -s audio-format=mp3 https://example.com/v
    /// ```
    #[arg(long = "set", short = 's', action = clap::ArgAction::Append, allow_hyphen_values = true)]
    pub options: Vec<String>,

    /// The media URL.
    pub url: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum SettingsAction {
    /// Print the stored settings.
    Show,

    /// Change stored settings; fields that are not given are kept.
    ///
    /// An empty value unsets the field (the tool path falls back to `yt-dlp`).
    Set {
        /// Path or name of the yt-dlp executable.
        #[arg(long)]
        tool_path: Option<String>,

        /// Location of the ffmpeg binary, passed as `--ffmpeg-location`.
        #[arg(long)]
        ffmpeg_path: Option<String>,

        /// Download directory, passed as `--paths`.
        #[arg(long)]
        download_path: Option<String>,
    },

    /// Restore the default settings.
    Reset,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ModeChoice {
    All,
    #[default]
    Download,
    Utility,
    Info,
}

impl From<ModeChoice> for Mode {
    fn from(choice: ModeChoice) -> Self {
        match choice {
            ModeChoice::All => Mode::All,
            ModeChoice::Download => Mode::Download,
            ModeChoice::Utility => Mode::Utility,
            ModeChoice::Info => Mode::Info,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ShellChoice {
    /// PowerShell on Windows, POSIX quoting elsewhere.
    #[default]
    Auto,
    Posix,
    #[value(name = "powershell")]
    PowerShell,
}

impl ShellChoice {
    #[must_use]
    pub fn resolve(self) -> Shell {
        match self {
            ShellChoice::Auto if cfg!(windows) => Shell::PowerShell,
            ShellChoice::Auto | ShellChoice::Posix => Shell::Posix,
            ShellChoice::PowerShell => Shell::PowerShell,
        }
    }
}
