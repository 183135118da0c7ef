//! Splitting `--set` values into option keys and raw values.

use ytdlp_commands_core::error::Error::ArgumentFormat;
use ytdlp_commands_core::error::Result;

/// One `--set` value, split but not yet resolved against the catalog.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct OptionArgument {
    /// Option ID, or flag text when it starts with `-`.
    pub key: String,
    /// Text after the first `=`, if there was one.
    pub value: Option<String>,
}

impl OptionArgument {
    #[must_use]
    pub fn is_flag(&self) -> bool {
        self.key.starts_with('-')
    }
}

/// Trait for objects that carry option arguments.
pub trait Provider {
    /// Parses every raw option argument, in the order given.
    ///
    /// # Errors
    ///
    /// Returns an error for the first malformed argument.
    fn get_option_arguments(&self) -> Result<Vec<OptionArgument>>;
}

/// Splits `ID`, `ID=VALUE` or `--flag=VALUE` at the first `=`.
///
/// The value is kept verbatim, so `format=a=b` selects `format` with `a=b`.
///
/// # Errors
///
/// Returns [`ArgumentFormat`] if the key is empty or contains whitespace.
///
/// # Examples
///
/// ```rust
/// use ytdlp_commands_cli::arguments::parse;
///
/// let argument = parse("audio-format=mp3").unwrap();
/// assert_eq!(argument.key, "audio-format");
/// assert_eq!(argument.value.as_deref(), Some("mp3"));
///
/// let argument = parse("--extract-audio").unwrap();
/// assert!(argument.is_flag());
/// assert!(argument.value.is_none());
/// ```
pub fn parse(raw: &str) -> Result<OptionArgument> {
    let (key, value) = match raw.split_once('=') {
        Some((key, value)) => (key.trim(), Some(value.to_string())),
        None => (raw.trim(), None),
    };

    if key.is_empty() || key.contains(char::is_whitespace) || key.chars().all(|c| c == '-') {
        return Err(ArgumentFormat(raw.to_string()));
    }

    Ok(OptionArgument {
        key: key.to_string(),
        value,
    })
}

impl Provider for crate::cli_args::BuildArgs {
    fn get_option_arguments(&self) -> Result<Vec<OptionArgument>> {
        self.options.iter().map(|raw| parse(raw)).collect()
    }
}
