//! Option arguments given on the command line.
//!
//! Options are selected with repeated `-s`/`--set` flags, each one of:
//! - **`ID`**: a switch by its option ID, e.g. `extract-audio`
//! - **`ID=VALUE`**: an option with a value, e.g. `audio-format=mp3`
//! - **`--flag[=VALUE]`**: the same, addressed by the yt-dlp flag text
//!
//! Parsing only splits the text; the catalog resolves keys to options and
//! the session checks the values.

pub mod parsing;
pub mod processing;

pub use parsing::{parse, OptionArgument, Provider};
pub use processing::{process_command_line, resolve_option};
