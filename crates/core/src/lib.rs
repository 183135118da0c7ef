//! ytdlp-commands Core Library
//!
//! This crate provides the core functionality for ytdlp-commands, a tool that
//! builds valid yt-dlp command lines from a catalog of known options.
//!
//! # Key Features
//!
//! - **Option Catalog**: A categorized, validated catalog of yt-dlp options, embedded or loaded from YAML
//! - **Selections**: Typed option values checked against each option's definition
//! - **Constraints**: Incompatible option pairs and URL requirements, reported before assembly
//! - **Modes**: Download, utility, info and all modes that restrict the eligible options
//! - **Assembly**: Deterministic, shell-quoted command strings for POSIX shells and PowerShell
//! - **Quick Templates**: Named selections that can be applied in one step
//! - **Local Preferences**: Tool path, helper binary and download directory persisted as JSON
//!
//! # Examples
//!
//! Building a command for an audio download:
//!
//! ```
//! use ytdlp_commands_core::assembler::Shell;
//! use ytdlp_commands_core::catalog::Catalog;
//! use ytdlp_commands_core::preferences::LocalSettings;
//! use ytdlp_commands_core::selection::OptionValue;
//! use ytdlp_commands_core::session::Generator;
//!
//! let catalog = Catalog::builtin()?;
//! let mut generator = Generator::new(catalog, LocalSettings::default(), Shell::Posix);
//!
//! generator.set_option("extract-audio", OptionValue::Flag(true))?;
//! generator.set_option("audio-format", OptionValue::Text("mp3".to_string()))?;
//! generator.set_url("https://example.com/v");
//!
//! assert_eq!(
//!     generator.command(),
//!     Some("yt-dlp --extract-audio --audio-format \"mp3\" \"https://example.com/v\"")
//! );
//! # Ok::<(), ytdlp_commands_core::error::Error>(())
//! ```

pub mod assembler;
pub mod catalog;
pub mod config;
pub mod constraints;
pub mod error;
pub mod file_handling;
pub mod mode;
pub mod option_definitions;
pub mod preferences;
pub mod selection;
pub mod session;
pub mod templates;
