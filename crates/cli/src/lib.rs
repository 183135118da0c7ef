//! ytdlp-commands CLI Library
//!
//! This crate provides the command-line interface for ytdlp-commands. It parses
//! the user's option selections, drives a core [`Generator`] session and prints
//! either the assembled yt-dlp command or the issues that block it.
//!
//! # Key Features
//!
//! - **Command Building**: Options by ID or flag text, quick templates and modes
//! - **Catalog Browsing**: Listing by category or mode, fuzzy search and option details
//! - **Local Settings**: Show, change and reset the stored tool, ffmpeg and download paths
//! - **Shell-Aware Quoting**: POSIX or PowerShell, detected or chosen with `--shell`
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`arguments`]: Parsing and applying `--set` option arguments
//! - [`search`]: Fuzzy option search
//! - [`output`]: Styled terminal output
//!
//! # Examples
//!
//! The CLI binary (`ytc`) can be used in several ways:
//!
//! ```bash
//! # Audio download
//! ytc build -s extract-audio -s audio-format=mp3 https://example.com/v
//!
//! # Start from a quick template
//! ytc build --template mp3-audio https://example.com/v
//!
//! # Utility invocation, never takes a URL
//! ytc build --mode utility -s update
//!
//! # Browse the catalog
//! ytc list --category subtitle
//! ytc search "embed thumb"
//! ytc show --audio-format
//! ```
//!
//! [`Generator`]: ytdlp_commands_core::session::Generator

pub mod arguments;
pub mod cli_args;
pub mod output;
pub mod search;
