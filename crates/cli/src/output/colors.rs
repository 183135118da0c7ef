use crossterm::style::Color;
use ytdlp_commands_core::mode::Mode;
use ytdlp_commands_core::option_definitions::ValueType;

/// Trait for values that are shown in a fixed terminal color
pub trait AsTermColor {
    fn as_crossterm_color(&self) -> Color;
}

impl AsTermColor for ValueType {
    fn as_crossterm_color(&self) -> Color {
        match self {
            ValueType::Boolean => Color::Green,
            ValueType::String => Color::Yellow,
            ValueType::Number => Color::Cyan,
            ValueType::Select => Color::Magenta,
        }
    }
}

impl AsTermColor for Mode {
    fn as_crossterm_color(&self) -> Color {
        match self {
            Mode::All => Color::Grey,
            Mode::Download => Color::Blue,
            Mode::Utility => Color::DarkYellow,
            Mode::Info => Color::DarkCyan,
        }
    }
}
