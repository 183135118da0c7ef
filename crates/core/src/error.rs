use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Json {
        action: String,
        file_description: String,
        path: String,
        original: serde_json::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("No options were found in the option catalog. Is `{}` empty?", .path)]
    EmptyCatalog { path: String },

    #[error("Terminal error: {}", .0)]
    Stdio(#[from] std::io::Error),

    #[error("Found a non-unique option ID: `{}`", .0)]
    NonUniqueOptionId(String),

    #[error("Found a non-unique template ID: `{}`", .0)]
    NonUniqueTemplateId(String),

    #[error("Invalid ID: ID may not be empty")]
    EmptyId,

    #[error("Invalid ID `{}`: ID may not contain spaces", .0)]
    IdWithSpace(String),

    #[error("Invalid ID `{}`: ID cannot be purely numeric", .0)]
    NumericId(String),

    #[error("Invalid flag `{}` for option `{}`: flags must start with `-`", .1, .0)]
    InvalidFlag(String, String),

    #[error("Select option `{}` does not declare any choices", .0)]
    MissingChoices(String),

    #[error("Unknown option: `{}`", .0)]
    UnknownOption(String),

    #[error("Unknown category: `{}`", .0)]
    UnknownCategory(String),

    #[error("Unknown template: `{}`", .0)]
    UnknownTemplate(String),

    #[error("Template `{}` refers to an unknown option: `{}`", .0, .1)]
    UnknownTemplateOption(String, String),

    #[error("Option `{}` is a switch and does not take a value", .0)]
    FlagWithValue(String),

    #[error("Option `{}` requires a value", .0)]
    MissingValue(String),

    #[error("Option `{}` expects a number, got \"{}\"", .0, .1)]
    InvalidNumber(String, String),

    #[error("Value {} for option `{}` is out of range ({})", .value, .id, .range)]
    NumberOutOfRange {
        id: String,
        value: f64,
        range: String,
    },

    #[error("\"{}\" is not a valid choice for option `{}` (expected one of: {})", .value, .id, .choices)]
    NotAChoice {
        id: String,
        value: String,
        choices: String,
    },

    #[error("Option `{}` cannot be used in {} mode", .id, .mode)]
    IneligibleOption { id: String, mode: String },

    #[error("Invalid option argument `{}`: expected `ID` or `ID=VALUE`", .0)]
    ArgumentFormat(String),

    #[error("{} contains invalid characters: `{}`", .0, .1)]
    InvalidPath(String, String),
}

impl Error {
    pub fn empty_catalog(path: String) -> Self {
        Self::EmptyCatalog { path }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn json_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_json::Error,
    ) -> Self {
        Self::Json {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }
}
