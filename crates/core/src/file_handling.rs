//! File handling for catalogs, templates and the preferences store.

use std::fs::{self, File};
use std::path::Path;

use log::debug;
use serde_json::{Map, Value};

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::templates::{self, QuickTemplate};

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    match File::open(path) {
        Ok(reader) => Ok(reader),
        Err(e) => Err(Error::io_error(
            file_description.to_string(),
            path.to_string(),
            e,
        )),
    }
}

/// Loads and validates an option catalog from a YAML file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The YAML is malformed or doesn't match the catalog structure
/// - The catalog is empty
/// - Option IDs are invalid or non-unique
///
/// # Examples
///
/// ```no_run
/// use ytdlp_commands_core::file_handling::get_catalog;
///
/// let catalog = get_catalog("./options.yml")?;
/// println!("Loaded {} options", catalog.len());
/// # Ok::<(), ytdlp_commands_core::error::Error>(())
/// ```
pub fn get_catalog(catalog_path: &str) -> Result<Catalog> {
    let reader = get_reader("catalog", catalog_path)?;
    Catalog::from_reader(reader, catalog_path)
}

/// Loads quick templates from a YAML file and checks them against `catalog`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or a template is invalid.
pub fn get_templates(templates_path: &str, catalog: &Catalog) -> Result<Vec<QuickTemplate>> {
    let reader = get_reader("templates", templates_path)?;

    let parsed: serde_yaml::Result<Vec<QuickTemplate>> = serde_yaml::from_reader(reader);

    let parsed = parsed.map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "templates".to_string(),
            templates_path.to_string(),
            e,
        )
    })?;

    templates::validate_templates(&parsed, catalog)?;

    Ok(parsed)
}

/// Reads the preferences store: a JSON object of key to stored value.
///
/// Returns None if the file doesn't exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, or is not a JSON object.
pub fn read_preferences_store(path: &str) -> Result<Option<Map<String, Value>>> {
    if !Path::exists(Path::new(path)) {
        return Ok(None);
    }

    let reader = get_reader("preferences", path)?;

    // Not shortened with `?` so the error keeps the file context
    let store: serde_json::Result<Map<String, Value>> = serde_json::from_reader(reader);

    match store {
        Ok(store) => Ok(Some(store)),
        Err(e) => Err(Error::json_error(
            "reading".to_string(),
            "preferences".to_string(),
            path.to_string(),
            e,
        )),
    }
}

/// Writes the preferences store, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created, or serialization fails.
pub fn write_preferences_store(path: &str, store: &Map<String, Value>) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::io_error("preferences".to_string(), path.to_string(), e)
            })?;
        }
    }

    let f = File::create(path)
        .map_err(|e| Error::io_error("preferences".to_string(), path.to_string(), e))?;

    debug!("Writing preferences to `{path}`");

    serde_json::to_writer_pretty(f, store).map_err(|e| {
        Error::json_error(
            "writing".to_string(),
            "preferences".to_string(),
            path.to_string(),
            e,
        )
    })
}
