use log::debug;
use ytdlp_commands_core::catalog::Catalog;
use ytdlp_commands_core::error::Error::UnknownOption;
use ytdlp_commands_core::error::Result;
use ytdlp_commands_core::option_definitions::OptionDefinition;
use ytdlp_commands_core::session::Generator;

use crate::arguments::parsing::OptionArgument;

/// Finds the option an argument refers to, by flag text or by ID.
///
/// # Errors
///
/// Returns [`UnknownOption`] if no option matches.
pub fn resolve_option<'c>(
    catalog: &'c Catalog,
    argument: &OptionArgument,
) -> Result<&'c OptionDefinition> {
    let option = if argument.is_flag() {
        catalog.find_by_flag(&argument.key)
    } else {
        catalog.get(&argument.key)
    };

    option.ok_or_else(|| UnknownOption(argument.key.clone()))
}

/// Applies command-line option arguments to the session, in order.
///
/// A later argument for the same option replaces the earlier value.
///
/// # Errors
///
/// Returns an error if:
/// - An argument refers to an unknown option
/// - The option is not available in the session's mode
/// - The value does not fit the option
pub fn process_command_line(
    catalog: &Catalog,
    generator: &mut Generator<'_>,
    arguments: &[OptionArgument],
) -> Result<()> {
    for argument in arguments {
        let option = resolve_option(catalog, argument)?;
        debug!("Setting `{}` from `{}`", option.id, argument.key);

        generator.set_option_argument(&option.id, argument.value.as_deref())?;
    }

    Ok(())
}
