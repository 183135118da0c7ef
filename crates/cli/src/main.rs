use std::io::{stderr, stdout};
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info, warn};
use ytdlp_commands_cli::arguments::{parse, process_command_line, resolve_option, Provider};
use ytdlp_commands_cli::cli_args::{Args, BuildArgs, Commands, ModeChoice, SettingsAction};
use ytdlp_commands_cli::output;
use ytdlp_commands_cli::search::fuzzy_search;
use ytdlp_commands_core::catalog::Catalog;
use ytdlp_commands_core::error::Error::UnknownCategory;
use ytdlp_commands_core::error::Result;
use ytdlp_commands_core::mode::Mode;
use ytdlp_commands_core::option_definitions::OptionDefinition;
use ytdlp_commands_core::preferences::{load_settings, reset_settings, save_settings};
use ytdlp_commands_core::session::Generator;
use ytdlp_commands_core::templates::{builtin_templates, find_template, QuickTemplate};
use ytdlp_commands_core::{config, file_handling};

fn build_command(
    args: &Args,
    build: &BuildArgs,
    catalog: &Catalog,
    templates: &[QuickTemplate],
) -> Result<ExitCode> {
    let preferences_path = config::get_preferences_path(&args.preferences_path);
    let settings = load_settings(&preferences_path);

    let mut generator = Generator::new(catalog, settings, args.shell.resolve());
    generator.change_mode(Mode::from(build.mode));

    if let Some(template_id) = &build.template {
        generator.apply_template(find_template(templates, template_id)?)?;
    }

    process_command_line(catalog, &mut generator, &build.get_option_arguments()?)?;

    if let Some(url) = &build.url {
        if build.mode == ModeChoice::Utility {
            warn!("Utility commands never take a URL, ignoring `{url}`");
        }
        generator.set_url(url.as_str());
    }

    if let Some(command) = generator.command() {
        println!("{command}");
        return Ok(ExitCode::SUCCESS);
    }

    output::print_issues(&mut stderr(), generator.issues())?;
    Ok(ExitCode::FAILURE)
}

fn list_options(catalog: &Catalog, category: Option<&str>, mode: Option<ModeChoice>) -> Result<()> {
    let groups: Vec<(&str, Vec<&OptionDefinition>)> = match category {
        Some(category) => {
            let options = catalog
                .category(category)
                .ok_or_else(|| UnknownCategory(category.to_string()))?;
            vec![(category, options.iter().collect())]
        }
        None => catalog
            .categories()
            .map(|(category, options)| (category, options.iter().collect()))
            .collect(),
    };

    let groups: Vec<(&str, Vec<&OptionDefinition>)> = match mode {
        Some(mode) => {
            let mode = Mode::from(mode);
            groups
                .into_iter()
                .map(|(category, options)| {
                    let options: Vec<&OptionDefinition> = options
                        .into_iter()
                        .filter(|option| mode.is_eligible(option))
                        .collect();
                    (category, options)
                })
                .filter(|(_, options)| !options.is_empty())
                .collect()
        }
        None => groups,
    };

    output::print_options(&mut stdout(), &groups)
}

fn manage_settings(args: &Args, action: &SettingsAction) -> Result<()> {
    let preferences_path = config::get_preferences_path(&args.preferences_path);
    debug!("Preferences path: `{preferences_path}`");

    let settings = match action {
        SettingsAction::Show => load_settings(&preferences_path),
        SettingsAction::Set {
            tool_path,
            ffmpeg_path,
            download_path,
        } => {
            let mut settings = load_settings(&preferences_path);
            if let Some(tool_path) = tool_path {
                settings.tool_path.clone_from(tool_path);
            }
            if let Some(ffmpeg_path) = ffmpeg_path {
                settings.helper_binary_path = Some(ffmpeg_path.clone());
            }
            if let Some(download_path) = download_path {
                settings.download_directory = Some(download_path.clone());
            }

            let settings = save_settings(&preferences_path, &settings)?;
            info!("Saved settings to `{preferences_path}`");
            settings
        }
        SettingsAction::Reset => {
            let settings = reset_settings(&preferences_path)?;
            info!("Reset settings in `{preferences_path}`");
            settings
        }
    };

    output::print_settings(&mut stdout(), &settings, &preferences_path)
}

fn execute() -> Result<ExitCode> {
    let args = Args::parse();

    let custom_catalog;
    let catalog = match config::expand_path(&args.catalog) {
        Some(catalog_path) => {
            debug!("Catalog path: `{catalog_path}`");
            custom_catalog = file_handling::get_catalog(&catalog_path)?;
            &custom_catalog
        }
        None => Catalog::builtin()?,
    };

    let custom_templates;
    let templates = match config::expand_path(&args.templates) {
        Some(templates_path) => {
            debug!("Templates path: `{templates_path}`");
            custom_templates = file_handling::get_templates(&templates_path, catalog)?;
            custom_templates.as_slice()
        }
        None => builtin_templates()?,
    };

    match &args.command {
        Commands::Build(build) => return build_command(&args, build, catalog, templates),
        Commands::List { category, mode } => list_options(catalog, category.as_deref(), *mode)?,
        Commands::Search { term } => {
            output::print_options(&mut stdout(), &fuzzy_search(catalog, term))?;
        }
        Commands::Show { option } => {
            let option = resolve_option(catalog, &parse(option)?)?;
            output::print_option_detail(&mut stdout(), catalog, option)?;
        }
        Commands::Templates => output::print_templates(&mut stdout(), templates, catalog)?,
        Commands::Settings { action } => manage_settings(&args, action)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
