#[cfg(test)]
mod tests {
    use clap::Parser;
    use ytdlp_commands_cli::arguments::{parse, process_command_line, resolve_option, Provider};
    use ytdlp_commands_cli::cli_args::{Args, Commands};
    use ytdlp_commands_core::assembler::Shell;
    use ytdlp_commands_core::catalog::Catalog;
    use ytdlp_commands_core::error::Error;
    use ytdlp_commands_core::mode::Mode;
    use ytdlp_commands_core::preferences::LocalSettings;
    use ytdlp_commands_core::session::Generator;

    fn build_args(argv: &[&str]) -> ytdlp_commands_cli::cli_args::BuildArgs {
        let mut full = vec!["ytc", "build"];
        full.extend_from_slice(argv);

        match Args::parse_from(full).command {
            Commands::Build(build) => build,
            other => panic!("Expected build command, got {other:?}"),
        }
    }

    #[test]
    fn test_command_line_to_command() {
        let catalog = Catalog::builtin().unwrap();
        let build = build_args(&[
            "-s",
            "--audio-format=mp3",
            "-s",
            "extract-audio",
            "https://example.com/v",
        ]);

        let mut generator = Generator::new(catalog, LocalSettings::default(), Shell::Posix);
        process_command_line(catalog, &mut generator, &build.get_option_arguments().unwrap())
            .unwrap();
        generator.set_url(build.url.unwrap());

        // Catalog order, not command-line order
        assert_eq!(
            generator.command(),
            Some("yt-dlp --extract-audio --audio-format \"mp3\" \"https://example.com/v\"")
        );
    }

    #[test]
    fn test_flag_and_id_address_the_same_option() {
        let catalog = Catalog::builtin().unwrap();

        let by_id = resolve_option(catalog, &parse("embed-subs").unwrap()).unwrap();
        let by_flag = resolve_option(catalog, &parse("--embed-subs").unwrap()).unwrap();
        assert_eq!(by_id.id, by_flag.id);

        let by_short_flag = resolve_option(catalog, &parse("-x").unwrap()).unwrap();
        assert_eq!(by_short_flag.id, "extract-audio");
    }

    #[test]
    fn test_mode_restricts_command_line_options() {
        let catalog = Catalog::builtin().unwrap();
        let build = build_args(&["--mode", "info", "-s", "format=best"]);

        let mut generator = Generator::new(catalog, LocalSettings::default(), Shell::Posix);
        generator.change_mode(Mode::from(build.mode));

        let result =
            process_command_line(catalog, &mut generator, &build.get_option_arguments().unwrap());
        assert!(matches!(result, Err(Error::IneligibleOption { .. })));
    }

    #[test]
    fn test_powershell_quoting_from_command_line() {
        let catalog = Catalog::builtin().unwrap();
        let build = build_args(&["-s", "output=say \"hi\" $HOME", "https://example.com/v"]);

        let mut generator = Generator::new(catalog, LocalSettings::default(), Shell::PowerShell);
        process_command_line(catalog, &mut generator, &build.get_option_arguments().unwrap())
            .unwrap();
        generator.set_url(build.url.unwrap());

        assert_eq!(
            generator.command(),
            Some("yt-dlp --output \"say \"\"hi\"\" `$HOME\" \"https://example.com/v\"")
        );
    }

    #[test]
    fn test_malformed_argument() {
        let build = build_args(&["-s", "=mp3"]);
        assert!(matches!(
            build.get_option_arguments(),
            Err(Error::ArgumentFormat(_))
        ));
    }
}
