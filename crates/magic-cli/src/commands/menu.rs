//! `magic` / `magic menu`: run the interactive main menu.

use std::io::{self, IsTerminal};

use tracing::{info, instrument};

use magic_adapters::{CrosstermSize, InputPreference, probe};
use magic_core::application::Session;
use magic_core::domain::MenuOutcome;

use crate::{
    cli::GlobalArgs,
    config::{AppConfig, InputMode},
    error::CliResult,
    menus,
    output::OutputManager,
    reporter::ColorReporter,
};

#[instrument(skip_all)]
pub fn execute(args: &GlobalArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let preference = input_preference(args, config);
    let plain = !io::stdout().is_terminal();
    let settings = config.display_settings(args.no_color, plain);

    let mut session = Session::builder()
        .settings(settings)
        .keys(probe(preference)?)
        .output(Box::new(io::stdout()))
        .size_source(Box::new(CrosstermSize))
        .reporter(Box::new(ColorReporter::new(settings.color)))
        .build()?;

    let outcome = menus::main_menu(config).run(&mut session)?;
    info!(%outcome, "Main menu closed");

    match outcome {
        MenuOutcome::Cancelled => output.info("Cancelled")?,
        _ => output.success("Goodbye!")?,
    }
    Ok(())
}

/// `--input` wins over `input.mode`.
fn input_preference(args: &GlobalArgs, config: &AppConfig) -> InputPreference {
    let mode = args.input.map(InputMode::from).unwrap_or(config.input.mode);
    match mode {
        InputMode::Auto => InputPreference::Auto,
        InputMode::Raw => InputPreference::Raw,
        InputMode::Line => InputPreference::Line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::InputArg;

    fn args(input: Option<InputArg>) -> GlobalArgs {
        GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: true,
            config: None,
            input,
            log_file: None,
        }
    }

    #[test]
    fn flag_overrides_config() {
        let mut config = AppConfig::default();
        config.input.mode = InputMode::Raw;
        assert_eq!(
            input_preference(&args(Some(InputArg::Line)), &config),
            InputPreference::Line
        );
    }

    #[test]
    fn config_used_without_flag() {
        let mut config = AppConfig::default();
        config.input.mode = InputMode::Line;
        assert_eq!(input_preference(&args(None), &config), InputPreference::Line);
        assert_eq!(
            input_preference(&args(None), &AppConfig::default()),
            InputPreference::Auto
        );
    }
}
