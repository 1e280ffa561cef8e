//! Running external programs for menu actions.

use std::process::Command;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, instrument};

use magic_core::application::Session;

use crate::error::{CliError, CliResult};

/// Run `program args..` to completion and return its stdout.
///
/// Shows a spinner on stderr while it runs if animations are on. A non-zero
/// exit becomes [`CliError::ExternalCommandFailed`] carrying the program's
/// stderr.
#[instrument(skip(session))]
pub fn run(session: &Session, program: &str, args: &[&str]) -> CliResult<String> {
    let command = std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");

    let spinner = session.settings().animations.then(|| spinner(&command));
    let result = Command::new(program).args(args).output();
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let output = result.map_err(|e| CliError::ExternalCommandFailed {
        command: command.clone(),
        source: Some(Box::new(e)),
    })?;
    debug!(status = %output.status, "Command finished");

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
        let reason = if stderr.is_empty() {
            output.status.to_string()
        } else {
            stderr
        };
        return Err(CliError::ExternalCommandFailed {
            command,
            source: Some(reason.into()),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
