//! Tracing subscriber initialisation.
//!
//! Only the CLI crate is allowed to call [`init_logging`]; `magic-core` and
//! `magic-adapters` only *emit* spans and events.
//!
//! # Verbosity mapping
//!
//! | Flag(s)  | Filter level |
//! |----------|--------------|
//! | (none)   | `logging.level`, else WARN |
//! | `-v`     | INFO         |
//! | `-vv`    | DEBUG        |
//! | `-vvv`   | TRACE        |
//! | `--quiet`| ERROR        |
//!
//! `RUST_LOG` overrides all of the above if set.
//!
//! # Destination
//!
//! The menu repaints the whole screen, so log lines on stderr would be
//! overwritten or would corrupt the frame. With `--log-file` (or
//! `logging.file`) events go to that file through a non-blocking writer
//! instead.

use std::io::IsTerminal as _;
use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;
use crate::config::LoggingConfig;

/// Initialise the global tracing subscriber.
///
/// Must be called exactly once, before any tracing macros fire. When logging
/// to a file the returned guard must be held until exit; dropping it flushes
/// the writer.
pub fn init_logging(args: &GlobalArgs, config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let level = derive_level(args, config.level.as_deref());

    // RUST_LOG wins; otherwise every crate of ours gets the same level.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "magic={level},magic_core={level},magic_adapters={level}"
        ))
    });

    let file = args.log_file.as_deref().or(config.file.as_deref());
    let registry = tracing_subscriber::registry().with(filter);

    let guard = match file {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(open_log_file(path)?);
            let layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer);
            registry
                .with(layer)
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;
            Some(guard)
        }
        None => {
            let use_ansi = !args.no_color && std::io::stderr().is_terminal();
            let layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr);
            registry
                .with(layer)
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;
            None
        }
    };

    Ok(guard)
}

/// Append-only writer for `path`, creating its directory if needed.
fn open_log_file(path: &Path) -> anyhow::Result<RollingFileAppender> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let name = path
        .file_name()
        .with_context(|| format!("Log file path has no file name: {}", path.display()))?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Cannot create log directory {}", dir.display()))?;
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name.to_string_lossy())
        .build(dir)
        .with_context(|| format!("Cannot open log file {}", path.display()))
}

/// Translate the verbosity counter + quiet flag to a level string.
///
/// Flags win over the configured level; the configured level wins over the
/// built-in default.
fn derive_level<'a>(args: &GlobalArgs, configured: Option<&'a str>) -> &'a str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => configured.unwrap_or("warn"),
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::GlobalArgs;

    fn args_with(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            config: None,
            input: None,
            log_file: None,
        }
    }

    #[test]
    fn level_quiet() {
        assert_eq!(derive_level(&args_with(0, true), None), "error");
    }

    #[test]
    fn level_default() {
        assert_eq!(derive_level(&args_with(0, false), None), "warn");
    }

    #[test]
    fn level_from_config_when_no_flags() {
        assert_eq!(derive_level(&args_with(0, false), Some("debug")), "debug");
        assert_eq!(derive_level(&args_with(1, false), Some("debug")), "info");
    }

    #[test]
    fn level_verbose_three_plus() {
        assert_eq!(derive_level(&args_with(3, false), None), "trace");
        assert_eq!(derive_level(&args_with(10, false), None), "trace");
    }

    // quiet takes precedence over verbose
    #[test]
    fn quiet_overrides_verbose() {
        assert_eq!(derive_level(&args_with(3, true), Some("info")), "error");
    }

    #[test]
    fn log_file_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("magic.log");
        open_log_file(&path).unwrap();
        assert!(dir.path().join("nested").is_dir());
    }
}
