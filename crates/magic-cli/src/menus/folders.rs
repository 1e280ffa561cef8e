//! Navigate Folders: change the working directory from a menu.

use std::env;
use std::fs;
use std::io;
use std::path::Path;

use tracing::info;

use magic_core::application::{Session, prompts};
use magic_core::domain::{ActionResult, Signal};

use crate::error::IntoCli;

const PARENT: &str = "..";

pub fn navigate(session: &mut Session) -> ActionResult {
    let cwd = env::current_dir().with_cli_context(|| "Cannot read the current directory")?;
    let mut options = vec![PARENT.to_owned()];
    options.extend(subdirectories(&cwd)?);

    if let Some(choice) = prompts::select(session, "Navigate Folders", &options)? {
        let target = cwd.join(&choice);
        env::set_current_dir(&target)
            .with_cli_context(|| format!("Cannot enter {}", target.display()))?;
        info!(dir = %target.display(), "Changed directory");
    }
    Ok(Signal::Stay)
}

/// Visible subdirectory names of `dir`, sorted.
fn subdirectories(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with('.') {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}
