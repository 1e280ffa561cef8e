//! Git Operations.

use std::env;
use std::process::Command;

use tracing::info;

use magic_core::application::services::CONTINUE_PROMPT;
use magic_core::application::{Menu, Session, prompts};
use magic_core::domain::{ActionResult, Signal};

use super::{external, section};
use crate::error::{CliError, CliResult};

const LOG_LIMIT: &str = "20";

pub fn menu() -> Menu {
    Menu::new("Git Operations")
        .item("Status", |s| show(s, "Status", &["status", "--short", "--branch"]))
        .item("Log", |s| {
            show(s, "Log", &["log", "--oneline", "--graph", "--decorate", "-n", LOG_LIMIT])
        })
        .item("Diff", |s| show(s, "Diff", &["diff", "--stat"]))
        .item("Branches", |s| show(s, "Branches", &["branch", "--all", "-vv"]))
        .item("Switch Branch", switch_branch)
        .item("Pull", pull)
        .item("Back", |_| Ok(Signal::Exit))
}

/// Run a read-only git command and show what it printed.
fn show(session: &mut Session, title: &str, args: &[&str]) -> ActionResult {
    ensure_repository()?;
    let text = external::run(session, "git", args)?;
    let body = if text.trim().is_empty() {
        "(nothing to show)"
    } else {
        text.as_str()
    };
    section(session, title, body)?;
    session.pause(CONTINUE_PROMPT)?;
    Ok(Signal::Stay)
}

fn switch_branch(session: &mut Session) -> ActionResult {
    ensure_repository()?;
    let listing = external::run(session, "git", &["branch", "--format=%(refname:short)"])?;
    let branches = local_branches(&listing);

    let Some(branch) = prompts::select(session, "Switch Branch", &branches)? else {
        return Ok(Signal::Stay);
    };
    external::run(session, "git", &["switch", branch.as_str()])?;
    info!(%branch, "Switched branch");

    section(session, "Switch Branch", &format!("Now on '{branch}'"))?;
    session.pause(CONTINUE_PROMPT)?;
    Ok(Signal::Stay)
}

fn pull(session: &mut Session) -> ActionResult {
    ensure_repository()?;
    if !prompts::confirm(session, "Pull from the tracked remote?")? {
        return Ok(Signal::Stay);
    }
    let text = external::run(session, "git", &["pull", "--ff-only"])?;
    section(session, "Pull", &text)?;
    session.pause(CONTINUE_PROMPT)?;
    Ok(Signal::Stay)
}

fn ensure_repository() -> CliResult<()> {
    let output = Command::new("git")
        .args(["rev-parse", "--is-inside-work-tree"])
        .output()
        .map_err(|e| CliError::ExternalCommandFailed {
            command: "git rev-parse --is-inside-work-tree".into(),
            source: Some(Box::new(e)),
        })?;

    if output.status.success() {
        return Ok(());
    }
    let path = env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| ".".into());
    Err(CliError::NotGitRepository { path })
}

fn local_branches(listing: &str) -> Vec<&str> {
    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
