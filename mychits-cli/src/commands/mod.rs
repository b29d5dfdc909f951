//! CLI command implementations

pub mod enrolled;
pub mod format;
pub mod groups;
pub mod login;
pub mod register;
pub mod status;

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{Context, Result};
use dialoguer::{Input, Password};
use tracing::debug;

use mychits_core::config::Config;
use mychits_core::MyChitsContext;

/// Get the MyChits directory from environment or default
pub fn get_mychits_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("MYCHITS_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".mychits"))
        .context("Could not find home directory; set MYCHITS_DIR")
}

/// Build the context, seeding the session with `--user` when given
pub fn get_context(user: Option<&str>) -> Result<MyChitsContext> {
    let mychits_dir = get_mychits_dir()?;
    let config = Config::load(&mychits_dir)
        .with_context(|| format!("Failed to load settings from {:?}", mychits_dir))?;
    let ctx = MyChitsContext::new(config)?;

    if let Some(user) = user.map(str::trim).filter(|u| !u.is_empty()) {
        ctx.session.set_user_id(user);
    }
    Ok(ctx)
}

/// Start-up connectivity probe. A failed probe keeps the optimistic default.
pub fn startup_probe(ctx: &MyChitsContext) {
    if let Err(e) = ctx.connectivity.fetch_current(ctx.probe.as_ref()) {
        debug!(error = %e, "start-up probe gave no answer");
    }
}

/// Use the flag, or prompt
pub fn value_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::<String>::new().with_prompt(prompt).interact_text()?),
    }
}

/// Get password from --password flag, MYCHITS_PASSWORD env var, piped stdin, or prompt
pub fn password_or_prompt(password_flag: Option<String>, confirm: bool) -> Result<String> {
    if let Some(p) = password_flag {
        return Ok(p);
    }

    if let Ok(p) = std::env::var("MYCHITS_PASSWORD") {
        return Ok(p);
    }

    if atty::isnt(atty::Stream::Stdin) {
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        return Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string());
    }

    let mut prompt = Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    Ok(prompt.interact()?)
}
